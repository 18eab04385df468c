//! Decimal rounding of results.
//!
//! Rounding is applied to the exact binary value of the float, with ties
//! going to the even digit. A literal such as `1.005` is stored slightly below
//! the tie, so it rounds down to `1.0` at two digits.

/// Beyond this many digits rounding can no longer change any finite `f64`.
const MAX_SIGNIFICANT_DIGITS: i32 = 323;

/// Rounding to this many places left of the point zeroes any finite `f64`.
const MAX_INTEGER_PLACES: u32 = 310;

/// Round `value` to `digits` decimal places, ties to even.
///
/// A negative `digits` rounds left of the decimal point: `-2` rounds to a
/// multiple of 100. Non-finite values are returned unchanged; a finite value
/// may round to infinity only for negative `digits`.
pub fn round_half_even(value: f64, digits: i32) -> f64 {
    if !value.is_finite() || digits > MAX_SIGNIFICANT_DIGITS {
        return value;
    }
    if digits < 0 {
        return round_integer_places(value, digits.unsigned_abs());
    }

    // Float formatting is exact and breaks ties to even, and parsing the
    // shortest decimal back is exact as well.
    format!("{:.*}", digits as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Round to a multiple of `10^places` using the exact decimal digits of `value`.
fn round_integer_places(value: f64, places: u32) -> f64 {
    if places > MAX_INTEGER_PLACES {
        return 0.0_f64.copysign(value);
    }
    let places = places as usize;

    let whole = value.trunc();
    let has_fraction = whole != value;
    let digits = format!("{:0>width$.0}", whole.abs(), width = places + 1);
    let (head, tail) = digits.split_at(digits.len() - places);

    let mut tail_digits = tail.bytes();
    let first = tail_digits.next().unwrap_or(b'0');
    let beyond_half = has_fraction || tail_digits.any(|d| d != b'0');
    let head_is_odd = head.bytes().last().is_some_and(|d| (d - b'0') % 2 == 1);

    let round_up = first > b'5' || (first == b'5' && (beyond_half || head_is_odd));
    let head = if round_up {
        increment(head)
    } else {
        head.to_string()
    };

    let magnitude: f64 = format!("{}{}", head, "0".repeat(places))
        .parse()
        .unwrap_or(f64::INFINITY);
    magnitude.copysign(value)
}

/// Add one to a string of decimal digits.
fn increment(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for d in out.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return out.into_iter().map(char::from).collect();
        }
    }
    std::iter::once('1')
        .chain(out.into_iter().map(char::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_float_noise() {
        assert_eq!(round_half_even(0.1 + 0.2, 10), 0.3);
        assert_eq!(round_half_even(1.1 * 3.0, 10), 3.3);
    }

    #[test]
    fn test_binary_value_decides_near_ties() {
        // 1.005 is 1.00499999999999989...
        assert_eq!(round_half_even(1.005, 2), 1.0);
        // 2.675 is 2.67499999999999982...
        assert_eq!(round_half_even(2.675, 2), 2.67);
    }

    #[test]
    fn test_exact_ties_go_to_even() {
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(-2.5, 0), -2.0);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let first = round_half_even(1.005, 2);
        for _ in 0..100 {
            assert_eq!(round_half_even(1.005, 2).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_keeps_sign_of_small_negatives() {
        let rounded = round_half_even(-0.0001, 2);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_negative());
    }

    #[test]
    fn test_large_precision_is_identity() {
        let tiny = f64::MIN_POSITIVE / 4.0;
        assert_eq!(round_half_even(tiny, 400), tiny);
        assert_eq!(round_half_even(1.0 / 3.0, 30), 1.0 / 3.0);
    }

    #[test]
    fn test_negative_digits_round_left_of_the_point() {
        assert_eq!(round_half_even(1234.5, -2), 1200.0);
        assert_eq!(round_half_even(1250.0, -2), 1200.0);
        assert_eq!(round_half_even(1350.0, -2), 1400.0);
        assert_eq!(round_half_even(1250.000001, -2), 1300.0);
        assert_eq!(round_half_even(15.0, -1), 20.0);
        assert_eq!(round_half_even(25.0, -1), 20.0);
        assert_eq!(round_half_even(9999.0, -3), 10000.0);
        assert_eq!(round_half_even(-7.0, -1), -10.0);
        assert_eq!(round_half_even(49.0, -2), 0.0);
        assert_eq!(round_half_even(50.0, -2), 0.0);
        assert_eq!(round_half_even(51.0, -2), 100.0);
    }

    #[test]
    fn test_negative_digits_edges() {
        let zero = round_half_even(-4.0, -1);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_negative());

        assert_eq!(round_half_even(1e300, -400), 0.0);
        assert_eq!(round_half_even(1e300, -300), 1e300);
        assert_eq!(round_half_even(f64::MAX, -308), f64::INFINITY);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_half_even(f64::NAN, 2).is_nan());
        assert_eq!(round_half_even(f64::INFINITY, 2), f64::INFINITY);
    }
}
