//! Property-based tests for the calculator
//!
//! These tests verify invariants that must hold for all inputs:
//! - Single operations agree with rounded float arithmetic
//! - Guarded operations always fail on their guard
//! - The evaluator never panics and is deterministic
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

use calculator_mcp_server::core::config::CalculatorConfig;
use calculator_mcp_server::domains::calculator::rounding::round_half_even;
use calculator_mcp_server::domains::calculator::{CalcError, ErrorKind, Evaluator};

fn evaluator() -> Evaluator {
    Evaluator::new(&CalculatorConfig::default())
}

/// Finite operands well inside the range where no operation overflows.
fn operand() -> impl Strategy<Value = f64> {
    -1.0e12..1.0e12f64
}

// ============================================================================
// SINGLE OPERATION TESTS
// ============================================================================

mod operation_tests {
    use super::*;

    proptest! {
        /// Invariant: add(a, b) == round(a + b, P)
        #[test]
        fn add_is_rounded_sum(a in operand(), b in operand()) {
            prop_assert_eq!(evaluator().add(a, b), Ok(round_half_even(a + b, 10)));
        }

        /// Invariant: subtract(a, b) == round(a - b, P)
        #[test]
        fn subtract_is_rounded_difference(a in operand(), b in operand()) {
            prop_assert_eq!(evaluator().subtract(a, b), Ok(round_half_even(a - b, 10)));
        }

        /// Invariant: multiply(a, b) == round(a * b, P)
        #[test]
        fn multiply_is_rounded_product(a in operand(), b in operand()) {
            prop_assert_eq!(evaluator().multiply(a, b), Ok(round_half_even(a * b, 10)));
        }

        /// Invariant: divide(a, b) == round(a / b, P) for any non-zero b
        #[test]
        fn divide_is_rounded_quotient(a in operand(), b in operand()) {
            prop_assume!(b != 0.0);
            prop_assert_eq!(evaluator().divide(a, b), Ok(round_half_even(a / b, 10)));
        }

        /// Invariant: divide(a, 0) is always a division-by-zero error
        #[test]
        fn divide_by_zero_always_fails(a in operand()) {
            prop_assert_eq!(evaluator().divide(a, 0.0), Err(CalcError::DivisionByZero));
        }

        /// Invariant: sqrt(n) is a domain error for every negative n
        #[test]
        fn sqrt_of_negative_fails(n in -1.0e12..-1.0e-12f64) {
            let err = evaluator().sqrt(n).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::DomainError);
        }

        /// Invariant: power with small integer operands matches powi
        #[test]
        fn power_matches_powi(base in -20i32..20, exponent in 0i32..8) {
            let expected = round_half_even(f64::from(base).powi(exponent), 10);
            prop_assert_eq!(
                evaluator().power(f64::from(base), f64::from(exponent)),
                Ok(expected)
            );
        }
    }
}

// ============================================================================
// EXPRESSION EVALUATION TESTS
// ============================================================================

mod expression_tests {
    use super::*;

    proptest! {
        /// Invariant: evaluate never panics on any string input
        #[test]
        fn never_panics(s in ".*") {
            let _ = evaluator().evaluate(&s);
        }

        /// Invariant: evaluate never panics on dense arithmetic-looking input
        #[test]
        fn never_panics_on_operator_soup(s in "[0-9+*/^() .eE_-]{0,128}") {
            let _ = evaluator().evaluate(&s);
        }

        /// Invariant: the same input always gives the same outcome
        #[test]
        fn idempotent(s in "[0-9+*/^() .-]{0,64}") {
            let evaluator = evaluator();
            prop_assert_eq!(evaluator.evaluate(&s), evaluator.evaluate(&s));
        }

        /// Invariant: successful results are already rounded
        #[test]
        fn results_are_rounded(s in "[0-9+*/^() .-]{1,64}") {
            if let Ok(value) = evaluator().evaluate(&s) {
                prop_assert!(value.is_finite());
                prop_assert_eq!(round_half_even(value, 10), value);
            }
        }

        /// Invariant: an expression agrees with the matching single operation
        #[test]
        fn expression_matches_operation(a in -1_000_000i32..1_000_000, b in 1i32..1_000_000) {
            let evaluator = evaluator();
            let (a, b) = (f64::from(a), f64::from(b));
            prop_assert_eq!(evaluator.evaluate(&format!("{a} + {b}")), evaluator.add(a, b));
            prop_assert_eq!(evaluator.evaluate(&format!("{a} * {b}")), evaluator.multiply(a, b));
            prop_assert_eq!(evaluator.evaluate(&format!("{a} / {b}")), evaluator.divide(a, b));
        }

        /// Invariant: identifiers are never evaluated
        #[test]
        fn names_are_rejected(name in "[a-z_][a-z0-9_]{0,16}") {
            let keywords = [
                "and", "or", "not", "in", "is", "if", "else", "lambda", "import", "from",
            ];
            prop_assume!(!keywords.contains(&name.as_str()));
            let err = evaluator().evaluate(&format!("1 + {name}")).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::UnsupportedOperationError);
        }
    }
}
