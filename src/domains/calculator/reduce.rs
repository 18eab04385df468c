//! Bottom-up reduction of a validated tree to a single number.

use super::ast::{BinaryOperator, Node, UnaryOperator};
use super::error::{CalcError, CalcResult};

const OUT_OF_RANGE: &str = "Numerical result out of range";

/// Reduce a validated tree to its (unrounded) value.
pub fn reduce(node: &Node) -> CalcResult<f64> {
    match node {
        Node::Literal(value) => literal(*value),
        Node::BinaryOp { op, left, right } => apply_binary(*op, reduce(left)?, reduce(right)?),
        Node::UnaryOp { op, operand } => apply_unary(*op, reduce(operand)?),
    }
}

fn literal(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::numeric("numeric literal out of range"))
    }
}

/// Apply one binary operator to two finite operands.
pub fn apply_binary(op: BinaryOperator, left: f64, right: f64) -> CalcResult<f64> {
    let value = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            left / right
        }
        BinaryOperator::Pow => power(left, right)?,
    };
    finite(value)
}

/// Apply one unary operator to a finite operand.
pub fn apply_unary(op: UnaryOperator, operand: f64) -> CalcResult<f64> {
    match op {
        UnaryOperator::Neg => Ok(-operand),
    }
}

fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(CalcError::domain(
            "negative number cannot be raised to a fractional power",
        ));
    }
    Ok(base.powf(exponent))
}

fn finite(value: f64) -> CalcResult<f64> {
    if value.is_nan() {
        Err(CalcError::numeric("result is not a number"))
    } else if value.is_infinite() {
        Err(CalcError::numeric(OUT_OF_RANGE))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: f64) -> Node {
        Node::Literal(value)
    }

    #[test]
    fn test_reduce_tree() {
        // 2 + 3 * 4
        let node = Node::binary(
            BinaryOperator::Add,
            lit(2.0),
            Node::binary(BinaryOperator::Mul, lit(3.0), lit(4.0)),
        );
        assert_eq!(reduce(&node), Ok(14.0));
    }

    #[test]
    fn test_negation() {
        assert_eq!(reduce(&Node::neg(lit(2.5))), Ok(-2.5));
        assert_eq!(reduce(&Node::neg(Node::neg(lit(2.5)))), Ok(2.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply_binary(BinaryOperator::Div, 1.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            apply_binary(BinaryOperator::Div, 1.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            apply_binary(BinaryOperator::Div, 0.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_zero_to_negative_power() {
        assert_eq!(
            apply_binary(BinaryOperator::Pow, 0.0, -1.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(apply_binary(BinaryOperator::Pow, 0.0, 0.0), Ok(1.0));
    }

    #[test]
    fn test_negative_base_fractional_exponent() {
        let err = apply_binary(BinaryOperator::Pow, -8.0, 1.0 / 3.0).unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));
        assert_eq!(apply_binary(BinaryOperator::Pow, -2.0, 3.0), Ok(-8.0));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            apply_binary(BinaryOperator::Pow, 10.0, 400.0),
            Err(CalcError::numeric(OUT_OF_RANGE))
        );
        assert_eq!(
            apply_binary(BinaryOperator::Mul, f64::MAX, 2.0),
            Err(CalcError::numeric(OUT_OF_RANGE))
        );
    }

    #[test]
    fn test_non_finite_literal() {
        assert!(matches!(reduce(&lit(f64::INFINITY)), Err(CalcError::Numeric(_))));
    }
}
