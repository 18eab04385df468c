//! Evaluator facade: parse, validate, reduce, round.

use tracing::{debug, instrument};

use super::ast::BinaryOperator;
use super::error::{CalcError, CalcResult};
use super::parser::parse;
use super::reduce::{apply_binary, reduce};
use super::rounding::round_half_even;
use super::validate::validate;
use crate::core::config::CalculatorConfig;

/// Stateless arithmetic evaluator.
///
/// Holds only the read-only precision, so a single instance can be shared by
/// every concurrent request.
#[derive(Debug, Clone)]
pub struct Evaluator {
    precision: i32,
}

impl Evaluator {
    /// Create an evaluator from the calculator configuration.
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            precision: config.max_precision,
        }
    }

    /// Number of decimal digits results are rounded to.
    ///
    /// Negative values round to tens, hundreds and so on.
    pub fn precision(&self) -> i32 {
        self.precision
    }

    /// Evaluate an arithmetic expression.
    #[instrument(skip(self), level = "debug")]
    pub fn evaluate(&self, expression: &str) -> CalcResult<f64> {
        let syntax = parse(expression)?;
        let node = validate(&syntax)?;
        let value = reduce(&node)?;
        debug!(value, "Reduced expression");
        self.round(value)
    }

    /// Round a finished value to the configured precision.
    ///
    /// With a negative precision a value near `f64::MAX` can round past it,
    /// which is a [`CalcError::Numeric`] error.
    pub fn round(&self, value: f64) -> CalcResult<f64> {
        let rounded = round_half_even(value, self.precision);
        if value.is_finite() && !rounded.is_finite() {
            return Err(CalcError::numeric("rounded value too large to represent"));
        }
        Ok(rounded)
    }

    pub fn add(&self, a: f64, b: f64) -> CalcResult<f64> {
        self.binary(BinaryOperator::Add, a, b)
    }

    pub fn subtract(&self, a: f64, b: f64) -> CalcResult<f64> {
        self.binary(BinaryOperator::Sub, a, b)
    }

    pub fn multiply(&self, a: f64, b: f64) -> CalcResult<f64> {
        self.binary(BinaryOperator::Mul, a, b)
    }

    /// Divide `a` by `b`; a zero denominator is [`CalcError::DivisionByZero`].
    pub fn divide(&self, a: f64, b: f64) -> CalcResult<f64> {
        self.binary(BinaryOperator::Div, a, b)
    }

    pub fn power(&self, base: f64, exponent: f64) -> CalcResult<f64> {
        self.binary(BinaryOperator::Pow, base, exponent)
    }

    /// Square root; a negative radicand is a [`CalcError::Domain`] error.
    pub fn sqrt(&self, n: f64) -> CalcResult<f64> {
        check_operand(n)?;
        if n < 0.0 {
            return Err(CalcError::domain(
                "Cannot calculate square root of negative number",
            ));
        }
        self.round(n.sqrt())
    }

    fn binary(&self, op: BinaryOperator, left: f64, right: f64) -> CalcResult<f64> {
        check_operand(left)?;
        check_operand(right)?;
        self.round(apply_binary(op, left, right)?)
    }
}

fn check_operand(value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::numeric("operand is not a finite number"))
    }
}
