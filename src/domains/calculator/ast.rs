//! Validated arithmetic tree.
//!
//! A [`Node`] can only be built from literals, the five arithmetic operators
//! and negation. Anything else is unrepresentable, so reduction never has to
//! consider it.

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Unary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
}

/// One node of a validated arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(f64),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Node>,
    },
}

impl Node {
    /// Build a binary node.
    pub fn binary(op: BinaryOperator, left: Node, right: Node) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a negation node.
    pub fn neg(operand: Node) -> Self {
        Self::UnaryOp {
            op: UnaryOperator::Neg,
            operand: Box::new(operand),
        }
    }
}
