//! Allow-list validation from the general syntax tree to [`Node`].
//!
//! Every syntax kind is matched explicitly. A construct is accepted only if it
//! maps onto a [`Node`] variant; everything else is rejected by name, and the
//! whole tree is validated before anything is reduced.

use tracing::warn;

use super::ast::{BinaryOperator, Node};
use super::error::{CalcError, CalcResult};
use super::syntax::{BinOp, Syntax, UnaryOp};

/// Convert a parsed tree into an arithmetic tree, rejecting anything else.
pub fn validate(syntax: &Syntax) -> CalcResult<Node> {
    convert(syntax).inspect_err(|e| warn!("Rejected expression: {}", e))
}

fn convert(syntax: &Syntax) -> CalcResult<Node> {
    match syntax {
        Syntax::Number(value) => Ok(Node::Literal(*value)),
        Syntax::Binary { op, left, right } => {
            let op = binary_operator(*op)?;
            Ok(Node::binary(op, convert(left)?, convert(right)?))
        }
        Syntax::Unary { op, operand } => match op {
            UnaryOp::Neg => Ok(Node::neg(convert(operand)?)),
            UnaryOp::Pos | UnaryOp::Invert | UnaryOp::Not => {
                Err(CalcError::unsupported(op.name()))
            }
        },
        Syntax::Str(_)
        | Syntax::Bool(_)
        | Syntax::NoneLiteral
        | Syntax::Name(_)
        | Syntax::Compare { .. }
        | Syntax::BoolOp { .. }
        | Syntax::IfExp { .. }
        | Syntax::Lambda { .. }
        | Syntax::Call { .. }
        | Syntax::Attribute { .. }
        | Syntax::Subscript { .. }
        | Syntax::Tuple(_)
        | Syntax::List(_)
        | Syntax::Import(_) => Err(CalcError::unsupported(syntax.kind())),
    }
}

fn binary_operator(op: BinOp) -> CalcResult<BinaryOperator> {
    match op {
        BinOp::Add => Ok(BinaryOperator::Add),
        BinOp::Sub => Ok(BinaryOperator::Sub),
        BinOp::Mul => Ok(BinaryOperator::Mul),
        BinOp::Div => Ok(BinaryOperator::Div),
        BinOp::Pow => Ok(BinaryOperator::Pow),
        BinOp::FloorDiv
        | BinOp::Mod
        | BinOp::MatMult
        | BinOp::BitAnd
        | BinOp::BitOr
        | BinOp::LShift
        | BinOp::RShift => Err(CalcError::unsupported(op.name())),
    }
}
