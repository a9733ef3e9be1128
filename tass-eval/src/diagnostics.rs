//! # Diagnostics
//!
//! Warnings collected while evaluating. They never stop evaluation.

use std::fmt;

use crate::error::Position;
use crate::oper::{BinaryOp, UnaryOp};
use crate::value::ValueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A non-boolean value was tested for truth
    ImplicitBool { kind: ValueKind, pos: Position },

    /// A boolean operator was applied to a non-boolean operand
    BoolOperator { op: OperatorName, pos: Position },
}

/// Either kind of operator, for diagnostics that accept both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorName {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Diagnostic {
    pub fn position(&self) -> Position {
        match self {
            Diagnostic::ImplicitBool { pos, .. } | Diagnostic::BoolOperator { pos, .. } => *pos,
        }
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorName::Unary(op) => write!(f, "{op}"),
            OperatorName::Binary(op) => write!(f, "{op}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ImplicitBool { kind, pos } => {
                write!(f, "{pos}: implicit boolean conversion of '{kind}'")
            }
            Diagnostic::BoolOperator { op, pos } => {
                write!(f, "{pos}: boolean operator '{op}' used on a non-boolean operand")
            }
        }
    }
}
