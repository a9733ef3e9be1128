//! # Evaluation Errors
//!
//! Every error raised by the operator protocol carries the source position
//! of the operand or operator that caused it.

use std::fmt;

use tass_bits::BitsError;
use thiserror::Error;

use crate::oper::{BinaryOp, UnaryOp};
use crate::value::ValueKind;

/// Line and column of an expression in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    // Type errors
    #[error("{pos}: wrong type '{kind}'")]
    WrongType { kind: ValueKind, pos: Position },

    #[error("{pos}: invalid operator '{op}' for '{kind}'")]
    InvalidUnary {
        op: UnaryOp,
        kind: ValueKind,
        pos: Position,
    },

    #[error("{pos}: invalid operator '{op}' between '{left}' and '{right}'")]
    InvalidBinary {
        op: BinaryOp,
        left: ValueKind,
        right: ValueKind,
        pos: Position,
    },

    // Size errors
    #[error("{pos}: out of memory: {source}")]
    OutOfMemory {
        #[source]
        source: BitsError,
        pos: Position,
    },

    // Index errors
    #[error("{pos}: index {index} out of range for length {len}")]
    IndexRange { index: i64, len: usize, pos: Position },

    #[error("{pos}: zero value not allowed")]
    ZeroValue { pos: Position },

    #[error("{pos}: expected {expected} argument(s), got {found}")]
    ArgumentCount {
        expected: usize,
        found: usize,
        pos: Position,
    },

    // Conversion errors
    #[error("{pos}: cannot convert {value} to a signed {bits}-bit integer")]
    CantIval { bits: u32, value: String, pos: Position },

    #[error("{pos}: cannot convert {value} to an unsigned {bits}-bit integer")]
    CantUval { bits: u32, value: String, pos: Position },

    #[error("{pos}: string longer than one character needs an encoding")]
    BigStringConversion { pos: Position },

    #[error("{pos}: unknown character {ch:?} in encoding '{encoding}'")]
    UnknownCharacter {
        ch: char,
        encoding: String,
        pos: Position,
    },

    // Arithmetic errors
    #[error("{pos}: division by zero")]
    DivisionByZero { pos: Position },

    #[error("{pos}: floating point result is not finite")]
    NotFinite { pos: Position },
}

impl EvalError {
    /// Size and allocation failures abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvalError::OutOfMemory { .. })
    }

    /// Source position the error is reported at
    pub fn position(&self) -> Position {
        match self {
            EvalError::WrongType { pos, .. }
            | EvalError::InvalidUnary { pos, .. }
            | EvalError::InvalidBinary { pos, .. }
            | EvalError::OutOfMemory { pos, .. }
            | EvalError::IndexRange { pos, .. }
            | EvalError::ZeroValue { pos }
            | EvalError::ArgumentCount { pos, .. }
            | EvalError::CantIval { pos, .. }
            | EvalError::CantUval { pos, .. }
            | EvalError::BigStringConversion { pos }
            | EvalError::UnknownCharacter { pos, .. }
            | EvalError::DivisionByZero { pos }
            | EvalError::NotFinite { pos } => *pos,
        }
    }

    pub(crate) fn bits(source: BitsError, pos: Position) -> Self {
        EvalError::OutOfMemory { source, pos }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
