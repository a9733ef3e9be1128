//! # Operators
//!
//! Unary and binary operators understood by the operator protocol.

use std::fmt;

use tass_bits::bitwise::BitOp;
use tass_bits::Lane;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Bank byte `` ` ``
    Bank,
    /// High byte `>`
    Higher,
    /// Low byte `<`
    Lower,
    /// High word `` >` ``
    HigherWord,
    /// Low word `<>`
    Word,
    /// Byte swapped low word `><`
    SwappedWord,
    Invert,
    Pos,
    Neg,
    /// Decimal text form
    Str,
    LogicalNot,
}

impl UnaryOp {
    /// Byte window selected by the lane operators
    pub const fn lane(self) -> Option<Lane> {
        match self {
            UnaryOp::Bank => Some(Lane::Bank),
            UnaryOp::Higher => Some(Lane::Higher),
            UnaryOp::Lower => Some(Lane::Lower),
            UnaryOp::HigherWord => Some(Lane::HigherWord),
            UnaryOp::Word => Some(Lane::Word),
            UnaryOp::SwappedWord => Some(Lane::SwappedWord),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Bank => "`",
            UnaryOp::Higher => ">",
            UnaryOp::Lower => "<",
            UnaryOp::HigherWord => ">`",
            UnaryOp::Word => "<>",
            UnaryOp::SwappedWord => "><",
            UnaryOp::Invert => "~",
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Str => "str",
            UnaryOp::LogicalNot => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Comparison
    Cmp,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Bitwise
    And,
    Or,
    Xor,
    LShift,
    RShift,

    // Sequence
    Concat,
    Repeat,

    // Logical
    LogicalAnd,
    LogicalOr,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Cmp
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
        )
    }

    pub const fn bit_op(self) -> Option<BitOp> {
        match self {
            BinaryOp::And => Some(BitOp::And),
            BinaryOp::Or => Some(BitOp::Or),
            BinaryOp::Xor => Some(BitOp::Xor),
            _ => None,
        }
    }

    /// Operators for which a text operand is read as bits rather than
    /// as an integer
    pub const fn takes_bits(self) -> bool {
        matches!(
            self,
            BinaryOp::Concat
                | BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::Xor
                | BinaryOp::LShift
                | BinaryOp::RShift
        )
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Cmp => "<=>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::Concat => "..",
            BinaryOp::Repeat => "x",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
