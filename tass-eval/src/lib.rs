//! # tass Expression Evaluator
//!
//! The operator protocol of the tass assembler over dynamically typed
//! values, built around the [`tass_bits::Bits`] bit vector.
//!
//! ## Features
//!
//! - **Construction**: bits from text, bytes, integers, booleans and floats
//! - **Operators**: unary lanes, complement and negation; bitwise, shift,
//!   concatenation, repetition and comparison operators
//! - **Coercions**: booleans become single bits, text goes through the
//!   active encoding, arithmetic falls back to arbitrary precision integers
//! - **Slicing**: single bits, index lists and `start:end:step` ranges
//! - **Diagnostics**: optional strict boolean warnings
//!
//! ## Example
//!
//! ```rust
//! use tass_bits::Bits;
//! use tass_eval::{BinaryOp, Evaluator, Position, Value};
//!
//! let mut eval = Evaluator::default();
//! let high = Value::from(Bits::from_bin_str("1111").unwrap().bits);
//! let low = Value::from(Bits::from_bin_str("0000").unwrap().bits);
//!
//! let joined = eval.calc2(BinaryOp::Concat, &high, &low, Position::default()).unwrap();
//! assert_eq!(eval.repr(&joined).as_deref(), Some("$f0"));
//! ```

pub mod error;
pub mod config;
pub mod oper;
pub mod value;
pub mod canonical;
pub mod encoding;
pub mod index;
pub mod diagnostics;
pub mod int_ops;
pub mod evaluator;
pub mod bits_ops;

pub use error::{EvalError, Position, Result};
pub use config::{ConfigError, EvalConfig};
pub use oper::{BinaryOp, UnaryOp};
pub use value::{Bytes, SliceRange, Value, ValueKind};
pub use encoding::{Encoding, RawEncoding, ScreenEncoding};
pub use diagnostics::{Diagnostic, OperatorName};
pub use evaluator::Evaluator;

/// Evaluate a binary operator with a default evaluator
pub fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    Evaluator::default().calc2(op, left, right, Position::default())
}
