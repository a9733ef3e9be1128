//! # Evaluator
//!
//! Dispatches the operator protocol over [`Value`] operands. Operations on
//! bits values live in [`crate::bits_ops`]; everything without a bit-vector
//! meaning ends up in the integer engine.

use std::fmt::Write as _;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use tass_bits::{Bits, Truth};
use tracing::debug;

use crate::canonical;
use crate::config::EvalConfig;
use crate::diagnostics::{Diagnostic, OperatorName};
use crate::encoding::Encoding;
use crate::error::{EvalError, Position, Result};
use crate::int_ops;
use crate::oper::{BinaryOp, UnaryOp};
use crate::value::{SliceRange, Value, ValueKind};

/// Expression evaluator state
pub struct Evaluator {
    config: EvalConfig,

    /// Active character encoding; `None` reads single characters as code
    /// points
    encoding: Option<Box<dyn Encoding>>,

    diagnostics: Vec<Diagnostic>,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            encoding: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_encoding(config: EvalConfig, encoding: Box<dyn Encoding>) -> Self {
        Self {
            encoding: Some(encoding),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn encoding(&self) -> Option<&dyn Encoding> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: Option<Box<dyn Encoding>>) {
        self.encoding = encoding;
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// End of run. Debug builds check that no canonical value is still
    /// referenced and return the number of outstanding references.
    pub fn shutdown(self) -> usize {
        if cfg!(debug_assertions) {
            canonical::leak_check()
        } else {
            0
        }
    }

    /// Record a strict boolean diagnostic if they are enabled
    pub(crate) fn note(&mut self, diagnostic: Diagnostic) {
        if self.config.strict_bool {
            debug!(%diagnostic, "strict boolean check");
            self.diagnostics.push(diagnostic);
        }
    }

    pub(crate) fn note_bool_operator(&mut self, op: OperatorName, pos: Position) {
        self.note(Diagnostic::BoolOperator { op, pos });
    }

    // ========================================================================
    // Operators
    // ========================================================================

    pub fn calc1(&mut self, op: UnaryOp, value: &Value, pos: Position) -> Result<Value> {
        match value {
            Value::Bits(v) => self.bits_calc1(op, v, pos),
            Value::Int(n) => int_ops::unary(op, n, pos),
            Value::Bool(b) if op == UnaryOp::LogicalNot => Ok(Value::Bool(!b)),
            Value::Bool(b) => int_ops::unary(op, &BigInt::from(u8::from(*b)), pos),
            other => Err(EvalError::InvalidUnary {
                op,
                kind: other.kind(),
                pos,
            }),
        }
    }

    pub fn calc2(&mut self, op: BinaryOp, left: &Value, right: &Value, pos: Position) -> Result<Value> {
        if matches!(op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) {
            return self.logical(op, left, right, pos);
        }
        match (left, right) {
            (Value::Bits(a), _) => self.bits_calc2(op, a, right, pos),
            (_, Value::Bits(b)) => self.bits_rcalc2(op, left, b, pos),
            (Value::Int(a), Value::Int(b)) => int_ops::binary(op, a, b, self.config.shift_limit, pos),
            _ => Err(invalid_binary(op, left, right, pos)),
        }
    }

    /// `&&` and `||` return one of their operands
    fn logical(&mut self, op: BinaryOp, left: &Value, right: &Value, pos: Position) -> Result<Value> {
        let truth = self.truth(left, Truth::Bool, pos)?;
        if matches!(left, Value::Bits(_)) {
            self.note_bool_operator(OperatorName::Binary(op), pos);
        }
        let keep_left = match op {
            BinaryOp::LogicalAnd => !truth,
            _ => truth,
        };
        Ok(if keep_left { left.clone() } else { right.clone() })
    }

    pub fn truth(&mut self, value: &Value, mode: Truth, pos: Position) -> Result<bool> {
        match value {
            Value::Bits(v) => {
                if mode != Truth::Bool {
                    self.note(Diagnostic::ImplicitBool {
                        kind: ValueKind::Bits,
                        pos,
                    });
                }
                Ok(v.truth(mode))
            }
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(match mode {
                Truth::All => *n == BigInt::from(-1),
                Truth::Bool | Truth::Any => !n.is_zero(),
            }),
            Value::Float(f) => Ok(*f != 0.0),
            Value::Str(s) => Ok(!s.is_empty()),
            Value::Bytes(b) => Ok(!b.is_empty()),
            Value::List(items) => Ok(!items.is_empty()),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    pub fn slice(&self, value: &Value, args: &[Value], pos: Position) -> Result<Value> {
        match value {
            Value::Bits(v) => self.bits_slice(v, args, pos),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    pub fn to_int(&self, value: &Value, pos: Position) -> Result<BigInt> {
        match value {
            Value::Bits(v) => Ok(v.to_bigint()),
            Value::Int(n) => Ok(n.clone()),
            Value::Bool(b) => Ok(BigInt::from(u8::from(*b))),
            Value::Float(f) => float_to_int(*f, pos),
            Value::Str(text) => Ok(self.bits_from_str(text, pos)?.to_bigint()),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    pub fn to_float(&self, value: &Value, pos: Position) -> Result<f64> {
        let result = match value {
            Value::Bits(v) => v.to_f64(),
            Value::Int(n) => n.to_f64().unwrap_or(f64::INFINITY),
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Float(f) => *f,
            other => {
                return Err(EvalError::WrongType {
                    kind: other.kind(),
                    pos,
                })
            }
        };
        int_ops::finite(result, pos)
    }

    /// Signed integer of at most `bits` bits
    pub fn ival(&self, value: &Value, bits: u32, pos: Position) -> Result<i32> {
        let converted = match value {
            Value::Bits(v) => v.to_i32(bits),
            Value::Int(n) => signed_fit(n, bits),
            Value::Bool(b) => Some(i32::from(*b)),
            other => {
                return Err(EvalError::WrongType {
                    kind: other.kind(),
                    pos,
                })
            }
        };
        converted.ok_or_else(|| EvalError::CantIval {
            bits,
            value: self.describe(value),
            pos,
        })
    }

    /// Unsigned integer of at most `bits` bits
    pub fn uval(&self, value: &Value, bits: u32, pos: Position) -> Result<u32> {
        let converted = match value {
            Value::Bits(v) => v.to_u32(bits),
            Value::Int(n) => unsigned_fit(n, bits),
            Value::Bool(b) => Some(u32::from(*b)),
            other => {
                return Err(EvalError::WrongType {
                    kind: other.kind(),
                    pos,
                })
            }
        };
        converted.ok_or_else(|| EvalError::CantUval {
            bits,
            value: self.describe(value),
            pos,
        })
    }

    /// -1, 0 or 1
    pub fn sign(&self, value: &Value, pos: Position) -> Result<i32> {
        match value {
            Value::Bits(v) => Ok(v.sign()),
            Value::Int(n) if n.is_negative() => Ok(-1),
            Value::Int(n) => Ok(i32::from(!n.is_zero())),
            Value::Bool(b) => Ok(i32::from(*b)),
            Value::Float(f) if *f == 0.0 => Ok(0),
            Value::Float(f) => Ok(if f.is_sign_negative() { -1 } else { 1 }),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    pub fn abs(&self, value: &Value, pos: Position) -> Result<Value> {
        match value {
            Value::Float(f) => Ok(Value::Float(f.abs())),
            other => Ok(Value::Int(self.to_int(other, pos)?.abs())),
        }
    }

    /// Declared width of bits, element count of sequences
    pub fn len(&self, value: &Value, pos: Position) -> Result<usize> {
        match value {
            Value::Bits(v) => Ok(v.width()),
            Value::Bytes(b) => Ok(b.len()),
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(items) => Ok(items.len()),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    pub fn hash(&self, value: &Value, pos: Position) -> Result<u32> {
        match value {
            Value::Bits(v) => Ok(v.hash_code()),
            Value::Int(n) => Bits::from_bigint(n)
                .map(|v| v.hash_code())
                .map_err(|err| EvalError::bits(err, pos)),
            Value::Bool(b) => Ok(u32::from(*b)),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Representation bounded by the configured limit
    pub fn repr(&self, value: &Value) -> Option<String> {
        self.repr_bounded(value, self.config.repr_limit)
    }

    /// Representation of at most `max_size` characters, `None` if longer
    pub fn repr_bounded(&self, value: &Value, max_size: usize) -> Option<String> {
        let text = match value {
            Value::Bits(v) => return v.repr(max_size),
            Value::None => "none".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format!("{f:?}"),
            Value::Str(s) => format!("{s:?}"),
            Value::Bytes(b) => {
                let mut text = String::from("bytes(");
                for byte in &b.data {
                    let _ = write!(text, "{byte:02x}");
                }
                text.push(')');
                if b.polarity.is_inverted() {
                    text.insert(0, '~');
                }
                text
            }
            Value::List(items) => {
                let parts = items
                    .iter()
                    .map(|item| self.repr_bounded(item, max_size))
                    .collect::<Option<Vec<_>>>()?;
                format!("[{}]", parts.join(", "))
            }
            Value::Range(range) => range_text(range),
        };
        (text.len() <= max_size).then_some(text)
    }

    /// Text used in conversion error messages
    fn describe(&self, value: &Value) -> String {
        self.repr_bounded(value, 64)
            .unwrap_or_else(|| format!("<{}>", value.kind()))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::DEFAULT)
    }
}

pub(crate) fn invalid_binary(op: BinaryOp, left: &Value, right: &Value, pos: Position) -> EvalError {
    EvalError::InvalidBinary {
        op,
        left: left.kind(),
        right: right.kind(),
        pos,
    }
}

/// Truncate toward zero
pub(crate) fn float_to_int(value: f64, pos: Position) -> Result<BigInt> {
    let value = int_ops::finite(value, pos)?;
    BigInt::from_f64(value.trunc()).ok_or(EvalError::NotFinite { pos })
}

fn signed_fit(n: &BigInt, bits: u32) -> Option<i32> {
    let v = n.to_i32()?;
    if bits >= i32::BITS {
        return Some(v);
    }
    let half = 1i64 << bits.saturating_sub(1);
    (-half..half).contains(&i64::from(v)).then_some(v)
}

fn unsigned_fit(n: &BigInt, bits: u32) -> Option<u32> {
    let v = n.to_u32()?;
    (bits >= u32::BITS || v >> bits == 0).then_some(v)
}

fn range_text(range: &SliceRange) -> String {
    let part = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
    match range.step {
        Some(step) => format!("{}:{}:{}", part(range.start), part(range.end), step),
        None => format!("{}:{}", part(range.start), part(range.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::RawEncoding;
    use crate::value::Bytes;

    fn pos() -> Position {
        Position::new(1, 1)
    }

    #[test]
    fn test_int_dispatch() {
        let mut eval = Evaluator::default();
        let r = eval.calc2(BinaryOp::Add, &Value::int(2), &Value::int(40), pos()).unwrap();
        assert_eq!(r, Value::int(42));
        let r = eval.calc1(UnaryOp::Neg, &Value::int(2), pos()).unwrap();
        assert_eq!(r, Value::int(-2));
    }

    #[test]
    fn test_invalid_operands() {
        let mut eval = Evaluator::default();
        let err = eval
            .calc2(BinaryOp::Add, &Value::from("a"), &Value::List(vec![]), pos())
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::InvalidBinary {
                op: BinaryOp::Add,
                left: ValueKind::Str,
                right: ValueKind::List,
                pos: pos()
            }
        );
        let err = eval.calc1(UnaryOp::Neg, &Value::None, pos()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidUnary { kind: ValueKind::None, .. }));
    }

    #[test]
    fn test_logical_returns_operand() {
        let mut eval = Evaluator::default();
        let r = eval
            .calc2(BinaryOp::LogicalAnd, &Value::int(0), &Value::int(5), pos())
            .unwrap();
        assert_eq!(r, Value::int(0));
        let r = eval
            .calc2(BinaryOp::LogicalOr, &Value::int(0), &Value::int(5), pos())
            .unwrap();
        assert_eq!(r, Value::int(5));
    }

    #[test]
    fn test_ival_uval() {
        let eval = Evaluator::default();
        assert_eq!(eval.ival(&Value::int(-128), 8, pos()).unwrap(), -128);
        assert_eq!(eval.uval(&Value::int(255), 8, pos()).unwrap(), 255);
        assert_eq!(
            eval.uval(&Value::int(256), 8, pos()).unwrap_err(),
            EvalError::CantUval {
                bits: 8,
                value: "256".to_string(),
                pos: pos()
            }
        );
        assert!(eval.uval(&Value::int(-1), 32, pos()).is_err());
        assert!(eval.ival(&Value::int(128), 8, pos()).is_err());
        assert_eq!(eval.ival(&Value::int(i32::MIN), 32, pos()).unwrap(), i32::MIN);
    }

    #[test]
    fn test_float_conversion() {
        let eval = Evaluator::default();
        assert_eq!(eval.to_int(&Value::Float(-2.75), pos()).unwrap(), BigInt::from(-2));
        assert_eq!(
            eval.to_int(&Value::Float(f64::NAN), pos()).unwrap_err(),
            EvalError::NotFinite { pos: pos() }
        );
        assert_eq!(eval.to_float(&Value::int(3), pos()).unwrap(), 3.0);
    }

    #[test]
    fn test_repr_values() {
        let eval = Evaluator::default();
        assert_eq!(eval.repr(&Value::int(-7)).as_deref(), Some("-7"));
        assert_eq!(eval.repr(&Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(
            eval.repr(&Value::Bytes(Bytes::new(vec![0x12, 0xab]))).as_deref(),
            Some("bytes(12ab)")
        );
        assert_eq!(
            eval.repr(&Value::Range(SliceRange::new(Some(1), None, Some(2)))).as_deref(),
            Some("1::2")
        );
        assert_eq!(
            eval.repr(&Value::List(vec![Value::int(1), Value::from("x")])).as_deref(),
            Some("[1, \"x\"]")
        );
        assert_eq!(eval.repr_bounded(&Value::int(12345), 4), None);
    }

    #[test]
    fn test_sign_and_len() {
        let eval = Evaluator::default();
        assert_eq!(eval.sign(&Value::int(-9), pos()).unwrap(), -1);
        assert_eq!(eval.sign(&Value::int(0), pos()).unwrap(), 0);
        assert_eq!(eval.sign(&Value::Float(2.5), pos()).unwrap(), 1);
        assert_eq!(eval.len(&Value::from("héllo"), pos()).unwrap(), 5);
        assert_eq!(eval.abs(&Value::int(-9), pos()).unwrap(), Value::int(9));
        assert!(eval.len(&Value::int(1), pos()).is_err());
    }

    #[test]
    fn test_encoding_accessors() {
        let mut eval = Evaluator::with_encoding(EvalConfig::DEFAULT, Box::new(RawEncoding));
        assert_eq!(eval.encoding().map(|e| e.name()), Some("none"));
        eval.set_encoding(None);
        assert!(eval.encoding().is_none());
    }
}
