//! # Bits Operator Protocol
//!
//! Construction, operators and slicing for bits operands. Boolean operands
//! are read as single canonical bits, text operands through the active
//! encoding, and anything without a bit-vector meaning is redirected to
//! the integer engine.

use std::cmp::Ordering;
use std::rc::Rc;

use num_traits::{Signed, ToPrimitive};
use tass_bits::{Bits, BitsError};
use tracing::trace;

use crate::canonical;
use crate::diagnostics::OperatorName;
use crate::error::{EvalError, Position, Result};
use crate::evaluator::{float_to_int, invalid_binary, Evaluator};
use crate::index::{resolve_index, resolve_slice};
use crate::int_ops;
use crate::oper::{BinaryOp, UnaryOp};
use crate::value::{Bytes, Value, ValueKind};

/// Repeat counts are read as unsigned integers of this many bits
const REPEAT_BITS: u32 = 32;

fn wrap(result: tass_bits::Result<Bits>, pos: Position) -> Result<Value> {
    result.map(Value::bits).map_err(|err| EvalError::bits(err, pos))
}

impl Evaluator {
    /// Convert any value to bits. `None` and bits pass through unchanged.
    pub fn create_bits(&self, value: &Value, pos: Position) -> Result<Value> {
        match value {
            Value::None | Value::Bits(_) => Ok(value.clone()),
            Value::Bool(b) => Ok(Value::Bits(canonical::bit(*b))),
            Value::Str(text) => self.bits_from_str(text, pos).map(Value::bits),
            Value::Bytes(bytes) => wrap(Bits::from_bytes(&bytes.data, bytes.polarity), pos),
            Value::Int(n) => wrap(Bits::from_bigint(n), pos),
            Value::Float(f) => wrap(Bits::from_bigint(&float_to_int(*f, pos)?), pos),
            other => Err(EvalError::WrongType {
                kind: other.kind(),
                pos,
            }),
        }
    }

    /// Text as bits: encoded bytes when an encoding is active, otherwise
    /// the 24-bit code point of a single character
    pub fn bits_from_str(&self, text: &str, pos: Position) -> Result<Bits> {
        match self.encoding() {
            Some(encoding) => {
                let bytes = encoding.encode(text, pos)?;
                Bits::from_encoded(bytes).map_err(|err| EvalError::bits(err, pos))
            }
            None => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Bits::from_u24(u32::from(ch))),
                    _ => Err(EvalError::BigStringConversion { pos }),
                }
            }
        }
    }

    pub(crate) fn bits_calc1(&mut self, op: UnaryOp, v: &Rc<Bits>, pos: Position) -> Result<Value> {
        if let Some(lane) = op.lane() {
            return Ok(Value::Bytes(Bytes::from_lane(lane, v.lane(lane))));
        }
        match op {
            UnaryOp::Invert => Ok(Value::bits(v.invert())),
            UnaryOp::Pos => Ok(Value::Bits(Rc::clone(v))),
            UnaryOp::Neg => match v.negate() {
                Some(negated) => Ok(Value::bits(negated)),
                None => {
                    trace!(width = v.width(), "negation overflows the width, using integers");
                    int_ops::unary(op, &v.to_bigint(), pos)
                }
            },
            UnaryOp::Str => int_ops::unary(op, &v.to_bigint(), pos),
            UnaryOp::LogicalNot => {
                self.note_bool_operator(OperatorName::Unary(op), pos);
                Ok(Value::Bool(v.is_null()))
            }
            _ => Err(EvalError::InvalidUnary {
                op,
                kind: ValueKind::Bits,
                pos,
            }),
        }
    }

    /// Bits on the left
    pub(crate) fn bits_calc2(
        &mut self,
        op: BinaryOp,
        a: &Rc<Bits>,
        right: &Value,
        pos: Position,
    ) -> Result<Value> {
        if op == BinaryOp::Repeat {
            let count = self.uval(right, REPEAT_BITS, pos)?;
            if count == 1 {
                return Ok(Value::Bits(Rc::clone(a)));
            }
            return wrap(a.repeat(u64::from(count)), pos);
        }
        match right {
            Value::Bool(b) => {
                self.note_bool_operator(OperatorName::Binary(op), pos);
                let bit = Value::Bits(canonical::bit(*b));
                self.bits_calc2(op, a, &bit, pos)
            }
            Value::Bits(b) => self.bits_pair(op, a, b, pos),
            Value::Int(_) => self.bits_int(op, a, right, pos),
            Value::Str(text) => {
                let converted = if op.takes_bits() {
                    Value::bits(self.bits_from_str(text, pos)?)
                } else {
                    Value::Int(self.to_int(right, pos)?)
                };
                self.bits_calc2(op, a, &converted, pos)
            }
            Value::Float(f) => {
                let converted = Value::Int(float_to_int(*f, pos)?);
                self.bits_calc2(op, a, &converted, pos)
            }
            _ => Err(invalid_binary(op, &Value::Bits(Rc::clone(a)), right, pos)),
        }
    }

    /// Bits on the right, something else on the left
    pub(crate) fn bits_rcalc2(
        &mut self,
        op: BinaryOp,
        left: &Value,
        b: &Rc<Bits>,
        pos: Position,
    ) -> Result<Value> {
        let right = Value::Bits(Rc::clone(b));
        match left {
            Value::Bool(x) => {
                self.note_bool_operator(OperatorName::Binary(op), pos);
                let bit = Value::Bits(canonical::bit(*x));
                self.calc2(op, &bit, &right, pos)
            }
            Value::Int(n) => {
                trace!(%op, "bits operand converted for the integer engine");
                int_ops::binary(op, n, &b.to_bigint(), self.config().shift_limit, pos)
            }
            Value::Str(text) => {
                let converted = if op.takes_bits() {
                    Value::bits(self.bits_from_str(text, pos)?)
                } else {
                    Value::Int(self.to_int(left, pos)?)
                };
                self.calc2(op, &converted, &right, pos)
            }
            Value::Float(f) => {
                let converted = Value::Int(float_to_int(*f, pos)?);
                self.calc2(op, &converted, &right, pos)
            }
            _ => Err(invalid_binary(op, left, &right, pos)),
        }
    }

    /// Both operands are bits
    fn bits_pair(&mut self, op: BinaryOp, a: &Rc<Bits>, b: &Rc<Bits>, pos: Position) -> Result<Value> {
        if let Some(bit_op) = op.bit_op() {
            return Ok(Value::bits(a.bitop(bit_op, b)));
        }
        let ordering = a.cmp_value(b);
        match op {
            BinaryOp::Cmp => Ok(Value::int(int_ops::ordering_value(ordering))),
            BinaryOp::Eq => Ok(Value::Bool(ordering == Ordering::Equal)),
            BinaryOp::Ne => Ok(Value::Bool(ordering != Ordering::Equal)),
            BinaryOp::Lt => Ok(Value::Bool(ordering == Ordering::Less)),
            BinaryOp::Le => Ok(Value::Bool(ordering != Ordering::Greater)),
            BinaryOp::Gt => Ok(Value::Bool(ordering == Ordering::Greater)),
            BinaryOp::Ge => Ok(Value::Bool(ordering != Ordering::Less)),
            BinaryOp::Concat if a.width() == 0 => Ok(Value::Bits(Rc::clone(b))),
            BinaryOp::Concat if b.width() == 0 => Ok(Value::Bits(Rc::clone(a))),
            BinaryOp::Concat => wrap(a.concat(b), pos),
            _ => self.bits_int(op, a, &Value::Bits(Rc::clone(b)), pos),
        }
    }

    /// Shifts stay bit vectors, everything else becomes integer arithmetic
    fn bits_int(&mut self, op: BinaryOp, a: &Rc<Bits>, right: &Value, pos: Position) -> Result<Value> {
        match op {
            BinaryOp::LShift | BinaryOp::RShift => {
                let amount = self.shift_amount(right, pos)?;
                if amount == 0 {
                    return Ok(Value::Bits(Rc::clone(a)));
                }
                let leftward = if op == BinaryOp::LShift { amount } else { amount.saturating_neg() };
                let limit = u64::try_from(self.config().shift_limit).unwrap_or(u64::MAX);
                if leftward > 0 && leftward.unsigned_abs() > limit {
                    return Err(EvalError::bits(BitsError::SizeOverflow, pos));
                }
                wrap(a.shift_left(leftward), pos)
            }
            _ => {
                trace!(%op, "bits operand redirected to the integer engine");
                let left = Value::Int(a.to_bigint());
                self.calc2(op, &left, right, pos)
            }
        }
    }

    fn shift_amount(&self, value: &Value, pos: Position) -> Result<i64> {
        let n = self.to_int(value, pos)?;
        n.to_i64().ok_or_else(|| EvalError::CantIval {
            bits: 64,
            value: n.to_string(),
            pos,
        })
    }

    pub(crate) fn bits_slice(&self, v: &Rc<Bits>, args: &[Value], pos: Position) -> Result<Value> {
        let [index] = args else {
            return Err(EvalError::ArgumentCount {
                expected: 1,
                found: args.len(),
                pos,
            });
        };
        let width = v.width();
        match index {
            Value::List(items) => {
                let positions = items
                    .iter()
                    .map(|item| self.bit_position(item, width, pos))
                    .collect::<Result<Vec<_>>>()?;
                wrap(v.gather(positions), pos)
            }
            Value::Range(range) => {
                let params = resolve_slice(range, width, pos)?;
                let whole = params.offset == 0 && params.length == width;
                if params.is_contiguous() && whole && !v.is_inverted() {
                    Ok(Value::Bits(Rc::clone(v)))
                } else if params.is_contiguous() {
                    wrap(v.extract(params.offset, params.length), pos)
                } else {
                    wrap(v.gather(params.positions()), pos)
                }
            }
            _ => {
                let position = self.bit_position(index, width, pos)?;
                Ok(Value::Bits(canonical::bit(v.bit_at(position))))
            }
        }
    }

    fn bit_position(&self, index: &Value, width: usize, pos: Position) -> Result<usize> {
        let n = match index {
            Value::Int(_) | Value::Bool(_) | Value::Bits(_) => self.to_int(index, pos)?,
            other => {
                return Err(EvalError::WrongType {
                    kind: other.kind(),
                    pos,
                })
            }
        };
        let clamped = n
            .to_i64()
            .unwrap_or(if n.is_negative() { i64::MIN } else { i64::MAX });
        resolve_index(clamped, width, pos)
    }
}
