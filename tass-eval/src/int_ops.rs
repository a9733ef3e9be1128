//! # Integer Engine
//!
//! Arbitrary precision integer arithmetic. Bits operators redirect here
//! whenever an operation has no bit-vector meaning.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use tass_bits::BitsError;

use crate::error::{EvalError, Position, Result};
use crate::oper::{BinaryOp, UnaryOp};
use crate::value::{Bytes, Value, ValueKind};

pub fn unary(op: UnaryOp, value: &BigInt, pos: Position) -> Result<Value> {
    if let Some(lane) = op.lane() {
        let low = (value & BigInt::from(u32::MAX)).to_u32().unwrap_or_default();
        return Ok(Value::Bytes(Bytes::from_lane(lane, lane.extract(low))));
    }
    match op {
        UnaryOp::Invert => Ok(Value::Int(!value)),
        UnaryOp::Neg => Ok(Value::Int(-value)),
        UnaryOp::Pos => Ok(Value::Int(value.clone())),
        UnaryOp::Str => Ok(Value::Str(value.to_string())),
        UnaryOp::LogicalNot => Ok(Value::Bool(value.is_zero())),
        _ => Err(EvalError::InvalidUnary {
            op,
            kind: ValueKind::Int,
            pos,
        }),
    }
}

pub fn binary(
    op: BinaryOp,
    left: &BigInt,
    right: &BigInt,
    shift_limit: usize,
    pos: Position,
) -> Result<Value> {
    let value = match op {
        BinaryOp::Cmp => Value::int(ordering_value(left.cmp(right))),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::Ne => Value::Bool(left != right),
        BinaryOp::Lt => Value::Bool(left < right),
        BinaryOp::Le => Value::Bool(left <= right),
        BinaryOp::Gt => Value::Bool(left > right),
        BinaryOp::Ge => Value::Bool(left >= right),
        BinaryOp::And => Value::Int(left & right),
        BinaryOp::Or => Value::Int(left | right),
        BinaryOp::Xor => Value::Int(left ^ right),
        BinaryOp::LShift => Value::Int(shift(left, shift_amount(right, pos)?, shift_limit, pos)?),
        BinaryOp::RShift => {
            let amount = shift_amount(right, pos)?.saturating_neg();
            Value::Int(shift(left, amount, shift_limit, pos)?)
        }
        BinaryOp::Add => Value::Int(left + right),
        BinaryOp::Sub => Value::Int(left - right),
        BinaryOp::Mul => Value::Int(left * right),
        BinaryOp::Div => Value::Int(floor_div(left, right, pos)?),
        BinaryOp::Mod => Value::Int(floor_mod(left, right, pos)?),
        BinaryOp::Pow => power(left, right, pos)?,
        BinaryOp::Concat | BinaryOp::Repeat | BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
            return Err(EvalError::InvalidBinary {
                op,
                left: ValueKind::Int,
                right: ValueKind::Int,
                pos,
            })
        }
    };
    Ok(value)
}

/// -1, 0 or 1
pub fn ordering_value(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn shift_amount(amount: &BigInt, pos: Position) -> Result<i64> {
    amount.to_i64().ok_or_else(|| EvalError::CantIval {
        bits: 64,
        value: amount.to_string(),
        pos,
    })
}

/// Left shift for positive `amount`, arithmetic right shift otherwise
fn shift(value: &BigInt, amount: i64, shift_limit: usize, pos: Position) -> Result<BigInt> {
    let distance = usize::try_from(amount.unsigned_abs()).unwrap_or(usize::MAX);
    if amount >= 0 {
        if distance > shift_limit && !value.is_zero() {
            return Err(EvalError::bits(BitsError::SizeOverflow, pos));
        }
        Ok(value << distance)
    } else {
        Ok(value >> distance)
    }
}

fn floor_div(left: &BigInt, right: &BigInt, pos: Position) -> Result<BigInt> {
    if right.is_zero() {
        return Err(EvalError::DivisionByZero { pos });
    }
    let quotient = left / right;
    let remainder = left % right;
    if !remainder.is_zero() && remainder.is_negative() != right.is_negative() {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn floor_mod(left: &BigInt, right: &BigInt, pos: Position) -> Result<BigInt> {
    if right.is_zero() {
        return Err(EvalError::DivisionByZero { pos });
    }
    let remainder = left % right;
    if !remainder.is_zero() && remainder.is_negative() != right.is_negative() {
        Ok(remainder + right)
    } else {
        Ok(remainder)
    }
}

/// Integer power; a negative exponent gives a float
fn power(base: &BigInt, exponent: &BigInt, pos: Position) -> Result<Value> {
    if exponent.is_negative() {
        if base.is_zero() {
            return Err(EvalError::DivisionByZero { pos });
        }
        let base = base.to_f64().unwrap_or(f64::NAN);
        let exponent = exponent.to_f64().unwrap_or(f64::NAN);
        return finite(base.powf(exponent), pos).map(Value::Float);
    }
    if base.is_zero() || base.is_one() {
        return Ok(Value::Int(base.clone()));
    }
    if base.abs().is_one() {
        let even = (exponent % 2u32).is_zero();
        return Ok(Value::int(if even { 1 } else { -1 }));
    }
    let exponent = exponent
        .to_u32()
        .ok_or_else(|| EvalError::bits(BitsError::SizeOverflow, pos))?;
    Ok(Value::Int(Pow::pow(base, exponent)))
}

pub(crate) fn finite(value: f64, pos: Position) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NotFinite { pos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn calc(op: BinaryOp, a: i64, b: i64) -> Result<Value> {
        binary(op, &int(a), &int(b), usize::MAX, Position::default())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(calc(BinaryOp::Add, 2, 3).unwrap(), Value::int(5));
        assert_eq!(calc(BinaryOp::Sub, 2, 3).unwrap(), Value::int(-1));
        assert_eq!(calc(BinaryOp::Mul, -4, 3).unwrap(), Value::int(-12));
        assert_eq!(calc(BinaryOp::Pow, 2, 70).unwrap(), Value::Int(BigInt::from(1u128 << 70)));
        assert_eq!(calc(BinaryOp::Pow, -1, 7).unwrap(), Value::int(-1));
        assert_eq!(calc(BinaryOp::Pow, 2, -1).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_floor_division() {
        assert_eq!(calc(BinaryOp::Div, 7, 2).unwrap(), Value::int(3));
        assert_eq!(calc(BinaryOp::Div, -7, 2).unwrap(), Value::int(-4));
        assert_eq!(calc(BinaryOp::Div, 7, -2).unwrap(), Value::int(-4));
        assert_eq!(calc(BinaryOp::Div, -8, 2).unwrap(), Value::int(-4));
        assert_eq!(calc(BinaryOp::Mod, -7, 2).unwrap(), Value::int(1));
        assert_eq!(calc(BinaryOp::Mod, 7, -2).unwrap(), Value::int(-1));
        assert_eq!(calc(BinaryOp::Mod, 6, 3).unwrap(), Value::int(0));
    }

    #[test]
    fn test_division_by_zero() {
        let pos = Position::default();
        assert_eq!(calc(BinaryOp::Div, 1, 0).unwrap_err(), EvalError::DivisionByZero { pos });
        assert_eq!(calc(BinaryOp::Mod, 1, 0).unwrap_err(), EvalError::DivisionByZero { pos });
        assert_eq!(calc(BinaryOp::Pow, 0, -1).unwrap_err(), EvalError::DivisionByZero { pos });
    }

    #[test]
    fn test_bitwise_and_shifts() {
        assert_eq!(calc(BinaryOp::And, 12, 10).unwrap(), Value::int(8));
        assert_eq!(calc(BinaryOp::Or, 12, 10).unwrap(), Value::int(14));
        assert_eq!(calc(BinaryOp::Xor, -1, 5).unwrap(), Value::int(-6));
        assert_eq!(calc(BinaryOp::LShift, 3, 4).unwrap(), Value::int(48));
        assert_eq!(calc(BinaryOp::RShift, -5, 1).unwrap(), Value::int(-3));
        assert_eq!(calc(BinaryOp::LShift, 48, -4).unwrap(), Value::int(3));
    }

    #[test]
    fn test_shift_limit() {
        let err = binary(BinaryOp::LShift, &int(1), &int(65), 64, Position::default()).unwrap_err();
        assert!(err.is_fatal());
        assert!(binary(BinaryOp::LShift, &int(0), &int(65), 64, Position::default()).is_ok());
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(calc(BinaryOp::Cmp, 1, 2).unwrap(), Value::int(-1));
        assert_eq!(calc(BinaryOp::Cmp, 2, 2).unwrap(), Value::int(0));
        assert_eq!(calc(BinaryOp::Le, 2, 2).unwrap(), Value::Bool(true));
        assert_eq!(calc(BinaryOp::Ne, 2, 2).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_invalid_operators() {
        let err = calc(BinaryOp::Concat, 1, 2).unwrap_err();
        assert!(matches!(err, EvalError::InvalidBinary { op: BinaryOp::Concat, .. }));
    }

    #[test]
    fn test_unary() {
        let pos = Position::default();
        assert_eq!(unary(UnaryOp::Neg, &int(5), pos).unwrap(), Value::int(-5));
        assert_eq!(unary(UnaryOp::Invert, &int(5), pos).unwrap(), Value::int(-6));
        assert_eq!(unary(UnaryOp::Str, &int(-42), pos).unwrap(), Value::from("-42"));
        assert_eq!(unary(UnaryOp::LogicalNot, &int(0), pos).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_lanes() {
        let pos = Position::default();
        let v = int(0x12_3456);
        assert_eq!(unary(UnaryOp::Bank, &v, pos).unwrap(), Value::Bytes(Bytes::new(vec![0x12])));
        assert_eq!(unary(UnaryOp::Word, &v, pos).unwrap(), Value::Bytes(Bytes::new(vec![0x56, 0x34])));
        assert_eq!(unary(UnaryOp::Lower, &int(-1), pos).unwrap(), Value::Bytes(Bytes::new(vec![0xFF])));
    }
}
