//! # Values
//!
//! The tagged union every expression evaluates to. Bits values are shared
//! behind `Rc` so the canonical singletons can be handed out without
//! copying.

use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use tass_bits::{Bits, Lane, Polarity};

use crate::canonical;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Bits(Rc<Bits>),
    Bytes(Bytes),
    Str(String),
    List(Vec<Value>),
    Range(SliceRange),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bits(_) => ValueKind::Bits,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Range(_) => ValueKind::Range,
        }
    }

    /// Wrap a bits value, sharing a canonical singleton when it has the
    /// same shape
    pub fn bits(bits: Bits) -> Value {
        Value::Bits(canonical::intern(bits))
    }

    pub fn int(value: impl Into<BigInt>) -> Value {
        Value::Int(value.into())
    }

    pub fn as_bits(&self) -> Option<&Bits> {
        match self {
            Value::Bits(bits) => Some(bits),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Bits> for Value {
    fn from(bits: Bits) -> Self {
        Value::bits(bits)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

/// Value kind, used in type errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    None,
    Bool,
    Int,
    Float,
    Bits,
    Bytes,
    Str,
    List,
    Range,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bits => "bits",
            ValueKind::Bytes => "bytes",
            ValueKind::Str => "str",
            ValueKind::List => "list",
            ValueKind::Range => "range",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte string with an extension polarity, as produced by the lane
/// operators
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bytes {
    pub data: Vec<u8>,
    pub polarity: Polarity,
}

impl Bytes {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            polarity: Polarity::NonNegative,
        }
    }

    /// Little-endian bytes of a lane value
    pub fn from_lane(lane: Lane, value: u16) -> Self {
        let le = value.to_le_bytes();
        Self::new(le[..lane.byte_len()].to_vec())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `start:end:step` slice with optional parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SliceRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl SliceRange {
    pub const fn new(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        Self { start, end, step }
    }
}
