//! # Formatting and Conversions
//!
//! Text representation plus conversions out of [`Bits`] into integers and
//! floats.

use std::fmt;

use num_bigint::{BigInt, BigUint};

use crate::bits::Bits;
use crate::limb::Limb;
use crate::LIMB_BITS;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl Bits {
    /// Length in characters of the text representation, `None` on overflow
    pub fn repr_len(&self) -> Option<usize> {
        let marker = if self.is_inverted() { 2 } else { 1 };
        let digits = if self.width % 4 != 0 {
            self.width
        } else {
            self.width / 4
        };
        digits.checked_add(marker)
    }

    /// Text representation: `~` when inverted, then `$` and one hex digit
    /// per nibble when the width is a multiple of 4, otherwise `%` and one
    /// binary digit per bit. `None` when longer than `max_size`.
    pub fn repr(&self, max_size: usize) -> Option<String> {
        let len = self.repr_len()?;
        if len > max_size {
            return None;
        }
        let mut out = String::with_capacity(len);
        if self.is_inverted() {
            out.push('~');
        }
        if self.width % 4 != 0 {
            out.push('%');
            out.extend((0..self.width).rev().map(|i| {
                if self.stored_bit(i) {
                    '1'
                } else {
                    '0'
                }
            }));
        } else {
            out.push('$');
            out.extend((0..self.width / 4).rev().map(|i| {
                let limb = self.limbs.get(i / 8).copied().unwrap_or(0);
                HEX_DIGITS[((limb >> ((i % 8) * 4)) & 0xF) as usize] as char
            }));
        }
        Some(out)
    }

    fn stored_bit(&self, position: usize) -> bool {
        self.limbs
            .get(position / LIMB_BITS)
            .map_or(false, |limb| (limb >> (position % LIMB_BITS)) & 1 != 0)
    }

    /// Exact integer value
    pub fn to_bigint(&self) -> BigInt {
        let magnitude = BigInt::from(BigUint::new(self.limbs.to_vec()));
        if self.is_inverted() {
            -(magnitude + 1u32)
        } else {
            magnitude
        }
    }

    /// Nearest float; may be infinite for very long magnitudes
    pub fn to_f64(&self) -> f64 {
        let sum = self
            .limbs
            .iter()
            .enumerate()
            .fold(0.0f64, |acc, (i, &limb)| {
                acc + f64::from(limb) * 2f64.powi(i32::try_from(i * LIMB_BITS).unwrap_or(i32::MAX))
            });
        if self.is_inverted() {
            -1.0 - sum
        } else {
            sum
        }
    }

    /// Unsigned value if it fits in `bits` bits.
    ///
    /// Inverted values are accepted when their declared width fits, and
    /// yield their two's complement pattern.
    pub fn to_u32(&self, bits: u32) -> Option<u32> {
        match (self.is_inverted(), self.limbs.as_slice()) {
            (false, []) => Some(0),
            (false, [limb]) => {
                (bits >= Limb::BITS || limb >> bits == 0).then_some(*limb)
            }
            (true, []) => (self.width <= bits as usize).then_some(u32::MAX),
            (true, [limb]) => (self.width <= bits as usize).then_some(!limb),
            _ => None,
        }
    }

    /// Signed value under the same rules as [`Bits::to_u32`]
    pub fn to_i32(&self, bits: u32) -> Option<i32> {
        self.to_u32(bits).map(|v| v as i32)
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr(usize::MAX) {
            Some(text) => f.write_str(&text),
            None => Err(fmt::Error),
        }
    }
}

impl From<&Bits> for BigInt {
    fn from(value: &Bits) -> Self {
        value.to_bigint()
    }
}

impl From<&Bits> for f64 {
    fn from(value: &Bits) -> Self {
        value.to_f64()
    }
}
