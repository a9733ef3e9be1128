//! # Shift, Concatenation, Repetition
//!
//! Transforms that move stored bits around. Each one tracks the stored limb
//! count and the declared width separately: shifting left grows both,
//! shifting right may drop every stored limb while the width survives.

use std::cmp::Ordering;

use crate::bits::Bits;
use crate::error::{BitsError, Result};
use crate::limb::{self, BitWriter, Limb};
use crate::LIMB_BITS;

impl Bits {
    /// Shift towards the most significant end; negative amounts shift right
    pub fn shift_left(&self, amount: i64) -> Result<Bits> {
        match amount.cmp(&0) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => self.lshift(distance(amount)),
            Ordering::Less => Ok(self.rshift(distance(amount))),
        }
    }

    /// Shift towards the least significant end; negative amounts shift left
    pub fn shift_right(&self, amount: i64) -> Result<Bits> {
        match amount.cmp(&0) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => Ok(self.rshift(distance(amount))),
            Ordering::Less => self.lshift(distance(amount)),
        }
    }

    fn lshift(&self, distance: usize) -> Result<Bits> {
        let width = self.width.checked_add(distance).ok_or(BitsError::SizeOverflow)?;
        if self.limbs.is_empty() {
            return Ok(Bits::zero_width(self.polarity).with_width(width));
        }

        let words = distance / LIMB_BITS;
        let bits = distance % LIMB_BITS;
        let len = self
            .limbs
            .len()
            .checked_add(words + 1)
            .ok_or(BitsError::SizeOverflow)?;
        let mut limbs = limb::allocate(len)?;
        if bits == 0 {
            limbs[words..words + self.limbs.len()].copy_from_slice(&self.limbs);
        } else {
            let mut carry: Limb = 0;
            for (i, &l) in self.limbs.iter().enumerate() {
                limbs[words + i] = (l << bits) | carry;
                carry = l >> (LIMB_BITS - bits);
            }
            limbs[words + self.limbs.len()] = carry;
        }
        Ok(Bits::normalized(limbs, self.polarity, width))
    }

    fn rshift(&self, distance: usize) -> Bits {
        let words = distance / LIMB_BITS;
        if self.width <= distance || self.limbs.len() <= words {
            return Bits::zero_width(self.polarity);
        }

        let bits = distance % LIMB_BITS;
        let src = &self.limbs[words..];
        let mut limbs = limb::Limbs::with_capacity(src.len());
        if bits == 0 {
            limbs.extend_from_slice(src);
        } else {
            limbs.extend(src.iter().enumerate().map(|(i, &l)| {
                let next = src.get(i + 1).copied().unwrap_or(0);
                (l >> bits) | (next << (LIMB_BITS - bits))
            }));
        }
        Bits::normalized(limbs, self.polarity, self.width - distance)
    }

    /// Same magnitude and polarity under a new declared width
    fn with_width(mut self, width: usize) -> Bits {
        self.width = width;
        self
    }

    /// Bit-exact concatenation with `self` above `low`.
    ///
    /// The result takes `self`'s polarity; `low`'s bits are re-expressed
    /// relative to it.
    pub fn concat(&self, low: &Bits) -> Result<Bits> {
        if self.width == 0 {
            return Ok(low.clone());
        }
        if low.width == 0 {
            return Ok(self.clone());
        }
        let width = self.width.checked_add(low.width).ok_or(BitsError::SizeOverflow)?;
        let flip = self.polarity.xor(low.polarity).mask();

        let high_bits = self
            .limbs
            .len()
            .checked_mul(LIMB_BITS)
            .and_then(|bits| bits.checked_add(low.width))
            .ok_or(BitsError::SizeOverflow)?;
        let mut writer = BitWriter::with_width(high_bits)?;
        writer.push_span(&low.limbs, low.width, flip);
        writer.push_span(&self.limbs, self.limbs.len() * LIMB_BITS, 0);
        Ok(Bits::normalized(writer.finish(), self.polarity, width))
    }

    /// Replicate the declared bits `count` times
    pub fn repeat(&self, count: u64) -> Result<Bits> {
        if count == 0 || self.width == 0 {
            return Ok(Bits::zero_width(self.polarity));
        }
        if count == 1 {
            return Ok(self.clone());
        }
        let count = usize::try_from(count).map_err(|_| BitsError::SizeOverflow)?;
        let width = self.width.checked_mul(count).ok_or(BitsError::SizeOverflow)?;

        let mut writer = BitWriter::with_width(width)?;
        for _ in 0..count {
            writer.push_span(&self.limbs, self.width, 0);
        }
        Ok(Bits::normalized(writer.finish(), self.polarity, width))
    }
}

/// Absolute shift distance, saturated to the address range
fn distance(amount: i64) -> usize {
    usize::try_from(amount.unsigned_abs()).unwrap_or(usize::MAX)
}
