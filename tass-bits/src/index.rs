//! # Bit Addressing
//!
//! Extraction of logical bits by position. Positions here are already
//! resolved to absolute offsets from the least significant bit; positions
//! past the stored limbs read the extension pattern. Every result carries
//! logical bits with [`Polarity::NonNegative`].

use crate::bits::Bits;
use crate::error::Result;
use crate::limb::{words_for, BitWriter};
use crate::polarity::Polarity;
use crate::LIMB_BITS;

impl Bits {
    /// Logical bit at `position` as a canonical single-bit value
    pub fn index(&self, position: usize) -> Bits {
        Bits::bit(self.bit_at(position))
    }

    /// Contiguous run of `length` logical bits starting at `offset`
    pub fn extract(&self, offset: usize, length: usize) -> Result<Bits> {
        if length == 0 {
            return Ok(Bits::null());
        }
        if offset == 0 && length == self.width && !self.is_inverted() {
            return Ok(self.clone());
        }
        let word = offset / LIMB_BITS;
        let shift = offset % LIMB_BITS;
        let mut writer = BitWriter::with_width(length)?;
        let mut remaining = length;
        for k in 0..words_for(length) {
            let low = self.logical_limb(word + k);
            let chunk = if shift == 0 {
                low
            } else {
                (low >> shift) | (self.logical_limb(word + k + 1) << (LIMB_BITS - shift))
            };
            let count = remaining.min(LIMB_BITS);
            writer.push(chunk, count);
            remaining -= count;
        }
        Ok(Bits::normalized(writer.finish(), Polarity::NonNegative, length))
    }

    /// Logical bits at the given positions; result bit `i` comes from the
    /// `i`-th position
    pub fn gather<I>(&self, positions: I) -> Result<Bits>
    where
        I: IntoIterator<Item = usize>,
        I::IntoIter: ExactSizeIterator,
    {
        let positions = positions.into_iter();
        let width = positions.len();
        if width == 0 {
            return Ok(Bits::null());
        }
        let mut writer = BitWriter::with_width(width)?;
        for position in positions {
            writer.push_bit(self.bit_at(position));
        }
        Ok(Bits::normalized(writer.finish(), Polarity::NonNegative, width))
    }
}
