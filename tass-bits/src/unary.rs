//! # Unary Transforms
//!
//! Bitwise complement, two's-complement style negation and the byte/word
//! lane extractors that read the lowest logical limb.

use crate::bits::Bits;
use crate::limb::{self, Limb};
use crate::polarity::Polarity;
use crate::LIMB_BITS;

/// Fixed windows of the lowest logical limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Bits 16..24
    Bank,
    /// Bits 8..16
    Higher,
    /// Bits 0..8
    Lower,
    /// Bits 8..24
    HigherWord,
    /// Bits 0..16
    Word,
    /// Bits 0..16 with the two bytes swapped
    SwappedWord,
}

impl Lane {
    /// Width of the extracted window in bytes
    pub const fn byte_len(self) -> usize {
        match self {
            Lane::Bank | Lane::Higher | Lane::Lower => 1,
            Lane::HigherWord | Lane::Word | Lane::SwappedWord => 2,
        }
    }

    /// Extract this window from a limb
    pub const fn extract(self, limb: Limb) -> u16 {
        match self {
            Lane::Bank => (limb >> 16) as u8 as u16,
            Lane::Higher => (limb >> 8) as u8 as u16,
            Lane::Lower => limb as u8 as u16,
            Lane::HigherWord => (limb >> 8) as u16,
            Lane::Word => limb as u16,
            Lane::SwappedWord => (limb as u16).swap_bytes(),
        }
    }
}

impl Bits {
    /// Bitwise complement: same magnitude and width, flipped polarity
    pub fn invert(&self) -> Bits {
        Bits {
            limbs: self.limbs.clone(),
            polarity: self.polarity.flip(),
            width: self.width,
        }
    }

    /// Arithmetic negation within the declared width.
    ///
    /// Returns `None` when the result does not fit the declared width (the
    /// increment of an inverted magnitude would carry past it); the caller
    /// then negates the equivalent plain integer instead.
    pub fn negate(&self) -> Option<Bits> {
        match self.polarity {
            Polarity::NonNegative => {
                if self.limbs.is_empty() {
                    return Some(self.clone());
                }
                // -m == !(m - 1)
                let mut limbs = self.limbs.clone();
                for limb in limbs.iter_mut() {
                    let (value, borrow) = limb.overflowing_sub(1);
                    *limb = value;
                    if !borrow {
                        break;
                    }
                }
                Some(Bits::normalized(limbs, Polarity::Inverted, self.width))
            }
            Polarity::Inverted => {
                if self.low_bits_all_set(self.width) {
                    return None;
                }
                // -!m == m + 1
                let mut limbs = self.limbs.clone();
                let mut carry = true;
                for limb in limbs.iter_mut() {
                    let (value, overflow) = limb.overflowing_add(1);
                    *limb = value;
                    carry = overflow;
                    if !carry {
                        break;
                    }
                }
                if carry {
                    limbs.push(1);
                }
                Some(Bits::normalized(limbs, Polarity::NonNegative, self.width))
            }
        }
    }

    /// Whether the low `count` stored bits are all ones
    fn low_bits_all_set(&self, count: usize) -> bool {
        let full = count / LIMB_BITS;
        let stored = |i: usize| self.limbs.get(i).copied().unwrap_or(0);
        if (0..full).any(|i| stored(i) != Limb::MAX) {
            return false;
        }
        let rest = count % LIMB_BITS;
        rest == 0 || stored(full) & limb::mask(rest) == limb::mask(rest)
    }

    /// Lowest logical limb, extension pattern included
    #[inline]
    pub fn low_limb(&self) -> Limb {
        self.logical_limb(0)
    }

    /// Extract a byte or word window from the lowest logical limb
    pub fn lane(&self, lane: Lane) -> u16 {
        lane.extract(self.low_limb())
    }
}
