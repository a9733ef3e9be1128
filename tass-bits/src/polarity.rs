//! # Sign and Extension Model
//!
//! A magnitude is always stored pre-complement. An [`Inverted`] value's
//! logical bits are the complement of the stored bits, and every bit above
//! the stored limbs reads as 1; a [`NonNegative`] value reads 0 there.
//!
//! [`Inverted`]: Polarity::Inverted
//! [`NonNegative`]: Polarity::NonNegative

use serde::{Deserialize, Serialize};

use crate::bits::Bits;
use crate::limb::{mask, Limb};
use crate::LIMB_BITS;

/// Infinite extension pattern of a bit vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Padded with zero bits
    #[default]
    NonNegative,
    /// Stored complemented, padded with one bits
    Inverted,
}

impl Polarity {
    #[inline]
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::Inverted
        } else {
            Polarity::NonNegative
        }
    }

    #[inline]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Polarity::Inverted)
    }

    #[inline]
    pub const fn flip(self) -> Self {
        Self::from_inverted(!self.is_inverted())
    }

    /// Polarity of the combination of two patterns (inverted iff they differ)
    #[inline]
    pub const fn xor(self, other: Self) -> Self {
        Self::from_inverted(self.is_inverted() != other.is_inverted())
    }

    /// Limb every stored limb is XORed with to read logical bits
    #[inline]
    pub const fn mask(self) -> Limb {
        if self.is_inverted() {
            Limb::MAX
        } else {
            0
        }
    }
}

/// Truth test flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    /// Boolean coercion: anything but the non-negative zero magnitude
    Bool,
    /// Every declared bit is 1
    All,
    /// Some stored bit is set
    Any,
}

impl Bits {
    /// Number of stored limbs, irrespective of polarity
    #[inline]
    pub fn effective_limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Logical limb `index`, extension pattern included
    #[inline]
    pub fn logical_limb(&self, index: usize) -> Limb {
        self.limbs.get(index).copied().unwrap_or(0) ^ self.polarity.mask()
    }

    /// Logical bit at `position` (0 is least significant)
    pub fn bit_at(&self, position: usize) -> bool {
        match self.limbs.get(position / LIMB_BITS) {
            Some(limb) => ((limb >> (position % LIMB_BITS)) & 1 != 0) != self.polarity.is_inverted(),
            None => self.polarity.is_inverted(),
        }
    }

    /// Truth value under the given test
    pub fn truth(&self, mode: Truth) -> bool {
        match mode {
            Truth::Bool => !self.is_null(),
            Truth::Any => !self.limbs.is_empty(),
            Truth::All => {
                let full = self.width / LIMB_BITS;
                if (0..full).any(|i| self.logical_limb(i) != Limb::MAX) {
                    return false;
                }
                let rest = self.width % LIMB_BITS;
                rest == 0 || self.logical_limb(full) & mask(rest) == mask(rest)
            }
        }
    }

    /// True for the non-negative all-zero magnitude, whatever its width
    #[inline]
    pub fn is_null(&self) -> bool {
        self.limbs.is_empty() && !self.polarity.is_inverted()
    }
}
