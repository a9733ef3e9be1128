//! # Bits Value Type
//!
//! The core bit-vector value: a normalized magnitude, a [`Polarity`] and a
//! declared width. Values are immutable; every transform builds a new one.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::error::Result;
use crate::limb::{self, mask, Limb, Limbs};
use crate::polarity::Polarity;
use crate::{HASH_MASK, LIMB_BITS};

/// Bit vector of a declared width with an infinite extension polarity.
///
/// Invariants kept by every constructor and transform:
/// - the top stored limb is nonzero (zero is stored as no limbs),
/// - stored bits at or above `width` are zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bits {
    pub(crate) limbs: Limbs,
    pub(crate) polarity: Polarity,
    pub(crate) width: usize,
}

impl Bits {
    /// Zero-width all-zero value
    pub fn null() -> Self {
        Self::zero_width(Polarity::NonNegative)
    }

    /// Zero-width all-ones value
    pub fn inv() -> Self {
        Self::zero_width(Polarity::Inverted)
    }

    /// Zero-width value extending with the given polarity
    pub fn zero_width(polarity: Polarity) -> Self {
        Self {
            limbs: Limbs::new(),
            polarity,
            width: 0,
        }
    }

    /// Single bit value (width 1, non-negative)
    pub fn bit(value: bool) -> Self {
        Self::from_limb(value as Limb, 1, Polarity::NonNegative)
    }

    /// Value of at most one limb; bits above `width` are discarded
    pub fn from_limb(value: Limb, width: usize, polarity: Polarity) -> Self {
        let value = value & mask(width);
        let mut limbs = Limbs::new();
        if value != 0 {
            limbs.push(value);
        }
        Self {
            limbs,
            polarity,
            width,
        }
    }

    /// Value from raw stored limbs; bits above `width` are discarded
    pub fn from_limbs(stored: &[Limb], width: usize, polarity: Polarity) -> Result<Self> {
        let words = stored.len().min(limb::words_for(width));
        let mut limbs = limb::with_capacity(words)?;
        limbs.extend_from_slice(&stored[..words]);
        if let Some(top) = limbs.get_mut(width / LIMB_BITS) {
            *top &= mask(width % LIMB_BITS);
        }
        Ok(Self::normalized(limbs, polarity, width))
    }

    /// Finish a transform: trim the magnitude and attach polarity and width
    pub(crate) fn normalized(mut limbs: Limbs, polarity: Polarity, width: usize) -> Self {
        limb::normalize(&mut limbs);
        Self {
            limbs,
            polarity,
            width,
        }
    }

    /// Declared width in bits
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.polarity.is_inverted()
    }

    /// Stored (pre-complement) magnitude
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Whether the magnitude lives in the inline buffer
    #[inline]
    pub fn is_inline(&self) -> bool {
        !self.limbs.spilled()
    }

    /// Whether this value has the shape of one of the shared canonical
    /// singletons (zero width, or a single non-negative bit)
    pub fn is_canonical(&self) -> bool {
        match self.width {
            0 => self.limbs.is_empty(),
            1 => !self.is_inverted(),
            _ => false,
        }
    }

    /// -1 for inverted values, 1 for a non-empty magnitude, 0 otherwise
    pub fn sign(&self) -> i32 {
        if self.is_inverted() {
            -1
        } else if self.limbs.is_empty() {
            0
        } else {
            1
        }
    }

    /// Numeric ordering: sign first, then magnitude from the top limb.
    ///
    /// The declared width does not take part.
    pub fn cmp_value(&self, other: &Bits) -> Ordering {
        match (self.polarity, other.polarity) {
            (Polarity::NonNegative, Polarity::Inverted) => Ordering::Greater,
            (Polarity::Inverted, Polarity::NonNegative) => Ordering::Less,
            (polarity, _) => {
                let magnitude = self
                    .limbs
                    .len()
                    .cmp(&other.limbs.len())
                    .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()));
                if polarity.is_inverted() {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
        }
    }

    /// Hash value in the positive 31-bit range.
    ///
    /// Values of at most one limb hash like the integer they denote, so
    /// that equal small numbers collide with their integer counterparts.
    pub fn hash_code(&self) -> u32 {
        let h = match (self.polarity, self.limbs.as_slice()) {
            (Polarity::NonNegative, []) => 0,
            (Polarity::Inverted, []) => u32::MAX,
            (Polarity::NonNegative, [l]) => *l,
            (Polarity::Inverted, [l]) => !*l,
            (Polarity::NonNegative, limbs) => limbs
                .iter()
                .rev()
                .fold(0u32, |h, &l| h.wrapping_add(l)),
            (Polarity::Inverted, limbs) => limbs
                .iter()
                .rev()
                .fold(u32::MAX, |h, &l| h.wrapping_sub(l)),
        };
        h & HASH_MASK
    }
}

impl Default for Bits {
    fn default() -> Self {
        Self::null()
    }
}

impl From<bool> for Bits {
    fn from(value: bool) -> Self {
        Self::bit(value)
    }
}

impl From<&[Limb]> for Bits {
    /// Non-negative value whose width covers every given limb
    fn from(stored: &[Limb]) -> Self {
        let mut limbs: Limbs = SmallVec::from_slice(stored);
        limb::normalize(&mut limbs);
        let width = stored.len() * LIMB_BITS;
        Self {
            limbs,
            polarity: Polarity::NonNegative,
            width,
        }
    }
}
