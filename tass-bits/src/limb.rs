//! # Limb Storage
//!
//! Magnitudes are stored as little-endian 32-bit limbs in a [`SmallVec`]
//! that keeps up to [`INLINE_LIMBS`](crate::INLINE_LIMBS) limbs inline and
//! spills longer magnitudes to an exactly sized heap buffer.

use smallvec::SmallVec;

use crate::error::{BitsError, Result};
use crate::{INLINE_LIMBS, LIMB_BITS};

/// One machine word of a magnitude
pub type Limb = u32;

/// Limb storage with inline small-vector optimization
pub type Limbs = SmallVec<[Limb; INLINE_LIMBS]>;

/// Empty storage able to hold `word_count` limbs without reallocating.
///
/// The byte size is checked before allocating so an oversized request is
/// reported instead of wrapping around.
pub fn with_capacity(word_count: usize) -> Result<Limbs> {
    let bytes = word_count
        .checked_mul(std::mem::size_of::<Limb>())
        .ok_or(BitsError::SizeOverflow)?;
    if bytes > isize::MAX as usize {
        return Err(BitsError::SizeOverflow);
    }
    let mut limbs = Limbs::new();
    limbs
        .try_reserve_exact(word_count)
        .map_err(|_| BitsError::OutOfMemory { limbs: word_count })?;
    Ok(limbs)
}

/// Zero-filled storage of exactly `word_count` limbs
pub fn allocate(word_count: usize) -> Result<Limbs> {
    let mut limbs = with_capacity(word_count)?;
    limbs.resize(word_count, 0);
    Ok(limbs)
}

/// Drop most significant zero limbs and move back inline when possible
pub fn normalize(limbs: &mut Limbs) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
    if limbs.spilled() && limbs.len() <= INLINE_LIMBS {
        limbs.shrink_to_fit();
    }
}

/// Mask of the low `bits` bits of a limb (all ones from `LIMB_BITS` up)
#[inline]
pub const fn mask(bits: usize) -> Limb {
    if bits >= LIMB_BITS {
        Limb::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Limbs needed to hold `bits` bits
#[inline]
pub const fn words_for(bits: usize) -> usize {
    bits / LIMB_BITS + (bits % LIMB_BITS != 0) as usize
}

/// Bit-granular appender used by concatenation, repetition and gathers.
///
/// Bits are appended from the least significant end; a partially filled
/// limb is kept in an accumulator until it is complete.
pub(crate) struct BitWriter {
    limbs: Limbs,
    acc: Limb,
    fill: usize,
}

impl BitWriter {
    /// Writer with room for `width` bits
    pub fn with_width(width: usize) -> Result<Self> {
        Ok(Self {
            limbs: with_capacity(words_for(width))?,
            acc: 0,
            fill: 0,
        })
    }

    /// Append the low `count` bits of `value` (`count <= LIMB_BITS`)
    pub fn push(&mut self, value: Limb, count: usize) {
        debug_assert!(count <= LIMB_BITS);
        if count == 0 {
            return;
        }
        let value = value & mask(count);
        self.acc |= value << self.fill;
        let total = self.fill + count;
        if total >= LIMB_BITS {
            self.limbs.push(self.acc);
            self.acc = value.checked_shr((LIMB_BITS - self.fill) as u32).unwrap_or(0);
            self.fill = total - LIMB_BITS;
        } else {
            self.fill = total;
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.push(bit as Limb, 1);
    }

    /// Append the low `count` bits of `src`, reading zeros past its end and
    /// XORing every limb with `flip`.
    pub fn push_span(&mut self, src: &[Limb], count: usize, flip: Limb) {
        let full = count / LIMB_BITS;
        for i in 0..full {
            self.push(src.get(i).copied().unwrap_or(0) ^ flip, LIMB_BITS);
        }
        let rest = count % LIMB_BITS;
        if rest != 0 {
            self.push(src.get(full).copied().unwrap_or(0) ^ flip, rest);
        }
    }

    /// Flush the accumulator and hand back the (unnormalized) limbs
    pub fn finish(mut self) -> Limbs {
        if self.fill != 0 {
            self.limbs.push(self.acc);
        }
        self.limbs
    }
}
