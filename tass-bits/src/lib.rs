//! # tass Bits Values
//!
//! Arbitrary-precision bit vectors with a declared width and an infinite
//! extension polarity, as used by the tass expression evaluator.
//!
//! ## Representation
//!
//! A [`Bits`] value is made of three independent parts:
//!
//! - **Magnitude**: 32-bit limbs, least significant first, normalized so the
//!   top limb is never zero. Up to [`INLINE_LIMBS`] limbs live inline.
//! - **Polarity**: [`Polarity::NonNegative`] pads the magnitude with zero
//!   bits, [`Polarity::Inverted`] stores the complement and pads with ones.
//! - **Width**: the declared number of bits, used for text round-tripping,
//!   concatenation and the "all bits set" truth test.
//!
//! ## Example
//!
//! ```rust
//! use tass_bits::{Bits, Polarity};
//!
//! let v = Bits::from_bin_str("1010").unwrap().bits;
//! assert_eq!(v.width(), 4);
//!
//! let inv = v.invert();
//! assert_eq!(inv.polarity(), Polarity::Inverted);
//! assert_eq!(inv.to_string(), "~$a");
//!
//! let neg = v.negate().unwrap();
//! assert_eq!(neg.limbs(), &[9]);
//! ```

pub mod error;
pub mod limb;
pub mod polarity;
pub mod bits;
pub mod unary;
pub mod bitwise;
pub mod shift;
pub mod index;
pub mod parse;
pub mod format;
pub mod serdes;

pub use error::{BitsError, Result};
pub use limb::{Limb, Limbs};
pub use polarity::{Polarity, Truth};
pub use bits::Bits;
pub use unary::Lane;
pub use parse::Literal;

/// Bits per limb
pub const LIMB_BITS: usize = Limb::BITS as usize;

/// Limbs stored inline before spilling to the heap
pub const INLINE_LIMBS: usize = 2;

/// Hash values are masked to the positive 31-bit range
pub const HASH_MASK: u32 = u32::MAX >> 1;
