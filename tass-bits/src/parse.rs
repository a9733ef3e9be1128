//! # Parsers
//!
//! Every external representation funnels into one normalized [`Bits`]:
//!
//! - hexadecimal and binary digit text (`$1f_00`, `%1010`, prefix removed
//!   by the caller), with `_` separators,
//! - encoded text bytes and raw byte buffers, 8 bits per byte with the first
//!   byte least significant,
//! - arbitrary-precision integers,
//! - the small fixed-width constructors used by other value kinds.

use num_bigint::{BigInt, Sign};

use crate::bits::Bits;
use crate::error::{BitsError, Result};
use crate::limb::{BitWriter, Limb};
use crate::polarity::Polarity;

/// Outcome of scanning a digit literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// The parsed value, non-negative, 1 or 4 bits per digit
    pub bits: Bits,
    /// Bytes of input consumed, separators included
    pub consumed: usize,
    /// Digits consumed, separators excluded
    pub digits: usize,
}

/// Digit alphabet of a literal
#[derive(Debug, Clone, Copy)]
enum Radix {
    Binary,
    Hex,
}

impl Radix {
    const fn bits_per_digit(self) -> usize {
        match self {
            Radix::Binary => 1,
            Radix::Hex => 4,
        }
    }

    fn digit(self, byte: u8) -> Option<Limb> {
        match self {
            Radix::Binary => match byte {
                b'0' | b'1' => Some((byte - b'0') as Limb),
                _ => None,
            },
            Radix::Hex => (byte as char).to_digit(16),
        }
    }
}

impl Bits {
    /// Parse hexadecimal digits from the start of `text`
    pub fn from_hex_str(text: &str) -> Result<Literal> {
        scan_digits(text.as_bytes(), Radix::Hex)
    }

    /// Parse binary digits from the start of `text`
    pub fn from_bin_str(text: &str) -> Result<Literal> {
        scan_digits(text.as_bytes(), Radix::Binary)
    }

    /// Value of a byte stream, 8 bits per byte with the first byte lowest
    pub fn from_encoded<I>(bytes: I) -> Result<Bits>
    where
        I: IntoIterator<Item = u8>,
    {
        let bytes = bytes.into_iter();
        let mut writer = BitWriter::with_width(bytes.size_hint().0.saturating_mul(8))?;
        let mut count = 0usize;
        for byte in bytes {
            writer.push(byte as Limb, 8);
            count += 1;
        }
        if count == 0 {
            return Ok(Bits::null());
        }
        let width = count.checked_mul(8).ok_or(BitsError::SizeOverflow)?;
        Ok(Bits::normalized(writer.finish(), Polarity::NonNegative, width))
    }

    /// Value of a byte buffer whose stored bytes carry the given polarity
    pub fn from_bytes(data: &[u8], polarity: Polarity) -> Result<Bits> {
        if data.is_empty() {
            return Ok(Bits::zero_width(polarity));
        }
        let width = data.len().checked_mul(8).ok_or(BitsError::SizeOverflow)?;
        let mut writer = BitWriter::with_width(width)?;
        for &byte in data {
            writer.push(byte as Limb, 8);
        }
        Ok(Bits::normalized(writer.finish(), polarity, width))
    }

    /// Value of an integer; negative integers are stored as the magnitude
    /// of their complement. The width is the bit length of what is stored.
    pub fn from_bigint(value: &BigInt) -> Result<Bits> {
        let (polarity, stored) = match value.sign() {
            Sign::Minus => (Polarity::Inverted, (-(value + 1u32)).magnitude().clone()),
            _ => (Polarity::NonNegative, value.magnitude().clone()),
        };
        let width = usize::try_from(stored.bits()).map_err(|_| BitsError::SizeOverflow)?;
        Bits::from_limbs(&stored.to_u32_digits(), width, polarity)
    }

    /// Non-negative value of the low `width` bits of `value`
    pub fn from_uval(value: u32, width: usize) -> Bits {
        Bits::from_limb(value, width, Polarity::NonNegative)
    }

    /// 24-bit value, used for character code points
    pub fn from_u24(value: u32) -> Bits {
        Bits::from_limb(value, 24, Polarity::NonNegative)
    }

    /// Two-bit value `%hl`
    pub fn from_bools(high: bool, low: bool) -> Bits {
        Bits::from_limb(((high as Limb) << 1) | low as Limb, 2, Polarity::NonNegative)
    }
}

fn scan_digits(text: &[u8], radix: Radix) -> Result<Literal> {
    // a literal never starts with a separator
    if text.first() == Some(&b'_') {
        return Ok(Literal {
            bits: Bits::null(),
            consumed: 0,
            digits: 0,
        });
    }

    let mut end = text
        .iter()
        .position(|&b| b != b'_' && radix.digit(b).is_none())
        .unwrap_or(text.len());
    while end > 0 && text[end - 1] == b'_' {
        end -= 1;
    }
    let body = &text[..end];
    let digits = body.iter().filter(|&&b| b != b'_').count();
    let width = digits
        .checked_mul(radix.bits_per_digit())
        .ok_or(BitsError::SizeOverflow)?;

    let mut writer = BitWriter::with_width(width)?;
    for value in body.iter().rev().filter_map(|&b| radix.digit(b)) {
        writer.push(value, radix.bits_per_digit());
    }
    Ok(Literal {
        bits: Bits::normalized(writer.finish(), Polarity::NonNegative, width),
        consumed: end,
        digits,
    })
}
