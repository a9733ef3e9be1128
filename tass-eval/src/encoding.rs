//! # Character Encodings
//!
//! Text operands are turned into bits through the active encoding, one
//! byte per character.

use crate::error::{EvalError, Position, Result};

pub trait Encoding {
    fn name(&self) -> &str;

    /// Byte for one character, if the encoding has one
    fn encode_char(&self, ch: char) -> Option<u8>;

    fn encode(&self, text: &str, pos: Position) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| {
                self.encode_char(ch).ok_or_else(|| EvalError::UnknownCharacter {
                    ch,
                    encoding: self.name().to_string(),
                    pos,
                })
            })
            .collect()
    }
}

/// Code points below 256 map to themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEncoding;

impl Encoding for RawEncoding {
    fn name(&self) -> &str {
        "none"
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        u8::try_from(u32::from(ch)).ok()
    }
}

/// Commodore screen codes for the printable Latin-1 range
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenEncoding;

impl Encoding for ScreenEncoding {
    fn name(&self) -> &str {
        "screen"
    }

    fn encode_char(&self, ch: char) -> Option<u8> {
        let code = u8::try_from(u32::from(ch)).ok()?;
        match code {
            0x20..=0x3F => Some(code),
            0x40..=0x5F => Some(code - 0x40),
            0x60..=0x7F => Some(code - 0x20),
            0xA0..=0xBF => Some(code - 0x40),
            0xC0..=0xFE => Some(code - 0x80),
            0xFF => Some(0x5E),
            _ => None,
        }
    }
}
