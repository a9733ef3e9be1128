//! # Error Types for Bits Values

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsError {
    /// A width, limb count or byte size computation wrapped around
    #[error("Size overflow: bit width or limb count exceeds the addressable range")]
    SizeOverflow,

    #[error("Out of memory: cannot allocate {limbs} limbs")]
    OutOfMemory { limbs: usize },

    #[error("Malformed bits value: {0}")]
    Malformed(String),
}

impl BitsError {
    /// Size and allocation failures abort the current run
    pub fn is_fatal(&self) -> bool {
        matches!(self, BitsError::SizeOverflow | BitsError::OutOfMemory { .. })
    }
}

pub type Result<T> = std::result::Result<T, BitsError>;
