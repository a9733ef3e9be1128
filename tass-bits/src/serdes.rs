//! # Serialization
//!
//! [`Bits`] serializes as `{ width, inverted, limbs }`. Deserialization
//! rejects magnitudes that are not normalized or that store bits at or
//! above the declared width.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bits::Bits;
use crate::error::BitsError;
use crate::limb::{self, Limb};
use crate::polarity::Polarity;
use crate::LIMB_BITS;

#[derive(Serialize, Deserialize)]
struct RawBits {
    width: usize,
    inverted: bool,
    limbs: Vec<Limb>,
}

impl From<&Bits> for RawBits {
    fn from(value: &Bits) -> Self {
        Self {
            width: value.width,
            inverted: value.is_inverted(),
            limbs: value.limbs.to_vec(),
        }
    }
}

impl TryFrom<RawBits> for Bits {
    type Error = BitsError;

    fn try_from(raw: RawBits) -> Result<Self, Self::Error> {
        if raw.limbs.last() == Some(&0) {
            return Err(BitsError::Malformed("magnitude has a zero top limb".to_string()));
        }
        let words = limb::words_for(raw.width);
        let overhang = match raw.limbs.len().cmp(&words) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => raw
                .limbs
                .last()
                .map_or(false, |&top| top & !limb::mask(raw.width - (words - 1) * LIMB_BITS) != 0),
            std::cmp::Ordering::Less => false,
        };
        if overhang {
            return Err(BitsError::Malformed(format!(
                "stored bits above declared width {}",
                raw.width
            )));
        }
        Bits::from_limbs(&raw.limbs, raw.width, Polarity::from_inverted(raw.inverted))
    }
}

impl Serialize for Bits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawBits::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBits::deserialize(deserializer)?;
        Bits::try_from(raw).map_err(D::Error::custom)
    }
}
