//! # Canonical Bits Values
//!
//! The zero-width values of both polarities and the two single-bit values
//! are built once per thread and shared by every expression that produces
//! them. [`leak_check`] reports references still held when a run ends.

use std::rc::Rc;

use tass_bits::{Bits, Polarity};
use tracing::warn;

struct Canonical {
    null: Rc<Bits>,
    inv: Rc<Bits>,
    bits: [Rc<Bits>; 2],
}

impl Canonical {
    fn new() -> Self {
        Self {
            null: Rc::new(Bits::null()),
            inv: Rc::new(Bits::inv()),
            bits: [Rc::new(Bits::bit(false)), Rc::new(Bits::bit(true))],
        }
    }

    fn entries(&self) -> [(&'static str, &Rc<Bits>); 4] {
        [
            ("null", &self.null),
            ("inv", &self.inv),
            ("bit0", &self.bits[0]),
            ("bit1", &self.bits[1]),
        ]
    }
}

thread_local! {
    static CANONICAL: Canonical = Canonical::new();
}

/// Zero-width non-negative value
pub fn null() -> Rc<Bits> {
    CANONICAL.with(|c| Rc::clone(&c.null))
}

/// Zero-width inverted value
pub fn inv() -> Rc<Bits> {
    CANONICAL.with(|c| Rc::clone(&c.inv))
}

/// Single bit
pub fn bit(value: bool) -> Rc<Bits> {
    CANONICAL.with(|c| Rc::clone(&c.bits[value as usize]))
}

pub fn zero_width(polarity: Polarity) -> Rc<Bits> {
    match polarity {
        Polarity::NonNegative => null(),
        Polarity::Inverted => inv(),
    }
}

/// Share the canonical instance when `bits` has a canonical shape
pub fn intern(bits: Bits) -> Rc<Bits> {
    if !bits.is_canonical() {
        return Rc::new(bits);
    }
    match bits.width() {
        0 => zero_width(bits.polarity()),
        _ => bit(!bits.limbs().is_empty()),
    }
}

/// References to the canonical values held outside this module
pub fn outstanding() -> usize {
    CANONICAL.with(|c| {
        c.entries()
            .iter()
            .map(|(_, rc)| Rc::strong_count(rc) - 1)
            .sum()
    })
}

/// Warn about every canonical value that is still referenced and return
/// the total number of outstanding references
pub fn leak_check() -> usize {
    CANONICAL.with(|c| {
        let mut total = 0;
        for (name, rc) in c.entries() {
            let extra = Rc::strong_count(rc) - 1;
            if extra > 0 {
                warn!(value = name, references = extra, "canonical bits value still referenced");
            }
            total += extra;
        }
        total
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_shared() {
        assert!(Rc::ptr_eq(&null(), &null()));
        assert!(Rc::ptr_eq(&bit(true), &bit(true)));
        assert!(!Rc::ptr_eq(&bit(true), &bit(false)));
        assert!(Rc::ptr_eq(&zero_width(Polarity::Inverted), &inv()));
    }

    #[test]
    fn test_singleton_shapes() {
        assert_eq!(*null(), Bits::null());
        assert_eq!(*inv(), Bits::inv());
        assert_eq!(bit(true).limbs(), &[1]);
        assert_eq!(bit(false).width(), 1);
    }

    #[test]
    fn test_intern() {
        assert!(Rc::ptr_eq(&intern(Bits::null()), &null()));
        assert!(Rc::ptr_eq(&intern(Bits::from_limb(1, 1, Polarity::NonNegative)), &bit(true)));
        assert!(Rc::ptr_eq(&intern(Bits::from_limb(0, 0, Polarity::Inverted)), &inv()));

        let wide = intern(Bits::from_limb(5, 3, Polarity::NonNegative));
        assert_eq!(Rc::strong_count(&wide), 1);
        let inverted_bit = intern(Bits::bit(true).invert());
        assert_eq!(Rc::strong_count(&inverted_bit), 1);
    }

    #[test]
    fn test_leak_check() {
        assert_eq!(leak_check(), 0);
        let held = [bit(false), inv(), inv()];
        assert_eq!(outstanding(), 3);
        assert_eq!(leak_check(), 3);
        drop(held);
        assert_eq!(leak_check(), 0);
    }
}
