//! # Bitwise Combinators
//!
//! AND, OR and XOR over operands of any width and polarity. Each operator
//! has a single-limb fast path and a general limb loop; both must produce
//! identical results.
//!
//! The inverted operand's stored limbs are complements, so every operator
//! reduces to one of four plain limb operations:
//!
//! | operator | both plain | `a` inverted   | `b` inverted   | both inverted  |
//! |----------|------------|----------------|----------------|----------------|
//! | AND      | `a & b`    | `!a & b`       | `a & !b`       | `a \| b`, inv  |
//! | OR       | `a \| b`   | `a & !b`, inv  | `!a & b`, inv  | `a & b`, inv   |
//! | XOR      | `a ^ b`    | `a ^ b`, inv   | `a ^ b`, inv   | `a ^ b`        |
//!
//! Past the shorter magnitude only the longer operand's limbs remain, so
//! they are either copied or dropped wholesale.

use crate::bits::Bits;
use crate::limb::{Limb, Limbs};
use crate::polarity::Polarity;

/// Bitwise operator selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    /// Declared width of the result
    fn width(self, a: &Bits, b: &Bits) -> usize {
        match self {
            // narrower operand wins unless its virtual ones reach further
            BitOp::And => {
                if a.width < b.width {
                    if a.is_inverted() { b.width } else { a.width }
                } else if b.is_inverted() {
                    a.width
                } else {
                    b.width
                }
            }
            // narrower operand wins only if it is inverted
            BitOp::Or => {
                if a.width < b.width {
                    if a.is_inverted() { a.width } else { b.width }
                } else if b.is_inverted() {
                    b.width
                } else {
                    a.width
                }
            }
            BitOp::Xor => a.width.max(b.width),
        }
    }

    fn polarity(self, a: Polarity, b: Polarity) -> Polarity {
        match self {
            BitOp::And => Polarity::from_inverted(a.is_inverted() && b.is_inverted()),
            BitOp::Or => Polarity::from_inverted(a.is_inverted() || b.is_inverted()),
            BitOp::Xor => a.xor(b),
        }
    }

    /// Stored limb of the result for one overlapping pair of stored limbs
    #[inline]
    fn limb(self, a: Limb, a_inv: bool, b: Limb, b_inv: bool) -> Limb {
        match (self, a_inv, b_inv) {
            (BitOp::And, false, false) => a & b,
            (BitOp::And, true, false) => !a & b,
            (BitOp::And, false, true) => a & !b,
            (BitOp::And, true, true) => a | b,
            (BitOp::Or, false, false) => a | b,
            (BitOp::Or, true, false) => a & !b,
            (BitOp::Or, false, true) => !a & b,
            (BitOp::Or, true, true) => a & b,
            (BitOp::Xor, _, _) => a ^ b,
        }
    }

    /// Whether the longer operand's limbs past the overlap carry into the
    /// result, given the polarity of the shorter one
    fn keeps_tail(self, short_inverted: bool) -> bool {
        match self {
            BitOp::And => short_inverted,
            BitOp::Or => !short_inverted,
            BitOp::Xor => true,
        }
    }
}

impl Bits {
    /// Bitwise AND
    pub fn and(&self, other: &Bits) -> Bits {
        combine(BitOp::And, self, other)
    }

    /// Bitwise OR
    pub fn or(&self, other: &Bits) -> Bits {
        combine(BitOp::Or, self, other)
    }

    /// Bitwise XOR
    pub fn xor(&self, other: &Bits) -> Bits {
        combine(BitOp::Xor, self, other)
    }

    /// Apply a bitwise operator
    pub fn bitop(&self, op: BitOp, other: &Bits) -> Bits {
        combine(op, self, other)
    }
}

fn combine(op: BitOp, a: &Bits, b: &Bits) -> Bits {
    if a.limbs.len() <= 1 && b.limbs.len() <= 1 {
        combine_single(op, a, b)
    } else {
        combine_general(op, a, b)
    }
}

/// Both magnitudes fit one limb
pub(crate) fn combine_single(op: BitOp, a: &Bits, b: &Bits) -> Bits {
    let la = a.limbs.first().copied().unwrap_or(0);
    let lb = b.limbs.first().copied().unwrap_or(0);
    let limb = op.limb(la, a.is_inverted(), lb, b.is_inverted());
    let polarity = op.polarity(a.polarity, b.polarity);
    let mut limbs = Limbs::new();
    if limb != 0 {
        limbs.push(limb);
    }
    Bits {
        limbs,
        polarity,
        width: op.width(a, b),
    }
}

/// Limb loop over magnitudes of any length
pub(crate) fn combine_general(op: BitOp, a: &Bits, b: &Bits) -> Bits {
    let width = op.width(a, b);
    let polarity = op.polarity(a.polarity, b.polarity);
    let (long, short) = if a.limbs.len() < b.limbs.len() { (b, a) } else { (a, b) };
    let (long_inv, short_inv) = (long.is_inverted(), short.is_inverted());

    let overlap = short.limbs.len();
    let tail = op.keeps_tail(short_inv);
    let len = if tail { long.limbs.len() } else { overlap };

    let mut limbs = Limbs::with_capacity(len);
    limbs.extend(
        long.limbs[..overlap]
            .iter()
            .zip(short.limbs.iter())
            .map(|(&l, &s)| op.limb(l, long_inv, s, short_inv)),
    );
    if tail {
        limbs.extend_from_slice(&long.limbs[overlap..]);
    }
    Bits::normalized(limbs, polarity, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nn(value: Limb, width: usize) -> Bits {
        Bits::from_limb(value, width, Polarity::NonNegative)
    }

    #[test]
    fn test_and_inverted_wider_operand() {
        // five one bits mask a three bit value
        let ones5 = nn(0, 5).invert();
        let r = nn(0b110, 3).and(&ones5);
        assert_eq!(r.width(), 3);
        assert_eq!(r.limbs(), &[0b110]);
        assert!(!r.is_inverted());
    }

    #[test]
    fn test_and_widths() {
        let a = nn(0xF, 4);
        let b = nn(0xFF, 8);
        assert_eq!(a.and(&b).width(), 4);
        assert_eq!(b.and(&a).width(), 4);
        assert_eq!(a.invert().and(&b).width(), 8);
        assert_eq!(b.and(&a.invert()).width(), 8);
        assert_eq!(a.invert().and(&b).limbs(), &[0xF0]);
    }

    #[test]
    fn test_or_widths() {
        let a = nn(0x3, 4);
        let b = nn(0x30, 8);
        assert_eq!(a.or(&b).width(), 8);
        assert_eq!(a.or(&b).limbs(), &[0x33]);
        // ~%0011 | $30 == ~(%0011 & ~$30)
        let r = a.invert().or(&b);
        assert_eq!(r.width(), 4);
        assert!(r.is_inverted());
        assert_eq!(r.limbs(), &[0x3]);
    }

    #[test]
    fn test_xor_polarity() {
        let a = nn(0b1100, 4);
        let b = nn(0b1010, 4);
        assert_eq!(a.xor(&b).limbs(), &[0b0110]);
        assert!(a.invert().xor(&b).is_inverted());
        assert!(!a.invert().xor(&b.invert()).is_inverted());
        assert_eq!(a.xor(&nn(0, 12)).width(), 12);
    }

    #[test]
    fn test_general_tail_handling() {
        let long = Bits::from(&[0x1111_1111u32, 0x2222_2222, 0x3333_3333][..]);
        let short = nn(0xFFFF, 16);

        // plain AND drops the tail
        let r = long.and(&short);
        assert_eq!(r.limbs(), &[0x1111]);
        assert_eq!(r.width(), 16);

        // AND with an inverted short operand keeps it
        let r = long.and(&short.invert());
        assert_eq!(r.limbs(), &[0x1111_0000, 0x2222_2222, 0x3333_3333]);
        assert_eq!(r.width(), 96);

        // OR keeps the tail unless the short operand is inverted
        assert_eq!(long.or(&short).limbs(), &[0x1111_FFFF, 0x2222_2222, 0x3333_3333]);
        let r = long.or(&short.invert());
        assert_eq!(r.limbs(), &[0xFFFF & !0x1111]);
        assert!(r.is_inverted());
        assert_eq!(r.width(), 16);
    }

    #[test]
    fn test_general_normalizes() {
        let a = Bits::from(&[1u32, 0x8000_0000][..]);
        let b = Bits::from(&[0u32, 0x8000_0000][..]);
        let r = a.xor(&b);
        assert_eq!(r.limbs(), &[1]);
        assert!(r.is_inline());
        assert_eq!(r.width(), 64);
    }

    #[test]
    fn test_bitop_dispatch() {
        let a = nn(0b1100, 4);
        let b = nn(0b1010, 4);
        assert_eq!(a.bitop(BitOp::And, &b), a.and(&b));
        assert_eq!(a.bitop(BitOp::Or, &b), a.or(&b));
        assert_eq!(a.bitop(BitOp::Xor, &b), a.xor(&b));
    }
}
