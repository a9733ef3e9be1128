//! # Index Resolution
//!
//! Turns user supplied indices and `start:end:step` ranges into absolute
//! bit positions. Negative indices count from the end.

use crate::error::{EvalError, Position, Result};
use crate::value::SliceRange;

/// Absolute position of `index` within a sequence of `len` elements
pub fn resolve_index(index: i64, len: usize, pos: Position) -> Result<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let absolute = if index < 0 { index.checked_add(len_i) } else { Some(index) };
    match absolute {
        Some(i) if (0..len_i).contains(&i) => Ok(i as usize),
        _ => Err(EvalError::IndexRange { index, len, pos }),
    }
}

/// Resolved slice: `length` positions starting at `offset`, `step` apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceParams {
    pub offset: usize,
    pub step: i64,
    pub length: usize,
}

impl SliceParams {
    pub fn is_contiguous(&self) -> bool {
        self.step == 1
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = usize> {
        let (offset, step) = (self.offset as i64, self.step);
        (0..self.length).map(move |i| (offset + i as i64 * step) as usize)
    }
}

/// Resolve a range against a sequence of `len` elements, clamping the
/// bounds the way slicing does
pub fn resolve_slice(range: &SliceRange, len: usize, pos: Position) -> Result<SliceParams> {
    let step = range.step.unwrap_or(1);
    if step == 0 {
        return Err(EvalError::ZeroValue { pos });
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let relative = |v: i64| if v < 0 { v.saturating_add(len) } else { v };

    let (start, span) = if step > 0 {
        let start = range.start.map_or(0, relative).clamp(0, len);
        let end = range.end.map_or(len, relative).clamp(0, len);
        (start, end - start)
    } else {
        let start = range.start.map_or(len - 1, relative).clamp(-1, len - 1);
        let end = range.end.map_or(-1, relative).clamp(-1, len - 1);
        (start, start - end)
    };

    let stride = step.unsigned_abs();
    let length = if span > 0 {
        ((span as u64 - 1) / stride + 1) as usize
    } else {
        0
    };
    Ok(SliceParams {
        offset: start.max(0) as usize,
        step,
        length,
    })
}
