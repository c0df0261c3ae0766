//! Character ranges over a document.
//!
//! Offsets are UTF-8 code units (bytes) of the document `&str`.

use std::ops::Range;

/// A `location`/`length` range (`location..location + length`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CharRange {
    /// Start offset (inclusive).
    pub location: usize,
    /// Number of code units covered.
    pub length: usize,
}

impl CharRange {
    /// Create a range from a start offset and a length.
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Create a range from a start offset and an exclusive end offset.
    ///
    /// An `end` before `start` yields an empty range at `start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub const fn upper_bound(&self) -> usize {
        self.location.saturating_add(self.length)
    }

    /// Returns `true` if the range covers no code units.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if `index` lies inside the range.
    pub const fn contains(&self, index: usize) -> bool {
        self.location <= index && index < self.upper_bound()
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &CharRange) -> CharRange {
        Self::from_bounds(
            self.location.min(other.location),
            self.upper_bound().max(other.upper_bound()),
        )
    }

    /// Overlap of the two ranges, if they share at least one code unit.
    pub fn intersection(&self, other: &CharRange) -> Option<CharRange> {
        let start = self.location.max(other.location);
        let end = self.upper_bound().min(other.upper_bound());
        (start < end).then(|| Self::from_bounds(start, end))
    }

    /// Clamp the range so it lies within a document of `len` code units.
    pub fn clamped(&self, len: usize) -> CharRange {
        let start = self.location.min(len);
        Self::from_bounds(start, self.upper_bound().min(len))
    }

    /// The range moved by `delta` code units.
    pub fn shifted(&self, delta: isize) -> CharRange {
        Self::new(self.location.saturating_add_signed(delta), self.length)
    }

    /// The same range as a `Range<usize>`.
    pub const fn as_range(&self) -> Range<usize> {
        self.location..self.upper_bound()
    }
}

impl From<Range<usize>> for CharRange {
    fn from(range: Range<usize>) -> Self {
        Self::from_bounds(range.start, range.end)
    }
}

impl From<CharRange> for Range<usize> {
    fn from(range: CharRange) -> Self {
        range.as_range()
    }
}
