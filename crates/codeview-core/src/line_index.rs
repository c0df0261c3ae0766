//! Logical line index
//!
//! Keeps an ordered table of line descriptors (character range + per-line payload) for a
//! document and answers line/offset lookups in O(log n). The table is updated in place after
//! every edit; only the lines touched by the edit are re-split.

use crate::line_ending::{LineEnding, split_lines};
use crate::range::CharRange;
use std::ops::Range;

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDescriptor<I> {
    /// Code units of the line, including its terminator.
    pub range: CharRange,
    /// Per-line payload; `None` until a consumer computes it.
    pub info: Option<I>,
}

impl<I> LineDescriptor<I> {
    fn fresh(range: CharRange) -> Self {
        Self { range, info: None }
    }
}

/// Outcome of [`LineIndex::update_after_editing`].
#[derive(Debug)]
pub struct LineUpdate<I> {
    /// Descriptors (with their payload) that were removed from the table.
    ///
    /// A replaced line whose text was left untouched by the edit keeps its payload in the
    /// table; its entry here has `info == None`.
    pub replaced: Vec<LineDescriptor<I>>,
    /// Post-edit line indices of the descriptors that took their place.
    pub lines: Range<usize>,
}

/// Logical line index.
///
/// Invariants:
/// - the table is never empty and line 0 starts at offset 0;
/// - `lines[i].range.upper_bound() == lines[i + 1].range.location`;
/// - a trailing zero-length line exists iff the document ends with a line terminator
///   (or the document is empty).
#[derive(Debug, Clone)]
pub struct LineIndex<I> {
    lines: Vec<LineDescriptor<I>>,
}

impl<I> LineIndex<I> {
    /// Line index of the empty document.
    pub fn new() -> Self {
        Self {
            lines: vec![LineDescriptor::fresh(CharRange::new(0, 0))],
        }
    }

    /// Build the line index of `text`; every line starts without payload.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: descriptors_for(text, 0),
        }
    }

    /// Total line count (at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Document length in code units.
    pub fn len(&self) -> usize {
        self.lines
            .last()
            .map_or(0, |line| line.range.upper_bound())
    }

    /// Returns `true` for the empty document.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All line descriptors in document order.
    pub fn lines(&self) -> &[LineDescriptor<I>] {
        &self.lines
    }

    /// Iterate over all line descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &LineDescriptor<I>> {
        self.lines.iter()
    }

    /// Descriptor of `line`, or `None` if the line does not exist.
    pub fn lookup(&self, line: usize) -> Option<&LineDescriptor<I>> {
        self.lines.get(line)
    }

    /// Payload of `line`, if the line exists and has one.
    pub fn info_of(&self, line: usize) -> Option<&I> {
        self.lines.get(line)?.info.as_ref()
    }

    /// Mutable payload of `line`, if the line exists and has one.
    pub fn info_of_mut(&mut self, line: usize) -> Option<&mut I> {
        self.lines.get_mut(line)?.info.as_mut()
    }

    /// Replace the payload of `line`. No-op if the line does not exist.
    pub fn set_info_of(&mut self, line: usize, info: I) {
        if let Some(descriptor) = self.lines.get_mut(line) {
            descriptor.info = Some(info);
        }
    }

    /// Union of the ranges of a contiguous span of lines, clamped to the existing lines.
    pub fn char_range_of(&self, lines: Range<usize>) -> CharRange {
        let count = self.line_count();
        let start = lines.start.min(count);
        let end = lines.end.clamp(start, count);

        if start == end {
            let location = self
                .lines
                .get(start)
                .map_or(self.len(), |line| line.range.location);
            return CharRange::new(location, 0);
        }

        CharRange::from_bounds(
            self.lines[start].range.location,
            self.lines[end - 1].range.upper_bound(),
        )
    }

    /// The line holding the code unit at `index`, or `None` if `index` is past the document.
    pub fn line_containing(&self, index: usize) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        // Line 0 starts at 0, so at least one line satisfies the predicate.
        let after = self
            .lines
            .partition_point(|line| line.range.location <= index);
        Some(after - 1)
    }

    /// Like [`LineIndex::line_containing`], but also maps the end-of-document insertion point
    /// to the last line.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        if index == self.len() {
            Some(self.line_count() - 1)
        } else {
            self.line_containing(index)
        }
    }

    /// Smallest contiguous line span covering every code unit of `range`.
    ///
    /// A zero-length range maps to the single line enclosing its location (including the
    /// trailing empty line at the end of the document).
    pub fn lines_containing(&self, range: CharRange) -> Range<usize> {
        if range.is_empty() {
            return self
                .line_of(range.location)
                .map_or(0..0, |line| line..line + 1);
        }

        let Some(start) = self.line_of(range.location) else {
            return 0..0;
        };
        match self.line_containing(range.upper_bound() - 1) {
            Some(end) => start..end + 1,
            None => start..self.line_count(),
        }
    }

    /// Like [`LineIndex::lines_containing`], but also includes the trailing empty line when
    /// `range` reaches the end of a document that ends with a line break.
    pub fn lines_of(&self, range: CharRange) -> Range<usize> {
        let lines = self.lines_containing(range);
        let count = self.line_count();

        match self.lines.last() {
            Some(last)
                if count > 1
                    && last.range.is_empty()
                    && range.upper_bound() == last.range.location
                    && lines.end == count - 1 =>
            {
                lines.start..count
            }
            _ => lines,
        }
    }

    /// Pre-edit lines whose text an edit may change.
    ///
    /// `edited` is the post-edit range and `delta` the change in document length. The
    /// pre-edit range is extended by one code unit, because inserting or removing a line
    /// terminator merges the following line into (or splits it from) the edited one.
    pub fn lines_affected(&self, edited: CharRange, delta: isize) -> Range<usize> {
        let old_length = pre_edit_length(edited, delta);
        let extended = CharRange::new(edited.location, old_length + 1).clamped(self.len());
        self.lines_of(extended)
    }

    /// Update the table after `text` was edited.
    ///
    /// `edited` is the range of the new text in `text` and `delta` the change in document
    /// length. Only the lines affected by the edit are re-split; every later line is shifted.
    pub fn update_after_editing(
        &mut self,
        text: &str,
        edited: CharRange,
        delta: isize,
    ) -> LineUpdate<I> {
        let mut affected = self.lines_affected(edited, delta);
        if affected.is_empty() {
            tracing::warn!(?edited, delta, "edit outside of the line index; rebuilding");
            return self.rebuild(text);
        }

        // A `\r` ending the previous line pairs with a `\n` now starting the region.
        let mut start = self.lines[affected.start].range.location;
        if affected.start > 0
            && start > 0
            && text.as_bytes().get(start - 1) == Some(&b'\r')
            && text.as_bytes().get(start) == Some(&b'\n')
        {
            affected.start -= 1;
            start = self.lines[affected.start].range.location;
        }

        let old_end = self.lines[affected.end - 1].range.upper_bound();
        let Some(new_end) = old_end
            .checked_add_signed(delta)
            .filter(|end| *end >= start && *end <= text.len())
        else {
            tracing::warn!(?edited, delta, "inconsistent edit; rebuilding line index");
            return self.rebuild(text);
        };
        let Some(region) = text.get(start..new_end) else {
            tracing::warn!(?edited, delta, "edit splits a character; rebuilding line index");
            return self.rebuild(text);
        };

        let mut fresh = descriptors_for(region, start);
        // A line follows the region: it is the line the region's trailing empty line stands for.
        if affected.end < self.lines.len() && fresh.last().is_some_and(|line| line.range.is_empty())
        {
            fresh.pop();
        }

        let edit_end = edited.location + pre_edit_length(edited, delta);
        let last_old = self.lines[affected.end - 1].range;
        // The last replaced line lies wholly after the edit: same text, only shifted.
        let carries_last = last_old.location >= edit_end
            && !last_old.is_empty()
            && fresh
                .last()
                .is_some_and(|line| line.range == last_old.shifted(delta));

        let fresh_count = fresh.len();
        let new_lines = affected.start..affected.start + fresh_count;
        let mut replaced: Vec<_> = self.lines.splice(affected.clone(), fresh).collect();

        if carries_last && let Some(old) = replaced.last_mut() {
            self.lines[new_lines.end - 1].info = old.info.take();
        }

        for line in &mut self.lines[new_lines.end..] {
            line.range = line.range.shifted(delta);
        }

        tracing::trace!(
            old_lines = ?affected,
            new_lines = ?new_lines,
            delta,
            "line index updated"
        );
        debug_assert_eq!(self.len(), text.len());

        LineUpdate {
            replaced,
            lines: new_lines,
        }
    }

    fn rebuild(&mut self, text: &str) -> LineUpdate<I> {
        let replaced = std::mem::replace(&mut self.lines, descriptors_for(text, 0));
        LineUpdate {
            replaced,
            lines: 0..self.line_count(),
        }
    }
}

impl<I> Default for LineIndex<I> {
    fn default() -> Self {
        Self::new()
    }
}

fn pre_edit_length(edited: CharRange, delta: isize) -> usize {
    edited.length.checked_add_signed(-delta).unwrap_or(0)
}

fn descriptors_for<I>(text: &str, offset: usize) -> Vec<LineDescriptor<I>> {
    let mut location = offset;
    split_lines(text)
        .into_iter()
        .map(|line| {
            let range = CharRange::new(location, line.len());
            location += line.len();
            LineDescriptor::fresh(range)
        })
        .collect()
}

/// Length of the line terminator at the end of `range` in `text` (0 if none).
pub fn terminator_len(text: &str, range: CharRange) -> usize {
    text.get(range.as_range())
        .and_then(LineEnding::ending)
        .map_or(0, LineEnding::len)
}
