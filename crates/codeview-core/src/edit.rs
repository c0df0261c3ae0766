//! Edit notifications exchanged with the host text buffer.
//!
//! The host owns the document text. After each content change it reports an [`EditEvent`]
//! together with the post-edit text; engines never change content themselves, except through
//! a [`PendingInsertion`] that the host applies after the current notification returns.

use crate::range::CharRange;
use std::ops::Range;

/// A single content change, expressed in post-edit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent {
    /// Range of the replacement text in the post-edit document.
    pub edited_range: CharRange,
    /// Post-edit length minus pre-edit length.
    pub change_in_length: isize,
}

impl EditEvent {
    /// Create an event from the post-edit range and the change in length.
    pub fn new(edited_range: CharRange, change_in_length: isize) -> Self {
        Self {
            edited_range,
            change_in_length,
        }
    }

    /// Insertion of `length` code units at `location`.
    pub fn insertion(location: usize, length: usize) -> Self {
        Self::new(CharRange::new(location, length), length as isize)
    }

    /// Deletion of `length` code units at `location`.
    pub fn deletion(location: usize, length: usize) -> Self {
        Self::new(CharRange::new(location, 0), -(length as isize))
    }

    /// Replace `range` of `text` with `replacement` and describe the change.
    ///
    /// Returns `None` (leaving `text` untouched) if `range` is out of bounds or does not lie
    /// on `char` boundaries.
    pub fn apply(text: &mut String, range: Range<usize>, replacement: &str) -> Option<Self> {
        text.get(range.clone())?;
        let location = range.start;
        let removed = range.len();
        text.replace_range(range, replacement);
        Some(Self::new(
            CharRange::new(location, replacement.len()),
            replacement.len() as isize - removed as isize,
        ))
    }

    /// Length of the replaced text in the pre-edit document.
    pub fn pre_edit_length(&self) -> usize {
        self.edited_range
            .length
            .checked_add_signed(-self.change_in_length)
            .unwrap_or(0)
    }

    /// Returns `true` if the edit inserted exactly one character and removed nothing.
    pub fn is_single_char_insertion(&self, text: &str) -> bool {
        if self.pre_edit_length() != 0 {
            return false;
        }
        text.get(self.edited_range.as_range())
            .is_some_and(|inserted| inserted.chars().count() == 1)
    }
}

/// A deferred insertion synthesized by an engine (e.g. bracket completion).
///
/// It must be applied only after the edit notification that produced it has returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsertion {
    /// Offset (in the document that produced the insertion) at which to insert.
    pub location: usize,
    /// Text to insert.
    pub text: String,
}

impl PendingInsertion {
    /// Create a pending insertion.
    pub fn new(location: usize, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }

    /// Insert into `text`, returning the matching edit notification.
    pub fn apply(&self, text: &mut String) -> Option<EditEvent> {
        EditEvent::apply(text, self.location..self.location, &self.text)
    }

    /// The edit notification the host emits when it applies this insertion.
    pub fn event(&self) -> EditEvent {
        EditEvent::insertion(self.location, self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_reports_post_edit_range() {
        let mut text = "hello world".to_string();
        let event = EditEvent::apply(&mut text, 6..11, "rust!").unwrap();
        assert_eq!(text, "hello rust!");
        assert_eq!(event.edited_range, CharRange::new(6, 5));
        assert_eq!(event.change_in_length, 0);
        assert_eq!(event.pre_edit_length(), 5);

        let event = EditEvent::apply(&mut text, 0..6, "").unwrap();
        assert_eq!(text, "rust!");
        assert_eq!(event, EditEvent::deletion(0, 6));
    }

    #[test]
    fn test_apply_rejects_bad_ranges() {
        let mut text = "你好".to_string();
        assert_eq!(EditEvent::apply(&mut text, 1..2, "x"), None);
        assert_eq!(EditEvent::apply(&mut text, 0..9, "x"), None);
        assert_eq!(text, "你好");
    }

    #[test]
    fn test_single_char_insertion() {
        let mut text = "ab".to_string();
        let event = EditEvent::apply(&mut text, 1..1, "好").unwrap();
        assert!(event.is_single_char_insertion(&text));

        let event = EditEvent::apply(&mut text, 0..1, "x").unwrap();
        assert!(!event.is_single_char_insertion(&text));

        let event = EditEvent::apply(&mut text, 0..0, "xy").unwrap();
        assert!(!event.is_single_char_insertion(&text));
    }

    #[test]
    fn test_pending_insertion() {
        let mut text = "{\n".to_string();
        let pending = PendingInsertion::new(1, "\n}");
        let event = pending.apply(&mut text).unwrap();
        assert_eq!(text, "{\n}\n");
        assert_eq!(event, pending.event());
    }
}
