//! Diagnostic messages attached to lines.
//!
//! Bundles live in the payload of their line, so they move with the line when edits above
//! shift it. An edit that rewrites the line evicts the bundle (see
//! [`EditOutcome::evicted_messages`](crate::EditOutcome::evicted_messages)).

use crate::highlighter::CodeHighlighter;
use crate::line_info::LineInfo;
use codeview_core::{Message, MessageBundle, MessageBundleId};

impl CodeHighlighter {
    /// Attach `message` to `line`, creating the line's bundle if needed.
    ///
    /// Returns the updated bundle, or `None` if the line does not exist.
    pub fn add(&mut self, message: Message, line: usize) -> Option<MessageBundle> {
        let descriptor = self.line_index.lookup(line)?;
        if descriptor.info.is_none() {
            self.line_index.set_info_of(line, LineInfo::default());
        }

        let info = self.line_index.info_of_mut(line)?;
        let bundle = info.messages.get_or_insert_with(|| {
            let id = MessageBundleId(self.next_bundle_id);
            self.next_bundle_id += 1;
            MessageBundle::new(id)
        });
        bundle.messages.push(message);
        tracing::trace!(line, bundle = %bundle.id, "message added");
        Some(bundle.clone())
    }

    /// Detach the first occurrence of `message`.
    ///
    /// Returns the bundle after removal together with its line. A bundle left empty is
    /// removed from the line.
    pub fn remove(&mut self, message: &Message) -> Option<(MessageBundle, usize)> {
        let line = self.line_index.iter().position(|descriptor| {
            descriptor
                .info
                .as_ref()
                .and_then(|info| info.messages.as_ref())
                .is_some_and(|bundle| bundle.messages.contains(message))
        })?;

        let info = self.line_index.info_of_mut(line)?;
        let bundle = info.messages.as_mut()?;
        let index = bundle.messages.iter().position(|m| m == message)?;
        bundle.messages.remove(index);

        let bundle = if bundle.is_empty() {
            info.messages.take()?
        } else {
            bundle.clone()
        };
        Some((bundle, line))
    }

    /// Detach the whole bundle of `line`.
    pub fn remove_messages(&mut self, line: usize) -> Option<MessageBundle> {
        self.line_index.info_of_mut(line)?.messages.take()
    }

    /// The bundle attached to `line`.
    pub fn messages(&self, line: usize) -> Option<&MessageBundle> {
        self.line_index.info_of(line)?.messages.as_ref()
    }

    /// The line a bundle currently sits on.
    pub fn line_of_bundle(&self, id: MessageBundleId) -> Option<usize> {
        self.message_bundles()
            .find(|(_, bundle)| bundle.id == id)
            .map(|(line, _)| line)
    }

    /// All bundles with their current lines, in line order.
    pub fn message_bundles(&self) -> impl Iterator<Item = (usize, &MessageBundle)> {
        self.line_index
            .iter()
            .enumerate()
            .filter_map(|(line, descriptor)| {
                Some((line, descriptor.info.as_ref()?.messages.as_ref()?))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeview_core::MessageCategory;
    use codeview_lang::LanguageConfiguration;
    use pretty_assertions::assert_eq;

    fn warning(summary: &str) -> Message {
        Message::new(MessageCategory::Warning, 1, summary)
    }

    #[test]
    fn test_add_and_remove() {
        let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), "a\nb\nc");
        let first = highlighter.add(warning("one"), 1).unwrap();
        let second = highlighter.add(warning("two"), 1).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.messages.len(), 2);
        assert!(highlighter.add(warning("nowhere"), 7).is_none());

        let (bundle, line) = highlighter.remove(&warning("one")).unwrap();
        assert_eq!(line, 1);
        assert_eq!(bundle.messages, vec![warning("two")]);

        let (bundle, _) = highlighter.remove(&warning("two")).unwrap();
        assert!(bundle.is_empty());
        assert!(highlighter.messages(1).is_none());
        assert!(highlighter.remove(&warning("two")).is_none());
    }

    #[test]
    fn test_bundle_ids_are_unique_per_document() {
        let mut highlighter = CodeHighlighter::new(LanguageConfiguration::none(), "a\nb");
        let a = highlighter.add(warning("a"), 0).unwrap();
        let b = highlighter.add(warning("b"), 1).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(highlighter.line_of_bundle(b.id), Some(1));

        let removed = highlighter.remove_messages(0).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(highlighter.line_of_bundle(a.id), None);
        assert_eq!(highlighter.message_bundles().count(), 1);
    }
}
