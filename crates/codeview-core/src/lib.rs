#![warn(missing_docs)]
//! Codeview Core - line bookkeeping for incremental code highlighting
//!
//! # Overview
//!
//! `codeview-core` holds the document-level data structures shared by the codeview crates.
//! It does not own the document text: the host buffer does, and reports every content change
//! as an [`EditEvent`] together with the post-edit text.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Diagnostics (message bundles per line)     │  ← Gutter / inline messages
//! ├─────────────────────────────────────────────┤
//! │  Line Index (descriptors + payload)         │  ← O(log n) line access
//! ├─────────────────────────────────────────────┤
//! │  Edit events / pending insertions           │  ← Host buffer boundary
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use codeview_core::{CharRange, EditEvent, LineIndex};
//!
//! let mut text = "fn main() {\n}\n".to_string();
//! let mut lines = LineIndex::<()>::from_text(&text);
//! assert_eq!(lines.line_count(), 3);
//!
//! let event = EditEvent::apply(&mut text, 11..11, "\n    body();").unwrap();
//! lines.update_after_editing(&text, event.edited_range, event.change_in_length);
//!
//! assert_eq!(lines.line_count(), 4);
//! assert_eq!(lines.line_containing(14), Some(1));
//! assert_eq!(lines.lookup(1).map(|line| line.range), Some(CharRange::new(12, 12)));
//! ```
//!
//! # Offsets
//!
//! All offsets are UTF-8 code units (bytes) of the document `&str`.
//!
//! # Module Description
//!
//! - [`range`] - `location`/`length` ranges
//! - [`line_ending`] - LF / CRLF / CR terminators
//! - [`line_index`] - incrementally updated line table
//! - [`edit`] - edit notifications and deferred insertions
//! - [`diagnostics`] - line-level messages and bundles

pub mod diagnostics;
pub mod edit;
pub mod line_ending;
pub mod line_index;
pub mod range;

pub use diagnostics::{Message, MessageBundle, MessageBundleId, MessageCategory, RichText};
pub use edit::{EditEvent, PendingInsertion};
pub use line_ending::LineEnding;
pub use line_index::{LineDescriptor, LineIndex, LineUpdate};
pub use range::CharRange;
