#![warn(missing_docs)]
//! `codeview-highlight` - incremental lexical analysis for codeview.
//!
//! The crate has two halves:
//!
//! - a generic, regex-driven multi-state tokeniser ([`TokenDictionary`] → [`Tokenizer`]);
//! - [`CodeHighlighter`], which keeps per-line lexical state of a document in a
//!   [`LineIndex`](codeview_core::LineIndex) and re-lexes only what an edit changed,
//!   carrying block comment depth across lines.
//!
//! ```rust
//! use codeview_core::{CharRange, EditEvent};
//! use codeview_highlight::{CodeHighlighter, LanguageToken};
//! use codeview_lang::LanguageConfiguration;
//!
//! let mut text = "let a = 1\nlet b = 2\n".to_string();
//! let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
//!
//! let event = EditEvent::apply(&mut text, 0..0, "/* ").unwrap();
//! let outcome = highlighter.text_did_change(&text, event);
//!
//! // The unterminated comment swallows every following line.
//! assert_eq!(outcome.rescanned_lines, 0..3);
//! assert_eq!(highlighter.comment_ranges(), vec![CharRange::new(0, text.len())]);
//! assert!(highlighter.tokens(LanguageToken::Keyword).is_empty());
//! ```

mod compiler;
mod completion;
mod error;
mod highlighter;
mod language;
mod line_info;
mod messages;
mod pattern;
mod tokenizer;

pub use completion::TokenCompletion;
pub use error::LexerError;
pub use highlighter::{
    AttributeEdit, CodeHighlighter, EditOutcome, LanguageTokenizer, LexicalUpdate,
};
pub use language::{
    CommentTransition, LanguageDictionary, LanguageState, LanguageToken, LexerStateTag, lexeme,
    token_dictionary,
};
pub use line_info::LineInfo;
pub use pattern::{LexerState, TokenAction, TokenDictionary, TokenPattern, TokenRule};
pub use tokenizer::{Scan, Token, Tokenizer, lexemes};
