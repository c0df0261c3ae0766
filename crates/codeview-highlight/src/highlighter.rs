//! Incremental re-tokenisation.
//!
//! [`CodeHighlighter`] owns the line index of one document together with the per-line
//! lexical state ([`LineInfo`]). After every edit it re-lexes the lines the edit touched and
//! keeps going line by line until the block comment depth flowing into a line matches the
//! depth stored for it, so the cached state is the same as a full re-lex of the document
//! would produce.
//!
//! The host owns the text. Results are returned as data: the range whose attributes must be
//! refreshed with the tokens and comment spans inside it, the message bundles that went away
//! with their lines, and an optional completion insertion to apply afterwards.

use crate::completion::TokenCompletion;
use crate::error::LexerError;
use crate::language::{LanguageState, LanguageToken, token_dictionary};
use crate::line_info::LineInfo;
use crate::tokenizer::{Token, Tokenizer, lexemes};
use codeview_core::line_index::terminator_len;
use codeview_core::{
    CharRange, EditEvent, LineDescriptor, LineIndex, MessageBundle, PendingInsertion,
};
use codeview_lang::LanguageConfiguration;
use std::ops::Range;

/// Tokeniser over the language token set.
pub type LanguageTokenizer = Tokenizer<LanguageToken, LanguageState>;

/// Attribute change for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeEdit {
    /// Remove lexical and comment attributes from a range.
    Clear {
        /// Affected range.
        range: CharRange,
    },
    /// Mark a range with a lexical token.
    Token {
        /// Token range.
        range: CharRange,
        /// Token type.
        token: LanguageToken,
        /// Whether the range starts a lexeme.
        is_lexeme_head: bool,
    },
    /// Mark a range as comment.
    Comment {
        /// Comment range.
        range: CharRange,
    },
}

/// Lexical result of re-tokenising a range of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexicalUpdate {
    /// The range whose attributes are replaced.
    pub range: CharRange,
    /// Re-tokenised lines.
    pub lines: Range<usize>,
    /// Tokens inside `range`, in document coordinates.
    pub tokens: Vec<Token<LanguageToken>>,
    /// Comment spans inside `range`, in document coordinates.
    pub comment_ranges: Vec<CharRange>,
}

impl LexicalUpdate {
    /// The update as a sequence of attribute edits: clear first, then tokens and comments.
    pub fn attribute_edits(&self) -> Vec<AttributeEdit> {
        let mut edits = Vec::with_capacity(1 + self.tokens.len() + self.comment_ranges.len());
        edits.push(AttributeEdit::Clear { range: self.range });
        edits.extend(self.tokens.iter().map(|token| AttributeEdit::Token {
            range: token.range,
            token: token.token_type,
            is_lexeme_head: token.is_lexeme_head,
        }));
        edits.extend(
            self.comment_ranges
                .iter()
                .map(|range| AttributeEdit::Comment { range: *range }),
        );
        edits
    }
}

/// Everything an edit notification produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// Attribute refresh, or `None` when tokenisation is disabled.
    pub lexical: Option<LexicalUpdate>,
    /// Message bundles whose lines the edit rewrote.
    pub evicted_messages: Vec<MessageBundle>,
    /// Completion the host should apply after this notification returns.
    pub completion: Option<PendingInsertion>,
    /// Lines that were re-tokenised.
    pub rescanned_lines: Range<usize>,
}

/// Syntax highlighting state of one document.
#[derive(Debug)]
pub struct CodeHighlighter {
    pub(crate) language: LanguageConfiguration,
    pub(crate) tokenizer: Option<LanguageTokenizer>,
    pub(crate) tokenizer_error: Option<LexerError>,
    pub(crate) line_index: LineIndex<LineInfo>,
    pub(crate) fully_tokenized: bool,
    pub(crate) completion: TokenCompletion,
    pub(crate) next_bundle_id: u64,
}

impl CodeHighlighter {
    /// Create the highlighter for `text` and tokenise it completely.
    ///
    /// If the language's patterns do not compile, tokenisation stays disabled (see
    /// [`CodeHighlighter::tokenizer_error`]); line bookkeeping and messages keep working.
    pub fn new(language: LanguageConfiguration, text: &str) -> Self {
        let (tokenizer, tokenizer_error) = match Tokenizer::new(&token_dictionary(&language)) {
            Ok(tokenizer) => (Some(tokenizer), None),
            Err(err) => {
                tracing::warn!(language = %language.name, error = %err, "tokeniser disabled");
                (None, Some(err))
            }
        };

        let mut highlighter = Self {
            language,
            tokenizer,
            tokenizer_error,
            line_index: LineIndex::from_text(text),
            fully_tokenized: false,
            completion: TokenCompletion::new(),
            next_bundle_id: 0,
        };
        highlighter.tokenize_all(text);
        highlighter
    }

    /// Replace the whole document. All messages are dropped.
    pub fn set_text(&mut self, text: &str) -> EditOutcome {
        let old = std::mem::replace(&mut self.line_index, LineIndex::from_text(text));
        let evicted_messages = old
            .lines()
            .iter()
            .filter_map(|line| line.info.as_ref()?.messages.clone())
            .collect();
        self.completion.reset();
        self.fully_tokenized = false;

        let rescanned_lines = self.tokenize_all(text);
        EditOutcome {
            lexical: self.lexical_update(rescanned_lines.clone()),
            evicted_messages,
            completion: None,
            rescanned_lines,
        }
    }

    /// Process an edit of the host's text.
    ///
    /// `text` is the post-edit document and `event` describes the change in post-edit
    /// coordinates.
    pub fn text_did_change(&mut self, text: &str, event: EditEvent) -> EditOutcome {
        let echo = self.completion.take_echo(text, &event);

        let update = self.line_index.update_after_editing(
            text,
            event.edited_range,
            event.change_in_length,
        );
        let evicted_messages: Vec<_> = update
            .replaced
            .into_iter()
            .filter_map(|line| line.info?.messages)
            .collect();

        if text.is_empty() {
            tracing::debug!("document emptied; tokenisation state cleared");
            self.line_index = LineIndex::new();
            self.fully_tokenized = false;
            self.completion.reset();
            return EditOutcome {
                evicted_messages,
                ..EditOutcome::default()
            };
        }

        if self.tokenizer.is_none() {
            return EditOutcome {
                evicted_messages,
                ..EditOutcome::default()
            };
        }

        let rescanned_lines = if self.fully_tokenized {
            let edited = self.line_index.lines_of(event.edited_range);
            let lines = update.lines.start.min(edited.start)..update.lines.end.max(edited.end);
            self.tokenize_incrementally(text, lines)
        } else {
            tracing::debug!("document not tokenised yet; tokenising everything");
            self.tokenize_all(text)
        };

        let completion = if echo {
            None
        } else {
            let current = self.lexeme_at(event.edited_range.location);
            self.completion
                .observe(&self.language, text, &event, current)
        };

        EditOutcome {
            lexical: self.lexical_update(rescanned_lines.clone()),
            evicted_messages,
            completion,
            rescanned_lines,
        }
    }

    fn tokenize_all(&mut self, text: &str) -> Range<usize> {
        if self.tokenizer.is_none() {
            return 0..0;
        }
        let lines = self.retokenize(text, 0..self.line_index.line_count(), 0);
        self.fully_tokenized = true;
        tracing::debug!(lines = lines.end, "full tokenisation");
        lines
    }

    fn tokenize_incrementally(&mut self, text: &str, lines: Range<usize>) -> Range<usize> {
        let initial_depth = match lines.start.checked_sub(1) {
            None => Some(0),
            Some(previous) => self
                .line_index
                .info_of(previous)
                .map(|info| info.comment_depth_end),
        };
        let Some(initial_depth) = initial_depth else {
            tracing::debug!(line = lines.start - 1, "missing line state; tokenising everything");
            return self.tokenize_all(text);
        };

        let rescanned = self.retokenize(text, lines.clone(), initial_depth);
        tracing::trace!(
            edited = ?lines,
            rescanned = ?rescanned,
            "incremental tokenisation"
        );
        rescanned
    }

    /// Re-lex `lines`, then continue until the depth flowing into a line equals its stored
    /// start depth. Returns the lines actually re-lexed.
    fn retokenize(&mut self, text: &str, lines: Range<usize>, initial_depth: u32) -> Range<usize> {
        let Some(tokenizer) = self.tokenizer.as_ref() else {
            return lines.start..lines.start;
        };

        let mut depth = initial_depth;
        let mut line = lines.start;
        while let Some(descriptor) = self.line_index.lookup(line) {
            let stored = descriptor.info.as_ref();
            if line >= lines.end && stored.is_some_and(|info| info.comment_depth_start == depth) {
                break;
            }
            let messages = stored.and_then(|info| info.messages.clone());

            let mut info = scan_line(tokenizer, text, descriptor.range, depth);
            info.messages = messages;
            depth = info.comment_depth_end;
            self.line_index.set_info_of(line, info);
            line += 1;
        }

        lines.start..line
    }

    fn lexical_update(&self, lines: Range<usize>) -> Option<LexicalUpdate> {
        self.tokenizer.as_ref()?;

        let mut update = LexicalUpdate {
            range: self.line_index.char_range_of(lines.clone()),
            lines: lines.clone(),
            ..LexicalUpdate::default()
        };
        for descriptor in self.line_index.lines().get(lines).unwrap_or_default() {
            let Some(info) = &descriptor.info else {
                continue;
            };
            let base = descriptor.range.location as isize;
            update
                .tokens
                .extend(info.tokens.iter().map(|token| token.shifted(base)));
            push_merged(
                &mut update.comment_ranges,
                info.comment_ranges.iter().map(|range| range.shifted(base)),
            );
        }
        Some(update)
    }

    /// The language configuration.
    pub fn language(&self) -> &LanguageConfiguration {
        &self.language
    }

    /// Why tokenisation is disabled, if it is.
    pub fn tokenizer_error(&self) -> Option<&LexerError> {
        self.tokenizer_error.as_ref()
    }

    /// Returns `true` once the whole document has been tokenised and the cached line state
    /// can seed incremental updates.
    pub fn is_fully_tokenized(&self) -> bool {
        self.fully_tokenized
    }

    /// The line index with its per-line payload.
    pub fn line_index(&self) -> &LineIndex<LineInfo> {
        &self.line_index
    }

    /// Descriptor of `line`.
    pub fn lookup(&self, line: usize) -> Option<&LineDescriptor<LineInfo>> {
        self.line_index.lookup(line)
    }

    /// Ranges of all lexemes of `token_type`, in document order.
    pub fn tokens(&self, token_type: LanguageToken) -> Vec<CharRange> {
        let tokens: Vec<_> = self
            .absolute_tokens()
            .filter(|token| token.token_type == token_type)
            .collect();
        lexemes(&tokens).into_iter().map(|(_, range)| range).collect()
    }

    /// The lexeme covering `index`.
    pub fn lexeme_at(&self, index: usize) -> Option<(LanguageToken, CharRange)> {
        let descriptor = self.line_index.lookup(self.line_index.line_containing(index)?)?;
        let info = descriptor.info.as_ref()?;
        let relative = index - descriptor.range.location;
        let base = descriptor.range.location as isize;

        lexemes(&info.tokens)
            .into_iter()
            .find(|(_, range)| range.contains(relative))
            .map(|(token, range)| (token, range.shifted(base)))
    }

    /// All comment spans, merged across lines.
    pub fn comment_ranges(&self) -> Vec<CharRange> {
        let mut merged = Vec::new();
        for descriptor in self.line_index.iter() {
            if let Some(info) = &descriptor.info {
                let base = descriptor.range.location as isize;
                push_merged(
                    &mut merged,
                    info.comment_ranges.iter().map(|range| range.shifted(base)),
                );
            }
        }
        merged
    }

    fn absolute_tokens(&self) -> impl Iterator<Item = Token<LanguageToken>> + '_ {
        self.line_index.iter().flat_map(|descriptor| {
            let base = descriptor.range.location as isize;
            descriptor
                .info
                .iter()
                .flat_map(move |info| info.tokens.iter().map(move |token| token.shifted(base)))
        })
    }
}

/// Lex one line starting inside `depth` block comments.
fn scan_line(tokenizer: &LanguageTokenizer, text: &str, line: CharRange, depth: u32) -> LineInfo {
    let content_end = line.upper_bound() - terminator_len(text, line);
    let scan = tokenizer.scan(
        text,
        LanguageState::from_comment_depth(depth),
        CharRange::from_bounds(line.location, content_end),
    );

    let base = line.location as isize;
    let mut info = LineInfo::starting_at_depth(depth);
    let mut depth = depth;
    let mut comment_start = line.location;
    let mut line_comment = false;

    for (i, token) in scan.tokens.iter().enumerate() {
        if line_comment && token.is_lexeme_head {
            break;
        }
        info.tokens.push(token.shifted(-base));
        if !token.is_lexeme_head {
            continue;
        }

        let lexeme_end = match scan.tokens.get(i + 1) {
            Some(next) if !next.is_lexeme_head => next.range.upper_bound(),
            _ => token.range.upper_bound(),
        };
        match token.token_type {
            LanguageToken::SingleLineComment if depth == 0 => {
                info.comment_ranges
                    .push(CharRange::from_bounds(token.range.location, content_end));
                line_comment = true;
            }
            LanguageToken::NestedCommentOpen => {
                if depth == 0 {
                    comment_start = token.range.location;
                }
                depth = depth.saturating_add(1);
            }
            LanguageToken::NestedCommentClose if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    info.comment_ranges
                        .push(CharRange::from_bounds(comment_start, lexeme_end));
                }
            }
            other if depth == 0 => info.count_bracket(other),
            _ => {}
        }
    }

    if depth > 0 && comment_start < line.upper_bound() {
        info.comment_ranges
            .push(CharRange::from_bounds(comment_start, line.upper_bound()));
    }
    for range in &mut info.comment_ranges {
        *range = range.shifted(-base);
    }
    info.comment_depth_end = depth;
    info
}

fn push_merged(merged: &mut Vec<CharRange>, ranges: impl IntoIterator<Item = CharRange>) {
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.upper_bound() == range.location => {
                *last = last.union(&range);
            }
            _ => merged.push(range),
        }
    }
}
