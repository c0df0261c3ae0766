//! Regex-driven, multi-state tokeniser.

use crate::compiler::CompiledState;
use crate::error::LexerError;
use crate::pattern::{LexerState, TokenDictionary};
use codeview_core::CharRange;
use std::collections::HashMap;

/// One token tuple.
///
/// A lexeme is reported as a head token covering its first character, followed (for
/// lexemes longer than one character) by a body token covering the rest. Heads delimit
/// adjacent lexemes of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<T> {
    /// Token classification.
    pub token_type: T,
    /// Code units covered.
    pub range: CharRange,
    /// Whether this is the first character of its lexeme.
    pub is_lexeme_head: bool,
}

impl<T: Copy> Token<T> {
    /// The same token moved by `delta` code units.
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            range: self.range.shifted(delta),
            ..*self
        }
    }
}

/// Result of [`Tokenizer::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<T, S> {
    /// Tokens in match order.
    pub tokens: Vec<Token<T>>,
    /// Lexer state after the last match.
    pub end_state: S,
}

/// A compiled token dictionary.
#[derive(Debug, Clone)]
pub struct Tokenizer<T, S: LexerState> {
    states: HashMap<S::Tag, CompiledState<T, S::Transition>>,
}

impl<T: Copy, S: LexerState> Tokenizer<T, S> {
    /// Compile `dictionary`; fails on the first configuration error.
    pub fn new(dictionary: &TokenDictionary<T, S>) -> Result<Self, LexerError> {
        let mut states = HashMap::new();
        for tag in dictionary.tags() {
            states.insert(tag, CompiledState::compile(dictionary.rules(tag))?);
        }
        Ok(Self { states })
    }

    /// Scan `range` of `text` starting in state `start`.
    ///
    /// The text after `range` is not visible to the patterns. Zero-length matches are
    /// skipped. The scan stops at the first position from which no pattern matches.
    pub fn scan(&self, text: &str, start: S, range: CharRange) -> Scan<T, S> {
        let mut state = start;
        let mut tokens = Vec::new();

        let range = range.clamped(text.len());
        let end = range.upper_bound();
        let (Some(haystack), true) = (text.get(..end), text.is_char_boundary(range.location))
        else {
            return Scan {
                tokens,
                end_state: state,
            };
        };

        let mut pos = range.location;
        while pos < end {
            let Some(compiled) = self.states.get(&state.tag()) else {
                break;
            };
            let Some(regex) = &compiled.regex else {
                break;
            };
            let Some(captures) = regex.captures_at(haystack, pos) else {
                break;
            };
            let Some(whole) = captures.get(0) else {
                break;
            };

            if whole.is_empty() {
                pos = next_char_boundary(haystack, whole.start());
                continue;
            }

            if let Some(action) = compiled.action_for(&captures) {
                push_lexeme(&mut tokens, action.token, haystack, whole.start(), whole.end());
                if let Some(transition) = action.transition {
                    state = state.transition(transition);
                }
            }
            pos = whole.end();
        }

        Scan {
            tokens,
            end_state: state,
        }
    }
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len(), |c| at + c.len_utf8())
}

fn push_lexeme<T: Copy>(
    tokens: &mut Vec<Token<T>>,
    token_type: T,
    text: &str,
    start: usize,
    end: usize,
) {
    let head_end = next_char_boundary(text, start).min(end);
    tokens.push(Token {
        token_type,
        range: CharRange::from_bounds(start, head_end),
        is_lexeme_head: true,
    });
    if head_end < end {
        tokens.push(Token {
            token_type,
            range: CharRange::from_bounds(head_end, end),
            is_lexeme_head: false,
        });
    }
}

/// Group head/body tokens into lexemes: `(token type, lexeme range)`.
pub fn lexemes<T: Copy>(tokens: &[Token<T>]) -> Vec<(T, CharRange)> {
    let mut out: Vec<(T, CharRange)> = Vec::new();
    for token in tokens {
        match out.last_mut() {
            Some((_, range)) if !token.is_lexeme_head => *range = range.union(&token.range),
            _ => out.push((token.token_type, token.range)),
        }
    }
    out
}
