use crate::language::LanguageToken;
use crate::tokenizer::Token;
use codeview_core::{CharRange, MessageBundle};

/// Per-line payload kept in the line index.
///
/// Tokens and comment spans are stored relative to the start of the line, so shifting a
/// line never touches its payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineInfo {
    /// Block comment nesting depth before the line.
    pub comment_depth_start: u32,
    /// Block comment nesting depth after the line.
    pub comment_depth_end: u32,
    /// Net change of round bracket nesting over the line.
    pub round_bracket_diff: i32,
    /// Net change of square bracket nesting over the line.
    pub square_bracket_diff: i32,
    /// Net change of curly bracket nesting over the line.
    pub curly_bracket_diff: i32,
    /// Messages attached to the line.
    pub messages: Option<MessageBundle>,
    /// Line-relative tokens.
    pub tokens: Vec<Token<LanguageToken>>,
    /// Line-relative comment spans.
    pub comment_ranges: Vec<CharRange>,
}

impl LineInfo {
    /// Payload of a line that starts inside `comment_depth` block comments.
    pub fn starting_at_depth(comment_depth: u32) -> Self {
        Self {
            comment_depth_start: comment_depth,
            comment_depth_end: comment_depth,
            ..Self::default()
        }
    }

    /// Apply a bracket token to the nesting counters.
    pub(crate) fn count_bracket(&mut self, token: LanguageToken) {
        use LanguageToken::*;
        match token {
            RoundBracketOpen => self.round_bracket_diff += 1,
            RoundBracketClose => self.round_bracket_diff -= 1,
            SquareBracketOpen => self.square_bracket_diff += 1,
            SquareBracketClose => self.square_bracket_diff -= 1,
            CurlyBracketOpen => self.curly_bracket_diff += 1,
            CurlyBracketClose => self.curly_bracket_diff -= 1,
            _ => {}
        }
    }

    /// Lexical state of this line, ignoring attached messages.
    pub fn lexically_equal(&self, other: &LineInfo) -> bool {
        self.comment_depth_start == other.comment_depth_start
            && self.comment_depth_end == other.comment_depth_end
            && self.round_bracket_diff == other.round_bracket_diff
            && self.square_bracket_diff == other.square_bracket_diff
            && self.curly_bracket_diff == other.curly_bracket_diff
            && self.tokens == other.tokens
            && self.comment_ranges == other.comment_ranges
    }
}
