use thiserror::Error;

#[derive(Debug, Error)]
/// Configuration errors detected while compiling a token dictionary.
///
/// Any of these disables tokenisation for the language; line bookkeeping keeps working.
pub enum LexerError {
    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A regex fragment (or the combined per-state regex) failed to compile.
    RegexCompile {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },

    #[error("empty literal pattern")]
    /// A literal pattern has no text, so it would match everywhere.
    EmptyLiteral,

    #[error("duplicate literal '{0}' in one lexer state")]
    /// Two literal patterns of the same state match the same text.
    DuplicateLiteral(String),

    #[error("word literal '{0}' must begin and end with a word character")]
    /// A word literal cannot be delimited by word boundaries.
    InvalidWordLiteral(String),
}
