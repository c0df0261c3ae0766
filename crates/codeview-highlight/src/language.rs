//! The token set shared by all configured languages, and its lexer states.

use crate::pattern::{LexerState, TokenAction, TokenDictionary, TokenPattern};
use codeview_lang::LanguageConfiguration;

/// Lexical token types recognised in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageToken {
    /// `(`
    RoundBracketOpen,
    /// `)`
    RoundBracketClose,
    /// `[`
    SquareBracketOpen,
    /// `]`
    SquareBracketClose,
    /// `{`
    CurlyBracketOpen,
    /// `}`
    CurlyBracketClose,
    /// String literal.
    String,
    /// Character literal.
    Character,
    /// Number literal.
    Number,
    /// Line comment token; the comment runs to the end of the line.
    SingleLineComment,
    /// Block comment start token.
    NestedCommentOpen,
    /// Block comment end token.
    NestedCommentClose,
    /// Identifier.
    Identifier,
    /// Reserved identifier.
    Keyword,
}

impl LanguageToken {
    /// Returns `true` for opening brackets and the block comment start token.
    pub fn is_opening_bracket(self) -> bool {
        matches!(
            self,
            Self::RoundBracketOpen
                | Self::SquareBracketOpen
                | Self::CurlyBracketOpen
                | Self::NestedCommentOpen
        )
    }

    /// The token closing (or opening) this bracket.
    pub fn matching_bracket(self) -> Option<Self> {
        match self {
            Self::RoundBracketOpen => Some(Self::RoundBracketClose),
            Self::RoundBracketClose => Some(Self::RoundBracketOpen),
            Self::SquareBracketOpen => Some(Self::SquareBracketClose),
            Self::SquareBracketClose => Some(Self::SquareBracketOpen),
            Self::CurlyBracketOpen => Some(Self::CurlyBracketClose),
            Self::CurlyBracketClose => Some(Self::CurlyBracketOpen),
            Self::NestedCommentOpen => Some(Self::NestedCommentClose),
            Self::NestedCommentClose => Some(Self::NestedCommentOpen),
            _ => None,
        }
    }

    /// Openers after which typing a line break also moves the closer to a new line.
    pub fn is_block_opener(self) -> bool {
        matches!(self, Self::CurlyBracketOpen | Self::NestedCommentOpen)
    }
}

/// Lexer state: plain code, or inside `depth` nested block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageState {
    /// Outside of block comments.
    #[default]
    Code,
    /// Inside block comments; the depth is at least 1.
    Comment(u32),
}

impl LanguageState {
    /// The state for a comment nesting depth.
    pub fn from_comment_depth(depth: u32) -> Self {
        if depth == 0 {
            Self::Code
        } else {
            Self::Comment(depth)
        }
    }

    /// Current comment nesting depth.
    pub fn comment_depth(self) -> u32 {
        match self {
            Self::Code => 0,
            Self::Comment(depth) => depth,
        }
    }
}

/// Pattern table selector for [`LanguageState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerStateTag {
    /// Code patterns.
    Code,
    /// Patterns recognised inside block comments.
    Comment,
}

/// Transitions attached to block comment tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTransition {
    /// Enter one more comment level.
    Open,
    /// Leave one comment level (no-op in code).
    Close,
}

impl LexerState for LanguageState {
    type Tag = LexerStateTag;
    type Transition = CommentTransition;

    fn tag(&self) -> LexerStateTag {
        match self {
            Self::Code => LexerStateTag::Code,
            Self::Comment(_) => LexerStateTag::Comment,
        }
    }

    fn transition(self, transition: CommentTransition) -> Self {
        let depth = self.comment_depth();
        match transition {
            CommentTransition::Open => Self::Comment(depth.saturating_add(1)),
            CommentTransition::Close => Self::from_comment_depth(depth.saturating_sub(1)),
        }
    }
}

/// Token dictionary type used for configured languages.
pub type LanguageDictionary = TokenDictionary<LanguageToken, LanguageState>;

const BRACKETS: [(&str, LanguageToken); 6] = [
    ("(", LanguageToken::RoundBracketOpen),
    (")", LanguageToken::RoundBracketClose),
    ("[", LanguageToken::SquareBracketOpen),
    ("]", LanguageToken::SquareBracketClose),
    ("{", LanguageToken::CurlyBracketOpen),
    ("}", LanguageToken::CurlyBracketClose),
];

/// Build the token dictionary of a language.
pub fn token_dictionary(config: &LanguageConfiguration) -> LanguageDictionary {
    use LexerStateTag::{Code, Comment};

    let mut dictionary = LanguageDictionary::new();
    for (text, token) in BRACKETS {
        dictionary.insert(Code, literal(text), TokenAction::new(token));
    }

    if config.comments.has_line()
        && let Some(line) = &config.comments.line
    {
        dictionary.insert(
            Code,
            literal(line),
            TokenAction::new(LanguageToken::SingleLineComment),
        );
    }

    if config.comments.has_block()
        && let (Some(start), Some(end)) = (&config.comments.block_start, &config.comments.block_end)
    {
        let open = TokenAction::new(LanguageToken::NestedCommentOpen)
            .with_transition(CommentTransition::Open);
        let close = TokenAction::new(LanguageToken::NestedCommentClose)
            .with_transition(CommentTransition::Close);
        for tag in [Code, Comment] {
            dictionary
                .insert(tag, literal(start), open)
                .insert(tag, literal(end), close);
        }
    }

    for word in &config.reserved_identifiers {
        dictionary.insert(
            Code,
            TokenPattern::WordLiteral(word.clone()),
            TokenAction::new(LanguageToken::Keyword),
        );
    }

    let fragments = [
        (&config.string_regex, LanguageToken::String),
        (&config.character_regex, LanguageToken::Character),
        (&config.number_regex, LanguageToken::Number),
        (&config.identifier_regex, LanguageToken::Identifier),
    ];
    for (source, token) in fragments {
        if let Some(source) = source {
            dictionary.insert(
                Code,
                TokenPattern::Regex(source.clone()),
                TokenAction::new(token),
            );
        }
    }

    dictionary
}

/// The fixed text of `token` in `config`, if the token has one.
pub fn lexeme(config: &LanguageConfiguration, token: LanguageToken) -> Option<&str> {
    let comments = &config.comments;
    match token {
        LanguageToken::RoundBracketOpen => Some("("),
        LanguageToken::RoundBracketClose => Some(")"),
        LanguageToken::SquareBracketOpen => Some("["),
        LanguageToken::SquareBracketClose => Some("]"),
        LanguageToken::CurlyBracketOpen => Some("{"),
        LanguageToken::CurlyBracketClose => Some("}"),
        LanguageToken::SingleLineComment => comments.line.as_deref(),
        LanguageToken::NestedCommentOpen => comments.block_start.as_deref(),
        LanguageToken::NestedCommentClose => comments.block_end.as_deref(),
        _ => None,
    }
    .filter(|text| !text.is_empty())
}

fn literal(text: &str) -> TokenPattern {
    TokenPattern::Literal(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{Tokenizer, lexemes};
    use codeview_core::CharRange;
    use pretty_assertions::assert_eq;

    fn scan(config: &LanguageConfiguration, text: &str) -> Vec<(LanguageToken, String)> {
        let tokenizer = Tokenizer::new(&token_dictionary(config)).unwrap();
        let scan = tokenizer.scan(text, LanguageState::Code, CharRange::new(0, text.len()));
        lexemes(&scan.tokens)
            .into_iter()
            .map(|(token, range)| (token, text[range.as_range()].to_string()))
            .collect()
    }

    #[test]
    fn test_comment_depth_transitions() {
        let state = LanguageState::Code
            .transition(CommentTransition::Open)
            .transition(CommentTransition::Open);
        assert_eq!(state, LanguageState::Comment(2));
        let state = state
            .transition(CommentTransition::Close)
            .transition(CommentTransition::Close);
        assert_eq!(state, LanguageState::Code);
        assert_eq!(
            LanguageState::Code.transition(CommentTransition::Close),
            LanguageState::Code
        );
        assert_eq!(LanguageState::from_comment_depth(3).comment_depth(), 3);
    }

    #[test]
    fn test_swift_tokens() {
        use LanguageToken::*;
        let tokens = scan(&LanguageConfiguration::swift(), r#"let x = f("a", 0x1F) // done"#);
        assert_eq!(
            tokens,
            vec![
                (Keyword, "let".to_string()),
                (Identifier, "x".to_string()),
                (Identifier, "f".to_string()),
                (RoundBracketOpen, "(".to_string()),
                (String, r#""a""#.to_string()),
                (Number, "0x1F".to_string()),
                (RoundBracketClose, ")".to_string()),
                (SingleLineComment, "//".to_string()),
                (Identifier, "done".to_string()),
            ]
        );
    }

    #[test]
    fn test_haskell_block_comment_beats_curly_bracket() {
        use LanguageToken::*;
        let tokens = scan(&LanguageConfiguration::haskell(), "{ {- x {- y -} -} 'c'");
        assert_eq!(
            tokens,
            vec![
                (CurlyBracketOpen, "{".to_string()),
                (NestedCommentOpen, "{-".to_string()),
                (NestedCommentOpen, "{-".to_string()),
                (NestedCommentClose, "-}".to_string()),
                (NestedCommentClose, "-}".to_string()),
                (Character, "'c'".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_state_only_sees_comment_delimiters() {
        let config = LanguageConfiguration::swift();
        let tokenizer = Tokenizer::new(&token_dictionary(&config)).unwrap();
        let text = "x ( \"s\" */ y";
        let scan = tokenizer.scan(text, LanguageState::Comment(1), CharRange::new(0, text.len()));
        assert_eq!(
            lexemes(&scan.tokens),
            vec![(LanguageToken::NestedCommentClose, CharRange::new(8, 2))]
        );
        assert_eq!(scan.end_state, LanguageState::Code);
    }

    #[test]
    fn test_plain_text_has_brackets_only() {
        let tokens = scan(&LanguageConfiguration::none(), "a (b) // c");
        assert_eq!(
            tokens,
            vec![
                (LanguageToken::RoundBracketOpen, "(".to_string()),
                (LanguageToken::RoundBracketClose, ")".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexemes_and_brackets() {
        let config = LanguageConfiguration::haskell();
        assert_eq!(lexeme(&config, LanguageToken::NestedCommentClose), Some("-}"));
        assert_eq!(lexeme(&config, LanguageToken::Identifier), None);
        assert_eq!(lexeme(&LanguageConfiguration::none(), LanguageToken::NestedCommentOpen), None);

        assert_eq!(
            LanguageToken::SquareBracketOpen.matching_bracket(),
            Some(LanguageToken::SquareBracketClose)
        );
        assert!(LanguageToken::NestedCommentOpen.is_opening_bracket());
        assert!(!LanguageToken::CurlyBracketClose.is_opening_bracket());
        assert!(!LanguageToken::String.is_opening_bracket());
    }
}
