use crate::error::LexerError;
use crate::pattern::{TokenAction, TokenPattern};
use regex::Regex;
use std::collections::HashMap;

/// The patterns of one lexer state, compiled into a single alternation.
///
/// Literals are matched by plain alternation and resolved through `literals`; every regex
/// fragment sits in its own capture group, listed in `fragments` by group index.
#[derive(Debug, Clone)]
pub(crate) struct CompiledState<T, R> {
    pub(crate) regex: Option<Regex>,
    pub(crate) literals: HashMap<String, TokenAction<T, R>>,
    pub(crate) fragments: Vec<(usize, TokenAction<T, R>)>,
}

impl<T: Copy, R: Copy> CompiledState<T, R> {
    /// Compile the rules of one state.
    pub(crate) fn compile(
        rules: &[(TokenPattern, TokenAction<T, R>)],
    ) -> Result<Self, LexerError> {
        let mut literals = Vec::new();
        let mut fragments = Vec::new();

        for (pattern, action) in rules {
            match pattern {
                TokenPattern::Literal(text) | TokenPattern::WordLiteral(text)
                    if text.is_empty() =>
                {
                    return Err(LexerError::EmptyLiteral);
                }
                TokenPattern::Literal(text) => literals.push((text.as_str(), false, *action)),
                TokenPattern::WordLiteral(text) => {
                    if !is_word_delimited(text) {
                        return Err(LexerError::InvalidWordLiteral(text.clone()));
                    }
                    literals.push((text.as_str(), true, *action));
                }
                TokenPattern::Regex(source) => fragments.push((source.as_str(), *action)),
            }
        }

        let mut table = HashMap::new();
        for (text, _, action) in &literals {
            if table.insert(text.to_string(), *action).is_some() {
                return Err(LexerError::DuplicateLiteral(text.to_string()));
            }
        }

        // Longest literal first; leftmost-first alternation then prefers it.
        literals.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut alternatives: Vec<String> = literals
            .iter()
            .map(|(text, word, _)| {
                let escaped = regex::escape(text);
                if *word {
                    format!(r"\b{escaped}\b")
                } else {
                    escaped
                }
            })
            .collect();

        let mut group = 1usize;
        let mut compiled_fragments = Vec::with_capacity(fragments.len());
        for (source, action) in fragments {
            let fragment = compile_regex(source)?;
            alternatives.push(format!("({source})"));
            compiled_fragments.push((group, action));
            // Our wrapping group plus the fragment's own groups.
            group += fragment.captures_len();
        }

        let regex = if alternatives.is_empty() {
            None
        } else {
            Some(compile_regex(&alternatives.join("|"))?)
        };

        Ok(Self {
            regex,
            literals: table,
            fragments: compiled_fragments,
        })
    }

    /// Action for a match, given its captures.
    pub(crate) fn action_for(&self, captures: &regex::Captures<'_>) -> Option<TokenAction<T, R>> {
        self.fragments
            .iter()
            .find(|(group, _)| captures.get(*group).is_some())
            .map(|(_, action)| *action)
            .or_else(|| {
                let matched = captures.get(0)?;
                self.literals.get(matched.as_str()).copied()
            })
    }
}

fn compile_regex(source: &str) -> Result<Regex, LexerError> {
    Regex::new(source).map_err(|e| LexerError::RegexCompile {
        pattern: source.to_string(),
        message: e.to_string(),
    })
}

fn is_word_delimited(text: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    text.chars().next().is_some_and(is_word) && text.chars().next_back().is_some_and(is_word)
}
