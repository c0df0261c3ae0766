//! Token dictionaries: per-state tables of lexical patterns and their actions.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// State of a multi-state lexer.
///
/// States sharing a [`LexerState::Tag`] share one pattern table; the state itself may carry
/// more information (e.g. a nesting depth) that only transitions inspect.
pub trait LexerState: Copy + Eq + fmt::Debug {
    /// Key selecting the pattern table for this state.
    type Tag: Copy + Eq + Hash + fmt::Debug;
    /// Transition attached to a token action.
    type Transition: Copy + Eq + fmt::Debug;

    /// The pattern table used while in this state.
    fn tag(&self) -> Self::Tag;

    /// The state after applying `transition`.
    fn transition(self, transition: Self::Transition) -> Self;
}

/// A lexical pattern.
///
/// Within one state, literals are tried before regexes and longer literals before shorter
/// ones; regexes are tried in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenPattern {
    /// Matches the exact text.
    Literal(String),
    /// Matches the exact text at word boundaries (e.g. keywords).
    WordLiteral(String),
    /// A `regex` crate fragment. Fragments must not rely on `^`/`$` anchors.
    Regex(String),
}

/// What a match produces: a token classification and an optional state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAction<T, R> {
    /// Token type emitted for the lexeme.
    pub token: T,
    /// Transition applied after the lexeme.
    pub transition: Option<R>,
}

impl<T, R> TokenAction<T, R> {
    /// An action emitting `token` without changing state.
    pub fn new(token: T) -> Self {
        Self {
            token,
            transition: None,
        }
    }

    /// Apply `transition` after emitting the token.
    pub fn with_transition(mut self, transition: R) -> Self {
        self.transition = Some(transition);
        self
    }
}

/// A pattern together with its action.
pub type TokenRule<T, S> = (TokenPattern, TokenAction<T, <S as LexerState>::Transition>);

/// Mapping from lexer-state tag to the patterns recognised in that state.
#[derive(Debug, Clone)]
pub struct TokenDictionary<T, S: LexerState> {
    states: HashMap<S::Tag, Vec<TokenRule<T, S>>>,
}

impl<T, S: LexerState> TokenDictionary<T, S> {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Add a rule to the table of `tag`.
    pub fn insert(
        &mut self,
        tag: S::Tag,
        pattern: TokenPattern,
        action: TokenAction<T, S::Transition>,
    ) -> &mut Self {
        self.states.entry(tag).or_default().push((pattern, action));
        self
    }

    /// Rules of `tag`, in insertion order.
    pub fn rules(&self, tag: S::Tag) -> &[TokenRule<T, S>] {
        self.states.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags that have at least one rule.
    pub fn tags(&self) -> impl Iterator<Item = S::Tag> + '_ {
        self.states.keys().copied()
    }

    /// Returns `true` if no state has rules.
    pub fn is_empty(&self) -> bool {
        self.states.values().all(Vec::is_empty)
    }
}

impl<T, S: LexerState> Default for TokenDictionary<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
