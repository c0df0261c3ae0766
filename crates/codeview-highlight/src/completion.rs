//! Bracket completion.
//!
//! A small reactive state machine fed with every single-character insertion. It remembers
//! the opener typed last and, depending on what is typed next, schedules the matching
//! closer as a [`PendingInsertion`]. The insertion is only ever returned to the host, which
//! applies it after the current edit notification; the echo of that insertion is recognised
//! and ignored.

use crate::language::{LanguageToken, lexeme};
use codeview_core::{CharRange, EditEvent, LineEnding, PendingInsertion};
use codeview_lang::LanguageConfiguration;

/// State of the completion heuristic.
#[derive(Debug, Clone, Default)]
pub struct TokenCompletion {
    last_typed: Option<(LanguageToken, CharRange)>,
    pending: Option<PendingInsertion>,
}

impl TokenCompletion {
    /// Fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the remembered opener and any outstanding insertion.
    pub fn reset(&mut self) {
        self.last_typed = None;
        self.pending = None;
    }

    /// The insertion handed to the host and not yet echoed back.
    pub fn pending(&self) -> Option<&PendingInsertion> {
        self.pending.as_ref()
    }

    /// Returns `true` if `event` is the host applying the outstanding insertion.
    ///
    /// Any other edit discards the outstanding insertion.
    pub fn take_echo(&mut self, text: &str, event: &EditEvent) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let echoed = *event == pending.event()
            && text.get(event.edited_range.as_range()) == Some(pending.text.as_str());
        if echoed {
            self.last_typed = None;
        }
        echoed
    }

    /// Feed an edit.
    ///
    /// `current` is the lexeme (post-edit coordinates) holding the first inserted character,
    /// if the tokeniser produced one there.
    pub fn observe(
        &mut self,
        config: &LanguageConfiguration,
        text: &str,
        event: &EditEvent,
        current: Option<(LanguageToken, CharRange)>,
    ) -> Option<PendingInsertion> {
        let prior = self.last_typed.take();
        if !event.is_single_char_insertion(text) {
            return None;
        }

        let at = event.edited_range.location;
        let after = event.edited_range.upper_bound();

        let completion = prior
            .filter(|(_, range)| range.upper_bound() == at)
            .filter(|_| current.is_none_or(|(_, range)| range.location >= at))
            .and_then(|(prior, _)| complete_prior(config, text, event, prior, current))
            .or_else(|| complete_block_opener(config, text, after, current));

        match completion {
            Some(text) => {
                let insertion = PendingInsertion::new(after, text);
                tracing::trace!(location = after, text = ?insertion.text, "scheduled completion");
                self.pending = Some(insertion.clone());
                Some(insertion)
            }
            None => {
                self.last_typed = current.filter(|(token, range)| {
                    token.is_opening_bracket() && range.upper_bound() == after
                });
                None
            }
        }
    }
}

/// The user typed after an opener: close it unless they closed it themselves.
fn complete_prior(
    config: &LanguageConfiguration,
    text: &str,
    event: &EditEvent,
    prior: LanguageToken,
    current: Option<(LanguageToken, CharRange)>,
) -> Option<String> {
    let closer = lexeme(config, prior.matching_bracket()?)?;
    let inserted = text.get(event.edited_range.as_range())?;

    match current {
        Some((token, _)) if Some(token) == prior.matching_bracket() => None,
        Some((token, range))
            if token.is_opening_bracket()
                && range.upper_bound() == event.edited_range.upper_bound() =>
        {
            let inner = lexeme(config, token.matching_bracket()?)?;
            Some(format!("{inner}{closer}"))
        }
        _ if prior.is_block_opener() && LineEnding::starts_line_break(inserted) => {
            Some(format!("{inserted}{closer}"))
        }
        _ => Some(closer.to_string()),
    }
}

/// A block opener typed right before a line break gets its closer on a line of its own.
fn complete_block_opener(
    config: &LanguageConfiguration,
    text: &str,
    after: usize,
    current: Option<(LanguageToken, CharRange)>,
) -> Option<String> {
    let (token, range) = current?;
    if !token.is_block_opener() || range.upper_bound() != after {
        return None;
    }
    let ending = LineEnding::at(text, after)?;
    let closer = lexeme(config, token.matching_bracket()?)?;
    Some(format!("{}{closer}", ending.as_str()))
}
