//! Repository context picker: free-text input with fuzzy-ranked suggestions
//! from the configured list of known contexts.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::state::types::RepositoryContext;

/// Open picker state.
#[derive(Clone, Debug, Default)]
pub struct ContextPicker {
    /// Typed text.
    input: String,
    /// Known contexts offered as suggestions.
    options: Vec<String>,
    /// Highlighted suggestion index.
    highlighted: usize,
}

impl ContextPicker {
    /// What: Open a picker over `options`, prefilled with nothing.
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self {
            input: String::new(),
            options,
            highlighted: 0,
        }
    }

    /// Typed text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Highlighted suggestion index.
    #[must_use]
    pub const fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Whether the trimmed input is non-empty and not one of the known options.
    #[must_use]
    pub fn typed_is_new(&self) -> bool {
        let query = self.input.trim();
        !query.is_empty() && !self.options.iter().any(|o| o == query)
    }

    /// What: Suggestions for the current input, best match first.
    ///
    /// Details:
    /// - Empty input lists every option in configured order.
    /// - Otherwise options are fuzzy-matched (fzf-style); ties keep configured order.
    /// - The typed text itself always comes first, so Enter without moving
    ///   the highlight opens exactly what was typed.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&str> {
        let query = self.input.trim();
        if query.is_empty() {
            return self.options.iter().map(String::as_str).collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut ranked: Vec<(i64, usize, &str)> = self
            .options
            .iter()
            .enumerate()
            .filter_map(|(i, o)| matcher.fuzzy_match(o, query).map(|score| (score, i, o.as_str())))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked.retain(|(_, _, o)| *o != query);
        let mut out = Vec::with_capacity(ranked.len() + 1);
        out.push(query);
        out.extend(ranked.into_iter().map(|(_, _, o)| o));
        out
    }

    /// Append a typed character.
    pub fn push(&mut self, c: char) {
        self.input.push(c);
        self.highlighted = 0;
    }

    /// Delete the last typed character.
    pub fn backspace(&mut self) {
        self.input.pop();
        self.highlighted = 0;
    }

    /// What: Move the suggestion highlight, clamped to the suggestion list.
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.suggestions().len();
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(len - 1);
    }

    /// What: Resolve the picker into a context.
    ///
    /// Output:
    /// - The highlighted suggestion, or `None` when there is nothing to pick.
    #[must_use]
    pub fn commit(&self) -> Option<RepositoryContext> {
        self.suggestions()
            .get(self.highlighted)
            .map(|s| RepositoryContext::new(s))
    }
}
