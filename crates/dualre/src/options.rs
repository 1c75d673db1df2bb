use crate::limits::{DEFAULT_BACKTRACK_LIMIT, DEFAULT_DFA_SIZE_LIMIT, DEFAULT_SIZE_LIMIT};

/// Which engine a pattern is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineSelection {
    /// Let the classifier decide from the pattern text.
    #[default]
    Auto,
    /// Always use the linear-time automaton engine.
    Native,
    /// Always use the backtracking engine.
    Backtracking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegexOptions {
    pub engine: EngineSelection,
    /// Backtracking steps allowed per query. Exceeding it turns the query
    /// into "no match".
    pub backtrack_limit: usize,
    /// Approximate compiled program size limit in bytes.
    /// Applies to the native engine and to the native parts the
    /// backtracking engine delegates to.
    pub size_limit: usize,
    /// Lazy DFA cache limit in bytes.
    pub dfa_size_limit: usize,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            engine: EngineSelection::Auto,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}
