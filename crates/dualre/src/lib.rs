// dualre: one regex API over two engines
//
// Patterns that automata can express compile with the `regex` crate and get
// linear-time matching. Patterns with lookaround or backreferences compile
// with `fancy-regex`. The choice is made once, at compile time, from the
// pattern text; callers see the same `Regex` either way.
//
// The backtracking engine has no linear-time guarantee. Its per-query work is
// bounded only by `RegexOptions::backtrack_limit`; do not feed it untrusted
// patterns without a tight limit.

#[cfg(test)]
mod test;

pub mod classify;
pub mod engine;
pub mod error;
pub mod iter;
pub mod limits;
pub mod options;
pub mod pattern;

pub use classify::{Classifier, EngineKind, MarkerClassifier, classify};
pub use engine::Engine;
pub use error::{CompileError, ErrorCode};
pub use iter::{
    CaptureMatches, Captures, Haystack, Limit, Match, Matches, NoExpand, Replacer, Transform,
    expand_template,
};
pub use options::{EngineSelection, RegexOptions};
pub use pattern::{Regex, RegexBuilder};
