// Pattern classification: picks an engine from pattern text alone
//
// This is a marker scan, not a parse:
// 1. Backslash parity is tracked byte by byte; a backslash escapes the next byte only
// 2. Lookaround openers and backreference tokens force the backtracking engine
// 3. Everything else goes to the native engine
//
// Markers inside character classes are not recognized as such, so `[(?=]`
// is classified as backtracking. The backtracking engine accepts every pattern
// the native one does; a false positive only loses the linear-time guarantee.

use std::fmt;

/// The engine a pattern is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineKind {
    /// Finite-automaton engine with linear-time matching.
    Native,
    /// Backtracking engine with lookaround and backreferences.
    Backtracking,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Native => "native",
            EngineKind::Backtracking => "backtracking",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which engine a pattern needs.
///
/// Implemented for any `Fn(&str) -> EngineKind`, so a closure can replace the
/// default marker scan.
pub trait Classifier: Send + Sync {
    fn classify(&self, pattern: &str) -> EngineKind;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> EngineKind + Send + Sync,
{
    fn classify(&self, pattern: &str) -> EngineKind {
        self(pattern)
    }
}

/// The default classifier, see [`classify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerClassifier;

impl Classifier for MarkerClassifier {
    fn classify(&self, pattern: &str) -> EngineKind {
        classify(pattern)
    }
}

/// Lookahead / lookbehind openers
const LOOKAROUNDS: [&[u8]; 4] = [b"(?=", b"(?!", b"(?<=", b"(?<!"];

/// Atomic groups and Python-style named backreferences
const GROUP_MARKERS: [&[u8]; 2] = [b"(?>", b"(?P="];

/// Possessive quantifiers
const POSSESSIVE: [&[u8]; 4] = [b"*+", b"++", b"?+", b"}+"];

/// Classify a pattern from its source text.
///
/// Reports [`EngineKind::Backtracking`] when the pattern contains an unescaped
/// lookaround opener, a numbered backreference (`\1`..`\9`) while at least one
/// capturing group exists, an atomic group, a named backreference, or a
/// possessive quantifier. Everything else, including the empty pattern, is
/// [`EngineKind::Native`].
pub fn classify(pattern: &str) -> EngineKind {
    if needs_backtracking(pattern.as_bytes()) {
        EngineKind::Backtracking
    } else {
        EngineKind::Native
    }
}

fn needs_backtracking(pat: &[u8]) -> bool {
    if LOOKAROUNDS.iter().any(|m| contains_unescaped(pat, m)) {
        return true;
    }

    if count_capture_groups(pat) > 0
        && escape_followed_by(pat, |rest| matches!(rest.first(), Some(b'1'..=b'9')))
    {
        return true;
    }

    GROUP_MARKERS.iter().any(|m| contains_unescaped(pat, m))
        || escape_followed_by(pat, |rest| matches!(rest, [b'k', b'<' | b'{' | b'\'', ..]))
        || POSSESSIVE.iter().any(|m| contains_unescaped(pat, m))
}

/// Substring search that never matches at an escaped position.
/// A needle is only tried where no pending backslash escapes its first byte.
fn contains_unescaped(pat: &[u8], needle: &[u8]) -> bool {
    if needle.len() > pat.len() {
        return false;
    }

    let mut escaped = false;
    for i in 0..=pat.len() - needle.len() {
        if pat[i] == b'\\' {
            escaped = !escaped;
            continue;
        }
        if !escaped && pat[i..].starts_with(needle) {
            return true;
        }
        escaped = false;
    }
    false
}

/// Count unescaped `(` that open a capturing group.
/// `(?:` and `(?P` do not count; every other `(` does.
fn count_capture_groups(pat: &[u8]) -> usize {
    let mut groups = 0;
    let mut escaped = false;
    for (i, &c) in pat.iter().enumerate() {
        if c == b'\\' {
            escaped = !escaped;
            continue;
        }
        if !escaped && c == b'(' {
            if matches!(pat.get(i + 1..i + 3), Some([b'?', b':' | b'P'])) {
                continue;
            }
            groups += 1;
        }
        escaped = false;
    }
    groups
}

/// True if some unescaped backslash is followed by bytes accepted by `pred`.
/// `pred` sees everything after the backslash.
fn escape_followed_by(pat: &[u8], pred: impl Fn(&[u8]) -> bool) -> bool {
    let mut escaped = false;
    for (i, &c) in pat.iter().enumerate() {
        if c == b'\\' {
            if !escaped && pred(&pat[i + 1..]) {
                return true;
            }
            escaped = !escaped;
        } else {
            escaped = false;
        }
    }
    false
}
