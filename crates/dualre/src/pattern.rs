//! The public pattern type.
//!
//! A [`Regex`] remembers its source text, the engine it was compiled with and
//! one compiled engine handle. Every query is routed through the engine-neutral
//! match iterator in [`crate::iter`].

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::classify::{Classifier, EngineKind, MarkerClassifier};
use crate::engine::{Engine, Handle};
use crate::error::CompileError;
use crate::iter::{
    self, CaptureMatches, Captures, Limit, Match, Matches, NoExpand, Replacer, Transform,
};
use crate::options::{EngineSelection, RegexOptions};

#[inline]
fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// A compiled regular expression.
///
/// Dropping a `Regex` frees its engine; [`release`](Self::release) does the
/// same eagerly and may be called any number of times. A released pattern
/// matches nothing.
///
/// Queries allocate their own scratch space, so a `Regex` can be shared
/// between threads behind an `Arc` or a plain reference.
#[derive(Debug, Clone)]
pub struct Regex {
    source: SmolStr,
    kind: EngineKind,
    handle: Handle,
    names: AHashMap<SmolStr, usize>,
}

impl Regex {
    /// Compile `pattern`, choosing the engine from its text.
    pub fn new(pattern: &str) -> Result<Regex, CompileError> {
        RegexBuilder::new(pattern).build()
    }

    #[inline]
    fn engine(&self) -> &dyn Engine {
        self.handle.engine()
    }

    // ===== Introspection =====

    /// The source text this pattern was compiled from.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn engine_kind(&self) -> EngineKind {
        self.kind
    }

    #[inline]
    pub fn is_backtracking(&self) -> bool {
        self.kind == EngineKind::Backtracking
    }

    /// Number of groups, including the whole-match group 0.
    #[inline]
    pub fn captures_len(&self) -> usize {
        self.engine().captures_len()
    }

    /// Names of all groups in order; `None` for unnamed ones.
    pub fn capture_names(&self) -> Vec<Option<&str>> {
        self.engine().capture_names()
    }

    /// Index of the group called `name`.
    pub fn capture_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    // ===== Resource management =====

    /// Free the compiled engine. Later calls are no-ops.
    pub fn release(&mut self) {
        if self.handle.release() {
            debug!(pattern = %self.source, "released");
        }
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.handle.is_released()
    }

    // ===== Single match =====

    /// Whether the pattern matches anywhere in `subject`.
    pub fn is_match(&self, subject: &str) -> bool {
        iter::is_match(self.engine(), subject)
    }

    /// The leftmost match.
    pub fn find<'s>(&self, subject: &'s str) -> Option<Match<'s>> {
        self.find_iter(subject).next()
    }

    /// The leftmost match with all groups.
    pub fn captures<'s>(&self, subject: &'s str) -> Option<Captures<'s>> {
        iter::captures_at(self.engine(), subject, 0)
    }

    /// The leftmost match starting at or after byte offset `start`.
    /// Offsets in the result are relative to the whole of `subject`.
    pub fn captures_at<'s>(&self, subject: &'s str, start: usize) -> Option<Captures<'s>> {
        iter::captures_at(self.engine(), subject, start)
    }

    // ===== All matches =====

    /// Lazily iterate over every successive match.
    pub fn find_iter<'r, 's>(&'r self, subject: &'s str) -> Matches<'r, 's> {
        Matches::new(self.engine(), subject, Limit::Unbounded)
    }

    /// Lazily iterate over every successive match with all groups.
    pub fn captures_iter<'r, 's>(&'r self, subject: &'s str) -> CaptureMatches<'r, 's> {
        CaptureMatches::new(self.engine(), subject, Limit::Unbounded)
    }

    /// Up to `limit` matches; negative means all of them.
    pub fn find_all<'s>(&self, subject: &'s str, limit: isize) -> Vec<Match<'s>> {
        Matches::new(self.engine(), subject, Limit::from_count(limit)).collect()
    }

    /// Up to `limit` matches with all groups; negative means all of them.
    pub fn captures_all<'s>(&self, subject: &'s str, limit: isize) -> Vec<Captures<'s>> {
        CaptureMatches::new(self.engine(), subject, Limit::from_count(limit)).collect()
    }

    // ===== Replacement =====

    /// Replace every match. A `&str` or `String` replacement is a template
    /// (`$N`, `$$`); wrap it in [`NoExpand`] to insert it verbatim, or pass a
    /// closure over [`Captures`].
    pub fn replace_all<'s, R>(&self, subject: &'s str, rep: R) -> Cow<'s, str>
    where
        R: Replacer<Error = Infallible>,
    {
        into_ok(iter::replace(self.engine(), subject, Limit::Unbounded, rep))
    }

    /// Replace the first `limit` matches; negative means all of them.
    pub fn replacen<'s, R>(&self, subject: &'s str, limit: isize, rep: R) -> Cow<'s, str>
    where
        R: Replacer<Error = Infallible>,
    {
        into_ok(iter::replace(
            self.engine(),
            subject,
            Limit::from_count(limit),
            rep,
        ))
    }

    /// Replace every match with `rep`, inserted verbatim.
    pub fn replace_all_literal<'s>(&self, subject: &'s str, rep: &str) -> Cow<'s, str> {
        self.replace_all(subject, NoExpand(rep))
    }

    /// Replace every match with the output of `f`. The first error aborts the
    /// replacement and is returned.
    pub fn try_replace_all_with<'s, F, S, E>(
        &self,
        subject: &'s str,
        f: F,
    ) -> Result<Cow<'s, str>, E>
    where
        F: FnMut(&Match<'_>) -> Result<S, E>,
        S: AsRef<str>,
    {
        iter::replace(self.engine(), subject, Limit::Unbounded, Transform(f))
    }

    // ===== Split / expand =====

    /// Split `subject` at every match; see [`iter::split`].
    pub fn split<'s>(&self, subject: &'s str, limit: isize) -> Vec<&'s str> {
        iter::split(self.engine(), subject, Limit::from_count(limit))
    }

    /// Append `template` expanded against `slots` of a match of `subject`.
    pub fn expand(
        &self,
        dst: &mut Vec<u8>,
        template: &[u8],
        subject: &[u8],
        slots: &[Option<usize>],
    ) {
        iter::expand_into(dst, template, subject, slots);
    }

    // ===== Byte subjects =====
    //
    // Same semantics over raw buffers. The native engine matches bytes
    // directly; the backtracking engine only searches valid UTF-8 and reports
    // "no match" otherwise. An empty match in front of bytes that do not decode
    // ends a scan.

    pub fn is_match_bytes(&self, subject: &[u8]) -> bool {
        iter::is_match(self.engine(), subject)
    }

    pub fn find_bytes<'s>(&self, subject: &'s [u8]) -> Option<Match<'s, [u8]>> {
        self.find_iter_bytes(subject).next()
    }

    pub fn captures_bytes<'s>(&self, subject: &'s [u8]) -> Option<Captures<'s, [u8]>> {
        iter::captures_at(self.engine(), subject, 0)
    }

    pub fn captures_at_bytes<'s>(
        &self,
        subject: &'s [u8],
        start: usize,
    ) -> Option<Captures<'s, [u8]>> {
        iter::captures_at(self.engine(), subject, start)
    }

    pub fn find_iter_bytes<'r, 's>(&'r self, subject: &'s [u8]) -> Matches<'r, 's, [u8]> {
        Matches::new(self.engine(), subject, Limit::Unbounded)
    }

    pub fn captures_iter_bytes<'r, 's>(
        &'r self,
        subject: &'s [u8],
    ) -> CaptureMatches<'r, 's, [u8]> {
        CaptureMatches::new(self.engine(), subject, Limit::Unbounded)
    }

    pub fn find_all_bytes<'s>(&self, subject: &'s [u8], limit: isize) -> Vec<Match<'s, [u8]>> {
        Matches::new(self.engine(), subject, Limit::from_count(limit)).collect()
    }

    pub fn captures_all_bytes<'s>(
        &self,
        subject: &'s [u8],
        limit: isize,
    ) -> Vec<Captures<'s, [u8]>> {
        CaptureMatches::new(self.engine(), subject, Limit::from_count(limit)).collect()
    }

    pub fn replace_all_bytes<'s, R>(&self, subject: &'s [u8], rep: R) -> Cow<'s, [u8]>
    where
        R: Replacer<[u8], Error = Infallible>,
    {
        into_ok(iter::replace(self.engine(), subject, Limit::Unbounded, rep))
    }

    pub fn replacen_bytes<'s, R>(&self, subject: &'s [u8], limit: isize, rep: R) -> Cow<'s, [u8]>
    where
        R: Replacer<[u8], Error = Infallible>,
    {
        into_ok(iter::replace(
            self.engine(),
            subject,
            Limit::from_count(limit),
            rep,
        ))
    }

    pub fn replace_all_literal_bytes<'s>(&self, subject: &'s [u8], rep: &[u8]) -> Cow<'s, [u8]> {
        self.replace_all_bytes(subject, NoExpand(rep))
    }

    pub fn try_replace_all_with_bytes<'s, F, S, E>(
        &self,
        subject: &'s [u8],
        f: F,
    ) -> Result<Cow<'s, [u8]>, E>
    where
        F: FnMut(&Match<'_, [u8]>) -> Result<S, E>,
        S: AsRef<[u8]>,
    {
        iter::replace(self.engine(), subject, Limit::Unbounded, Transform(f))
    }

    pub fn split_bytes<'s>(&self, subject: &'s [u8], limit: isize) -> Vec<&'s [u8]> {
        iter::split(self.engine(), subject, Limit::from_count(limit))
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Regex {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Regex, CompileError> {
        Regex::new(s)
    }
}

/// Fluent builder for [`Regex`].
///
/// ```ignore
/// let re = RegexBuilder::new(r"(\w+)\s+\1")
///     .backtrack_limit(10_000)
///     .build()?;
/// ```
pub struct RegexBuilder {
    pattern: String,
    options: RegexOptions,
    classifier: Box<dyn Classifier>,
}

impl RegexBuilder {
    pub fn new(pattern: &str) -> Self {
        RegexBuilder {
            pattern: pattern.to_owned(),
            options: RegexOptions::default(),
            classifier: Box::new(MarkerClassifier),
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: RegexOptions) -> Self {
        self.options = options;
        self
    }

    /// Force an engine instead of classifying the pattern.
    pub fn engine(mut self, engine: EngineSelection) -> Self {
        self.options.engine = engine;
        self
    }

    /// Classifier consulted under [`EngineSelection::Auto`].
    pub fn classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.options.backtrack_limit = limit;
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.options.size_limit = bytes;
        self
    }

    pub fn dfa_size_limit(mut self, bytes: usize) -> Self {
        self.options.dfa_size_limit = bytes;
        self
    }

    pub fn build(&self) -> Result<Regex, CompileError> {
        let kind = match self.options.engine {
            EngineSelection::Auto => self.classifier.classify(&self.pattern),
            EngineSelection::Native => EngineKind::Native,
            EngineSelection::Backtracking => EngineKind::Backtracking,
        };

        let handle = Handle::compile(&self.pattern, kind, &self.options)?;

        let names = handle
            .engine()
            .capture_names()
            .into_iter()
            .enumerate()
            .filter_map(|(index, name)| name.map(|name| (SmolStr::new(name), index)))
            .collect();

        debug!(
            pattern = %self.pattern,
            engine = %kind,
            groups = handle.engine().captures_len(),
            "compiled"
        );

        Ok(Regex {
            source: SmolStr::new(&self.pattern),
            kind,
            handle,
            names,
        })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use serde::ser::{Serialize, Serializer};

    use super::Regex;

    /// A `Regex` serializes as its source text.
    impl Serialize for Regex {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    struct RegexVisitor;

    impl Visitor<'_> for RegexVisitor {
        type Value = Regex;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a regular expression pattern")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Regex, E> {
            Regex::new(v).map_err(E::custom)
        }
    }

    /// Deserializing compiles the pattern text.
    impl<'de> Deserialize<'de> for Regex {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Regex, D::Error> {
            deserializer.deserialize_str(RegexVisitor)
        }
    }
}
