// Subject kinds: text (`str`) and raw buffers (`[u8]`)
//
// The scan, replace and split folds are written once over `Haystack`. The two
// implementations differ in how they reach the engine, what counts as a valid
// span boundary, and which buffer the replacement output is built in.

use std::ops::Range;

use super::template::{expand_into, expand_str};
use crate::engine::Engine;
use crate::limits::TEMPLATE_SIGIL;

mod sealed {
    pub trait Sealed {}

    impl Sealed for str {}
    impl Sealed for [u8] {}
}

/// A subject that patterns can be matched against.
///
/// Implemented for `str` and `[u8]` only.
pub trait Haystack: sealed::Sealed + ToOwned + 'static {
    fn as_bytes(&self) -> &[u8];

    fn slice(&self, range: Range<usize>) -> Option<&Self>;

    fn empty() -> &'static Self;

    /// `self[start..end]`, or the empty subject when that is not a valid span.
    #[inline]
    fn span(&self, start: usize, end: usize) -> &Self {
        self.slice(start..end).unwrap_or(Self::empty())
    }

    /// Whether a span may start or end at byte offset `at`.
    fn is_boundary(&self, at: usize) -> bool;

    /// Ask `engine` for the leftmost match at or after `start`.
    fn search(&self, engine: &dyn Engine, start: usize, slots: &mut [Option<usize>]) -> bool;

    fn buffer(capacity: usize) -> Self::Owned;

    fn push(dst: &mut Self::Owned, piece: &Self);

    /// Append `template` expanded against `slots` of a match in `subject`.
    fn expand(dst: &mut Self::Owned, template: &Self, subject: &Self, slots: &[Option<usize>]);

    #[inline]
    fn has_sigil(template: &Self) -> bool {
        template.as_bytes().contains(&TEMPLATE_SIGIL)
    }
}

impl Haystack for str {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.get(range)
    }

    #[inline]
    fn empty() -> &'static str {
        ""
    }

    #[inline]
    fn is_boundary(&self, at: usize) -> bool {
        self.is_char_boundary(at)
    }

    #[inline]
    fn search(&self, engine: &dyn Engine, start: usize, slots: &mut [Option<usize>]) -> bool {
        engine.find_at(self, start, slots)
    }

    #[inline]
    fn buffer(capacity: usize) -> String {
        String::with_capacity(capacity)
    }

    #[inline]
    fn push(dst: &mut String, piece: &str) {
        dst.push_str(piece);
    }

    #[inline]
    fn expand(dst: &mut String, template: &str, subject: &str, slots: &[Option<usize>]) {
        expand_str(dst, template, subject, slots);
    }
}

impl Haystack for [u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.get(range)
    }

    #[inline]
    fn empty() -> &'static [u8] {
        &[]
    }

    #[inline]
    fn is_boundary(&self, at: usize) -> bool {
        at <= self.len()
    }

    #[inline]
    fn search(&self, engine: &dyn Engine, start: usize, slots: &mut [Option<usize>]) -> bool {
        engine.find_bytes_at(self, start, slots)
    }

    #[inline]
    fn buffer(capacity: usize) -> Vec<u8> {
        Vec::with_capacity(capacity)
    }

    #[inline]
    fn push(dst: &mut Vec<u8>, piece: &[u8]) {
        dst.extend_from_slice(piece);
    }

    #[inline]
    fn expand(dst: &mut Vec<u8>, template: &[u8], subject: &[u8], slots: &[Option<usize>]) {
        expand_into(dst, template, subject, slots);
    }
}
