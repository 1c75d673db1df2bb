// Match iteration: find / find-all / replace / split / expand
//
// Everything here is written against the `Engine` trait only, and once for
// both subject kinds through `Haystack`:
// - `scan` drives repeated `find_at` queries with the zero-width advance rule
// - `replace` and `split` are folds over that scan
// - `template` expands `$N` references against capture slots
//
// Each operation allocates its own slot buffer, so a compiled pattern can be
// shared between threads.

mod haystack;
mod replace;
mod scan;
mod split;
mod template;

pub use haystack::Haystack;
pub use replace::{NoExpand, Replacer, Transform, replace};
pub use scan::{CaptureMatches, Matches, ScanCursor, captures_at, is_match};
pub use split::split;
pub use template::{expand_into, expand_str, expand_template};

use std::fmt;
use std::ops::Range;

/// How many matches an operation may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unbounded,
    AtMost(usize),
}

impl Limit {
    /// Integer convention of the public API: negative means unbounded,
    /// zero means nothing, positive caps the count.
    #[inline]
    pub fn from_count(n: isize) -> Self {
        if n < 0 {
            Limit::Unbounded
        } else {
            Limit::AtMost(n as usize)
        }
    }

    /// Whether one more item may follow `emitted` items.
    #[inline]
    pub fn allows(self, emitted: usize) -> bool {
        match self {
            Limit::Unbounded => true,
            Limit::AtMost(max) => emitted < max,
        }
    }
}

/// A single matched span of a subject.
pub struct Match<'s, H: ?Sized = str> {
    subject: &'s H,
    start: usize,
    end: usize,
}

impl<H: ?Sized> Clone for Match<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized> Copy for Match<'_, H> {}

impl<H: ?Sized + fmt::Debug> fmt::Debug for Match<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<H: ?Sized + PartialEq> PartialEq for Match<'_, H> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.subject == other.subject
    }
}

impl<H: ?Sized + Eq> Eq for Match<'_, H> {}

impl<'s, H: ?Sized + Haystack> Match<'s, H> {
    #[inline]
    pub(crate) fn new(subject: &'s H, start: usize, end: usize) -> Self {
        Match {
            subject,
            start,
            end,
        }
    }

    /// Byte offset of the first matched byte.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last matched byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched part of the subject.
    #[inline]
    pub fn text(&self) -> &'s H {
        self.subject.span(self.start, self.end)
    }

    #[inline]
    pub fn as_bytes(&self) -> &'s [u8] {
        self.text().as_bytes()
    }
}

impl<'s> Match<'s, str> {
    #[inline]
    pub fn as_str(&self) -> &'s str {
        self.text()
    }
}

impl<'s> From<Match<'s, str>> for &'s str {
    fn from(m: Match<'s, str>) -> &'s str {
        m.as_str()
    }
}

/// Capture slots of one match.
///
/// Group `g` is `slots[2g]..slots[2g + 1]`; group 0 is the whole match and is
/// always set on a `Captures` handed out by this crate.
pub struct Captures<'s, H: ?Sized = str> {
    subject: &'s H,
    slots: Vec<Option<usize>>,
}

impl<H: ?Sized> Clone for Captures<'_, H> {
    fn clone(&self) -> Self {
        Captures {
            subject: self.subject,
            slots: self.slots.clone(),
        }
    }
}

impl<H: ?Sized + fmt::Debug> fmt::Debug for Captures<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Captures").field("slots", &self.slots).finish()
    }
}

impl<H: ?Sized + PartialEq> PartialEq for Captures<'_, H> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots && self.subject == other.subject
    }
}

impl<H: ?Sized + Eq> Eq for Captures<'_, H> {}

impl<'s, H: ?Sized + Haystack> Captures<'s, H> {
    /// An all-unset buffer for `groups` groups, used as query scratch.
    pub(crate) fn empty(subject: &'s H, groups: usize) -> Self {
        Captures {
            subject,
            slots: vec![None; 2 * groups.max(1)],
        }
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Option<usize>] {
        &mut self.slots
    }

    /// Group `index`, or `None` if it does not exist or did not participate.
    pub fn get(&self, index: usize) -> Option<Match<'s, H>> {
        let start = (*self.slots.get(index.checked_mul(2)?)?)?;
        let end = (*self.slots.get(index * 2 + 1)?)?;
        (start <= end).then(|| Match::new(self.subject, start, end))
    }

    /// The whole match.
    #[inline]
    pub fn get_match(&self) -> Match<'s, H> {
        self.get(0).unwrap_or(Match::new(self.subject, 0, 0))
    }

    /// Number of groups, including group 0.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Match<'s, H>>> + '_ {
        (0..self.len()).map(|g| self.get(g))
    }

    /// Raw flat slot offsets, suitable for [`expand_template`].
    #[inline]
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    #[inline]
    pub fn subject(&self) -> &'s H {
        self.subject
    }

    /// Append `template` expanded against these captures to `dst`.
    pub fn expand(&self, template: &H, dst: &mut H::Owned) {
        H::expand(dst, template, self.subject, &self.slots);
    }
}

impl<H: ?Sized + Haystack> std::ops::Index<usize> for Captures<'_, H> {
    type Output = H;

    /// Text of group `index`; panics if the group did not participate.
    fn index(&self, index: usize) -> &H {
        match self.get(index) {
            Some(m) => m.text(),
            None => panic!("no group at index '{}'", index),
        }
    }
}
