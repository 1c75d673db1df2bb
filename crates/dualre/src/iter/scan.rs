// Global scan: repeated `find_at` queries with the zero-width advance rule
//
// After a match the cursor moves to:
// - the match end, for a non-empty match
// - one decoded codepoint past the match, for an empty match
// The scan stops when the engine finds nothing, the limit is reached, an empty
// match sits where no codepoint can be decoded (end of subject, invalid UTF-8),
// or a non-empty match consumed the subject up to its end.

use tracing::debug;

use super::{Captures, Haystack, Limit, Match};
use crate::engine::Engine;

/// Byte length of the UTF-8 encoded codepoint starting at `at`, or `None` at
/// the end of the subject or when the bytes there do not decode.
#[inline]
fn codepoint_len_at(subject: &[u8], at: usize) -> Option<usize> {
    let rest = subject.get(at..)?;
    let width = match *rest.first()? {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    let encoded = rest.get(..width)?;
    std::str::from_utf8(encoded).ok().map(|_| width)
}

/// Position of an in-progress global scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    pos: usize,
    done: bool,
}

impl ScanCursor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset the next query starts from.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Move past the match `start..end` of `subject`.
    pub fn advance(&mut self, subject: &[u8], start: usize, end: usize) {
        if start == end {
            match codepoint_len_at(subject, end) {
                Some(len) => self.pos = end + len,
                None => self.done = true,
            }
        } else if end >= subject.len() {
            self.done = true;
        } else {
            self.pos = end;
        }
    }
}

/// Shared driver behind every multi-match operation.
pub(crate) struct Scan<'e, 's, H: ?Sized> {
    engine: &'e dyn Engine,
    subject: &'s H,
    cursor: ScanCursor,
    limit: Limit,
    emitted: usize,
}

impl<'e, 's, H: ?Sized + Haystack> Scan<'e, 's, H> {
    pub fn new(engine: &'e dyn Engine, subject: &'s H, limit: Limit) -> Self {
        Scan {
            engine,
            subject,
            cursor: ScanCursor::new(),
            limit,
            emitted: 0,
        }
    }

    /// Run the next query, filling `slots`. Returns the whole-match span.
    pub fn step(&mut self, slots: &mut [Option<usize>]) -> Option<(usize, usize)> {
        if self.cursor.is_done() || !self.limit.allows(self.emitted) {
            return None;
        }

        let pos = self.cursor.pos();
        if !self.subject.search(self.engine, pos, slots) {
            self.cursor.finish();
            return None;
        }

        let (Some(&Some(start)), Some(&Some(end))) = (slots.first(), slots.get(1)) else {
            debug!(pos, "engine reported a match without a whole-match span");
            self.cursor.finish();
            return None;
        };
        let bytes = self.subject.as_bytes();
        if start < pos
            || start > end
            || end > bytes.len()
            || !self.subject.is_boundary(start)
            || !self.subject.is_boundary(end)
        {
            debug!(pos, start, end, "engine reported an out-of-order span");
            self.cursor.finish();
            return None;
        }

        self.cursor.advance(bytes, start, end);
        self.emitted += 1;
        Some((start, end))
    }
}

/// Whether the pattern matches anywhere in `subject`.
pub fn is_match<H: ?Sized + Haystack>(engine: &dyn Engine, subject: &H) -> bool {
    let mut slots = [None; 2];
    subject.search(engine, 0, &mut slots)
}

/// Leftmost match at or after `start`, with every group filled in.
///
/// A `start` past the end of `subject`, or inside a codepoint of a text
/// subject, finds nothing.
pub fn captures_at<'s, H: ?Sized + Haystack>(
    engine: &dyn Engine,
    subject: &'s H,
    start: usize,
) -> Option<Captures<'s, H>> {
    if start > subject.as_bytes().len() || !subject.is_boundary(start) {
        return None;
    }
    let mut caps = Captures::empty(subject, engine.captures_len());
    if !subject.search(engine, start, caps.slots_mut()) {
        return None;
    }
    caps.get(0)?;
    Some(caps)
}

/// Iterator over successive whole-match spans.
///
/// Created fresh by each call, so iterating twice means calling twice.
pub struct Matches<'e, 's, H: ?Sized = str> {
    scan: Scan<'e, 's, H>,
    subject: &'s H,
    slots: [Option<usize>; 2],
}

impl<'e, 's, H: ?Sized + Haystack> Matches<'e, 's, H> {
    pub fn new(engine: &'e dyn Engine, subject: &'s H, limit: Limit) -> Self {
        Matches {
            scan: Scan::new(engine, subject, limit),
            subject,
            slots: [None; 2],
        }
    }
}

impl<'s, H: ?Sized + Haystack> Iterator for Matches<'_, 's, H> {
    type Item = Match<'s, H>;

    fn next(&mut self) -> Option<Match<'s, H>> {
        let (start, end) = self.scan.step(&mut self.slots)?;
        Some(Match::new(self.subject, start, end))
    }
}

impl<H: ?Sized + Haystack> std::iter::FusedIterator for Matches<'_, '_, H> {}

/// Iterator over successive matches with all capture groups.
pub struct CaptureMatches<'e, 's, H: ?Sized = str> {
    scan: Scan<'e, 's, H>,
    subject: &'s H,
    groups: usize,
}

impl<'e, 's, H: ?Sized + Haystack> CaptureMatches<'e, 's, H> {
    pub fn new(engine: &'e dyn Engine, subject: &'s H, limit: Limit) -> Self {
        CaptureMatches {
            scan: Scan::new(engine, subject, limit),
            subject,
            groups: engine.captures_len(),
        }
    }
}

impl<'s, H: ?Sized + Haystack> Iterator for CaptureMatches<'_, 's, H> {
    type Item = Captures<'s, H>;

    fn next(&mut self) -> Option<Captures<'s, H>> {
        let mut caps = Captures::empty(self.subject, self.groups);
        self.scan.step(caps.slots_mut())?;
        Some(caps)
    }
}

impl<H: ?Sized + Haystack> std::iter::FusedIterator for CaptureMatches<'_, '_, H> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepoint_len_at() {
        let s = "aé€😀".as_bytes();
        assert_eq!(codepoint_len_at(s, 0), Some(1));
        assert_eq!(codepoint_len_at(s, 1), Some(2));
        assert_eq!(codepoint_len_at(s, 3), Some(3));
        assert_eq!(codepoint_len_at(s, 6), Some(4));
        assert_eq!(codepoint_len_at(s, 10), None);
        // middle of 'é'
        assert_eq!(codepoint_len_at(s, 2), None);
    }

    #[test]
    fn test_codepoint_len_at_invalid_bytes() {
        assert_eq!(codepoint_len_at(b"a\xffb", 1), None);
        // truncated three-byte sequence
        assert_eq!(codepoint_len_at(b"\xe2\x82", 0), None);
        // overlong encoding of '/'
        assert_eq!(codepoint_len_at(b"\xc0\xaf", 0), None);
        // surrogate half
        assert_eq!(codepoint_len_at(b"\xed\xa0\x80", 0), None);
        assert_eq!(codepoint_len_at(b"\xe2\x82\xac", 0), Some(3));
    }

    #[test]
    fn test_cursor_advance() {
        let s = b"ab";
        let mut c = ScanCursor::new();
        c.advance(s, 0, 0);
        assert_eq!((c.pos(), c.is_done()), (1, false));
        c.advance(s, 1, 1);
        assert_eq!((c.pos(), c.is_done()), (2, false));
        c.advance(s, 2, 2);
        assert!(c.is_done());

        let mut c = ScanCursor::new();
        c.advance(s, 0, 1);
        assert_eq!((c.pos(), c.is_done()), (1, false));
        c.advance(s, 1, 2);
        assert!(c.is_done());
    }

    #[test]
    fn test_cursor_stops_on_undecodable_byte() {
        let mut c = ScanCursor::new();
        c.advance(b"a\xffb", 1, 1);
        assert!(c.is_done());
    }
}
