use super::{Haystack, Limit};
use super::scan::Scan;
use crate::engine::Engine;

/// Split `subject` around the matches of the pattern.
///
/// Matches are separators and are dropped. An empty separator at the start of
/// the current piece produces no piece, and an empty separator at the very end
/// closes the last piece without a trailing empty one. With `AtMost(n)` for
/// `n > 0`, the remainder after `n - 1` pieces is returned unsplit as the last
/// element.
pub fn split<'s, H: ?Sized + Haystack>(
    engine: &dyn Engine,
    subject: &'s H,
    limit: Limit,
) -> Vec<&'s H> {
    if limit == Limit::AtMost(0) {
        return Vec::new();
    }
    let len = subject.as_bytes().len();
    if len == 0 {
        return vec![subject];
    }

    let mut pieces = Vec::new();
    let mut slots = [None; 2];
    let mut scan = Scan::new(engine, subject, Limit::Unbounded);
    let mut piece_start = 0;
    let mut closed_at_end = false;

    loop {
        if let Limit::AtMost(max) = limit
            && pieces.len() + 1 >= max
        {
            break;
        }
        let Some((start, end)) = scan.step(&mut slots) else {
            break;
        };
        if start == end && start == piece_start {
            continue;
        }
        pieces.push(subject.span(piece_start, start));
        piece_start = end;
        closed_at_end = start == end && end == len;
    }

    if !closed_at_end {
        pieces.push(subject.span(piece_start, len));
    }
    pieces
}

