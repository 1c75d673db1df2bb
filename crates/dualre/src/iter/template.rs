// Replacement templates
//
// `$N` (maximal digit run) substitutes group N, `$$` is a literal `$`, every
// other byte is copied as is. A group that does not exist or did not take part
// in the match substitutes nothing. There is no `${name}` form.

use std::ops::Range;

use crate::limits::TEMPLATE_SIGIL;

enum Token {
    /// Bytes of the template to copy verbatim
    Literal(Range<usize>),
    /// Group reference; `usize::MAX` when the index overflowed
    Group(usize),
}

struct Tokens<'t> {
    template: &'t [u8],
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.template[self.pos..];
        let first = *rest.first()?;
        let start = self.pos;

        if first != TEMPLATE_SIGIL {
            let len = rest
                .iter()
                .position(|&b| b == TEMPLATE_SIGIL)
                .unwrap_or(rest.len());
            self.pos += len;
            return Some(Token::Literal(start..self.pos));
        }

        match rest.get(1) {
            Some(&TEMPLATE_SIGIL) => {
                // `$$`: emit the second sigil
                self.pos += 2;
                Some(Token::Literal(start + 1..start + 2))
            }
            Some(b) if b.is_ascii_digit() => {
                let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
                let index = parse_index(&rest[1..1 + digits]);
                self.pos += 1 + digits;
                Some(Token::Group(index))
            }
            _ => {
                // lone `$`
                self.pos += 1;
                Some(Token::Literal(start..start + 1))
            }
        }
    }
}

#[inline]
fn tokens(template: &[u8]) -> Tokens<'_> {
    Tokens { template, pos: 0 }
}

fn parse_index(digits: &[u8]) -> usize {
    digits
        .iter()
        .try_fold(0usize, |acc, &d| {
            acc.checked_mul(10)?.checked_add((d - b'0') as usize)
        })
        .unwrap_or(usize::MAX)
}

/// Span of group `group`, if both of its slots exist and are set.
fn group_span(slots: &[Option<usize>], group: usize) -> Option<Range<usize>> {
    let i = group.checked_mul(2)?;
    let start = (*slots.get(i)?)?;
    let end = (*slots.get(i + 1)?)?;
    (start <= end).then_some(start..end)
}

/// Expand `template` against a match of `subject` described by `slots`.
///
/// `slots` uses the flat layout of [`Captures::slots`](super::Captures::slots).
pub fn expand_template(template: &[u8], subject: &[u8], slots: &[Option<usize>]) -> Vec<u8> {
    let mut dst = Vec::with_capacity(template.len());
    expand_into(&mut dst, template, subject, slots);
    dst
}

/// Like [`expand_template`] but appends to `dst`.
pub fn expand_into(dst: &mut Vec<u8>, template: &[u8], subject: &[u8], slots: &[Option<usize>]) {
    for token in tokens(template) {
        match token {
            Token::Literal(range) => dst.extend_from_slice(&template[range]),
            Token::Group(group) => {
                if let Some(text) = group_span(slots, group).and_then(|r| subject.get(r)) {
                    dst.extend_from_slice(text);
                }
            }
        }
    }
}

/// String flavor of [`expand_into`]. Spans that do not fall on codepoint
/// boundaries of `subject` substitute nothing.
pub fn expand_str(dst: &mut String, template: &str, subject: &str, slots: &[Option<usize>]) {
    for token in tokens(template.as_bytes()) {
        match token {
            // sigils are ASCII, so literal runs always split on char boundaries
            Token::Literal(range) => dst.push_str(&template[range]),
            Token::Group(group) => {
                if let Some(text) = group_span(slots, group).and_then(|r| subject.get(r)) {
                    dst.push_str(text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(template: &str, subject: &str, slots: &[Option<usize>]) -> String {
        let bytes = expand_template(template.as_bytes(), subject.as_bytes(), slots);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_parse_index_overflow() {
        assert_eq!(parse_index(b"12"), 12);
        assert_eq!(parse_index(b"007"), 7);
        assert_eq!(parse_index(b"99999999999999999999999999"), usize::MAX);
    }

    #[test]
    fn test_expand_groups_and_dollars() {
        let slots = [Some(0), Some(2), Some(0), Some(1), Some(1), Some(2)];
        assert_eq!(expand("$1$2", "ab", &slots), "ab");
        assert_eq!(expand("$2$1", "ab", &slots), "ba");
        assert_eq!(expand("$$1", "ab", &slots), "$1");
        assert_eq!(expand("$0!", "ab", &slots), "ab!");
        assert_eq!(expand("cost: $", "ab", &slots), "cost: $");
        assert_eq!(expand("$x$", "ab", &slots), "$x$");
        assert_eq!(expand("$10", "ab", &slots), "");
        assert_eq!(expand("", "ab", &slots), "");
    }

    #[test]
    fn test_expand_unset_and_bad_spans() {
        let slots = [Some(0), Some(1), None, None, Some(3), Some(1)];
        assert_eq!(expand("[$1]", "abc", &slots), "[]");
        // start > end
        assert_eq!(expand("[$2]", "abc", &slots), "[]");
        // out of range of subject
        let slots = [Some(0), Some(9)];
        assert_eq!(expand("[$0]", "abc", &slots), "[]");
    }

    #[test]
    fn test_expand_str_appends() {
        let mut dst = String::from(">");
        expand_str(&mut dst, "é$1é", "xyz", &[Some(0), Some(3), Some(1), Some(2)]);
        assert_eq!(dst, ">éyé");
    }
}
