// Global substitution
//
// Unmatched text between matches is copied through; each match is replaced by
// whatever the `Replacer` appends. A fallible replacer aborts the scan on its
// first error and the partial output is dropped.

use std::borrow::Cow;
use std::convert::Infallible;

use super::scan::Scan;
use super::{Captures, Haystack, Limit, Match};
use crate::engine::Engine;

/// Produces the replacement for one match of an `H` subject.
pub trait Replacer<H: ?Sized + Haystack = str> {
    type Error;

    /// Append the replacement for `caps` to `dst`.
    fn replace_append(
        &mut self,
        caps: &Captures<'_, H>,
        dst: &mut H::Owned,
    ) -> Result<(), Self::Error>;

    /// Whether groups other than the whole match are consulted. When `false`
    /// the scan only asks the engine for the overall span.
    fn needs_groups(&self) -> bool {
        true
    }
}

// ===== Templates: `$N` and `$$` are expanded =====

impl Replacer<str> for &str {
    type Error = Infallible;

    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) -> Result<(), Infallible> {
        caps.expand(self, dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        str::has_sigil(self)
    }
}

impl Replacer<str> for &String {
    type Error = Infallible;

    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) -> Result<(), Infallible> {
        caps.expand(self, dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        str::has_sigil(self)
    }
}

impl Replacer<str> for String {
    type Error = Infallible;

    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) -> Result<(), Infallible> {
        caps.expand(self, dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        str::has_sigil(self)
    }
}

impl Replacer<[u8]> for &[u8] {
    type Error = Infallible;

    fn replace_append(
        &mut self,
        caps: &Captures<'_, [u8]>,
        dst: &mut Vec<u8>,
    ) -> Result<(), Infallible> {
        caps.expand(self, dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        <[u8]>::has_sigil(self)
    }
}

impl<const N: usize> Replacer<[u8]> for &[u8; N] {
    type Error = Infallible;

    fn replace_append(
        &mut self,
        caps: &Captures<'_, [u8]>,
        dst: &mut Vec<u8>,
    ) -> Result<(), Infallible> {
        caps.expand(&self[..], dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        <[u8]>::has_sigil(&self[..])
    }
}

impl Replacer<[u8]> for Vec<u8> {
    type Error = Infallible;

    fn replace_append(
        &mut self,
        caps: &Captures<'_, [u8]>,
        dst: &mut Vec<u8>,
    ) -> Result<(), Infallible> {
        caps.expand(self, dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        <[u8]>::has_sigil(self)
    }
}

/// Text templates also apply to byte subjects.
impl Replacer<[u8]> for &str {
    type Error = Infallible;

    fn replace_append(
        &mut self,
        caps: &Captures<'_, [u8]>,
        dst: &mut Vec<u8>,
    ) -> Result<(), Infallible> {
        caps.expand(str::as_bytes(self), dst);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        str::has_sigil(self)
    }
}

// ===== Literal, transform, closure =====

/// Literal replacement, inserted verbatim without template expansion.
#[derive(Debug)]
pub struct NoExpand<'r, H: ?Sized = str>(pub &'r H);

impl<H: ?Sized> Clone for NoExpand<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized> Copy for NoExpand<'_, H> {}

impl<H: ?Sized + Haystack> Replacer<H> for NoExpand<'_, H> {
    type Error = Infallible;

    fn replace_append(
        &mut self,
        _caps: &Captures<'_, H>,
        dst: &mut H::Owned,
    ) -> Result<(), Infallible> {
        H::push(dst, self.0);
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        false
    }
}

/// Fallible transform of the matched text.
///
/// The closure receives the whole match; its error aborts the replacement.
pub struct Transform<F>(pub F);

impl<H, F, S, E> Replacer<H> for Transform<F>
where
    H: ?Sized + Haystack,
    F: FnMut(&Match<'_, H>) -> Result<S, E>,
    S: AsRef<H>,
{
    type Error = E;

    fn replace_append(&mut self, caps: &Captures<'_, H>, dst: &mut H::Owned) -> Result<(), E> {
        let replacement = (self.0)(&caps.get_match())?;
        H::push(dst, replacement.as_ref());
        Ok(())
    }

    fn needs_groups(&self) -> bool {
        false
    }
}

/// Infallible closure over all capture groups.
impl<H, F, S> Replacer<H> for F
where
    H: ?Sized + Haystack,
    F: FnMut(&Captures<'_, H>) -> S,
    S: AsRef<H>,
{
    type Error = Infallible;

    fn replace_append(
        &mut self,
        caps: &Captures<'_, H>,
        dst: &mut H::Owned,
    ) -> Result<(), Infallible> {
        H::push(dst, (*self)(caps).as_ref());
        Ok(())
    }
}

/// Replace up to `limit` matches in `subject`.
///
/// Returns the input unchanged (borrowed) when nothing matched.
pub fn replace<'s, H, R>(
    engine: &dyn Engine,
    subject: &'s H,
    limit: Limit,
    mut rep: R,
) -> Result<Cow<'s, H>, R::Error>
where
    H: ?Sized + Haystack,
    R: Replacer<H>,
{
    let groups = if rep.needs_groups() {
        engine.captures_len()
    } else {
        1
    };
    let mut caps = Captures::empty(subject, groups);
    let mut scan = Scan::new(engine, subject, limit);

    let Some((start, end)) = scan.step(caps.slots_mut()) else {
        return Ok(Cow::Borrowed(subject));
    };

    let mut out = H::buffer(subject.as_bytes().len());
    H::push(&mut out, subject.span(0, start));
    rep.replace_append(&caps, &mut out)?;
    let mut last_end = end;

    while let Some((start, end)) = scan.step(caps.slots_mut()) {
        H::push(&mut out, subject.span(last_end, start));
        rep.replace_append(&caps, &mut out)?;
        last_end = end;
    }

    H::push(&mut out, subject.span(last_end, subject.as_bytes().len()));
    Ok(Cow::Owned(out))
}

