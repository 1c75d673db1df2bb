// Engine capability: the one primitive the match iterator is built on
//
// An engine answers "where is the leftmost match at or after byte offset K",
// writing capture slots into a buffer owned by the caller. Nothing else about
// the engine is visible to the iteration layer.

mod backtrack;
mod native;

pub use backtrack::BacktrackEngine;
pub use native::NativeEngine;

use smol_str::SmolStr;
use tracing::debug;

use crate::classify::EngineKind;
use crate::error::CompileError;
use crate::options::RegexOptions;

/// A compiled pattern that can be queried for matches.
///
/// Slots are flat: group `g` occupies `slots[2 * g]` (start) and
/// `slots[2 * g + 1]` (end). An engine writes as many groups as fit into the
/// buffer it is given and leaves unmatched groups as `None`.
pub trait Engine: Send + Sync {
    fn kind(&self) -> EngineKind;

    /// Number of groups, including the implicit whole-match group 0.
    fn captures_len(&self) -> usize;

    /// Group names in group order; `None` for unnamed groups.
    fn capture_names(&self) -> Vec<Option<&str>> {
        vec![None; self.captures_len()]
    }

    /// Leftmost match anywhere in `subject`.
    /// Returns `false` for no match, in which case `slots` is unspecified.
    fn find(&self, subject: &str, slots: &mut [Option<usize>]) -> bool;

    /// Leftmost match starting at or after `start`. The search is not anchored
    /// at `start`. Offsets are relative to `subject`, not to `start`.
    ///
    /// The default re-slices `subject[start..]` and shifts the offsets found
    /// there back by `start`. Engines that can search from an absolute
    /// position should override this so anchors and lookbehind see the text
    /// before `start`.
    fn find_at(&self, subject: &str, start: usize, slots: &mut [Option<usize>]) -> bool {
        let Some(rest) = subject.get(start..) else {
            return false;
        };
        if !self.find(rest, slots) {
            return false;
        }
        translate_slots(slots, start);
        true
    }

    /// [`find_at`](Self::find_at) over a raw buffer.
    ///
    /// The default only searches valid UTF-8 and reports "no match" for
    /// anything else. Engines that match bytes directly override it.
    fn find_bytes_at(&self, subject: &[u8], start: usize, slots: &mut [Option<usize>]) -> bool {
        match std::str::from_utf8(subject) {
            Ok(text) => self.find_at(text, start, slots),
            Err(err) => {
                debug!(
                    engine = %self.kind(),
                    valid_up_to = err.valid_up_to(),
                    "subject is not valid UTF-8"
                );
                false
            }
        }
    }
}

/// Shift every set slot by `base`, mapping offsets found in a suffix back to
/// the coordinates of the full subject.
#[inline]
pub fn translate_slots(slots: &mut [Option<usize>], base: usize) {
    for offset in slots.iter_mut().flatten() {
        *offset += base;
    }
}

/// Write one group's span into `slots` if the buffer has room for it.
#[inline]
pub(crate) fn write_group(slots: &mut [Option<usize>], group: usize, start: usize, end: usize) {
    if let Some(pair) = slots.get_mut(2 * group..2 * group + 2) {
        pair[0] = Some(start);
        pair[1] = Some(end);
    }
}

/// Stand-in for a handle whose engine has been freed.
/// Answers every query with "no match" but keeps the group layout.
#[derive(Debug, Clone)]
pub struct ReleasedEngine {
    kind: EngineKind,
    names: Vec<Option<SmolStr>>,
}

impl Engine for ReleasedEngine {
    fn kind(&self) -> EngineKind {
        self.kind
    }

    fn captures_len(&self) -> usize {
        self.names.len()
    }

    fn capture_names(&self) -> Vec<Option<&str>> {
        self.names.iter().map(|name| name.as_deref()).collect()
    }

    fn find(&self, _subject: &str, _slots: &mut [Option<usize>]) -> bool {
        false
    }

    fn find_at(&self, _subject: &str, _start: usize, _slots: &mut [Option<usize>]) -> bool {
        false
    }

    fn find_bytes_at(
        &self,
        _subject: &[u8],
        _start: usize,
        _slots: &mut [Option<usize>],
    ) -> bool {
        false
    }
}

/// Exactly one populated engine per compiled pattern.
#[derive(Debug, Clone)]
pub(crate) enum Handle {
    Native(NativeEngine),
    Backtracking(BacktrackEngine),
    Released(ReleasedEngine),
}

impl Handle {
    pub fn compile(
        pattern: &str,
        kind: EngineKind,
        options: &RegexOptions,
    ) -> Result<Self, CompileError> {
        match kind {
            EngineKind::Native => NativeEngine::compile(pattern, options).map(Handle::Native),
            EngineKind::Backtracking => {
                BacktrackEngine::compile(pattern, options).map(Handle::Backtracking)
            }
        }
    }

    #[inline]
    pub fn engine(&self) -> &dyn Engine {
        match self {
            Handle::Native(engine) => engine,
            Handle::Backtracking(engine) => engine,
            Handle::Released(engine) => engine,
        }
    }

    /// Free the compiled program. Safe to call any number of times.
    /// Returns `true` if this call released a live engine.
    pub fn release(&mut self) -> bool {
        if self.is_released() {
            return false;
        }
        let engine = self.engine();
        let released = ReleasedEngine {
            kind: engine.kind(),
            names: engine
                .capture_names()
                .into_iter()
                .map(|name| name.map(SmolStr::new))
                .collect(),
        };
        *self = Handle::Released(released);
        true
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        matches!(self, Handle::Released(_))
    }
}
