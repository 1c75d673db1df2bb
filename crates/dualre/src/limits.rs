//! Centralized engine limits and configuration constants.
//!
//! All magic numbers that bound how much memory or CPU a single compiled
//! pattern may use are collected here for easy tuning.

// ===== Native engine =====

/// Default approximate size limit (bytes) of a compiled native program.
/// Matches the `regex` crate's own default.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default cache size limit (bytes) for the lazy DFA of the native engine.
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

// ===== Backtracking engine =====

/// Default number of backtracking steps allowed per query before the query
/// is abandoned. An abandoned query reports "no match".
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

// ===== Templates =====

/// Sigil that introduces a group reference in a replacement template.
pub const TEMPLATE_SIGIL: u8 = b'$';
