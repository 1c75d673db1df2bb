use thiserror::Error;

use crate::classify::EngineKind;

/// Engine-specific reason a pattern failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The pattern text could not be parsed.
    Syntax,
    /// The pattern parsed but uses a construct the engine cannot translate
    /// (e.g. an unbounded lookbehind, or a Unicode class in byte mode).
    Unsupported,
    /// A backreference names a group that does not exist.
    InvalidBackref,
    /// The compiled program would exceed the configured size limit.
    TooLarge,
    /// Anything the engine reports that does not fit the codes above.
    Other,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Syntax => "syntax",
            ErrorCode::Unsupported => "unsupported",
            ErrorCode::InvalidBackref => "invalid backreference",
            ErrorCode::TooLarge => "too large",
            ErrorCode::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern was rejected at compile time.
///
/// `offset` is the byte offset into the pattern where the engine located the
/// problem; it is `0` when the engine does not report a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{engine} compile failed at offset {offset} ({code}): {message}")]
pub struct CompileError {
    pub engine: EngineKind,
    pub offset: usize,
    pub code: ErrorCode,
    pub message: String,
}

impl CompileError {
    pub(crate) fn new(
        engine: EngineKind,
        offset: usize,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            offset,
            code,
            message: message.into(),
        }
    }
}
