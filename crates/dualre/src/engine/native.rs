// Native engine: `regex` crate, finite automata, linear time
//
// The `regex` crate reports syntax errors as preformatted text, so patterns are
// parsed with `regex-syntax` first to recover the byte offset of the error.
//
// Byte subjects go through a `regex::bytes::Regex` built from the same source
// on first use.

use std::sync::OnceLock;

use regex_syntax::ast::ErrorKind as AstErrorKind;
use tracing::debug;

use super::{Engine, write_group};
use crate::classify::EngineKind;
use crate::error::{CompileError, ErrorCode};
use crate::options::RegexOptions;

#[derive(Debug, Clone)]
pub struct NativeEngine {
    re: regex::Regex,
    bytes: OnceLock<Option<regex::bytes::Regex>>,
    size_limit: usize,
    dfa_size_limit: usize,
}

impl NativeEngine {
    pub fn compile(pattern: &str, options: &RegexOptions) -> Result<Self, CompileError> {
        if let Err(err) = regex_syntax::Parser::new().parse(pattern) {
            return Err(syntax_error(&err));
        }

        let re = regex::RegexBuilder::new(pattern)
            .size_limit(options.size_limit)
            .dfa_size_limit(options.dfa_size_limit)
            .build()
            .map_err(build_error)?;

        Ok(NativeEngine {
            re,
            bytes: OnceLock::new(),
            size_limit: options.size_limit,
            dfa_size_limit: options.dfa_size_limit,
        })
    }

    fn bytes_regex(&self) -> Option<&regex::bytes::Regex> {
        self.bytes
            .get_or_init(|| {
                regex::bytes::RegexBuilder::new(self.re.as_str())
                    .size_limit(self.size_limit)
                    .dfa_size_limit(self.dfa_size_limit)
                    .build()
                    .map_err(|err| {
                        debug!(pattern = self.re.as_str(), error = %err, "byte program rejected");
                    })
                    .ok()
            })
            .as_ref()
    }
}

fn syntax_error(err: &regex_syntax::Error) -> CompileError {
    let (offset, code, message) = match err {
        regex_syntax::Error::Parse(e) => {
            let code = match e.kind() {
                AstErrorKind::UnsupportedBackreference | AstErrorKind::UnsupportedLookAround => {
                    ErrorCode::Unsupported
                }
                _ => ErrorCode::Syntax,
            };
            (e.span().start.offset, code, e.kind().to_string())
        }
        regex_syntax::Error::Translate(e) => (
            e.span().start.offset,
            ErrorCode::Unsupported,
            e.kind().to_string(),
        ),
        other => (0, ErrorCode::Other, other.to_string()),
    };
    CompileError::new(EngineKind::Native, offset, code, message)
}

fn build_error(err: regex::Error) -> CompileError {
    let code = match &err {
        regex::Error::CompiledTooBig(_) => ErrorCode::TooLarge,
        regex::Error::Syntax(_) => ErrorCode::Syntax,
        _ => ErrorCode::Other,
    };
    CompileError::new(EngineKind::Native, 0, code, err.to_string())
}

impl Engine for NativeEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Native
    }

    fn captures_len(&self) -> usize {
        self.re.captures_len()
    }

    fn capture_names(&self) -> Vec<Option<&str>> {
        self.re.capture_names().collect()
    }

    fn find(&self, subject: &str, slots: &mut [Option<usize>]) -> bool {
        self.find_at(subject, 0, slots)
    }

    fn find_at(&self, subject: &str, start: usize, slots: &mut [Option<usize>]) -> bool {
        slots.fill(None);
        if start > subject.len() {
            return false;
        }

        // FAST PATH: only the overall span was asked for
        if slots.len() <= 2 {
            let Some(m) = self.re.find_at(subject, start) else {
                return false;
            };
            write_group(slots, 0, m.start(), m.end());
            return true;
        }

        let mut locs = self.re.capture_locations();
        if self.re.captures_read_at(&mut locs, subject, start).is_none() {
            return false;
        }
        for group in 0..locs.len().min(slots.len() / 2) {
            if let Some((s, e)) = locs.get(group) {
                write_group(slots, group, s, e);
            }
        }
        true
    }

    fn find_bytes_at(&self, subject: &[u8], start: usize, slots: &mut [Option<usize>]) -> bool {
        slots.fill(None);
        if start > subject.len() {
            return false;
        }
        let Some(re) = self.bytes_regex() else {
            return false;
        };

        if slots.len() <= 2 {
            let Some(m) = re.find_at(subject, start) else {
                return false;
            };
            write_group(slots, 0, m.start(), m.end());
            return true;
        }

        let mut locs = re.capture_locations();
        if re.captures_read_at(&mut locs, subject, start).is_none() {
            return false;
        }
        for group in 0..locs.len().min(slots.len() / 2) {
            if let Some((s, e)) = locs.get(group) {
                write_group(slots, group, s, e);
            }
        }
        true
    }
}
