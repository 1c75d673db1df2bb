// Backtracking engine: `fancy-regex`, lookaround and backreferences
//
// fancy-regex hands the automaton-expressible parts of a pattern to the
// `regex` crate and backtracks over the rest. A query can fail at runtime
// (backtrack limit, stack depth); such failures are reported as "no match".

use tracing::debug;

use super::{Engine, write_group};
use crate::classify::EngineKind;
use crate::error::{CompileError, ErrorCode};
use crate::options::RegexOptions;

#[derive(Debug, Clone)]
pub struct BacktrackEngine {
    re: fancy_regex::Regex,
}

impl BacktrackEngine {
    pub fn compile(pattern: &str, options: &RegexOptions) -> Result<Self, CompileError> {
        let re = fancy_regex::RegexBuilder::new(pattern)
            .backtrack_limit(options.backtrack_limit)
            .delegate_size_limit(options.size_limit)
            .delegate_dfa_size_limit(options.dfa_size_limit)
            .build()
            .map_err(compile_error)?;

        Ok(BacktrackEngine { re })
    }
}

fn compile_error(err: fancy_regex::Error) -> CompileError {
    let (offset, code) = match &err {
        fancy_regex::Error::ParseError(pos, fancy_regex::ParseError::InvalidBackref) => {
            (*pos, ErrorCode::InvalidBackref)
        }
        fancy_regex::Error::ParseError(pos, _) => (*pos, ErrorCode::Syntax),
        fancy_regex::Error::CompileError(inner) => match inner {
            fancy_regex::CompileError::InvalidBackref => (0, ErrorCode::InvalidBackref),
            fancy_regex::CompileError::LookBehindNotConst => (0, ErrorCode::Unsupported),
            _ => (0, ErrorCode::Other),
        },
        _ => (0, ErrorCode::Other),
    };
    CompileError::new(EngineKind::Backtracking, offset, code, err.to_string())
}

impl Engine for BacktrackEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Backtracking
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
            return match self.re.find_from_pos(subject, start) {
                Ok(Some(m)) => {
                    write_group(slots, 0, m.start(), m.end());
                    true
                }
                Ok(None) => false,
                Err(err) => {
                    debug!(pattern = self.re.as_str(), start, error = %err, "query abandoned");
                    false
                }
            };
        }

        match self.re.captures_from_pos(subject, start) {
            Ok(Some(caps)) => {
                for group in 0..caps.len().min(slots.len() / 2) {
                    if let Some(m) = caps.get(group) {
                        write_group(slots, group, m.start(), m.end());
                    }
                }
                true
            }
            Ok(None) => false,
            Err(err) => {
                debug!(pattern = self.re.as_str(), start, error = %err, "query abandoned");
                false
            }
        }
    }
}
