//! Validation defect taxonomy.
//!
//! A defect is a per-candidate problem found during Phase 1. In strict
//! mode each defect becomes a hard error; in lenient mode the candidate
//! is dropped and the defect is recorded as a diagnostic note. Phases
//! after Phase 1 never produce defects.

use thiserror::Error;

/// A validation defect for a single candidate span
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpanDefect {
    #[error("candidate {index}: missing or empty text")]
    MissingText { index: usize },

    #[error("candidate {index}: text not found in source: {text:?}")]
    UnmatchedText { index: usize, text: String },

    #[error("candidate {index}: role {role:?} is not in the allowed set")]
    InvalidRole { index: usize, role: String },

    #[error("candidate {index}: {words} words exceeds the {limit}-word limit for role '{role}'")]
    WordLimitExceeded {
        index: usize,
        role: String,
        words: usize,
        limit: usize,
    },
}
