//! Core data structures: roles and spans.

pub mod role;
pub mod span;

pub use role::{Role, RoleFamily};
pub use span::{compute_span_id, CandidateSpan, ValidatedSpan};
