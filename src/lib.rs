//! spanlint - validation and correction for LLM-produced text spans
//!
//! A language model tags fragments of a known source text with roles
//! (subject, action, lighting, ...). That output is untrusted: quoted
//! text may not appear verbatim, offsets may be wrong or missing,
//! labels may be malformed, and several fragments may describe the
//! same region. This crate turns such a candidate set into a
//! validated, corrected, non-overlapping, deduplicated, size-bounded
//! span set with an auditable diagnostic trail.
//!
//! # Architecture
//!
//! The pipeline is a fixed sequence of pure phases:
//! per-candidate correction (position recovery, boundary refinement,
//! role and word-limit validation), then position sort, adjacent-span
//! merge, deduplication, overlap resolution, header/confidence
//! filtering, and truncation to the span cap.
//!
//! Two operating modes: strict (`attempt == 1`) turns any Phase 1
//! defect into a hard error; lenient (`attempt > 1`) drops the
//! offending candidate with a note. Callers wanting a lenient retry
//! re-invoke the whole pipeline; it never retries itself.
//!
//! # Modules
//!
//! - `domain`: span and role types
//! - `matcher`: position recovery for approximately-quoted text
//! - `pipeline`: the phases and the driver
//! - `policy`: validation policy and processing options
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```
//! use spanlint::{validate_spans, CandidateSpan, ProcessingOptions, ValidationPolicy};
//!
//! let source = "the quick brown fox jumps";
//! let candidates = vec![CandidateSpan {
//!     text: "fox".to_string(),
//!     role: "subject".to_string(),
//!     ..Default::default()
//! }];
//!
//! let result = validate_spans(
//!     &candidates,
//!     source,
//!     &ValidationPolicy::default(),
//!     &ProcessingOptions::default(),
//!     1,
//! );
//! assert!(result.ok);
//! assert_eq!(result.spans[0].text, "fox");
//! ```

pub mod cli;
pub mod domain;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod policy;

// Re-export main types at crate root for convenience
pub use domain::{CandidateSpan, Role, RoleFamily, ValidatedSpan};
pub use error::SpanDefect;
pub use matcher::{MatchOutcome, MatchStage, PositionMatcher};
pub use pipeline::{validate_spans, PipelineResult};
pub use policy::{ProcessingOptions, ValidationPolicy};
