//! The span validation pipeline.
//!
//! Phases run in a fixed order with no retry or backtracking:
//!
//! ```text
//! Received -> Phase1 -> Sorted -> Merged -> Deduped -> OverlapResolved
//!          -> HeaderFiltered -> ConfidenceFiltered -> Truncated -> Done
//! ```
//!
//! `attempt` (1 = strict, >1 = lenient) only controls whether Phase 1
//! defects abort the run or drop the offending candidate; every later
//! phase is a total function over already-validated spans and can only
//! add notes. The pipeline never self-retries; callers re-invoke with
//! `attempt = 2` when a lenient pass is wanted.

pub mod correct;
pub mod dedupe;
pub mod filters;
pub mod merge;
pub mod overlap;
pub mod refine;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CandidateSpan, ValidatedSpan};
use crate::policy::{ProcessingOptions, ValidationPolicy};

/// Outcome of one pipeline invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// True when no hard errors were recorded
    pub ok: bool,

    /// Hard errors (strict mode only; complete, not first-only)
    pub errors: Vec<String>,

    /// Final validated span set, start-ordered
    pub spans: Vec<ValidatedSpan>,

    /// Diagnostic notes, newline-joined in the order they were recorded
    pub diagnostics: String,
}

/// Validate, correct, and reduce a candidate span set against a source
/// text.
///
/// This is the single entry point. It is pure and synchronous: identical
/// input always produces byte-identical output, including span IDs.
/// Malformed input never panics; every defect is representable in the
/// result.
pub fn validate_spans(
    candidates: &[CandidateSpan],
    source_text: &str,
    policy: &ValidationPolicy,
    options: &ProcessingOptions,
    attempt: u32,
) -> PipelineResult {
    let lenient = attempt > 1;
    debug!(
        candidates = candidates.len(),
        source_bytes = source_text.len(),
        lenient,
        template_version = %options.template_version,
        "validating spans"
    );

    let phase1 = correct::normalize_and_correct(candidates, source_text, policy, lenient);
    let mut notes = phase1.notes;

    if !phase1.errors.is_empty() {
        // Strict failure: report the complete defect set and no partial
        // span set for the caller to act on
        return PipelineResult {
            ok: false,
            errors: phase1.errors.iter().map(|e| e.to_string()).collect(),
            spans: Vec::new(),
            diagnostics: notes.join("\n"),
        };
    }

    let mut spans = phase1.spans;
    spans.sort_by_key(|s| (s.start, s.end));
    debug!(spans = spans.len(), "phase 1 complete");

    let (spans, merge_notes) = merge::merge_adjacent(spans, source_text);
    notes.extend(merge_notes);
    debug!(spans = spans.len(), "merged adjacent spans");

    let (spans, dedupe_notes) = dedupe::dedupe(spans);
    notes.extend(dedupe_notes);
    debug!(spans = spans.len(), "deduplicated");

    let (spans, overlap_notes) = overlap::resolve_overlaps(spans, policy.allow_overlap);
    notes.extend(overlap_notes);
    debug!(spans = spans.len(), "resolved overlaps");

    let (spans, header_notes) = filters::filter_headers(spans);
    notes.extend(header_notes);

    let (spans, confidence_notes) = filters::filter_confidence(spans, options.min_confidence);
    notes.extend(confidence_notes);

    let (spans, truncate_notes) = filters::truncate(spans, options);
    notes.extend(truncate_notes);
    debug!(spans = spans.len(), "filtering complete");

    PipelineResult {
        ok: true,
        errors: Vec::new(),
        spans,
        diagnostics: notes.join("\n"),
    }
}
