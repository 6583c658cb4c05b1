//! Phase 1: per-candidate normalization and correction.
//!
//! Each candidate runs through the same sequence: text presence check,
//! position recovery (claiming the resolved range), boundary
//! refinement, role validation, confidence assignment, word-limit
//! check. Defects are hard errors in strict mode and drops-with-note in
//! lenient mode; auto-corrections are mode-independent and always
//! recorded as notes.
//!
//! Processing continues past failing candidates in both modes, so one
//! run reports the complete defect set rather than just the first.

use tracing::warn;

use crate::domain::{CandidateSpan, Role, ValidatedSpan};
use crate::error::SpanDefect;
use crate::matcher::{MatchStage, PositionMatcher};
use crate::policy::ValidationPolicy;

use super::refine;

/// Result of Phase 1 over all candidates
#[derive(Debug, Default)]
pub struct Phase1Output {
    /// Sanitized spans, in candidate order
    pub spans: Vec<ValidatedSpan>,
    /// Hard errors (strict mode only)
    pub errors: Vec<SpanDefect>,
    /// Auto-correction and drop notes
    pub notes: Vec<String>,
}

impl Phase1Output {
    /// Record a defect: error in strict mode, drop note in lenient
    fn defect(&mut self, defect: SpanDefect, lenient: bool) {
        if lenient {
            warn!(%defect, "dropping candidate");
            self.notes.push(format!("dropped candidate: {defect}"));
        } else {
            self.errors.push(defect);
        }
    }
}

/// Run Phase 1 over every candidate
pub fn normalize_and_correct(
    candidates: &[CandidateSpan],
    source: &str,
    policy: &ValidationPolicy,
    lenient: bool,
) -> Phase1Output {
    let mut output = Phase1Output::default();
    let mut matcher = PositionMatcher::new(source);

    for (index, candidate) in candidates.iter().enumerate() {
        match correct_one(index, candidate, source, policy, &mut matcher, &mut output.notes) {
            Ok(span) => output.spans.push(span),
            Err(defect) => output.defect(defect, lenient),
        }
    }

    output
}

/// Correct and validate a single candidate
fn correct_one(
    index: usize,
    candidate: &CandidateSpan,
    source: &str,
    policy: &ValidationPolicy,
    matcher: &mut PositionMatcher<'_>,
    notes: &mut Vec<String>,
) -> Result<ValidatedSpan, SpanDefect> {
    let text = candidate.text.trim();
    if text.is_empty() {
        return Err(SpanDefect::MissingText { index });
    }

    // Recover exact offsets; the hint steers occurrence choice only
    let outcome = matcher
        .find_best_match(text, candidate.start)
        .ok_or_else(|| SpanDefect::UnmatchedText {
            index,
            text: text.to_string(),
        })?;
    matcher.claim(outcome.start, outcome.end);

    if outcome.stage != MatchStage::Exact {
        notes.push(format!(
            "offset corrected: candidate {index} matched via {} search at [{}, {})",
            outcome.stage.as_str(),
            outcome.start,
            outcome.end
        ));
    } else if hint_disagrees(candidate, outcome.start, outcome.end) {
        notes.push(format!(
            "offset corrected: candidate {index} moved from hint {:?} to [{}, {})",
            (candidate.start, candidate.end),
            outcome.start,
            outcome.end
        ));
    }

    let refined = refine::refine(source, outcome.start, outcome.end);
    if refined.changed_from(outcome.start, outcome.end) {
        notes.push(format!(
            "trimmed boundary: candidate {index} [{}, {}) -> [{}, {})",
            outcome.start, outcome.end, refined.start, refined.end
        ));
    }

    let role = Role::from_name(&candidate.role)
        .filter(|r| policy.allows_role(*r))
        .ok_or_else(|| SpanDefect::InvalidRole {
            index,
            role: candidate.role.clone(),
        })?;

    let confidence = match candidate.confidence {
        Some(c) if (0.0..=1.0).contains(&c) => c,
        Some(c) => {
            notes.push(format!(
                "confidence {c} out of range for candidate {index}, using default {}",
                policy.default_confidence
            ));
            policy.default_confidence
        }
        None => policy.default_confidence,
    };

    let span = ValidatedSpan::from_resolved(source, role, refined.start, refined.end, confidence);

    if let Some(limit) = policy.word_limit_for(role) {
        let words = span.word_count();
        if words > limit {
            return Err(SpanDefect::WordLimitExceeded {
                index,
                role: role.as_str().to_string(),
                words,
                limit,
            });
        }
    }

    Ok(span)
}

/// Whether the candidate carried offset hints that disagree with the
/// resolved range
fn hint_disagrees(candidate: &CandidateSpan, start: usize, end: usize) -> bool {
    match (candidate.start, candidate.end) {
        (None, None) => false,
        (s, e) => s.is_some_and(|s| s != start) || e.is_some_and(|e| e != end),
    }
}
