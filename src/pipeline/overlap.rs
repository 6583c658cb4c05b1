//! Overlap resolution.
//!
//! When the policy forbids overlap, partially overlapping spans are
//! reconciled in a single left-to-right sweep: the higher-confidence
//! span wins, ties go to the larger covered range. Identical and nested
//! ranges have already been handled by deduplication.

use crate::domain::ValidatedSpan;

/// Enforce the non-overlap policy. Input must be sorted by start; the
/// output is a start-ordered, strictly non-overlapping sequence unless
/// `allow_overlap` is set.
pub fn resolve_overlaps(
    spans: Vec<ValidatedSpan>,
    allow_overlap: bool,
) -> (Vec<ValidatedSpan>, Vec<String>) {
    if allow_overlap {
        return (spans, Vec::new());
    }

    let mut notes = Vec::new();
    let mut kept: Vec<ValidatedSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        let mut challenger = Some(span);

        // A winning challenger can expose an overlap with the span
        // before the one it displaced, so resolve repeatedly.
        while let Some(span) = challenger.as_ref() {
            let Some(last) = kept.last() else { break };
            if !span.overlaps(last) {
                break;
            }

            if wins_over(span, last) {
                if let Some(loser) = kept.pop() {
                    notes.push(overlap_note(&loser, span));
                }
            } else {
                let note = overlap_note(span, last);
                notes.push(note);
                challenger = None;
            }
        }

        if let Some(span) = challenger {
            kept.push(span);
        }
    }

    (kept, notes)
}

/// Higher confidence wins; ties go to the larger covered range
fn wins_over(challenger: &ValidatedSpan, incumbent: &ValidatedSpan) -> bool {
    if challenger.confidence != incumbent.confidence {
        return challenger.confidence > incumbent.confidence;
    }
    challenger.len() > incumbent.len()
}

fn overlap_note(dropped: &ValidatedSpan, kept: &ValidatedSpan) -> String {
    format!(
        "dropped overlap: [{}, {}) {} (kept [{}, {}) {})",
        dropped.start, dropped.end, dropped.role, kept.start, kept.end, kept.role
    )
}
