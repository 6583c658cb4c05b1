//! Adjacent-span merging.
//!
//! Models frequently fragment one semantic unit into several adjacent
//! partial tags ("a woman" + "in a red coat"). Two position-sorted
//! spans merge when the gap between them is empty or whitespace-only
//! and their roles belong to the same family. The merged span covers
//! the union range, keeps the first span's role and the higher of the
//! two confidences, and gets a freshly derived ID.

use crate::domain::ValidatedSpan;

/// Merge adjacent compatible spans. Input must be sorted by start.
pub fn merge_adjacent(spans: Vec<ValidatedSpan>, source: &str) -> (Vec<ValidatedSpan>, Vec<String>) {
    let mut notes = Vec::new();
    let mut merged: Vec<ValidatedSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        if merged.last().is_some_and(|last| can_merge(last, &span, source)) {
            if let Some(last) = merged.pop() {
                notes.push(format!(
                    "merged: [{}, {}) {} + [{}, {}) {}",
                    last.start, last.end, last.role, span.start, span.end, span.role
                ));
                let confidence = last.confidence.max(span.confidence);
                merged.push(ValidatedSpan::from_resolved(
                    source,
                    last.role,
                    last.start,
                    span.end.max(last.end),
                    confidence,
                ));
            }
        } else {
            merged.push(span);
        }
    }

    (merged, notes)
}

/// Adjacent and compatible: whitespace-only gap, same role family
fn can_merge(left: &ValidatedSpan, right: &ValidatedSpan, source: &str) -> bool {
    if right.start < left.end {
        return false; // overlapping, resolved later
    }
    if left.role.family() != right.role.family() {
        return false;
    }

    source[left.end..right.start].chars().all(char::is_whitespace)
}
