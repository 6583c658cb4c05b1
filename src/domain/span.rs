//! Candidate and validated span types.
//!
//! `CandidateSpan` is untrusted model output: the text may not appear
//! verbatim in the source, offsets are hints at best, and the role label
//! may be malformed. `ValidatedSpan` is the pipeline's output and carries
//! the core guarantee that `text` is the exact source slice at
//! `[start, end)`.
//!
//! All offsets are UTF-8 byte indices into the source text, half-open.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::role::Role;

/// A raw span as produced by the model. Nothing here is trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateSpan {
    /// Fragment text, supposedly quoted from the source
    #[serde(default)]
    pub text: String,

    /// Role label, validated downstream against the policy
    #[serde(default)]
    pub role: String,

    /// Claimed start offset (hint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    /// Claimed end offset (hint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,

    /// Claimed confidence (hint only; out-of-range values are replaced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A corrected, validated span anchored to exact source offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedSpan {
    /// Deterministic identifier derived from (role, start, end)
    pub id: String,

    /// Exact source slice at [start, end)
    pub text: String,

    /// Validated role from the policy's closed set
    pub role: Role,

    /// UTF-8 byte offset of the span start
    pub start: usize,

    /// UTF-8 byte offset one past the span end
    pub end: usize,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl ValidatedSpan {
    /// Build a span from resolved offsets, slicing the text from source.
    ///
    /// Caller must pass char-boundary-aligned offsets with
    /// `start < end <= source.len()`; the matcher and refiner only ever
    /// produce such offsets.
    pub fn from_resolved(source: &str, role: Role, start: usize, end: usize, confidence: f64) -> Self {
        Self {
            id: compute_span_id(role, start, end),
            text: source[start..end].to_string(),
            role,
            start,
            end,
            confidence,
        }
    }

    /// Byte length of the covered range
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether this span's range intersects another's
    pub fn overlaps(&self, other: &ValidatedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span's range lies fully inside another's
    pub fn is_contained_in(&self, other: &ValidatedSpan) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of whitespace-separated words in the span text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Compute a deterministic span ID from (role, start, end).
///
/// sha256 over the three fields, first 8 bytes as hex (16 chars).
/// Identical input always yields the identical ID, which makes whole
/// pipeline runs idempotent.
pub fn compute_span_id(role: Role, start: usize, end: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(role.as_str().as_bytes());
    hasher.update(start.to_string().as_bytes());
    hasher.update(end.to_string().as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_id_deterministic() {
        let id1 = compute_span_id(Role::Subject, 10, 20);
        let id2 = compute_span_id(Role::Subject, 10, 20);
        assert_eq!(id1, id2);
        assert_eq!(id1.len(), 16);
    }

    #[test]
    fn test_span_id_varies_with_input() {
        let base = compute_span_id(Role::Subject, 10, 20);
        assert_ne!(base, compute_span_id(Role::Action, 10, 20));
        assert_ne!(base, compute_span_id(Role::Subject, 11, 20));
        assert_ne!(base, compute_span_id(Role::Subject, 10, 21));
    }

    #[test]
    fn test_from_resolved_slices_source() {
        let source = "the quick brown fox";
        let span = ValidatedSpan::from_resolved(source, Role::Subject, 16, 19, 0.9);
        assert_eq!(span.text, "fox");
        assert_eq!(&source[span.start..span.end], span.text);
    }

    #[test]
    fn test_overlap_and_containment() {
        let source = "abcdefghij";
        let a = ValidatedSpan::from_resolved(source, Role::Subject, 0, 5, 0.5);
        let b = ValidatedSpan::from_resolved(source, Role::Action, 3, 8, 0.5);
        let c = ValidatedSpan::from_resolved(source, Role::Subject, 1, 4, 0.5);
        let d = ValidatedSpan::from_resolved(source, Role::Subject, 5, 10, 0.5);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&d));
        assert!(c.is_contained_in(&a));
        assert!(!a.is_contained_in(&c));
    }

    #[test]
    fn test_candidate_deserializes_with_missing_fields() {
        let candidate: CandidateSpan = serde_json::from_str(r#"{"text":"fox","role":"subject"}"#).unwrap();
        assert_eq!(candidate.text, "fox");
        assert_eq!(candidate.start, None);
        assert_eq!(candidate.confidence, None);
    }
}
