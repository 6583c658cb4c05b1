//! Duplicate removal.
//!
//! A span duplicates another when their ranges are identical, or when
//! one range is fully contained in the other and both roles share a
//! family. The higher-confidence span wins; ties keep the
//! earlier-encountered one, so the pass is stable.

use crate::domain::ValidatedSpan;

/// Remove exact and subsumed duplicates. Input must be sorted by start;
/// output stays sorted.
pub fn dedupe(spans: Vec<ValidatedSpan>) -> (Vec<ValidatedSpan>, Vec<String>) {
    let mut notes = Vec::new();
    let mut kept: Vec<ValidatedSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        match kept.iter().position(|k| is_duplicate(k, &span)) {
            Some(i) if span.confidence > kept[i].confidence => {
                notes.push(format!(
                    "dropped duplicate: [{}, {}) {} (kept higher-confidence [{}, {}) {})",
                    kept[i].start, kept[i].end, kept[i].role, span.start, span.end, span.role
                ));
                kept[i] = span;
            }
            Some(i) => {
                notes.push(format!(
                    "dropped duplicate: [{}, {}) {} (kept [{}, {}) {})",
                    span.start, span.end, span.role, kept[i].start, kept[i].end, kept[i].role
                ));
            }
            None => kept.push(span),
        }
    }

    // Replacement can disturb start order when a container lost to a
    // nested span
    kept.sort_by_key(|s| (s.start, s.end));

    (kept, notes)
}

fn is_duplicate(a: &ValidatedSpan, b: &ValidatedSpan) -> bool {
    if a.start == b.start && a.end == b.end {
        return true;
    }
    (b.is_contained_in(a) || a.is_contained_in(b)) && a.role.family() == b.role.family()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    const SOURCE: &str = "the quick brown fox jumps over the lazy dog";

    fn span(role: Role, start: usize, end: usize, confidence: f64) -> ValidatedSpan {
        ValidatedSpan::from_resolved(SOURCE, role, start, end, confidence)
    }

    #[test]
    fn test_identical_range_keeps_higher_confidence() {
        let spans = vec![
            span(Role::Subject, 16, 19, 0.4),
            span(Role::Subject, 16, 19, 0.8),
        ];
        let (kept, notes) = dedupe(spans);

        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.8).abs() < f64::EPSILON);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_identical_range_tie_keeps_first() {
        let first = span(Role::Subject, 16, 19, 0.5);
        let second = span(Role::Action, 16, 19, 0.5);
        let (kept, _) = dedupe(vec![first.clone(), second]);

        assert_eq!(kept, vec![first]);
    }

    #[test]
    fn test_nested_same_family_dropped() {
        let spans = vec![
            span(Role::Subject, 10, 19, 0.7), // "brown fox"
            span(Role::Subject, 16, 19, 0.5), // "fox"
        ];
        let (kept, _) = dedupe(spans);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].start, 10);
    }

    #[test]
    fn test_nested_higher_confidence_displaces_container() {
        let spans = vec![
            span(Role::Subject, 10, 19, 0.5),
            span(Role::Subject, 16, 19, 0.9),
        ];
        let (kept, _) = dedupe(spans);

        assert_eq!(kept.len(), 1);
        assert_eq!((kept[0].start, kept[0].end), (16, 19));
    }

    #[test]
    fn test_nested_different_family_kept() {
        let spans = vec![
            span(Role::Subject, 10, 19, 0.5),
            span(Role::Lighting, 16, 19, 0.5),
        ];
        let (kept, _) = dedupe(spans);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_partial_overlap_not_deduped() {
        let spans = vec![
            span(Role::Subject, 10, 19, 0.5),
            span(Role::Subject, 16, 25, 0.5),
        ];
        let (kept, _) = dedupe(spans);
        assert_eq!(kept.len(), 2);
    }
}
