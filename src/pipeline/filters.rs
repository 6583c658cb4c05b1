//! Final filtering passes: structural headers, confidence floor, and
//! the span cap.

use crate::domain::ValidatedSpan;
use crate::policy::ProcessingOptions;

/// Drop spans whose text is a structural marker rather than content
pub fn filter_headers(spans: Vec<ValidatedSpan>) -> (Vec<ValidatedSpan>, Vec<String>) {
    let mut notes = Vec::new();
    let kept = spans
        .into_iter()
        .filter(|span| {
            if is_structural_header(&span.text) {
                notes.push(format!(
                    "dropped header: [{}, {}) {:?}",
                    span.start, span.end, span.text
                ));
                false
            } else {
                true
            }
        })
        .collect();

    (kept, notes)
}

/// Drop spans below the confidence floor
pub fn filter_confidence(
    spans: Vec<ValidatedSpan>,
    min_confidence: f64,
) -> (Vec<ValidatedSpan>, Vec<String>) {
    let mut notes = Vec::new();
    let kept = spans
        .into_iter()
        .filter(|span| {
            if span.confidence < min_confidence {
                notes.push(format!(
                    "dropped low-confidence: [{}, {}) {} ({} < {})",
                    span.start, span.end, span.role, span.confidence, min_confidence
                ));
                false
            } else {
                true
            }
        })
        .collect();

    (kept, notes)
}

/// Keep the first `max_spans` by the established start order
pub fn truncate(
    mut spans: Vec<ValidatedSpan>,
    options: &ProcessingOptions,
) -> (Vec<ValidatedSpan>, Vec<String>) {
    if spans.len() <= options.max_spans {
        return (spans, Vec::new());
    }

    let dropped = spans.len() - options.max_spans;
    spans.truncate(options.max_spans);
    let notes = vec![format!(
        "truncated: dropped {dropped} spans over the {} cap",
        options.max_spans
    )];

    (spans, notes)
}

/// Structural markers: markdown headers, short trailing-colon labels,
/// and short all-caps labels. Checked by hand; these patterns are too
/// simple to warrant a regex.
fn is_structural_header(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    if text.starts_with('#') {
        return true;
    }

    let words = text.split_whitespace().count();
    if text.ends_with(':') && words <= 3 {
        return true;
    }

    // Short all-caps label like "SCENE ONE" or "INT."
    let has_alpha = text.chars().any(|c| c.is_alphabetic());
    let has_lower = text.chars().any(|c| c.is_lowercase());
    has_alpha && !has_lower && words <= 3 && text.len() <= 32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn span(source: &str, start: usize, end: usize, confidence: f64) -> ValidatedSpan {
        ValidatedSpan::from_resolved(source, Role::Subject, start, end, confidence)
    }

    #[test]
    fn test_header_detection() {
        assert!(is_structural_header("# Scene"));
        assert!(is_structural_header("LIGHTING:"));
        assert!(is_structural_header("SCENE ONE"));
        assert!(is_structural_header("INT."));

        assert!(!is_structural_header("a woman in a red coat"));
        assert!(!is_structural_header("FBI agent runs"));
        // Long all-caps sentences are content, not labels
        assert!(!is_structural_header("THE QUICK BROWN FOX JUMPS OVER"));
    }

    #[test]
    fn test_filter_headers() {
        let source = "SCENE ONE a woman walks";
        let spans = vec![span(source, 0, 9, 0.9), span(source, 10, 23, 0.9)];
        let (kept, notes) = filter_headers(spans);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "a woman walks");
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_filter_confidence() {
        let source = "one two three";
        let spans = vec![span(source, 0, 3, 0.2), span(source, 4, 7, 0.8)];
        let (kept, notes) = filter_confidence(spans, 0.5);

        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.8).abs() < f64::EPSILON);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_confidence_floor_is_inclusive() {
        let source = "one two";
        let spans = vec![span(source, 0, 3, 0.5)];
        let (kept, _) = filter_confidence(spans, 0.5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_truncate_keeps_earliest() {
        let source = "aa bb cc dd ee";
        let spans: Vec<_> = (0..5).map(|i| span(source, i * 3, i * 3 + 2, 0.9)).collect();
        let options = ProcessingOptions {
            max_spans: 3,
            ..Default::default()
        };
        let (kept, notes) = truncate(spans, &options);

        assert_eq!(kept.len(), 3);
        assert_eq!(kept.last().unwrap().start, 6);
        assert_eq!(notes, vec!["truncated: dropped 2 spans over the 3 cap"]);
    }

    #[test]
    fn test_truncate_under_cap_no_note() {
        let source = "aa bb";
        let spans = vec![span(source, 0, 2, 0.9)];
        let (kept, notes) = truncate(spans, &ProcessingOptions::default());
        assert_eq!(kept.len(), 1);
        assert!(notes.is_empty());
    }
}
