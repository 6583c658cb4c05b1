//! Boundary refinement for matched spans.
//!
//! Model quotes tend to drag in surrounding punctuation and filler
//! function words ("of the woman" when the span is "woman"). Refinement
//! trims, in order: edge punctuation, chained leading function words,
//! chained trailing function words, then a final punctuation pass for
//! punctuation exposed by word removal.
//!
//! Safety invariant: a trim step that would leave an empty or inverted
//! range is rejected and the previous boundaries are kept.

/// Filler words stripped from span edges. Fixed table ported from the
/// source policy; do not re-derive.
const FILLER_WORDS: &[&str] = &[
    "of", "with", "in", "on", "at", "by", "from", "to", "for", "a", "an", "the",
];

/// Edge punctuation that is kept: currency, percentages, and closing
/// parens are usually part of the content.
const KEPT_EDGE_CHARS: &[char] = &['$', '%', ')'];

/// Refined boundaries for a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refined {
    pub start: usize,
    pub end: usize,
}

impl Refined {
    /// Whether refinement moved either boundary
    pub fn changed_from(&self, start: usize, end: usize) -> bool {
        self.start != start || self.end != end
    }
}

/// Trim punctuation and filler words from the edges of
/// `source[start..end]`. Offsets must be char-boundary aligned; the
/// result always satisfies `start < end` when the input does.
pub fn refine(source: &str, start: usize, end: usize) -> Refined {
    let (start, end) = trim_edge_punctuation(source, start, end);
    let (start, end) = trim_leading_fillers(source, start, end);
    let (start, end) = trim_trailing_fillers(source, start, end);
    // Word removal can expose punctuation that was previously interior
    let (start, end) = trim_edge_punctuation(source, start, end);

    Refined { start, end }
}

fn is_trimmable(c: char) -> bool {
    !c.is_alphanumeric() && !KEPT_EDGE_CHARS.contains(&c)
}

fn trim_edge_punctuation(source: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    while let Some(c) = source[start..end].chars().next() {
        if !is_trimmable(c) || start + c.len_utf8() >= end {
            break;
        }
        start += c.len_utf8();
    }

    while let Some(c) = source[start..end].chars().next_back() {
        if !is_trimmable(c) || end - c.len_utf8() <= start {
            break;
        }
        end -= c.len_utf8();
    }

    (start, end)
}

/// Strip leading filler words repeatedly ("of the woman" -> "woman")
fn trim_leading_fillers(source: &str, mut start: usize, end: usize) -> (usize, usize) {
    loop {
        let text = &source[start..end];
        let Some(word_end) = text.find(char::is_whitespace) else {
            break;
        };
        let word = &text[..word_end];
        if !FILLER_WORDS.contains(&word.to_ascii_lowercase().as_str()) {
            break;
        }

        // Skip the word plus the whitespace run after it
        let rest = &text[word_end..];
        let skipped = rest.len() - rest.trim_start().len();
        let candidate = start + word_end + skipped;
        if candidate >= end {
            break;
        }
        start = candidate;
    }

    (start, end)
}

/// Symmetric trailing case ("jumps over the" -> "jumps")
fn trim_trailing_fillers(source: &str, start: usize, mut end: usize) -> (usize, usize) {
    loop {
        let text = &source[start..end];
        let Some(word_start) = text.rfind(char::is_whitespace) else {
            break;
        };
        let word = text[word_start..].trim_start();
        if word.is_empty() || !FILLER_WORDS.contains(&word.to_ascii_lowercase().as_str()) {
            break;
        }

        // Drop the word plus the whitespace run before it
        let head = &text[..word_start];
        let candidate = start + head.trim_end().len();
        if candidate <= start {
            break;
        }
        end = candidate;
    }

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refine_str(source: &str) -> &str {
        let refined = refine(source, 0, source.len());
        &source[refined.start..refined.end]
    }

    #[test]
    fn test_trims_edge_punctuation() {
        assert_eq!(refine_str("\"quoted,\""), "quoted");
        assert_eq!(refine_str("(parenthetical)"), "parenthetical)");
        assert_eq!(refine_str("...ellipsis..."), "ellipsis");
    }

    #[test]
    fn test_keeps_currency_and_percent() {
        assert_eq!(refine_str("$100"), "$100");
        assert_eq!(refine_str("50%"), "50%");
    }

    #[test]
    fn test_strips_chained_leading_fillers() {
        assert_eq!(refine_str("of the woman"), "woman");
        assert_eq!(refine_str("in a dark alley"), "dark alley");
    }

    #[test]
    fn test_strips_trailing_fillers() {
        assert_eq!(refine_str("jumps over the"), "jumps over");
        assert_eq!(refine_str("walking to"), "walking");
    }

    #[test]
    fn test_filler_casing_ignored() {
        assert_eq!(refine_str("The woman"), "woman");
    }

    #[test]
    fn test_word_removal_exposes_punctuation() {
        assert_eq!(refine_str("\"of the woman\""), "woman");
    }

    #[test]
    fn test_never_empties_span() {
        // All punctuation: trimming stops before the range empties
        let refined = refine("!!!", 0, 3);
        assert!(refined.start < refined.end);

        // A lone filler word cannot be removed entirely
        assert_eq!(refine_str("the"), "the");
        // The last word survives even when it is itself a filler
        assert_eq!(refine_str("of the"), "the");
    }

    #[test]
    fn test_interior_offsets() {
        let source = "fox jumps, of the woman here";
        let refined = refine(source, 11, 23); // "of the woman"
        assert_eq!(&source[refined.start..refined.end], "woman");
    }

    #[test]
    fn test_clean_span_untouched() {
        let source = "the quick brown fox";
        let refined = refine(source, 10, 19); // "brown fox"
        assert!(!refined.changed_from(10, 19));
    }
}
