//! Position recovery for approximately-quoted text.
//!
//! The model quotes fragments of the source text, but the quotes are
//! untrusted: offsets may be wrong or absent, and the text may carry
//! cosmetic formatting noise. The matcher recovers exact byte offsets
//! through a graduated fallback:
//!
//! 1. **Exact**: all verbatim occurrences; pick the one closest to the
//!    claimed start, preferring occurrences no other candidate has
//!    already claimed.
//! 2. **Normalized**: strip quote/emphasis characters and collapse
//!    whitespace, then retry the exact search.
//! 3. **Case-insensitive**: last resort scan for the normalized
//!    fragment, first occurrence wins.
//!
//! All offsets are UTF-8 byte indices, half-open. The matcher and its
//! claim set live for exactly one pipeline invocation.

use std::collections::HashSet;

/// Which fallback stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// Verbatim occurrence of the fragment
    Exact,
    /// Exact occurrence after stripping formatting noise
    Normalized,
    /// Case-insensitive occurrence of the normalized fragment
    CaseInsensitive,
}

impl MatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStage::Exact => "exact",
            MatchStage::Normalized => "normalized",
            MatchStage::CaseInsensitive => "case_insensitive",
        }
    }
}

/// A resolved occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Start byte offset in the source
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Stage that found it
    pub stage: MatchStage,
}

/// Per-invocation matcher over one source text.
///
/// Tracks which ranges have already been handed out so that two
/// candidates quoting the same repeated text resolve to different
/// occurrences.
#[derive(Debug)]
pub struct PositionMatcher<'a> {
    source: &'a str,
    claimed: HashSet<(usize, usize)>,
}

impl<'a> PositionMatcher<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            claimed: HashSet::new(),
        }
    }

    /// All exact occurrences of `fragment`, in source order
    pub fn find_all_matches(&self, fragment: &str) -> Vec<(usize, usize)> {
        find_exact_matches(self.source, fragment)
    }

    /// Best occurrence of `fragment`, via the three-stage fallback.
    ///
    /// Returns `None` only when no stage finds anything. Does not claim
    /// the range; callers claim after deciding to keep the span.
    pub fn find_best_match(&self, fragment: &str, preferred_start: Option<usize>) -> Option<MatchOutcome> {
        // Stage 1: verbatim
        let exact = self.find_all_matches(fragment);
        if let Some((start, end)) = self.select_occurrence(&exact, preferred_start) {
            return Some(MatchOutcome {
                start,
                end,
                stage: MatchStage::Exact,
            });
        }

        // Stage 2: strip formatting noise, retry exact
        let normalized = normalize_fragment(fragment);
        if !normalized.is_empty() && normalized != fragment {
            let matches = find_exact_matches(self.source, &normalized);
            if let Some((start, end)) = self.select_occurrence(&matches, preferred_start) {
                tracing::debug!(fragment, "matched via normalized fallback");
                return Some(MatchOutcome {
                    start,
                    end,
                    stage: MatchStage::Normalized,
                });
            }
        }

        // Stage 3: case-insensitive, first occurrence
        if !normalized.is_empty() {
            if let Some((start, end)) = find_case_insensitive(self.source, &normalized) {
                tracing::debug!(fragment, "matched via case-insensitive fallback");
                return Some(MatchOutcome {
                    start,
                    end,
                    stage: MatchStage::CaseInsensitive,
                });
            }
        }

        None
    }

    /// Record that a range has been assigned to a span
    pub fn claim(&mut self, start: usize, end: usize) {
        self.claimed.insert((start, end));
    }

    /// Whether a range has already been assigned
    pub fn is_claimed(&self, start: usize, end: usize) -> bool {
        self.claimed.contains(&(start, end))
    }

    /// Pick one occurrence: unclaimed beats claimed, then closest to the
    /// hint, then earliest.
    fn select_occurrence(
        &self,
        occurrences: &[(usize, usize)],
        preferred_start: Option<usize>,
    ) -> Option<(usize, usize)> {
        if occurrences.is_empty() {
            return None;
        }

        let unclaimed: Vec<(usize, usize)> = occurrences
            .iter()
            .copied()
            .filter(|&(s, e)| !self.is_claimed(s, e))
            .collect();
        let pool = if unclaimed.is_empty() {
            occurrences
        } else {
            &unclaimed[..]
        };

        match preferred_start {
            Some(hint) => pool
                .iter()
                .copied()
                .min_by_key(|&(s, _)| (s.abs_diff(hint), s)),
            None => pool.first().copied(),
        }
    }
}

/// All exact occurrences of `fragment` in `source`, including
/// overlapping ones. Empty fragments never match.
pub fn find_exact_matches(source: &str, fragment: &str) -> Vec<(usize, usize)> {
    if fragment.is_empty() || fragment.len() > source.len() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    let mut from = 0;
    while let Some(pos) = source[from..].find(fragment) {
        let start = from + pos;
        matches.push((start, start + fragment.len()));
        // Step one char so overlapping occurrences are found too
        from = start + source[start..].chars().next().map_or(1, |c| c.len_utf8());
        if from > source.len() {
            break;
        }
    }

    matches
}

/// Strip formatting noise the model commonly adds around quotes:
/// quote characters and emphasis markers, then whitespace runs
/// collapsed to single spaces and trimmed.
pub fn normalize_fragment(fragment: &str) -> String {
    let stripped: String = fragment
        .chars()
        .filter(|c| !is_formatting_noise(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_formatting_noise(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '`' | '*' | '_' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{00AB}' | '\u{00BB}'
    )
}

/// First case-insensitive occurrence of `needle` in `source`.
///
/// Walks char boundaries and compares via full Unicode lowercasing, so
/// the returned offsets are always valid slice bounds on `source`.
fn find_case_insensitive(source: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    'outer: for (start, _) in source.char_indices() {
        let mut pos = start;
        for nc in needle.chars() {
            let sc = match source[pos..].chars().next() {
                Some(c) => c,
                None => break 'outer,
            };
            if !chars_eq_ignore_case(sc, nc) {
                continue 'outer;
            }
            pos += sc.len_utf8();
        }
        return Some((start, pos));
    }

    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
