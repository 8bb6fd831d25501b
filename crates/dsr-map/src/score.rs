//! Title normalization and keyword-overlap scoring.

/// Lowercase, strip everything but alphanumerics and spaces, collapse
/// whitespace. Both mapper title comparisons go through this.
#[must_use]
pub fn normalize_title(s: &str) -> String {
    let lowered: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fraction of words in common between two normalized titles:
/// `|words(a) ∩ words(b)| / min(|words(a)|, |words(b)|)`.
#[must_use]
pub fn keyword_overlap(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;

    let words_a: BTreeSet<String> = normalize_title(a).split_whitespace().map(String::from).collect();
    let words_b: BTreeSet<String> = normalize_title(b).split_whitespace().map(String::from).collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / words_a.len().min(words_b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_punctuation_and_case() {
        assert_eq!(normalize_title("  Adverse  Events: (Overview)! "), "adverse events overview");
    }

    #[test]
    fn overlap_is_symmetric_over_word_sets() {
        let a = keyword_overlap("Adverse Event Overview", "Overview of Adverse Events");
        let b = keyword_overlap("Overview of Adverse Events", "Adverse Event Overview");
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_titles_score_zero() {
        assert_eq!(keyword_overlap("Pharmacokinetics", "Literature Review"), 0.0);
        assert_eq!(keyword_overlap("", "anything"), 0.0);
    }

    #[test]
    fn identical_titles_score_one() {
        assert!((keyword_overlap("Safety Summary", "Safety Summary") - 1.0).abs() < f64::EPSILON);
    }
}
