//! Suggestion extraction from free-form model output.
//!
//! An assessment is scanned line by line. A line becomes a suggestion when it
//! mentions one of the advisory keywords and is long enough to carry an actual
//! recommendation once trimmed.

/// Advisory keywords, matched case-insensitively as substrings.
pub const SUGGESTION_KEYWORDS: &[&str] = &["suggest", "recommend", "consider", "improve", "add", "remove", "change"];

/// Maximum number of suggestions kept per assessment.
pub const MAX_SUGGESTIONS: usize = 10;

/// Trimmed lines must be longer than this many characters.
const MIN_SUGGESTION_CHARS: usize = 20;

/// Returns up to [`MAX_SUGGESTIONS`] trimmed lines of `assessment` that
/// contain an advisory keyword, in their original order.
///
/// # Example
///
/// ```rust
/// use doclens_core::extract_suggestions;
///
/// let text = "Short.\nYou should consider adding more examples here please.\nNothing relevant in this one line at all nope.";
/// assert_eq!(
///     extract_suggestions(text),
///     vec!["You should consider adding more examples here please."]
/// );
/// ```
pub fn extract_suggestions(assessment: &str) -> Vec<String> {
    assessment
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_SUGGESTION_CHARS && has_keyword(line))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

fn has_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    SUGGESTION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_keeps_only_long_keyword_lines() {
        let text = "Short.\nYou should consider adding more examples here please.\nNothing relevant in this one line at all nope.";
        assert_eq!(
            extract_suggestions(text),
            vec!["You should consider adding more examples here please."]
        );
    }

    #[rstest]
    #[case::suggest("We SUGGEST splitting the long section.")]
    #[case::recommend("- Recommended: define every acronym.")]
    #[case::improve("Headings could improve scannability.")]
    #[case::remove("1. Remove the duplicated warning box.")]
    #[case::change("Change passive voice to active voice.")]
    #[case::substring("A troubleshooting section is missing, address it.")]
    fn test_keyword_variants(#[case] line: &str) {
        assert_eq!(extract_suggestions(line), vec![line.to_string()]);
    }

    #[test]
    fn test_length_is_measured_after_trim() {
        let padded = "          add more text          ";
        assert!(extract_suggestions(padded).is_empty());

        let exactly_twenty = "add examples, please";
        assert_eq!(exactly_twenty.len(), 20);
        assert!(extract_suggestions(exactly_twenty).is_empty());

        let twenty_one = "  add examples, please!  ";
        assert_eq!(extract_suggestions(twenty_one), vec!["add examples, please!"]);
    }

    #[test]
    fn test_caps_at_ten_in_order() {
        let text: String = (0..15).map(|i| format!("Consider rewriting paragraph number {}\n", i)).collect();
        let suggestions = extract_suggestions(&text);

        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Consider rewriting paragraph number 0");
        assert_eq!(suggestions[9], "Consider rewriting paragraph number 9");
    }

    #[test]
    fn test_handles_crlf_and_empty_input() {
        assert!(extract_suggestions("").is_empty());
        let text = "Intro line without keywords at all\r\nPlease recommend a glossary for terms\r\n";
        assert_eq!(extract_suggestions(text), vec!["Please recommend a glossary for terms"]);
    }

    #[test]
    fn test_failure_placeholder_yields_nothing() {
        let placeholder = "Style analysis failed: request failed: connection refused";
        assert!(extract_suggestions(placeholder).is_empty());
    }
}
