//! Reading-difficulty statistics.
//!
//! Implements the Flesch-Kincaid grade level and the Gunning fog index over
//! plain text:
//!
//! ```text
//! FK grade = 0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59
//! Fog      = 0.4 * ((words / sentences) + 100 * (complex words / words))
//! ```
//!
//! Syllables are estimated by counting vowel groups, with the usual
//! corrections for silent endings. A complex word has three or more syllables
//! once an `-es`, `-ed`, or `-ing` ending is removed; hyphenated compounds are
//! never complex. Grades are rounded to one decimal place and fog scores to
//! two.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[^.!?]+[.!?]*").expect("sentence pattern is valid"));

/// Sentences of this many words or fewer are not counted.
const MIN_SENTENCE_WORDS: usize = 2;

/// Raw counts behind the readability formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    pub complex_words: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<String> = tokenize(text).collect();
        if words.is_empty() {
            return Self::default();
        }

        let syllables = words.iter().map(|w| count_syllables(w)).sum();
        let complex_words = words.iter().filter(|w| is_complex(w)).count();

        Self { sentences: count_sentences(text), words: words.len(), syllables, complex_words }
    }

    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences.max(1) as f64
    }

    /// Flesch-Kincaid grade level, or 0.0 for text without words.
    pub fn flesch_kincaid_grade(&self) -> f64 {
        if self.words == 0 {
            return 0.0;
        }
        let syllables_per_word = self.syllables as f64 / self.words as f64;
        round_to(0.39 * self.words_per_sentence() + 11.8 * syllables_per_word - 15.59, 1)
    }

    /// Gunning fog index, or 0.0 for text without words.
    pub fn gunning_fog(&self) -> f64 {
        if self.words == 0 {
            return 0.0;
        }
        let complex_ratio = self.complex_words as f64 / self.words as f64;
        round_to(0.4 * (self.words_per_sentence() + 100.0 * complex_ratio), 2)
    }
}

pub fn flesch_kincaid_grade(text: &str) -> f64 {
    TextStats::from_text(text).flesch_kincaid_grade()
}

pub fn gunning_fog(text: &str) -> f64 {
    TextStats::from_text(text).gunning_fog()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Splits on whitespace and strips surrounding punctuation, keeping inner
/// apostrophes and hyphens.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
}

fn count_sentences(text: &str) -> usize {
    let counted = SENTENCE
        .find_iter(text)
        .filter(|m| tokenize(m.as_str()).count() > MIN_SENTENCE_WORDS)
        .count();
    counted.max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimates the syllables in one word. Words without letters count zero.
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.is_empty() {
        return 0;
    }
    if letters.chars().count() <= 3 {
        return 1;
    }

    let mut groups = 0;
    let mut previous_vowel = false;
    for c in letters.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    if groups > 1 {
        let silent_e = letters.ends_with('e') && !letters.ends_with("le") && !letters.ends_with("ee");
        let silent_ed = letters.ends_with("ed") && !letters.ends_with("ted") && !letters.ends_with("ded");
        let silent_es = letters.ends_with("es")
            && !["ses", "xes", "zes", "ces", "ges", "ches", "shes"]
                .iter()
                .any(|ending| letters.ends_with(ending));

        if silent_e || silent_ed || silent_es {
            groups -= 1;
        }
    }

    groups.max(1)
}

fn is_complex(word: &str) -> bool {
    if word.contains('-') {
        return false;
    }

    let lower = word.to_lowercase();
    let stem = ["ing", "es", "ed"]
        .iter()
        .find_map(|suffix| lower.strip_suffix(suffix).filter(|s| s.len() > 2))
        .unwrap_or(lower.as_str());

    count_syllables(stem) >= 3
}
