//! The structured record extracted from a documentation page.
//!
//! A [`Document`] is built once per analysis run by
//! [`extract_document`](crate::extract::extract_document) and only read
//! afterwards: every analysis stage borrows the same instance.

use serde::{Deserialize, Serialize};

/// A heading inside the content region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    pub text: String,
}

/// Whether a list was marked up as `<ul>` or `<ol>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    #[serde(rename = "ul")]
    Unordered,
    #[serde(rename = "ol")]
    Ordered,
}

/// A list inside the content region, with the text of every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentList {
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub items: Vec<String>,
}

/// Extracted page content.
///
/// All sequences are in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source URL of the page.
    pub url: String,
    /// First `h1`, else `<title>`, else `"No title"`.
    pub title: String,
    /// Visible text of the content region, whitespace-normalized.
    pub full_text: String,
    pub headings: Vec<Heading>,
    /// Non-empty paragraph texts.
    pub paragraphs: Vec<String>,
    pub lists: Vec<ContentList>,
    /// Text of every `code` and `pre` element.
    pub code_blocks: Vec<String>,
    /// Whitespace-separated tokens in `full_text`.
    pub word_count: usize,
    pub paragraph_count: usize,
}

impl Document {
    /// Returns the first `max_chars` characters of the full text.
    ///
    /// Counts characters rather than bytes so multi-byte text is never split.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.full_text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.full_text[..byte_idx],
            None => &self.full_text,
        }
    }

    pub fn heading_count(&self) -> usize {
        self.headings.len()
    }
}

/// Counts whitespace-separated tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text(text: &str) -> Document {
        Document {
            url: "https://example.com".to_string(),
            title: "Test".to_string(),
            full_text: text.to_string(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            lists: Vec::new(),
            code_blocks: Vec::new(),
            word_count: count_words(text),
            paragraph_count: 0,
        }
    }

    #[test]
    fn test_excerpt_bounds() {
        let doc = doc_with_text("abcdef");
        assert_eq!(doc.excerpt(3), "abc");
        assert_eq!(doc.excerpt(6), "abcdef");
        assert_eq!(doc.excerpt(100), "abcdef");
        assert_eq!(doc.excerpt(0), "");
    }

    #[test]
    fn test_excerpt_multibyte() {
        let doc = doc_with_text("héllo wörld");
        assert_eq!(doc.excerpt(4), "héll");
        assert_eq!(doc.excerpt(8), "héllo wö");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("  one two\tthree\nfour  "), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_list_kind_serialization() {
        let list = ContentList { kind: ListKind::Ordered, items: vec!["Download SDK".to_string()] };
        let json = serde_json::to_value(&list).unwrap();

        assert_eq!(json["type"], "ol");
        assert_eq!(json["items"][0], "Download SDK");
    }
}
