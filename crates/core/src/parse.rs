//! HTML parsing and DOM querying.
//!
//! This module provides the [`HtmlPage`] and [`Element`] types, thin wrappers
//! around `scraper` that expose the handful of lookups the extractor needs:
//! CSS selection, first-match search by predicate, and text collection.
//!
//! # Example
//!
//! ```rust
//! use doclens_core::parse::HtmlPage;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let page = HtmlPage::parse(html);
//! let paragraphs = page.select("p.content").unwrap();
//! assert_eq!(paragraphs[0].text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Node, Selector};

use crate::{DoclensError, Result};

/// Elements whose text never reaches the reader.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DoclensError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Represents a parsed HTML page.
///
/// # Example
///
/// ```rust
/// use doclens_core::parse::HtmlPage;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let page = HtmlPage::parse(html);
/// assert_eq!(page.title(), Some("Test".to_string()));
/// ```
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup is repaired by the HTML5 tree
    /// builder rather than rejected.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Element::new))
    }

    /// Finds the first element, in document order, satisfying `predicate`.
    pub fn find<F>(&'_ self, predicate: F) -> Option<Element<'_>>
    where
        F: Fn(&Element<'_>) -> bool,
    {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(Element::new)
            .find(|el| predicate(el))
    }

    /// Gets the whitespace-normalized content of the `<title>` element.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use doclens_core::parse::HtmlPage;
///
/// let html = r#"<div class="article-body main"><p>Link <b>text</b></p></div>"#;
/// let page = HtmlPage::parse(html);
/// let div = &page.select("div").unwrap()[0];
///
/// assert_eq!(div.classes(), vec!["article-body", "main"]);
/// assert_eq!(div.text(), "Link text");
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Gets the text content, concatenated and whitespace-normalized.
    pub fn text(&self) -> String {
        normalize_whitespace(&self.element.text().collect::<String>())
    }

    /// Gets the text content exactly as it appears in the markup.
    pub fn raw_text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the visible text: each text node trimmed, empty nodes dropped,
    /// and the remainder joined with single spaces.
    ///
    /// Text inside `script`, `style`, `noscript`, and `template` is skipped.
    pub fn visible_text(&self) -> String {
        let mut nodes = Vec::new();
        collect_visible_text(self.element, &mut nodes);
        normalize_whitespace(&nodes.join(" "))
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g., "div", "h2").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the individual tokens of the `class` attribute.
    pub fn classes(&self) -> Vec<&'a str> {
        self.element.value().classes().collect()
    }

    /// Selects matching elements below this one, never including itself.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        let own_id = self.element.id();

        Ok(self
            .element
            .select(&sel)
            .filter(|el| el.id() != own_id)
            .map(Element::new)
            .collect())
    }
}

fn collect_visible_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            }
            Node::Element(el) if INVISIBLE_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
