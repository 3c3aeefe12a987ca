//! Document extraction from raw HTML.
//!
//! Only the located content region contributes headings, paragraphs, lists,
//! code, and text. The title is the one exception and is resolved page-wide.

use crate::Result;
use crate::document::{ContentList, Document, Heading, ListKind, count_words};
use crate::parse::{Element, HtmlPage};
use crate::region::{DEFAULT_REGION_RULES, RegionRule, locate_region_with};

/// Title used when the page has neither an `h1` nor a `<title>`.
pub const NO_TITLE: &str = "No title";

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Extracts a [`Document`] from raw HTML using the default region cascade.
///
/// # Errors
///
/// Returns [`DoclensError::ContentNotFound`](crate::DoclensError::ContentNotFound)
/// when no content region can be located.
pub fn extract_document(html: &str, url: &str) -> Result<Document> {
    let page = HtmlPage::parse(html);
    Document::from_page(&page, url)
}

impl Document {
    /// Builds a document from an already parsed page.
    pub fn from_page(page: &HtmlPage, url: &str) -> Result<Self> {
        Self::from_page_with_rules(page, url, DEFAULT_REGION_RULES)
    }

    /// Builds a document, locating the content region with custom rules.
    pub fn from_page_with_rules(page: &HtmlPage, url: &str, rules: &[RegionRule]) -> Result<Self> {
        let (rule, region) = locate_region_with(page, rules)?;

        let title = resolve_title(page);
        let headings = extract_headings(&region)?;
        let paragraphs = extract_paragraphs(&region)?;
        let lists = extract_lists(&region)?;
        let code_blocks = extract_code_blocks(&region)?;
        let full_text = region.visible_text();
        let word_count = count_words(&full_text);
        let paragraph_count = paragraphs.len();

        tracing::info!(
            url,
            region = rule,
            words = word_count,
            headings = headings.len(),
            paragraphs = paragraph_count,
            lists = lists.len(),
            code_blocks = code_blocks.len(),
            "extracted document"
        );

        Ok(Self {
            url: url.to_string(),
            title,
            full_text,
            headings,
            paragraphs,
            lists,
            code_blocks,
            word_count,
            paragraph_count,
        })
    }
}

/// Resolves the page title: first non-empty `h1` anywhere on the page, then
/// the `<title>` element, then [`NO_TITLE`].
fn resolve_title(page: &HtmlPage) -> String {
    let from_h1 = page
        .select("h1")
        .ok()
        .and_then(|h1s| h1s.iter().map(Element::text).find(|text| !text.is_empty()));

    from_h1
        .or_else(|| page.title().filter(|title| !title.is_empty()))
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn extract_headings(region: &Element<'_>) -> Result<Vec<Heading>> {
    Ok(region
        .select(HEADING_SELECTOR)?
        .iter()
        .filter_map(|h| {
            let level = h.tag_name().strip_prefix('h')?.parse::<u8>().ok()?;
            Some(Heading { level, text: h.text() })
        })
        .collect())
}

fn extract_paragraphs(region: &Element<'_>) -> Result<Vec<String>> {
    Ok(region
        .select("p")?
        .iter()
        .map(Element::text)
        .filter(|text| !text.is_empty())
        .collect())
}

fn extract_lists(region: &Element<'_>) -> Result<Vec<ContentList>> {
    let mut lists = Vec::new();

    for list in region.select("ul, ol")? {
        let kind = if list.tag_name() == "ol" { ListKind::Ordered } else { ListKind::Unordered };
        let items = list.select("li")?.iter().map(Element::text).collect();
        lists.push(ContentList { kind, items });
    }

    Ok(lists)
}

/// Code keeps its internal line breaks; only the ends are trimmed.
fn extract_code_blocks(region: &Element<'_>) -> Result<Vec<String>> {
    Ok(region
        .select("code, pre")?
        .iter()
        .map(|el| el.raw_text().trim().to_string())
        .collect())
}
