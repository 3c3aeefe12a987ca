//! Content-region location.
//!
//! Documentation sites wrap the article body in very different markup. The
//! region is found with an ordered cascade of rules, evaluated first match
//! wins:
//!
//! 1. a semantic `<article>` element
//! 2. a `<div class="article-body">`, the help-center convention
//! 3. a `<main>` landmark
//! 4. any element with a class token containing `content`, `article`, or `body`
//!
//! These are heuristics tuned for help-center style pages (Zendesk-like
//! markup). Nothing guarantees that the matched region is the real article on
//! an arbitrary site, and the last rule in particular matches liberally.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::{Element, HtmlPage};
use crate::{DoclensError, Result};

static CONTENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)content|article|body").expect("content class pattern is valid"));

/// One step of the region cascade.
#[derive(Clone, Copy)]
pub struct RegionRule {
    /// Short name used in logs.
    pub name: &'static str,
    /// Returns the first element this rule accepts, if any.
    pub locate: for<'a> fn(&'a HtmlPage) -> Option<Element<'a>>,
}

impl std::fmt::Debug for RegionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionRule").field("name", &self.name).finish()
    }
}

fn first_article(page: &HtmlPage) -> Option<Element<'_>> {
    page.select_first("article").ok().flatten()
}

fn first_article_body(page: &HtmlPage) -> Option<Element<'_>> {
    page.select_first("div.article-body").ok().flatten()
}

fn first_main(page: &HtmlPage) -> Option<Element<'_>> {
    page.select_first("main").ok().flatten()
}

fn first_content_class(page: &HtmlPage) -> Option<Element<'_>> {
    page.find(|el| el.classes().iter().any(|class| CONTENT_CLASS.is_match(class)))
}

/// The default cascade, in evaluation order.
pub const DEFAULT_REGION_RULES: &[RegionRule] = &[
    RegionRule { name: "article", locate: first_article },
    RegionRule { name: "article-body", locate: first_article_body },
    RegionRule { name: "main", locate: first_main },
    RegionRule { name: "content-class", locate: first_content_class },
];

/// Locates the content region with [`DEFAULT_REGION_RULES`].
///
/// Returns the name of the rule that matched alongside the element.
///
/// # Errors
///
/// Returns [`DoclensError::ContentNotFound`] if no rule matches.
pub fn locate_region(page: &HtmlPage) -> Result<(&'static str, Element<'_>)> {
    locate_region_with(page, DEFAULT_REGION_RULES)
}

/// Locates the content region with a caller-supplied cascade.
pub fn locate_region_with<'a>(page: &'a HtmlPage, rules: &[RegionRule]) -> Result<(&'static str, Element<'a>)> {
    for rule in rules {
        if let Some(element) = (rule.locate)(page) {
            tracing::debug!(rule = rule.name, tag = %element.tag_name(), "content region located");
            return Ok((rule.name, element));
        }
        tracing::debug!(rule = rule.name, "region rule did not match");
    }

    Err(DoclensError::ContentNotFound)
}
