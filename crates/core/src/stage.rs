//! Analysis stages.
//!
//! Readability, structure, completeness, and style share one shape: compute
//! local metrics, send one prompt built from a bounded slice of the document,
//! and derive suggestions from the reply. [`Stage`] captures that shape once;
//! the four stages differ only in the functions and excerpt length they carry.

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::document::{Document, Heading, count_words};
use crate::model::LanguageModel;
use crate::suggestions::extract_suggestions;
use crate::textstats::TextStats;

/// Characters of `full_text` sent by the readability stage.
pub const READABILITY_EXCERPT_CHARS: usize = 2000;

/// Characters of `full_text` sent by the completeness and style stages.
pub const CONTENT_EXCERPT_CHARS: usize = 2500;

/// The four analysis dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Readability,
    Structure,
    Completeness,
    Style,
}

impl StageKind {
    /// Human-readable name, used in failure placeholders.
    pub fn label(self) -> &'static str {
        match self {
            Self::Readability => "Readability",
            Self::Structure => "Structure",
            Self::Completeness => "Completeness",
            Self::Style => "Style",
        }
    }

    /// Field name of this stage in the report.
    pub fn report_key(self) -> &'static str {
        match self {
            Self::Readability => "readability",
            Self::Structure => "structure",
            Self::Completeness => "completeness",
            Self::Style => "style_guidelines",
        }
    }

    /// The placeholder assessment recorded when the model call fails.
    pub fn failure_placeholder(self, err: &ModelError) -> String {
        format!("{} analysis failed: {}", self.label(), err)
    }
}

/// What the structure stage sends to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructurePrompt {
    /// Only the page title. Cheap, but the reply cannot reflect the real
    /// heading layout.
    #[default]
    TitleOnly,
    /// The title, the heading outline, and the locally computed metrics.
    Outline,
}

/// Locally computed, stage-specific metrics.
///
/// Serialized flat into the stage object, next to `assessment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageMetrics {
    Readability {
        flesch_kincaid_grade: f64,
        gunning_fog_score: f64,
    },
    Structure {
        heading_count: usize,
        paragraph_count: usize,
        list_count: usize,
        avg_paragraph_length: f64,
        hierarchy_issues: Vec<String>,
    },
    Completeness {
        word_count: usize,
        code_examples_count: usize,
        sections_count: usize,
    },
    Style {},
}

/// Whether the stage's model call succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Ok,
    /// The assessment is a failure placeholder.
    Degraded,
}

/// The outcome of one stage.
///
/// `suggestions` is always derived from `assessment`; there is no way to
/// construct a result with independently supplied suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    #[serde(flatten)]
    metrics: StageMetrics,
    status: StageStatus,
    assessment: String,
    suggestions: Vec<String>,
}

impl StageResult {
    fn new(metrics: StageMetrics, status: StageStatus, assessment: String) -> Self {
        let suggestions = extract_suggestions(&assessment);
        Self { metrics, status, assessment, suggestions }
    }

    /// Result of a successful model call.
    pub fn completed(metrics: StageMetrics, assessment: impl Into<String>) -> Self {
        Self::new(metrics, StageStatus::Ok, assessment.into())
    }

    /// Result of a failed model call, carrying the failure placeholder.
    pub fn failed(kind: StageKind, metrics: StageMetrics, err: &ModelError) -> Self {
        Self::new(metrics, StageStatus::Degraded, kind.failure_placeholder(err))
    }

    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn is_degraded(&self) -> bool {
        self.status == StageStatus::Degraded
    }

    pub fn assessment(&self) -> &str {
        &self.assessment
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

type MetricsFn = fn(&Document) -> StageMetrics;
type PromptFn = fn(&Document, &str) -> String;

/// One configurable analysis stage.
#[derive(Clone, Copy)]
pub struct Stage {
    kind: StageKind,
    /// Length of the `full_text` prefix handed to the prompt; `None` sends none.
    excerpt_chars: Option<usize>,
    metrics: MetricsFn,
    prompt: PromptFn,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("kind", &self.kind)
            .field("excerpt_chars", &self.excerpt_chars)
            .finish()
    }
}

impl Stage {
    pub fn new(kind: StageKind, excerpt_chars: Option<usize>, metrics: MetricsFn, prompt: PromptFn) -> Self {
        Self { kind, excerpt_chars, metrics, prompt }
    }

    pub fn readability() -> Self {
        Self::new(
            StageKind::Readability,
            Some(READABILITY_EXCERPT_CHARS),
            readability_metrics,
            readability_prompt,
        )
    }

    pub fn structure(mode: StructurePrompt) -> Self {
        let prompt: PromptFn = match mode {
            StructurePrompt::TitleOnly => structure_title_prompt,
            StructurePrompt::Outline => structure_outline_prompt,
        };
        Self::new(StageKind::Structure, None, structure_metrics, prompt)
    }

    pub fn completeness() -> Self {
        Self::new(
            StageKind::Completeness,
            Some(CONTENT_EXCERPT_CHARS),
            completeness_metrics,
            completeness_prompt,
        )
    }

    pub fn style() -> Self {
        Self::new(StageKind::Style, Some(CONTENT_EXCERPT_CHARS), style_metrics, style_prompt)
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Builds the prompt this stage would send for `doc`.
    pub fn build_prompt(&self, doc: &Document) -> String {
        let excerpt = self.excerpt_chars.map(|n| doc.excerpt(n)).unwrap_or_default();
        (self.prompt)(doc, excerpt)
    }

    /// Runs the stage. Model failures are absorbed into a degraded result.
    pub async fn run<M>(&self, doc: &Document, model: &M, max_tokens: u32) -> StageResult
    where
        M: LanguageModel + ?Sized,
    {
        let metrics = (self.metrics)(doc);
        let prompt = self.build_prompt(doc);
        tracing::debug!(stage = self.kind.label(), prompt_chars = prompt.chars().count(), "invoking model");

        match model.complete(&prompt, max_tokens).await {
            Ok(assessment) => {
                let result = StageResult::completed(metrics, assessment);
                tracing::info!(
                    stage = self.kind.label(),
                    suggestions = result.suggestions().len(),
                    "stage completed"
                );
                result
            }
            Err(err) => {
                tracing::warn!(stage = self.kind.label(), error = %err, "model call failed, stage degraded");
                StageResult::failed(self.kind, metrics, &err)
            }
        }
    }
}

fn readability_metrics(doc: &Document) -> StageMetrics {
    let stats = TextStats::from_text(&doc.full_text);
    StageMetrics::Readability {
        flesch_kincaid_grade: stats.flesch_kincaid_grade(),
        gunning_fog_score: stats.gunning_fog(),
    }
}

fn structure_metrics(doc: &Document) -> StageMetrics {
    StageMetrics::Structure {
        heading_count: doc.heading_count(),
        paragraph_count: doc.paragraphs.len(),
        list_count: doc.lists.len(),
        avg_paragraph_length: average_paragraph_length(&doc.paragraphs),
        hierarchy_issues: hierarchy_issues(&doc.headings),
    }
}

fn completeness_metrics(doc: &Document) -> StageMetrics {
    StageMetrics::Completeness {
        word_count: doc.word_count,
        code_examples_count: doc.code_blocks.len(),
        sections_count: doc.heading_count(),
    }
}

fn style_metrics(_doc: &Document) -> StageMetrics {
    StageMetrics::Style {}
}

/// Mean word count per paragraph, 0.0 without paragraphs.
pub fn average_paragraph_length(paragraphs: &[String]) -> f64 {
    if paragraphs.is_empty() {
        return 0.0;
    }
    let total: usize = paragraphs.iter().map(|p| count_words(p)).sum();
    total as f64 / paragraphs.len() as f64
}

/// Flags skipped heading levels and repeated `h1` headings.
pub fn hierarchy_issues(headings: &[Heading]) -> Vec<String> {
    let mut issues = Vec::new();

    let top_level = headings.iter().filter(|h| h.level == 1).count();
    if top_level > 1 {
        issues.push(format!("Multiple top-level headings ({} h1 elements)", top_level));
    }

    for pair in headings.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.level > prev.level + 1 {
            issues.push(format!(
                "Heading level skipped: h{} \"{}\" is followed by h{} \"{}\"",
                prev.level, prev.text, next.level, next.text
            ));
        }
    }

    issues
}

const SUGGESTION_FORMAT: &str = "List each concrete suggestion on its own line.";

fn readability_prompt(_doc: &Document, excerpt: &str) -> String {
    format!(
        "Analyze the readability of this documentation excerpt for a non-specialist reader. \
         Comment on sentence length, jargon, and clarity. {}\n\n{}",
        SUGGESTION_FORMAT, excerpt
    )
}

fn structure_title_prompt(doc: &Document, _excerpt: &str) -> String {
    format!(
        "Assess the structure and organization of a documentation article titled \"{}\". \
         Consider heading hierarchy, logical flow, and use of lists. {}",
        doc.title, SUGGESTION_FORMAT
    )
}

fn structure_outline_prompt(doc: &Document, _excerpt: &str) -> String {
    let outline: String = doc
        .headings
        .iter()
        .map(|h| format!("{}- h{} {}\n", "  ".repeat(usize::from(h.level.saturating_sub(1))), h.level, h.text))
        .collect();

    format!(
        "Assess the structure and organization of the documentation article \"{}\". \
         It has {} headings, {} paragraphs averaging {:.1} words, and {} lists. \
         Heading outline:\n{}\nConsider heading hierarchy, logical flow, and use of lists. {}",
        doc.title,
        doc.heading_count(),
        doc.paragraphs.len(),
        average_paragraph_length(&doc.paragraphs),
        doc.lists.len(),
        outline,
        SUGGESTION_FORMAT
    )
}

fn completeness_prompt(_doc: &Document, excerpt: &str) -> String {
    format!(
        "Evaluate the completeness of this documentation excerpt. Check for prerequisites, \
         step-by-step instructions, code examples, edge cases, and next steps. {}\n\n{}",
        SUGGESTION_FORMAT, excerpt
    )
}

fn style_prompt(_doc: &Document, excerpt: &str) -> String {
    format!(
        "Review this documentation excerpt for style guide compliance: voice and tone, \
         terminology consistency, formatting, and action-oriented language. {}\n\n{}",
        SUGGESTION_FORMAT, excerpt
    )
}
