//! The analysis report and its output formats.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Result;
use crate::document::Document;
use crate::stage::{StageKind, StageMetrics, StageResult};

/// Page-level counts copied from the extracted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub heading_count: usize,
    pub code_blocks_count: usize,
}

impl From<&Document> for ReportMetadata {
    fn from(doc: &Document) -> Self {
        Self {
            word_count: doc.word_count,
            paragraph_count: doc.paragraph_count,
            heading_count: doc.heading_count(),
            code_blocks_count: doc.code_blocks.len(),
        }
    }
}

/// The complete result of analyzing one page.
///
/// A report can be complete at the top level while individual stages are
/// degraded; check [`Report::degraded_stages`] or each stage's `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub url: String,
    pub title: String,
    /// Captured after the last stage finished.
    #[serde(with = "time::serde::rfc3339")]
    pub analysis_timestamp: OffsetDateTime,
    pub readability: StageResult,
    pub structure: StageResult,
    pub completeness: StageResult,
    pub style_guidelines: StageResult,
    pub metadata: ReportMetadata,
}

impl Report {
    /// All stage results, in pipeline order.
    pub fn stages(&self) -> [(StageKind, &StageResult); 4] {
        [
            (StageKind::Readability, &self.readability),
            (StageKind::Structure, &self.structure),
            (StageKind::Completeness, &self.completeness),
            (StageKind::Style, &self.style_guidelines),
        ]
    }

    /// Stages whose model call failed.
    pub fn degraded_stages(&self) -> Vec<StageKind> {
        self.stages()
            .into_iter()
            .filter(|(_, result)| result.is_degraded())
            .map(|(kind, _)| kind)
            .collect()
    }

    pub fn total_suggestions(&self) -> usize {
        self.stages().iter().map(|(_, result)| result.suggestions().len()).sum()
    }

    /// Flesch-Kincaid grade from the readability stage.
    pub fn readability_grade(&self) -> Option<f64> {
        match self.readability.metrics() {
            StageMetrics::Readability { flesch_kincaid_grade, .. } => Some(*flesch_kincaid_grade),
            _ => None,
        }
    }

    /// Serializes the report as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Renders a short plain-text digest: headline numbers plus the first
/// suggestion of every stage.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("Title: {}\n", report.title));
    out.push_str(&format!("URL: {}\n", report.url));
    out.push_str(&format!("Word count: {}\n", report.metadata.word_count));
    if let Some(grade) = report.readability_grade() {
        out.push_str(&format!("Readability grade: {:.1}\n", grade));
    }
    out.push_str(&format!("Total suggestions: {}\n", report.total_suggestions()));

    let top: Vec<String> = report
        .stages()
        .iter()
        .filter_map(|(kind, result)| {
            result
                .suggestions()
                .first()
                .map(|s| format!("  {}: {}", kind.label(), s))
        })
        .collect();

    if !top.is_empty() {
        out.push_str("\nTop suggestions:\n");
        for line in top {
            out.push_str(&line);
            out.push('\n');
        }
    }

    let degraded = report.degraded_stages();
    if !degraded.is_empty() {
        let names: Vec<&str> = degraded.iter().map(|kind| kind.label()).collect();
        out.push_str(&format!("\nDegraded stages: {}\n", names.join(", ")));
    }

    out
}
