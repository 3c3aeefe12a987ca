pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod region;
pub mod report;
pub mod stage;
pub mod suggestions;
pub mod textstats;

#[cfg(test)]
mod testing;

pub use document::{ContentList, Document, Heading, ListKind};
pub use error::{DoclensError, ModelError, Result};
pub use extract::{NO_TITLE, extract_document};
pub use fetch::{FetchConfig, fetch_file, fetch_url};
pub use model::{AnthropicClient, LanguageModel, ModelConfig};
pub use parse::HtmlPage;
pub use pipeline::{Analyzer, AnalyzerConfig, AnalyzerConfigBuilder};
pub use region::{DEFAULT_REGION_RULES, RegionRule, locate_region, locate_region_with};
pub use report::{Report, ReportMetadata, render_summary};
pub use stage::{Stage, StageKind, StageMetrics, StageResult, StageStatus, StructurePrompt};
pub use suggestions::extract_suggestions;
pub use textstats::{TextStats, flesch_kincaid_grade, gunning_fog};
