//! Analysis pipeline.
//!
//! The [`Analyzer`] runs fetch, extraction, and the four stages strictly in
//! sequence. A fixed pause precedes every model-backed stage so consecutive
//! model calls never overlap and stay spaced out.
//!
//! # Example
//!
//! ```rust,no_run
//! use doclens_core::{AnalyzerConfig, Analyzer, AnthropicClient, ModelConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = AnthropicClient::new(ModelConfig::with_api_key("sk-..."))?;
//! let analyzer = Analyzer::with_config(model, AnalyzerConfig::default());
//! let report = analyzer.analyze("https://help.example.com/hc/articles/1").await?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use time::OffsetDateTime;

use crate::Result;
use crate::document::Document;
use crate::extract::extract_document;
use crate::fetch::{FetchConfig, fetch_url};
use crate::model::LanguageModel;
use crate::report::{Report, ReportMetadata};
use crate::stage::{Stage, StageResult, StructurePrompt};

/// Configuration for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// HTTP settings for fetching the page.
    pub fetch: FetchConfig,
    /// Pause before each model-backed stage (default: 1 second).
    pub stage_delay: Duration,
    /// Output token budget for each model call (default: 1500).
    pub max_tokens: u32,
    /// What the structure stage sends to the model (default: title only).
    pub structure_prompt: StructurePrompt,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            stage_delay: Duration::from_secs(1),
            max_tokens: 1500,
            structure_prompt: StructurePrompt::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use doclens_core::{AnalyzerConfig, StructurePrompt};
    ///
    /// let config = AnalyzerConfig::builder()
    ///     .stage_delay(Duration::from_millis(250))
    ///     .structure_prompt(StructurePrompt::Outline)
    ///     .build();
    /// assert_eq!(config.max_tokens, 1500);
    /// ```
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the fetch timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent used for fetching.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the pause before each stage.
    pub fn stage_delay(mut self, value: Duration) -> Self {
        self.config.stage_delay = value;
        self
    }

    /// Sets the output token budget per model call.
    pub fn max_tokens(mut self, value: u32) -> Self {
        self.config.max_tokens = value;
        self
    }

    /// Sets what the structure stage sends to the model.
    pub fn structure_prompt(mut self, value: StructurePrompt) -> Self {
        self.config.structure_prompt = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point: turns a URL into a [`Report`].
pub struct Analyzer<M> {
    model: M,
    config: AnalyzerConfig,
}

impl<M: LanguageModel> Analyzer<M> {
    /// Creates an analyzer with default settings.
    pub fn new(model: M) -> Self {
        Self::with_config(model, AnalyzerConfig::default())
    }

    pub fn with_config(model: M, config: AnalyzerConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// The stages in the order they run.
    pub fn stages(&self) -> [Stage; 4] {
        [
            Stage::readability(),
            Stage::structure(self.config.structure_prompt),
            Stage::completeness(),
            Stage::style(),
        ]
    }

    /// Fetches `url` and analyzes the page.
    ///
    /// # Errors
    ///
    /// Fetch and extraction failures abort the run. Model failures never do;
    /// they show up as degraded stages in the report.
    pub async fn analyze(&self, url: &str) -> Result<Report> {
        let html = fetch_url(url, &self.config.fetch).await?;
        self.analyze_html(&html, url).await
    }

    /// Analyzes already fetched HTML, reporting it under `url`.
    pub async fn analyze_html(&self, html: &str, url: &str) -> Result<Report> {
        let doc = extract_document(html, url)?;
        Ok(self.analyze_document(&doc).await)
    }

    /// Runs the four stages over an extracted document.
    pub async fn analyze_document(&self, doc: &Document) -> Report {
        let [readability, structure, completeness, style] = self.stages();

        let readability = self.run_stage(&readability, doc).await;
        let structure = self.run_stage(&structure, doc).await;
        let completeness = self.run_stage(&completeness, doc).await;
        let style_guidelines = self.run_stage(&style, doc).await;

        let report = Report {
            url: doc.url.clone(),
            title: doc.title.clone(),
            analysis_timestamp: now(),
            readability,
            structure,
            completeness,
            style_guidelines,
            metadata: ReportMetadata::from(doc),
        };

        tracing::info!(
            url = %report.url,
            suggestions = report.total_suggestions(),
            degraded = report.degraded_stages().len(),
            "analysis finished"
        );

        report
    }

    async fn run_stage(&self, stage: &Stage, doc: &Document) -> StageResult {
        if !self.config.stage_delay.is_zero() {
            tokio::time::sleep(self.config.stage_delay).await;
        }
        stage.run(doc, &self.model, self.config.max_tokens).await
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records which stage each prompt belongs to, so call order is visible.
    struct EchoModel {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> std::result::Result<String, ModelError> {
            assert_eq!(max_tokens, 1500);
            let stage = ["readability", "structure", "completeness", "style"]
                .into_iter()
                .find(|name| prompt.contains(name))
                .unwrap_or("unknown");
            self.calls.lock().unwrap().push(stage.to_string());
            Ok("Consider adding a short overview at the top.".to_string())
        }
    }

    const HTML: &str = r#"<html><body><article><h1>Guide</h1><p>Install the SDK first.</p></article></body></html>"#;

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::builder()
            .timeout(10)
            .user_agent("test-agent")
            .stage_delay(Duration::ZERO)
            .max_tokens(500)
            .structure_prompt(StructurePrompt::Outline)
            .build();

        assert_eq!(config.fetch.timeout, 10);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert!(config.stage_delay.is_zero());
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.structure_prompt, StructurePrompt::Outline);
    }

    #[test]
    fn test_config_default() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.stage_delay, Duration::from_secs(1));
        assert_eq!(config.fetch.timeout, 30);
        assert_eq!(config.structure_prompt, StructurePrompt::TitleOnly);
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let model = EchoModel { calls: Mutex::new(Vec::new()) };
        let config = AnalyzerConfig::builder().stage_delay(Duration::ZERO).build();
        let analyzer = Analyzer::with_config(model, config);

        let report = analyzer.analyze_html(HTML, "https://example.com/guide").await.unwrap();

        assert_eq!(report.title, "Guide");
        assert_eq!(report.total_suggestions(), 4);
        let calls = analyzer.model().calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["readability", "structure", "completeness", "style"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_delay_precedes_each_stage() {
        let model = EchoModel { calls: Mutex::new(Vec::new()) };
        let analyzer = Analyzer::new(model);

        let started = tokio::time::Instant::now();
        analyzer.analyze_html(HTML, "https://example.com/guide").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(4));
    }
}
