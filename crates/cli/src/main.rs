use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use doclens_core::model::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use doclens_core::{Analyzer, AnalyzerConfig, AnthropicClient, ModelConfig, StructurePrompt, fetch_file, render_summary};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

use echo::{
    format_size, print_banner, print_error, print_info, print_report_details, print_stage_outcomes, print_step,
    print_success,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "summary" | "text" | "txt" => Ok(Self::Summary),
            _ => Err(format!("Invalid format: {}. Valid options: json, summary", s)),
        }
    }
}

/// Audit a documentation page for readability, structure, completeness, and style
#[derive(Parser, Debug)]
#[command(name = "doclens")]
#[command(version)]
#[command(about = "Audit a documentation page with text statistics and a language model", long_about = None)]
struct Args {
    /// URL of the documentation page
    #[arg(value_name = "URL", required_unless_present = "completions")]
    url: Option<String>,

    /// Model API key
    #[arg(long, value_name = "KEY", env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, summary)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Analyze a saved copy of the page instead of fetching the URL
    #[arg(long, value_name = "FILE")]
    html_file: Option<PathBuf>,

    /// Model identifier
    #[arg(long, value_name = "MODEL", env = "DOCLENS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Messages API endpoint
    #[arg(long, value_name = "URL", env = "DOCLENS_MODEL_URL", default_value = DEFAULT_ENDPOINT)]
    model_url: String,

    /// Timeout for each model call in seconds
    #[arg(long, default_value = "60", value_name = "SECS")]
    model_timeout: u64,

    /// Output token budget for each model call
    #[arg(long, default_value = "1500", value_name = "NUM")]
    max_tokens: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Pause before each model call in milliseconds
    #[arg(long, default_value = "1000", value_name = "MS")]
    stage_delay_ms: u64,

    /// Send the heading outline and structure metrics to the model instead of only the title
    #[arg(long)]
    structure_outline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,doclens=debug,doclens_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn analyzer_config(args: &Args) -> AnalyzerConfig {
    let mut builder = AnalyzerConfig::builder()
        .timeout(args.timeout)
        .stage_delay(Duration::from_millis(args.stage_delay_ms))
        .max_tokens(args.max_tokens)
        .structure_prompt(if args.structure_outline { StructurePrompt::Outline } else { StructurePrompt::TitleOnly });

    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "doclens", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let url = args.url.clone().context("A URL is required")?;

    let Some(api_key) = args.api_key.clone().filter(|key| !key.trim().is_empty()) else {
        print_error("API key required. Pass --api-key or set ANTHROPIC_API_KEY.");
        return Ok(ExitCode::from(1));
    };

    Url::parse(&url).with_context(|| format!("Invalid URL: {}", url))?;

    let config = analyzer_config(&args);
    let model_config = ModelConfig {
        api_key,
        model: args.model.clone(),
        endpoint: args.model_url.clone(),
        timeout: args.model_timeout,
        ..Default::default()
    };
    tracing::debug!(model = %model_config.model, endpoint = %model_config.endpoint, "model client configured");
    let model = AnthropicClient::new(model_config).context("Failed to configure model client")?;

    let analyzer = Analyzer::with_config(model, config);

    let report = match &args.html_file {
        Some(path) => {
            if args.verbose {
                print_step(1, 3, &format!("Reading from file {}", path.display().bright_white()));
            }
            let path = path.to_string_lossy();
            let html = fetch_file(&path).with_context(|| format!("Failed to read file: {}", path))?;

            if args.verbose {
                eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
                eprintln!();
                print_step(2, 3, "Extracting main content and running analysis stages");
            }
            analyzer.analyze_html(&html, &url).await.context("Failed to analyze page")?
        }
        None => {
            if args.verbose {
                print_step(1, 3, &format!("Fetching from {}", url.bright_white().underline()));
                print_step(2, 3, "Extracting main content and running analysis stages");
            }
            analyzer.analyze(&url).await.context("Failed to analyze page")?
        }
    };

    if args.verbose {
        print_report_details(&report);
        print_stage_outcomes(&report);
        print_step(3, 3, "Writing output");
    }

    let output = match args.format {
        OutputFormat::Json => report.to_json_pretty().context("Failed to serialize report")?,
        OutputFormat::Summary => render_summary(&report),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output.trim_end());
        }
    }

    Ok(ExitCode::SUCCESS)
}
