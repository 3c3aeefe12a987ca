use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("doclens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Audit a documentation page with text statistics and a language model")
        .arg(clap::arg!([URL] "URL of the documentation page"))
        .arg(clap::arg!(--api_key <KEY> "Model API key").value_name("KEY"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, summary)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "summary"]),
        )
        .arg(
            clap::arg!(--html_file <FILE> "Analyze a saved copy of the page instead of fetching the URL")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--model <MODEL> "Model identifier").value_name("MODEL"))
        .arg(clap::arg!(--model_url <URL> "Messages API endpoint").value_name("URL"))
        .arg(clap::arg!(--model_timeout <SECS> "Timeout for each model call in seconds").default_value("60"))
        .arg(clap::arg!(--max_tokens <NUM> "Output token budget for each model call").default_value("1500"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--stage_delay_ms <MS> "Pause before each model call in milliseconds").default_value("1000"))
        .arg(clap::arg!(--structure_outline "Send the heading outline to the model instead of only the title"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "doclens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "doclens", &completions_dir).unwrap();
}
