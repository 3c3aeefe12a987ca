use doclens_core::Report;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "doclens".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Audit documentation pages for readability, structure, completeness, and style\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print extraction details summary
pub fn print_report_details(report: &Report) {
    eprintln!("  {} {}", "Title:".dimmed(), report.title.bright_white());
    eprintln!(
        "  {} {}",
        "Words:".dimmed(),
        report.metadata.word_count.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Headings:".dimmed(),
        report.metadata.heading_count.to_string().bright_white()
    );
    eprintln!(
        "  {} {}\n",
        "Code blocks:".dimmed(),
        report.metadata.code_blocks_count.to_string().bright_white()
    );
}

/// Print per-stage outcome lines
pub fn print_stage_outcomes(report: &Report) {
    for (kind, result) in report.stages() {
        if result.is_degraded() {
            print_warning(&format!("{}: {}", kind.label(), result.assessment()));
        } else {
            eprintln!(
                "  {} {} suggestions",
                format!("{}:", kind.label()).dimmed(),
                result.suggestions().len().to_string().bright_white()
            );
        }
    }
    eprintln!();
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
