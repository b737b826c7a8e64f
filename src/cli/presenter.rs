//! CLI presenter for output formatting

use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::IntakeProgressCallback;
use crate::domain::analysis::{AnalysisResult, UserRecord};
use crate::domain::document::{human_readable_size, UploadedDocument};

/// Width of the strength bars, in cells
const BAR_WIDTH: usize = 20;

/// Presenter for CLI output formatting.
///
/// Status goes to stderr; the analysis itself goes to stdout.
pub struct Presenter {
    spinner: Option<ProgressBar>,
    upload: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            spinner: None,
            upload: None,
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Show an upload bar and return the callback that drives it
    pub fn start_upload(&mut self, name: &str, size_bytes: u64) -> IntakeProgressCallback {
        let bar = ProgressBar::new(100);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{msg} [{bar:20.cyan/blue}] {pos:>3}%")
        {
            bar.set_style(style.progress_chars("█░ "));
        }
        bar.set_message(format!("Uploading {} ({})", name, human_readable_size(size_bytes)));
        self.upload = Some(bar.clone());

        Arc::new(move |percent: u8| bar.set_position(u64::from(percent)))
    }

    /// Finish the upload bar for an accepted document
    pub fn upload_success(&mut self, document: &UploadedDocument) {
        if let Some(bar) = self.upload.take() {
            bar.finish_and_clear();
        }
        self.success(&format!(
            "{} uploaded ({})",
            document.name(),
            document.human_readable_size()
        ));
    }

    /// Finish the upload bar for a rejected document
    pub fn upload_fail(&mut self, message: &str) {
        if let Some(bar) = self.upload.take() {
            bar.abandon();
        }
        self.error(message);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print a completed analysis to stdout
    pub fn analysis(&self, result: &AnalysisResult) {
        self.output(&format_analysis(result));
    }

    /// Print one user's stored analyses to stdout
    pub fn history_record(&self, record: &UserRecord) {
        self.output(&format_history_record(record));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an analysis as the sections of the results page
pub fn format_analysis(result: &AnalysisResult) -> String {
    let strength = result.strength_comparison();
    let mut out = Vec::new();

    out.push(heading("Case Summary"));
    out.push(result.summary.clone());
    out.push(String::new());

    out.push(format!("{} {}", "Risk level:".bold(), risk_colored(&result.risk_level)));
    out.push(String::new());

    out.push(heading("Case Strength"));
    out.push(format!(
        "  Plaintiff  {} {}",
        strength_bar(strength.plaintiff).green(),
        result.plaintiff_strength
    ));
    out.push(format!(
        "  Defendant  {} {}",
        strength_bar(strength.defendant).red(),
        result.defendant_strength
    ));

    push_list(&mut out, "Legal Issues", &result.legal_issues, "•");
    push_list(&mut out, "Applicable Law Sections", &result.law_sections, "§");
    push_list(&mut out, "Strong Points", &result.strong_points, "+");
    push_list(&mut out, "Weak Points", &result.weak_points, "-");

    if !result.disclaimer.is_empty() {
        out.push(String::new());
        out.push(result.disclaimer.dimmed().to_string());
    }

    out.join("\n")
}

/// Render a stored user record, one block per analysis
pub fn format_history_record(record: &UserRecord) -> String {
    let mut out = vec![format!(
        "{} {} ({} analyses)",
        "User".bold(),
        record.id.cyan(),
        record.analysis_results.len()
    )];

    let entries = record
        .uploaded_documents
        .iter()
        .zip(&record.questions)
        .zip(&record.analysis_results);
    for (i, ((document, question), result)) in entries.enumerate() {
        out.push(format!(
            "  {}. {} ({})",
            i + 1,
            document.file_name,
            human_readable_size(document.file_size)
        ));
        out.push(format!("     Q: {}", question));
        out.push(format!("     Risk: {}", risk_colored(&result.risk_level)));
        if !result.summary.is_empty() {
            out.push(format!("     {}", result.summary));
        }
    }

    out.join("\n")
}

fn heading(title: &str) -> String {
    title.bold().underline().to_string()
}

fn push_list(out: &mut Vec<String>, title: &str, items: &[String], bullet: &str) {
    if items.is_empty() {
        return;
    }
    out.push(String::new());
    out.push(heading(title));
    for item in items {
        out.push(format!("  {} {}", bullet, item));
    }
}

fn risk_colored(level: &str) -> ColoredString {
    let lower = level.to_lowercase();
    if lower.contains("high") {
        level.red().bold()
    } else if lower.contains("medium") || lower.contains("moderate") {
        level.yellow().bold()
    } else if lower.contains("low") {
        level.green().bold()
    } else {
        level.normal()
    }
}

/// Horizontal bar for a percentage, clamped to 100
pub fn strength_bar(percent: u32) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}
