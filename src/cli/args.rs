//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::Duration;
use crate::domain::dictation::UiLanguage;

/// LexAI - legal case analysis from the command line
#[derive(Parser, Debug)]
#[command(name = "lexai")]
#[command(version)]
#[command(about = "Upload a legal document, ask a question and get a case analysis")]
#[command(long_about = None)]
pub struct Cli {
    /// Case document to analyse (PDF or DOCX, up to 10MB)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Question about the case
    #[arg(short = 'q', long, value_name = "TEXT", conflicts_with = "dictate")]
    pub question: Option<String>,

    /// Dictate the question on stdin (blank line or EOF to finish)
    #[arg(short = 'd', long)]
    pub dictate: bool,

    /// Interface and dictation language
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<LanguageArg>,

    /// Analysis service base URL
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Request timeout (e.g., 30s, 2m)
    #[arg(short = 't', long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Append the analysis to the local history
    #[arg(long)]
    pub history: bool,

    /// Owner of the history record
    #[arg(short = 'u', long, value_name = "ID")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show stored analyses
    History {
        /// Only show this user's record
        #[arg(short = 'u', long, value_name = "ID")]
        user: Option<String>,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Language argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    #[value(alias = "english")]
    En,
    #[value(alias = "tamil")]
    Ta,
}

impl From<LanguageArg> for UiLanguage {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => UiLanguage::English,
            LanguageArg::Ta => UiLanguage::Tamil,
        }
    }
}

/// Where the question comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Typed(String),
    Dictated,
}

/// Parsed analysis options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub file: PathBuf,
    pub question: QuestionSource,
    pub language: UiLanguage,
    pub service_url: String,
    pub timeout: Duration,
    pub history: bool,
    pub user_id: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["service_url", "language", "timeout", "history", "user_id"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
