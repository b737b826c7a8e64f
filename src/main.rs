//! LexAI CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexai::cli::{
    app::{load_merged_config, run_analysis, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{AnalyzeOptions, Cli, Commands, QuestionSource},
    config_cmd::handle_config_command,
    history_cmd::handle_history_command,
    presenter::Presenter,
};
use lexai::domain::config::{AppConfig, Duration};
use lexai::domain::dictation::UiLanguage;
use lexai::infrastructure::{JsonFileRecordStore, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::History { user }) => {
            if let Err(e) = handle_history_command(user, JsonFileRecordStore::new(), &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let Some(file) = cli.file else {
        presenter.error("Missing document. Pass --file <PATH> (PDF or DOCX).");
        return ExitCode::from(EXIT_USAGE_ERROR);
    };
    let question = match (cli.question, cli.dictate) {
        (Some(text), _) => QuestionSource::Typed(text),
        (None, true) => QuestionSource::Dictated,
        (None, false) => {
            presenter.error("Missing question. Pass --question <TEXT> or --dictate.");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        service_url: cli.service_url,
        language: cli.language.map(|l| UiLanguage::from(l).code().to_string()),
        timeout: cli.timeout,
        history: if cli.history { Some(true) } else { None },
        user_id: cli.user,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Reject an unparsable timeout instead of silently using the default
    if let Some(Err(e)) = config.timeout.as_deref().map(str::parse::<Duration>) {
        presenter.error(&format!("Invalid timeout: {}", e));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    let options = AnalyzeOptions {
        file,
        question,
        language: config.language_or_default(),
        service_url: config.service_url_or_default(),
        timeout: config.timeout_or_default(),
        history: config.history_or_default(),
        user_id: config.user_id_or_default().to_string(),
    };

    run_analysis(options).await
}

/// Log to stderr, filtered by RUST_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
