//! Main app runner for case analysis

use std::env;
use std::process::ExitCode;

use tokio::io::BufReader;
use tracing::warn;

use crate::application::ports::ConfigStore;
use crate::application::{
    AnalysisClient, CaseComposer, CaseHistory, DictationCapture, DictationError, DocumentIntake,
    SubmitError,
};
use crate::domain::config::AppConfig;
use crate::domain::dictation::UiLanguage;
use crate::domain::document::FileSelection;
use crate::infrastructure::{
    FsDocumentReader, HttpAnalysisService, JsonFileRecordStore, LineRecognizer, XdgConfigStore,
};

use super::args::{AnalyzeOptions, QuestionSource};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured service URL
pub const SERVICE_URL_ENV: &str = "LEXAI_SERVICE_URL";

/// Upload the document, obtain the question, submit and print the analysis
pub async fn run_analysis(options: AnalyzeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let service = match HttpAnalysisService::new(&options.service_url, Some(options.timeout.as_std())) {
        Ok(service) => service,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let composer = CaseComposer::new(AnalysisClient::new(service));
    let intake = DocumentIntake::new(FsDocumentReader::new());

    // Document
    let selection = match FileSelection::from_path(&options.file).await {
        Ok(selection) => selection,
        Err(e) => {
            presenter.error(&format!("Cannot open {}: {}", options.file.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let on_progress = presenter.start_upload(&selection.name, selection.size_bytes);
    let outcome = intake.select(selection, Some(on_progress)).await;
    composer.accept_intake(&outcome);
    let document = match outcome {
        Ok(document) => {
            presenter.upload_success(&document);
            document
        }
        Err(e) => {
            presenter.upload_fail(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Question
    let question = match options.question {
        QuestionSource::Typed(text) => text,
        QuestionSource::Dictated => match dictate_question(options.language, &presenter).await {
            Ok(text) => text,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };
    composer.set_question(question.as_str());

    // Submission
    presenter.start_spinner("Analyzing case...");
    let result = match composer.submit().await {
        Ok(result) => {
            presenter.spinner_success("Analysis complete");
            result
        }
        Err(SubmitError::NotReady) => {
            presenter.spinner_fail("Nothing to analyze");
            presenter.error(&SubmitError::NotReady.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Err(e) => {
            presenter.spinner_fail("Analysis failed");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.analysis(&result);

    if options.history {
        let history = CaseHistory::new(JsonFileRecordStore::new());
        match history
            .append(&options.user_id, &document, &question, &result)
            .await
        {
            Ok(_) => presenter.info(&format!("Saved to history for '{}'", options.user_id)),
            Err(e) => {
                warn!(error = %e, "history append failed");
                presenter.warn(&format!("Analysis not saved to history: {}", e));
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Capture the question from stdin through a dictation session
async fn dictate_question(
    language: UiLanguage,
    presenter: &Presenter,
) -> Result<String, DictationError> {
    let capture = DictationCapture::new(LineRecognizer::new(BufReader::new(tokio::io::stdin())));

    presenter.info(&format!(
        "Dictating in {} ({}). Finish with a blank line or Ctrl-D.",
        language.label(),
        language.recognition_locale()
    ));
    capture.begin(language).await?;
    capture.recognizer().finished().await;
    let transcript = capture.end().await;

    if !transcript.is_empty() {
        presenter.info(&format!("Question: {}", transcript));
    }
    Ok(transcript)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        service_url: env::var(SERVICE_URL_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
