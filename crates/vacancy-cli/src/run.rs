use scraper::Html;
use std::path::PathBuf;
use thiserror::Error;
use vacancy_acquire::extract;
use vacancy_acquire::fetch::{self, FetchError};
use vacancy_output::path::OutputLocations;
use vacancy_output::writer::{self, WriteError};

/// Inputs for one scrape.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    /// Explicit destination; resolved via [`OutputLocations`] when absent.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl RunError {
    /// Write failures are logged by the writer itself.
    pub fn already_logged(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

/// Fetch the listings page, extract records, and write them out.
pub async fn run(options: &RunOptions) -> Result<RunSummary, RunError> {
    tracing::info!(url = %options.url, "Starting scrape of {}", options.url);

    let html = fetch::fetch_page(&options.url).await?;
    let records = extract::extract(&Html::parse_document(&html));
    tracing::debug!(records = records.len(), "Extracted listings");

    let path = options
        .output
        .clone()
        .unwrap_or_else(|| OutputLocations::standard().resolve());
    writer::write_records(&records, &path)?;

    Ok(RunSummary {
        records: records.len(),
        path,
    })
}

/// Run once, logging any failure the writer has not already reported.
///
/// Every failed run leaves exactly one error line in the log.
pub async fn execute(options: &RunOptions) -> Result<RunSummary, RunError> {
    let result = run(options).await;
    if let Err(err) = &result {
        if !err.already_logged() {
            tracing::error!(url = %options.url, "Error scraping {}: {err}", options.url);
        }
    }
    result
}
