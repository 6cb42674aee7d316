// errors.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::zillow::ScraperError;

/// Errors that stop a run. Per-URL problems never get here; they are
/// recorded on the row instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error reading file {}: {source}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No URLs to process")]
    NoUrls,
    #[error("Invalid delay bounds: min {min}s, max {max}s")]
    InvalidDelay { min: f64, max: f64 },
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error("Output error: {0}")]
    Output(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
