use std::any::Any;
use std::cell::Cell;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::debug;

/// Setting up the HTTP client failed.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),
    #[error("invalid request header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Record-level failure. `Display` renders the exact tag written to the
/// `error` column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeFailure {
    #[error("Invalid Zillow URL")]
    InvalidUrl,
    #[error("Request timeout")]
    Timeout,
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Parsing error: {0}")]
    Parsing(String),
}

impl From<FetchError> for ScrapeFailure {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => ScrapeFailure::Timeout,
            FetchError::Status(code) => ScrapeFailure::HttpStatus(code),
            FetchError::Transport(detail) => ScrapeFailure::RequestFailed(detail),
        }
    }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

thread_local! {
    static QUIET_FAULTS: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f`, turning a panic into its message.
pub(crate) fn catch_fault<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    let outer = QUIET_FAULTS.with(|quiet| quiet.replace(true));
    let outcome = catch_unwind(AssertUnwindSafe(f));
    QUIET_FAULTS.with(|quiet| quiet.set(outer));
    outcome.map_err(|payload| panic_message(payload.as_ref()))
}

fn faults_are_quiet() -> bool {
    QUIET_FAULTS.with(Cell::get)
}

/// Panics inside `catch_fault` go to the debug log instead of stderr. Any
/// other panic still reaches the previous hook.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if faults_are_quiet() {
            debug!("Caught fault: {info}");
        } else {
            previous(info);
        }
    }));
}
