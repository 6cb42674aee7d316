// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Desktop Chrome; the listing site serves stripped pages to unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

const DEFAULT_HEADERS: [(&str, &str); 4] = [
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("DNT", "1"),
    ("Upgrade-Insecure-Requests", "1"),
];

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    /// Sent with every request, on top of the user agent.
    pub headers: Vec<(String, String)>,
    pub request_timeout: Duration,
    /// Bounds of the random pause between two requests, in seconds.
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    /// Runs with more URLs than this ask for confirmation first.
    pub max_urls_warning: usize,
    pub log_file: PathBuf,
    /// Hosts must be this domain or a subdomain of it.
    pub vendor_domain: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            request_timeout: Duration::from_secs(30),
            min_delay_secs: 5.0,
            max_delay_secs: 8.0,
            max_urls_warning: 20,
            log_file: PathBuf::from("scraper_errors.log"),
            vendor_domain: "zillow.com".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let (min, max) = (self.min_delay_secs, self.max_delay_secs);
        let representable = |secs: f64| Duration::try_from_secs_f64(secs).is_ok();
        if !representable(min) || !representable(max) || min > max {
            return Err(AppError::InvalidDelay { min, max });
        }
        Ok(())
    }

    /// Mean pause, used for the run-time estimate.
    pub fn mean_delay_secs(&self) -> f64 {
        (self.min_delay_secs + self.max_delay_secs) / 2.0
    }
}
