// src/tests/utils.rs
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::runner::Pause;
use crate::zillow::{FetchError, PageFetcher, ZillowScraper};

pub const LISTING_URL: &str = "https://www.zillow.com/homedetails/123-Main-St";

pub const LISTING_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>123 Main St | Zillow</title></head>
  <body>
    <h1 data-testid="bdp-address">123 Main St, Springfield</h1>
    <span data-testid="price">$350,000</span>
  </body>
</html>"#;

/// Serves canned pages and remembers every URL it was asked for.
/// Unknown URLs answer with a 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
    calls: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn with_error(mut self, url: &str, err: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PageFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordedPauses(RefCell<Vec<Duration>>);

impl RecordedPauses {
    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn all(&self) -> Vec<Duration> {
        self.0.borrow().clone()
    }
}

impl Pause for RecordedPauses {
    fn pause(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

/// Defaults with short, fixed-range delays.
pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        min_delay_secs: 0.5,
        max_delay_secs: 1.5,
        ..ScraperConfig::default()
    }
}

pub fn scraper_with(fetcher: MockFetcher) -> ZillowScraper<MockFetcher> {
    ZillowScraper::with_fetcher(fetcher, &test_config())
}
