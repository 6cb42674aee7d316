// src/zillow/client.rs
use tracing::{error, info, warn};

use crate::config::ScraperConfig;
use crate::zillow::document::Document;
use crate::zillow::extractors::{Extractor, FIELD_EXTRACTORS};
use crate::zillow::fetcher::{HttpFetcher, PageFetcher};
use crate::zillow::models::{Field, PropertyRecord};
use crate::zillow::scraper_error::catch_fault;
use crate::zillow::{ScrapeFailure, ScraperError};
use crate::zillow::validate::is_vendor_url;

/// Turns one listing URL into one `PropertyRecord`.
pub struct ZillowScraper<F: PageFetcher = HttpFetcher> {
    fetcher: F,
    vendor_domain: String,
}

impl ZillowScraper<HttpFetcher> {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        Ok(Self::with_fetcher(HttpFetcher::new(config)?, config))
    }
}

impl<F: PageFetcher> ZillowScraper<F> {
    pub fn with_fetcher(fetcher: F, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            vendor_domain: config.vendor_domain.clone(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Validate, fetch, extract. Never fails: problems end up in
    /// `record.error` and the untouched fields stay `N/A`.
    pub fn scrape(&self, url: &str) -> PropertyRecord {
        // Timestamp is taken here, before any network work.
        let mut record = PropertyRecord::new(url);

        if !is_vendor_url(url, &self.vendor_domain) {
            warn!("Invalid URL: {url}");
            record.fail(ScrapeFailure::InvalidUrl);
            return record;
        }

        let body = match self.fetcher.fetch(url) {
            Ok(body) => body,
            Err(err) => {
                let failure = ScrapeFailure::from(err);
                match &failure {
                    ScrapeFailure::Timeout => error!("Timeout for URL: {url}"),
                    ScrapeFailure::HttpStatus(code) => error!("HTTP error for URL: {url} - {code}"),
                    other => error!("Request failed for URL: {url} - {other}"),
                }
                record.fail(failure);
                return record;
            }
        };

        match fill_fields(&mut record, &body, &FIELD_EXTRACTORS) {
            Ok(()) => info!("Successfully scraped: {}", record.address),
            Err(message) => {
                error!("Parsing error for URL: {url} - {message}");
                record.fail(ScrapeFailure::Parsing(message));
            }
        }

        record
    }
}

/// Parses `body` and runs each extractor in order, assigning fields as they
/// come in. On a fault the fields assigned so far are kept.
fn fill_fields(
    record: &mut PropertyRecord,
    body: &str,
    extractors: &[(Field, Extractor)],
) -> Result<(), String> {
    catch_fault(|| {
        let doc = Document::parse(body);
        for (field, extract) in extractors {
            record.set(*field, extract(&doc));
        }
    })
}
