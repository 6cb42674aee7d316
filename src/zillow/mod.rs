mod client;
mod document;
mod extractors;
mod fetcher;
mod models;
mod scraper_error;
mod validate;

pub use client::ZillowScraper;
pub use fetcher::PageFetcher;
pub use models::{PropertyRecord, CSV_HEADER, NOT_FOUND};
pub use scraper_error::{install_panic_hook, FetchError, ScrapeFailure, ScraperError};
