use chrono::Local;
use serde::Serialize;

use crate::zillow::ScrapeFailure;

/// Written for any field that could not be extracted.
pub const NOT_FOUND: &str = "N/A";

/// Column order of the output file. Must match the field order of
/// `PropertyRecord`, which is what gets serialized.
pub const CSV_HEADER: [&str; 8] = [
    "url",
    "address",
    "lot_size",
    "price",
    "price_per_sqft",
    "days_on_market",
    "scrape_timestamp",
    "error",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The extracted data fields of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    LotSize,
    Price,
    PricePerSqft,
    DaysOnMarket,
}

/// One output row per input URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub url: String,
    pub address: String,
    pub lot_size: String,
    pub price: String,
    pub price_per_sqft: String,
    pub days_on_market: String,
    /// Local time the attempt started, not when it finished.
    pub scrape_timestamp: String,
    /// `None` serializes as an empty cell.
    pub error: Option<String>,
}

impl PropertyRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            address: NOT_FOUND.to_string(),
            lot_size: NOT_FOUND.to_string(),
            price: NOT_FOUND.to_string(),
            price_per_sqft: NOT_FOUND.to_string(),
            days_on_market: NOT_FOUND.to_string(),
            scrape_timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            error: None,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Address => &mut self.address,
            Field::LotSize => &mut self.lot_size,
            Field::Price => &mut self.price,
            Field::PricePerSqft => &mut self.price_per_sqft,
            Field::DaysOnMarket => &mut self.days_on_market,
        };
        *slot = value;
    }

    pub fn fail(&mut self, failure: ScrapeFailure) {
        self.error = Some(failure.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
