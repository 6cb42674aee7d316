// src/zillow/extractors.rs
//
// Listing pages have no stable markup, so every field is found through an
// ordered chain of independent strategies. The first strategy that yields a
// value wins; when none does the field is `N/A`.

use scraper::ElementRef;
use tracing::debug;

use crate::zillow::document::{
    next_sibling_of, next_siblings_of, parent_of, previous_sibling_of, text_of, Document,
};
use crate::zillow::models::{Field, NOT_FOUND};
use crate::zillow::scraper_error::catch_fault;

type Strategy = fn(&Document) -> Option<String>;

pub type Extractor = fn(&Document) -> String;

/// Every field with its extractor, in output column order.
pub const FIELD_EXTRACTORS: [(Field, Extractor); 5] = [
    (Field::Address, extract_address),
    (Field::LotSize, extract_lot_size),
    (Field::Price, extract_price),
    (Field::PricePerSqft, extract_price_per_sqft),
    (Field::DaysOnMarket, extract_days_on_market),
];

const ADDRESS_BY_CLASS: &str = "h1.ds-address-container";
const ADDRESS_BY_TEST_ID: &str = r#"h1[data-testid="bdp-address"]"#;
const LOT_BY_TEST_ID: &str = r#"span[data-testid*="lot" i]"#;
const PRICE_BY_TEST_ID: &str = r#"span[data-testid="price"]"#;
const PRICE_BY_SPAN_CLASS: &str = r#"span[class*="price" i]"#;
const PRICE_BY_DIV_CLASS: &str = r#"div[class*="price" i]"#;
const PRICE_PER_SQFT_BY_TEST_ID: &str = r#"span[data-testid*="price-per-sqft" i]"#;

const LOT_LABELS: [&str; 3] = ["Lot size", "Lot Size", "lot size"];
const AREA_UNITS: [&str; 4] = ["sqft", "sq ft", "acres", "acre"];
const PER_SQFT_LABELS: [&str; 3] = ["$/sqft", "per sqft", "Price/sqft"];
const MARKET_TIME_LABELS: [&str; 4] = [
    "Time on Zillow",
    "Days on Zillow",
    "on Zillow",
    "Days on market",
];

const CURRENCY: char = '$';

pub fn extract_address(doc: &Document) -> String {
    run_chain(
        "address",
        doc,
        &[address_by_class, address_by_test_id, address_first_heading],
    )
}

pub fn extract_lot_size(doc: &Document) -> String {
    run_chain("lot_size", doc, &[lot_size_near_label, lot_size_by_test_id])
}

pub fn extract_price(doc: &Document) -> String {
    run_chain(
        "price",
        doc,
        &[
            price_by_test_id,
            price_by_span_class,
            price_by_div_class,
            price_from_loose_text,
        ],
    )
}

pub fn extract_price_per_sqft(doc: &Document) -> String {
    run_chain(
        "price_per_sqft",
        doc,
        &[price_per_sqft_near_label, price_per_sqft_by_test_id],
    )
}

pub fn extract_days_on_market(doc: &Document) -> String {
    run_chain("days_on_market", doc, &[days_on_market_near_label])
}

/// Tries each strategy in turn. A panic anywhere in the chain is logged and
/// the field falls back to `N/A`.
fn run_chain(field: &str, doc: &Document, chain: &[Strategy]) -> String {
    let outcome = catch_fault(|| {
        chain.iter().enumerate().find_map(|(step, strategy)| {
            strategy(doc).map(|value| {
                debug!(field, step, "strategy matched");
                value
            })
        })
    });

    match outcome {
        Ok(Some(value)) => value,
        Ok(None) => NOT_FOUND.to_string(),
        Err(message) => {
            debug!("Error extracting {field}: {message}");
            NOT_FOUND.to_string()
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn has_currency(text: &str) -> bool {
    text.contains(CURRENCY)
}

// ---- address -------------------------------------------------------------

fn address_by_class(doc: &Document) -> Option<String> {
    let heading = doc.find_first(ADDRESS_BY_CLASS)?;
    non_empty(text_of(heading))
}

fn address_by_test_id(doc: &Document) -> Option<String> {
    let heading = doc.find_first(ADDRESS_BY_TEST_ID)?;
    non_empty(text_of(heading))
}

fn address_first_heading(doc: &Document) -> Option<String> {
    non_empty(text_of(doc.find_first("h1")?))
}

// ---- lot size ------------------------------------------------------------

/// Spans that directly contain text accepted by `predicate`.
fn labelled_spans<'a, P>(doc: &'a Document, predicate: P) -> Vec<ElementRef<'a>>
where
    P: Fn(&str) -> bool,
{
    doc.find_all_text(predicate)
        .into_iter()
        .filter_map(|node| node.parent)
        .filter(|el| el.value().name() == "span")
        .collect()
}

/// True when `text` is nothing but `label`, give or take a colon.
fn is_bare_label(text: &str, label: &str) -> bool {
    text.replace(label, "")
        .trim_matches(|c: char| c == ':' || c.is_whitespace())
        .is_empty()
}

fn lot_size_near_label(doc: &Document) -> Option<String> {
    for label in LOT_LABELS {
        for span in labelled_spans(doc, |text| text.contains(label)) {
            let Some(block) = parent_of(span) else {
                continue;
            };
            // The first span inside or after the enclosing block, then the
            // label's own next sibling.
            let candidates = [
                doc.next_in_document_order(block, "span"),
                next_sibling_of(span),
            ];
            for candidate in candidates.into_iter().flatten() {
                let text = text_of(candidate);
                if !text.is_empty() && !is_bare_label(&text, label) {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn lot_size_by_test_id(doc: &Document) -> Option<String> {
    doc.find_all(LOT_BY_TEST_ID)
        .into_iter()
        .map(text_of)
        .find(|text| {
            let lower = text.to_lowercase();
            AREA_UNITS.iter().any(|unit| lower.contains(unit))
        })
}

// ---- price ---------------------------------------------------------------

fn priced_text(element: Option<ElementRef<'_>>) -> Option<String> {
    let text = text_of(element?);
    has_currency(&text).then_some(text)
}

fn price_by_test_id(doc: &Document) -> Option<String> {
    priced_text(doc.find_first(PRICE_BY_TEST_ID))
}

fn price_by_span_class(doc: &Document) -> Option<String> {
    priced_text(doc.find_first(PRICE_BY_SPAN_CLASS))
}

fn price_by_div_class(doc: &Document) -> Option<String> {
    priced_text(doc.find_first(PRICE_BY_DIV_CLASS))
}

/// Any text that opens with a dollar amount with a thousands separator,
/// e.g. `$425,000 Est. payment` gives `$425,000`.
fn price_from_loose_text(doc: &Document) -> Option<String> {
    doc.find_all_text(|text| has_currency(text) && text.chars().any(|c| c.is_ascii_digit()))
        .into_iter()
        .map(|node| node.text.trim())
        .find(|text| text.starts_with(CURRENCY) && text.contains(','))
        .and_then(|text| text.split_whitespace().next())
        .map(str::to_string)
}

// ---- price per square foot -----------------------------------------------

fn price_per_sqft_near_label(doc: &Document) -> Option<String> {
    for label in PER_SQFT_LABELS {
        let needle = label.to_lowercase();
        for span in labelled_spans(doc, |text| text.to_lowercase().contains(&needle)) {
            let Some(block) = parent_of(span) else {
                continue;
            };
            let after = next_siblings_of(block)
                .map(text_of)
                .find(|text| has_currency(text));
            if after.is_some() {
                return after;
            }
            if let Some(before) = previous_sibling_of(block).map(text_of) {
                if has_currency(&before) {
                    return Some(before);
                }
            }
        }
    }
    None
}

fn price_per_sqft_by_test_id(doc: &Document) -> Option<String> {
    let element = doc.find_first(PRICE_PER_SQFT_BY_TEST_ID)?;
    non_empty(text_of(element))
}

// ---- days on market ------------------------------------------------------

fn days_on_market_near_label(doc: &Document) -> Option<String> {
    for label in MARKET_TIME_LABELS {
        let needle = label.to_lowercase();
        for node in doc.find_all_text(|text| text.to_lowercase().contains(&needle)) {
            let Some(parent) = node.parent else {
                continue;
            };
            if let Some(days) = days_from_text(&text_of(parent)) {
                return Some(days);
            }
        }
    }
    None
}

/// Finds a count in e.g. `12 days on Zillow`. A number is taken when the next
/// word mentions days, or when the text talks about Zillow or the market at
/// all.
fn days_from_text(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let about_listing = lower.contains("zillow") || lower.contains("market");
    let words: Vec<&str> = text.split_whitespace().collect();

    words.iter().enumerate().find_map(|(i, word)| {
        if !is_count(word) {
            return None;
        }
        let followed_by_days = words
            .get(i + 1)
            .is_some_and(|next| next.to_lowercase().contains("day"));
        (followed_by_days || about_listing).then(|| format!("{word} days"))
    })
}

/// Digits, optionally with thousands commas.
fn is_count(word: &str) -> bool {
    let digits = word.replace(',', "");
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
