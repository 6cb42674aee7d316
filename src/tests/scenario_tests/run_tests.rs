// src/tests/scenario_tests/run_tests.rs
use std::io::Cursor;
use std::path::Path;

use crate::runner::{RunOptions, RunOutcome, RunSummary, Runner};
use crate::tests::utils::{
    scraper_with, test_config, MockFetcher, RecordedPauses, LISTING_HTML, LISTING_URL,
};
use crate::zillow::{FetchError, CSV_HEADER};

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("output file should be readable")
        .records()
        .map(|row| row.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn many_urls(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://www.zillow.com/homedetails/{i}_zpid/"))
        .collect()
}

fn options(output: &Path, append: bool, assume_yes: bool) -> RunOptions {
    RunOptions {
        output: output.to_path_buf(),
        append,
        assume_yes,
    }
}

#[test]
fn declining_a_large_run_fetches_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let config = test_config();
    let scraper = scraper_with(MockFetcher::new());
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);

    let mut input = Cursor::new("n\n");
    let mut console = Vec::new();
    let outcome = runner
        .run(&many_urls(25), &options(&output, false, false), &mut input, &mut console)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Aborted);
    assert!(!output.exists());
    assert!(scraper.fetcher().calls().is_empty());
    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("You are attempting to scrape 25 URLs"));
    assert!(console.contains("Aborted by user."));
}

#[test]
fn accepting_a_large_run_processes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let config = test_config();
    let scraper = scraper_with(MockFetcher::new());
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);

    let mut input = Cursor::new("Y\n");
    let outcome = runner
        .run(&many_urls(21), &options(&output, false, false), &mut input, &mut Vec::new())
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed(RunSummary {
            total: 21,
            succeeded: 0,
            failed: 21,
        })
    );
    assert_eq!(scraper.fetcher().calls().len(), 21);
    assert_eq!(read_rows(&output).len(), 22);
}

#[test]
fn assume_yes_and_small_runs_never_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config();
    let scraper = scraper_with(MockFetcher::new());
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);

    for (count, assume_yes) in [(25, true), (20, false)] {
        let output = dir.path().join(format!("out_{count}.csv"));
        let mut console = Vec::new();
        let outcome = runner
            .run(
                &many_urls(count),
                &options(&output, false, assume_yes),
                &mut Cursor::new(""),
                &mut console,
            )
            .unwrap();

        assert!(matches!(outcome, RunOutcome::Completed(s) if s.total == count));
        assert!(!String::from_utf8(console).unwrap().contains("Continue?"));
    }
}

#[test]
fn mixed_run_writes_one_row_per_url_and_pauses_between() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mixed.csv");
    let slow = "https://www.zillow.com/homedetails/slow";
    let config = test_config();
    let scraper = scraper_with(
        MockFetcher::new()
            .with_page(LISTING_URL, LISTING_HTML)
            .with_error(slow, FetchError::Timeout),
    );
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);
    let urls = vec![
        LISTING_URL.to_string(),
        "https://www.notzillow.com/x".to_string(),
        slow.to_string(),
    ];

    let mut console = Vec::new();
    let outcome = runner
        .run(&urls, &options(&output, false, false), &mut Cursor::new(""), &mut console)
        .unwrap();

    let RunOutcome::Completed(summary) = outcome else {
        panic!("run should complete");
    };
    assert_eq!((summary.total, summary.succeeded, summary.failed), (3, 1, 2));

    // One pause between each pair, none after the last.
    assert_eq!(pauses.count(), 2);
    for pause in pauses.all() {
        let secs = pause.as_secs_f64();
        assert!((0.5..=1.5).contains(&secs), "{secs}");
    }

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], CSV_HEADER.to_vec());
    assert!(rows.iter().all(|row| row.len() == 8));
    assert_eq!(rows[1][1], "123 Main St, Springfield");
    assert_eq!(rows[1][3], "$350,000");
    assert_eq!(rows[1][7], "");
    assert_eq!(rows[2][7], "Invalid Zillow URL");
    assert_eq!(rows[3][7], "Request timeout");

    let console = String::from_utf8(console).unwrap();
    assert!(console.contains("Processing 1/3"));
    assert!(console.contains("Success rate: 33.3%"));
    assert!(console.contains("Error details logged to: scraper_errors.log"));
}

#[test]
fn append_mode_keeps_a_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("history.csv");
    let config = test_config();
    let scraper = scraper_with(MockFetcher::new().with_page(LISTING_URL, LISTING_HTML));
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);
    let urls = vec![LISTING_URL.to_string()];

    for append in [false, true, true] {
        runner
            .run(&urls, &options(&output, append, false), &mut Cursor::new(""), &mut Vec::new())
            .unwrap();
    }

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 4);
    let headers = rows.iter().filter(|row| row[0] == "url").count();
    assert_eq!(headers, 1);
}

#[test]
fn overwrite_mode_replaces_previous_results() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("history.csv");
    let config = test_config();
    let scraper = scraper_with(MockFetcher::new().with_page(LISTING_URL, LISTING_HTML));
    let pauses = RecordedPauses::default();
    let runner = Runner::new(&scraper, &config, &pauses);

    let two = vec![LISTING_URL.to_string(), LISTING_URL.to_string()];
    runner
        .run(&two, &options(&output, false, false), &mut Cursor::new(""), &mut Vec::new())
        .unwrap();
    assert_eq!(read_rows(&output).len(), 3);

    let one = vec![LISTING_URL.to_string()];
    runner
        .run(&one, &options(&output, false, false), &mut Cursor::new(""), &mut Vec::new())
        .unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], CSV_HEADER.to_vec());
}
