// src/runner.rs
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::ScraperConfig;
use crate::errors::AppError;
use crate::output::CsvSink;
use crate::zillow::{PageFetcher, PropertyRecord, ZillowScraper};

/// Console width of progress URLs and separators.
const LINE_WIDTH: usize = 60;

/// Waits between two requests.
pub trait Pause {
    fn pause(&self, duration: Duration);
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration);
    }
}

pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: PathBuf,
    pub append: bool,
    /// Skip the confirmation prompt on large runs.
    pub assume_yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    fn from_records(records: &[PropertyRecord]) -> Self {
        let failed = records.iter().filter(|r| !r.is_success()).count();
        Self {
            total: records.len(),
            succeeded: records.len() - failed,
            failed,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Declined at the confirmation prompt; nothing was fetched or written.
    Aborted,
}

/// Processes URLs strictly one after another with a random pause in between.
pub struct Runner<'a, F: PageFetcher, P: Pause> {
    scraper: &'a ZillowScraper<F>,
    config: &'a ScraperConfig,
    pause: P,
}

impl<'a, F: PageFetcher, P: Pause> Runner<'a, F, P> {
    pub fn new(scraper: &'a ZillowScraper<F>, config: &'a ScraperConfig, pause: P) -> Self {
        Self {
            scraper,
            config,
            pause,
        }
    }

    /// `input` answers the confirmation prompt, `out` receives progress and
    /// the final summary.
    pub fn run<R: BufRead, W: Write>(
        &self,
        urls: &[String],
        opts: &RunOptions,
        input: &mut R,
        out: &mut W,
    ) -> Result<RunOutcome, AppError> {
        if urls.len() > self.config.max_urls_warning
            && !opts.assume_yes
            && !self.confirm_large_run(urls.len(), input, out)?
        {
            writeln!(out, "Aborted by user.")?;
            info!("Run of {} URLs declined at confirmation", urls.len());
            return Ok(RunOutcome::Aborted);
        }

        let mut sink = CsvSink::new(&opts.output, opts.append);

        writeln!(out, "\nStarting scrape of {} URL(s)...", urls.len())?;
        writeln!(out, "Output file: {}", sink.path().display())?;
        writeln!(out, "{}", "-".repeat(LINE_WIDTH))?;

        let mut records = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            let position = i + 1;
            writeln!(
                out,
                "\nProcessing {position}/{}: {}...",
                urls.len(),
                truncate(url, LINE_WIDTH)
            )?;

            let record = self.scraper.scrape(url);
            match &record.error {
                Some(error) => writeln!(out, "  ❌ Failed: {error}")?,
                None => {
                    writeln!(out, "  ✓ Success: {}", record.address)?;
                    writeln!(out, "    Price: {} | Lot: {}", record.price, record.lot_size)?;
                }
            }

            sink.write(&record)?;
            records.push(record);

            if position < urls.len() {
                let delay = self.next_delay()?;
                writeln!(
                    out,
                    "  ⏱  Waiting {:.1}s before next request...",
                    delay.as_secs_f64()
                )?;
                out.flush()?;
                self.pause.pause(delay);
            }
        }

        let summary = RunSummary::from_records(&records);
        self.print_summary(&summary, sink.path().display(), out)?;
        Ok(RunOutcome::Completed(summary))
    }

    fn confirm_large_run<R: BufRead, W: Write>(
        &self,
        count: usize,
        input: &mut R,
        out: &mut W,
    ) -> Result<bool, AppError> {
        let minutes = count as f64 * self.config.mean_delay_secs() / 60.0;
        writeln!(out, "\n⚠️  WARNING: You are attempting to scrape {count} URLs.")?;
        writeln!(
            out,
            "   Recommended maximum is {} URLs per execution.",
            self.config.max_urls_warning
        )?;
        writeln!(out, "   This will take approximately {minutes:.1} minutes.")?;
        write!(out, "   Continue? (y/n): ")?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn next_delay(&self) -> Result<Duration, AppError> {
        let (min, max) = (self.config.min_delay_secs, self.config.max_delay_secs);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(AppError::InvalidDelay { min, max });
        }
        let secs = rand::thread_rng().gen_range(min..=max);
        Duration::try_from_secs_f64(secs).map_err(|_| AppError::InvalidDelay { min, max })
    }

    fn print_summary<W: Write>(
        &self,
        summary: &RunSummary,
        output: impl std::fmt::Display,
        out: &mut W,
    ) -> Result<(), AppError> {
        let rule = "=".repeat(LINE_WIDTH);
        writeln!(out, "\n{rule}")?;
        writeln!(out, "SCRAPING COMPLETE")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Total URLs processed: {}", summary.total)?;
        writeln!(out, "Successful: {}", summary.succeeded)?;
        writeln!(out, "Failed: {}", summary.failed)?;
        writeln!(out, "Success rate: {:.1}%", summary.success_rate())?;
        writeln!(out, "\nResults saved to: {output}")?;
        if summary.failed > 0 {
            writeln!(
                out,
                "Error details logged to: {}",
                self.config.log_file.display()
            )?;
        }
        writeln!(out, "{rule}")?;
        Ok(())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
