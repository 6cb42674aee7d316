// src/cli.rs
use chrono::{DateTime, Local};
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

use crate::config::ScraperConfig;
use crate::errors::AppError;

const EXAMPLES: &str = "\
Examples:
  # Scrape a single URL
  zillow_scrape \"https://www.zillow.com/homedetails/...\"

  # Scrape multiple URLs from file
  zillow_scrape --file urls.txt

  # Custom output filename
  zillow_scrape --file urls.txt --output my_results.csv

  # Append to existing CSV
  zillow_scrape --file urls.txt --append";

/// Zillow Property Data Scraper - for personal educational use only.
#[derive(Parser, Debug)]
#[command(name = "zillow_scrape", version, after_help = EXAMPLES)]
#[command(group(ArgGroup::new("input").required(true).args(["url", "file"])))]
pub struct Cli {
    /// Single Zillow listing URL to scrape
    pub url: Option<String>,

    /// Text file containing URLs, one per line (`#` starts a comment line)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output CSV file (default: zillow_data_<timestamp>.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append to an existing output file instead of overwriting it
    #[arg(short, long)]
    pub append: bool,

    /// Do not ask for confirmation on large runs
    #[arg(short, long)]
    pub yes: bool,

    /// Where to keep the persistent log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Shortest pause between requests, in seconds
    #[arg(long, value_name = "SECS")]
    pub min_delay: Option<f64>,

    /// Longest pause between requests, in seconds
    #[arg(long, value_name = "SECS")]
    pub max_delay: Option<f64>,
}

impl Cli {
    /// Defaults with this invocation's overrides applied, validated.
    pub fn config(&self) -> Result<ScraperConfig, AppError> {
        let mut config = ScraperConfig::default();
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        if let Some(min) = self.min_delay {
            config.min_delay_secs = min;
        }
        if let Some(max) = self.max_delay {
            config.max_delay_secs = max;
        }
        config.validate()?;
        Ok(config)
    }

    /// The URLs to process, from the positional argument or the URL file.
    pub fn urls(&self) -> Result<Vec<String>, AppError> {
        let urls = match (&self.url, &self.file) {
            (Some(url), _) => {
                let url = url.trim();
                if url.is_empty() {
                    vec![]
                } else {
                    vec![url.to_string()]
                }
            }
            (None, Some(path)) => read_urls_from_file(path)?,
            (None, None) => Vec::new(),
        };
        if urls.is_empty() {
            return Err(AppError::NoUrls);
        }
        Ok(urls)
    }

    pub fn output_path(&self, now: DateTime<Local>) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(now))
    }
}

pub fn read_urls_from_file(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_url_lines(&contents))
}

/// Trimmed non-empty lines that are not `#` comments.
pub fn parse_url_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("zillow_data_{}.csv", now.format("%Y-%m-%d_%H-%M")))
}
