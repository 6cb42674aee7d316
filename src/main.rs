use chrono::Local;
use clap::Parser;
use std::io;
use tracing::error;

use crate::cli::Cli;
use crate::errors::AppError;
use crate::runner::{RunOptions, Runner, ThreadSleep};
use crate::zillow::ZillowScraper;

mod cli;
mod config;
mod errors;
mod logging;
mod output;
mod runner;
mod zillow;

#[cfg(test)]
mod tests;

fn main() {
    let cli = Cli::parse();
    zillow::install_panic_hook();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config()?;
    let _log_guard = logging::init_logging(&config.log_file)?;

    let urls = cli.urls().map_err(|e| {
        if let AppError::InputFile { .. } = e {
            error!("{e}");
        }
        e
    })?;

    let opts = RunOptions {
        output: cli.output_path(Local::now()),
        append: cli.append,
        assume_yes: cli.yes,
    };

    let scraper = ZillowScraper::new(&config)?;
    let runner = Runner::new(&scraper, &config, ThreadSleep);

    // Declining the confirmation prompt is a clean exit as well.
    runner.run(&urls, &opts, &mut io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(())
}
