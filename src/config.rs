//! Runtime configuration for the vanity key search.

use clap::Parser;

use crate::matcher::MAX_WORD_HITS;

/// Yggdrasil Vanity Key Generator
///
/// Prints a new keypair every time one beats the best found so far.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of hex words (e.g. dead, beef) required in the first half of the address
    #[arg(short = 'w', long, default_value = "0")]
    pub words: usize,

    /// Rank keys by tree identifier instead of address
    #[arg(long, default_value = "false")]
    pub sig: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "5")]
    pub report_interval: u64,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words > MAX_WORD_HITS {
            return Err(ConfigError::TooManyWords {
                requested: self.words,
                max: MAX_WORD_HITS,
            });
        }

        if self.worker_count() == 0 {
            return Err(ConfigError::NoWorkers);
        }

        if self.report_interval == 0 {
            return Err(ConfigError::InvalidReportInterval);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot require {requested} words, an address holds at most {max}")]
    TooManyWords { requested: usize, max: usize },

    #[error("at least one worker thread is required")]
    NoWorkers,

    #[error("report interval must be at least one second")]
    InvalidReportInterval,
}
