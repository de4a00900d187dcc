//! Yggdrasil Vanity Key Generator CLI
//!
//! Usage:
//!   ygg_vanity               # Search for the lowest public key (highest address)
//!   ygg_vanity --words 2     # Only consider addresses with two hex words
//!   ygg_vanity --sig         # Search for the highest tree identifier

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::RecvTimeoutError;

use ygg_vanity::{Aggregator, Config, PublicKeyRanker, Ranker, Record, TreeIdRanker, WorkerPool};

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!(
        "Threads: {} Minimum Words: {}",
        config.worker_count(),
        config.words
    );

    if config.sig {
        search(&config, TreeIdRanker)
    } else {
        search(&config, PublicKeyRanker)
    }
}

/// Runs the search until interrupted or a worker fails; never returns.
fn search<R: Ranker>(config: &Config, ranker: R) -> ! {
    let pool = match WorkerPool::new(config.worker_count(), config.words, ranker.clone()) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to start workers: {}", e);
            process::exit(1);
        }
    };

    ctrlc_handler(pool.stop_flag_clone());

    let mut aggregator = Aggregator::new(ranker, pool.start_time());
    let report_interval = Duration::from_secs(config.report_interval);

    loop {
        match pool.wait_for_event(report_interval) {
            Ok(event) => match aggregator.handle(event) {
                Ok(Some(record)) => print_record(&record, aggregator.ranker()),
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Fatal: {}", e);
                    process::exit(1);
                }
            },
            Err(RecvTimeoutError::Timeout) => print_progress(&pool),
            Err(RecvTimeoutError::Disconnected) => {
                if !pool.is_stopped() {
                    eprintln!("Fatal: all workers exited");
                    process::exit(1);
                }
            }
        }

        // Check if we should stop (ctrl-c was pressed)
        if pool.is_stopped() {
            print_final_stats(&pool, aggregator.records());
            process::exit(EXIT_INTERRUPTED);
        }
    }
}

fn print_record<R: Ranker>(record: &Record<R::Key>, ranker: &R) {
    let keypair = &record.candidate.keypair;
    println!("----- {:?}", record.elapsed);
    println!("Priv: {}", keypair.private_key_hex());
    println!("Pub: {}", keypair.public_key_hex());
    println!("{}: {}", R::LABEL, ranker.render(keypair));
}

fn print_progress<K: Clone + Send + 'static>(pool: &WorkerPool<K>) {
    log::info!(
        "[{:>4}s] generated {} keys ({}/s), {} candidates",
        pool.elapsed().as_secs(),
        format_number(pool.total_keys()),
        format_number(pool.keys_per_second() as u64),
        pool.total_candidates()
    );
}

fn print_final_stats<K: Clone + Send + 'static>(pool: &WorkerPool<K>, records: u64) {
    println!("\n--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(pool.total_keys()));
    println!("Candidates emitted:   {}", pool.total_candidates());
    println!("Records printed:      {}", records);
    println!("Time elapsed:         {:.2}s", pool.elapsed().as_secs_f64());
    println!(
        "Average speed:        {}/s",
        format_number(pool.keys_per_second() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        log::warn!("could not install Ctrl-C handler: {}", e);
    }
}
