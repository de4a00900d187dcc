//! Parallel key search.
//!
//! This module provides:
//! - CPU workers, each with a private best-so-far watermark
//! - A pool fanning worker output into one bounded channel
//! - The aggregator tracking the global best

mod aggregator;
mod cpu;
mod pool;

pub use aggregator::{Aggregator, Record};
pub use cpu::{CpuWorker, WorkerStats};
pub use pool::{Candidate, WorkerEvent, WorkerPool};
