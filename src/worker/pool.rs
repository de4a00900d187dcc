//! Worker pool management.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};

use crate::crypto::{AddressDeriver, KeySource, KeygenError, Keypair, OsKeySource, YggdrasilDeriver};
use crate::matcher::Ranker;

use super::cpu::{CpuWorker, WorkerStats};

/// A keypair that beat the local best of the worker that generated it.
#[derive(Debug, Clone)]
pub struct Candidate<K> {
    pub keypair: Keypair,
    /// The keypair's comparison key under the active ranker
    pub rank: K,
    /// The ID of the worker that generated this candidate
    pub worker_id: usize,
}

/// Messages sent from workers to the aggregator.
#[derive(Debug)]
pub enum WorkerEvent<K> {
    Candidate(Candidate<K>),
    /// Key generation failed; the worker has stopped.
    Failed { worker_id: usize, error: KeygenError },
}

/// Manages a pool of workers feeding one bounded channel.
pub struct WorkerPool<K> {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for worker events
    event_rx: Receiver<WorkerEvent<K>>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl<K: Clone + Send + 'static> WorkerPool<K> {
    /// Spawns `num_workers` workers drawing keys from the OS RNG and deriving
    /// addresses with the network's scheme.
    pub fn new<R>(num_workers: usize, min_words: usize, ranker: R) -> io::Result<Self>
    where
        R: Ranker<Key = K>,
    {
        Self::with_sources(
            num_workers,
            min_words,
            ranker,
            |_| OsKeySource,
            YggdrasilDeriver,
        )
    }

    /// Spawns workers with custom key sources and address deriver.
    ///
    /// `make_source` is called once per worker with the worker ID.
    pub fn with_sources<R, S, D, F>(
        num_workers: usize,
        min_words: usize,
        ranker: R,
        make_source: F,
        deriver: D,
    ) -> io::Result<Self>
    where
        R: Ranker<Key = K>,
        S: KeySource + Send + 'static,
        D: AddressDeriver + Clone + Send + 'static,
        F: Fn(usize) -> S,
    {
        let (event_tx, event_rx) = bounded(num_workers);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());
        let start_time = Instant::now();

        let handles = (0..num_workers)
            .map(|id| {
                let worker = CpuWorker::new(
                    id,
                    make_source(id),
                    deriver.clone(),
                    ranker.clone(),
                    min_words,
                    event_tx.clone(),
                    stop_flag.clone(),
                    stats.clone(),
                );

                thread::Builder::new()
                    .name(format!("ygg-vanity-worker-{}", id))
                    .spawn(move || worker.run())
            })
            .collect::<io::Result<Vec<_>>>();

        // Drop our sender so the channel closes once every worker has exited
        drop(event_tx);

        let handles = match handles {
            Ok(handles) => handles,
            Err(e) => {
                stop_flag.store(true, Ordering::Relaxed);
                return Err(e);
            }
        };

        log::info!("spawned {} workers", num_workers);

        Ok(Self {
            num_workers,
            handles: Some(handles),
            event_rx,
            stop_flag,
            stats,
            start_time,
        })
    }

    /// Waits for the next worker event.
    ///
    /// Returns `Timeout` if nothing arrives in time and `Disconnected` once every
    /// worker has exited.
    pub fn wait_for_event(&self, timeout: Duration) -> Result<WorkerEvent<K>, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    /// Returns the receiving end of the event channel.
    pub fn events(&self) -> &Receiver<WorkerEvent<K>> {
        &self.event_rx
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops and waits for all workers to complete.
    pub fn join(mut self) {
        self.join_workers();
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the total keys generated across all workers.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Returns the total candidates emitted across all workers.
    pub fn total_candidates(&self) -> u64 {
        self.stats.total_candidates()
    }

    /// Returns the instant the pool was created.
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g., signal handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl<K> WorkerPool<K> {
    fn join_workers(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }
}

impl<K> Drop for WorkerPool<K> {
    fn drop(&mut self) {
        self.join_workers();
    }
}
