//! CPU worker running the generate, score, filter, emit loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender};

use crate::crypto::{AddressDeriver, KeySource, KeygenError};
use crate::matcher::{Ranker, WordScorer};

use super::{Candidate, WorkerEvent};

/// Keys generated between stop-flag checks and stats updates.
const BATCH_SIZE: u64 = 1000;

/// How long a blocked send waits before re-checking the stop flag.
const SEND_POLL: Duration = Duration::from_millis(100);

/// Statistics shared by all workers in a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total keys generated
    pub keys_generated: AtomicU64,
    /// Candidates that beat their worker's local best
    pub candidates_emitted: AtomicU64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }

    pub fn total_candidates(&self) -> u64 {
        self.candidates_emitted.load(Ordering::Relaxed)
    }
}

/// A worker that generates keypairs and emits each one that improves on its
/// own best so far.
pub struct CpuWorker<S, D, R: Ranker> {
    /// Worker ID
    id: usize,
    source: S,
    deriver: D,
    scorer: WordScorer,
    ranker: R,
    /// Minimum word hits; 0 skips address derivation entirely
    min_words: usize,
    /// Local watermark, only ever improves
    best: R::Key,
    event_tx: Sender<WorkerEvent<R::Key>>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
}

impl<S, D, R> CpuWorker<S, D, R>
where
    S: KeySource,
    D: AddressDeriver,
    R: Ranker,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        source: S,
        deriver: D,
        ranker: R,
        min_words: usize,
        event_tx: Sender<WorkerEvent<R::Key>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        let best = ranker.worst();
        Self {
            id,
            source,
            deriver,
            scorer: WordScorer::default(),
            ranker,
            min_words,
            best,
            event_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs one iteration: generate a keypair, score it, and return it if it
    /// passes the word threshold and beats the local watermark.
    pub fn step(&mut self) -> Result<Option<Candidate<R::Key>>, KeygenError> {
        let keypair = self.source.next_keypair()?;

        if self.min_words > 0 {
            let address = self.deriver.derive(keypair.public_key());
            if self.scorer.count(&address) < self.min_words {
                return Ok(None);
            }
        }

        let rank = self.ranker.key(&keypair);
        if !self.ranker.is_better(&self.best, &rank) {
            return Ok(None);
        }

        self.best = rank.clone();
        Ok(Some(Candidate {
            keypair,
            rank,
            worker_id: self.id,
        }))
    }

    /// Runs the worker loop until the stop flag is set, the channel closes, or
    /// key generation fails. A failure is reported as [`WorkerEvent::Failed`].
    pub fn run(mut self) {
        log::debug!("worker {} started", self.id);

        'outer: loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            for generated in 0..BATCH_SIZE {
                match self.step() {
                    Ok(None) => {}
                    Ok(Some(candidate)) => {
                        self.stats.candidates_emitted.fetch_add(1, Ordering::Relaxed);
                        log::debug!(
                            "worker {} emitting {}",
                            self.id,
                            candidate.keypair.public_key_hex()
                        );
                        if !self.emit(WorkerEvent::Candidate(candidate)) {
                            self.stats
                                .keys_generated
                                .fetch_add(generated + 1, Ordering::Relaxed);
                            break 'outer;
                        }
                    }
                    Err(error) => {
                        log::error!("worker {}: {}", self.id, error);
                        self.stats
                            .keys_generated
                            .fetch_add(generated, Ordering::Relaxed);
                        self.emit(WorkerEvent::Failed {
                            worker_id: self.id,
                            error,
                        });
                        break 'outer;
                    }
                }
            }

            self.stats.keys_generated.fetch_add(BATCH_SIZE, Ordering::Relaxed);
        }

        log::debug!("worker {} stopped", self.id);
    }

    /// Sends an event, waiting while the channel is full. Returns false if the
    /// receiver is gone or the worker was told to stop.
    fn emit(&self, mut event: WorkerEvent<R::Key>) -> bool {
        loop {
            match self.event_tx.send_timeout(event, SEND_POLL) {
                Ok(()) => return true,
                Err(SendTimeoutError::Disconnected(_)) => return false,
                Err(SendTimeoutError::Timeout(pending)) => {
                    if self.stop_flag.load(Ordering::Relaxed) {
                        return false;
                    }
                    event = pending;
                }
            }
        }
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the worker's current local best.
    pub fn best(&self) -> &R::Key {
        &self.best
    }
}
