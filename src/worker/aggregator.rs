//! Single consumer merging worker candidates into a global best.

use std::time::{Duration, Instant};

use crate::crypto::KeygenError;
use crate::matcher::Ranker;

use super::{Candidate, WorkerEvent};

/// A candidate that improved the global best.
#[derive(Debug, Clone)]
pub struct Record<K> {
    pub candidate: Candidate<K>,
    /// Time since the search started
    pub elapsed: Duration,
    /// 1-based position in the sequence of records
    pub index: u64,
}

/// Owns the global best and decides which candidates get reported.
///
/// Workers only know their own best, so candidates from different workers
/// arrive in no particular order; anything that does not strictly beat the
/// global best is dropped.
pub struct Aggregator<R: Ranker> {
    ranker: R,
    best: Option<R::Key>,
    start_time: Instant,
    records: u64,
}

impl<R: Ranker> Aggregator<R> {
    pub fn new(ranker: R, start_time: Instant) -> Self {
        Self {
            ranker,
            best: None,
            start_time,
            records: 0,
        }
    }

    /// Processes one worker event.
    ///
    /// Returns a [`Record`] when the candidate is a new global best and an
    /// error when the worker reported a key generation failure.
    pub fn handle(&mut self, event: WorkerEvent<R::Key>) -> Result<Option<Record<R::Key>>, KeygenError> {
        match event {
            WorkerEvent::Candidate(candidate) => Ok(self.offer(candidate)),
            WorkerEvent::Failed { worker_id, error } => {
                log::error!("worker {} failed to generate a key", worker_id);
                Err(error)
            }
        }
    }

    /// Offers a candidate; returns a record if it beats the global best.
    pub fn offer(&mut self, candidate: Candidate<R::Key>) -> Option<Record<R::Key>> {
        let improved = match &self.best {
            None => true,
            Some(best) => self.ranker.is_better(best, &candidate.rank),
        };

        if !improved {
            log::trace!(
                "dropping candidate from worker {}: not a global improvement",
                candidate.worker_id
            );
            return None;
        }

        self.best = Some(candidate.rank.clone());
        self.records += 1;

        Some(Record {
            candidate,
            elapsed: self.start_time.elapsed(),
            index: self.records,
        })
    }

    /// Returns the current global best, if any candidate has been accepted.
    pub fn best(&self) -> Option<&R::Key> {
        self.best.as_ref()
    }

    /// Returns the number of records produced so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn ranker(&self) -> &R {
        &self.ranker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Keypair, PublicKey, PUBLIC_KEY_LEN};
    use crate::matcher::{is_better, PublicKeyRanker};

    fn candidate(head: u8, worker_id: usize) -> Candidate<PublicKey> {
        let mut pk = [0x33; PUBLIC_KEY_LEN];
        pk[0] = head;
        Candidate {
            keypair: Keypair::from_parts([0; 64], pk),
            rank: pk,
            worker_id,
        }
    }

    #[test]
    fn test_first_candidate_always_recorded() {
        let mut agg = Aggregator::new(PublicKeyRanker, Instant::now());
        assert!(agg.best().is_none());

        // Even the worst possible key is reported when nothing is set yet
        let record = agg.offer(candidate(0xff, 0)).unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(agg.best().unwrap()[0], 0xff);
    }

    #[test]
    fn test_out_of_order_candidates_dropped() {
        let mut agg = Aggregator::new(PublicKeyRanker, Instant::now());
        let arrivals = [(0x50, 0), (0x20, 1), (0x40, 0), (0x20, 2), (0x10, 1)];

        let records: Vec<_> = arrivals
            .iter()
            .filter_map(|&(head, worker)| agg.offer(candidate(head, worker)))
            .collect();

        let heads: Vec<u8> = records.iter().map(|r| r.candidate.rank[0]).collect();
        assert_eq!(heads, vec![0x50, 0x20, 0x10]);
        for pair in records.windows(2) {
            assert!(is_better(&pair[0].candidate.rank, &pair[1].candidate.rank));
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
        assert_eq!(agg.records(), 3);
    }

    #[test]
    fn test_failure_propagates() {
        let mut agg = Aggregator::new(PublicKeyRanker, Instant::now());
        let error = KeygenError::EntropySource(rand::Error::new(std::io::Error::other("broken")));
        let result = agg.handle(WorkerEvent::Failed { worker_id: 3, error });
        assert!(matches!(result, Err(KeygenError::EntropySource(_))));
        assert!(agg.best().is_none());
    }
}
