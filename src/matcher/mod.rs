//! Candidate evaluation for node keys.
//!
//! Two independent checks decide whether a key is worth reporting:
//! - Word scoring: how many hex words appear in the address
//! - Ranking: whether the key beats the best one seen so far

mod rank;
mod words;

pub use rank::{is_better, PublicKeyRanker, Ranker, TreeIdRanker};
pub use words::{WordScorer, HEX_WORDS, MAX_WORD_HITS};
