//! # ygg_vanity
//!
//! Brute-force vanity key search for Yggdrasil node keys. Workers generate
//! ed25519 keypairs and keep the best one according to a ranking rule; every
//! new global best is reported with its derived address.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation, address and tree identifier derivation
//! - `matcher`: Hex-word scoring and ranking rules
//! - `worker`: Parallel workers, worker pool and the aggregator
//! - `config`: Runtime configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod worker;

pub use config::Config;
pub use crypto::{Address, KeygenError, Keypair, TreeId};
pub use matcher::{PublicKeyRanker, Ranker, TreeIdRanker, WordScorer};
pub use worker::{Aggregator, Candidate, Record, WorkerEvent, WorkerPool};
