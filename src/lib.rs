//! Stable Pairs - deferred-acceptance pairing of scored requesters and acceptors
//!
//! This library computes a stable one-to-one pairing between requesters and
//! acceptors from a shared affinity score per candidate pair. Requesters
//! propose in descending score order; acceptors hold the best offer seen so
//! far and switch only for a strictly higher score.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    stable_pairs, DualPairing, DuplicatePairs, Matcher, PairingResult, ScoredPair, ScoredPairs,
};
pub use error::PairingError;
pub use models::{PairRequest, PairResponse, DualPairResponse};
