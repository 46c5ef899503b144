// Core algorithm exports
pub mod matcher;
pub mod preferences;
pub mod stability;

pub use matcher::{stable_pairs, DualPairing, Matcher, PairingResult};
pub use preferences::{DuplicatePairs, ScoredPair, ScoredPairs};
pub use stability::{blocking_pairs, is_mutual_inverse, is_stable};
