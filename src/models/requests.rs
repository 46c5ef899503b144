use crate::core::ScoredPairs;
use crate::error::PairingError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to pair scored requester/acceptor sequences
///
/// The three sequences are parallel: element `i` of each forms one scored pair.
/// The length caps are hard ceilings that hold even when `matching.max_pairs`
/// is configured above them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairRequest {
    #[validate(length(max = 1000000))]
    pub requesters: Vec<String>,
    #[validate(length(max = 1000000))]
    pub acceptors: Vec<String>,
    #[validate(length(max = 1000000))]
    pub scores: Vec<f64>,
    #[validate(length(max = 100000))]
    #[serde(default, alias = "extra_requesters", rename = "extraRequesters")]
    pub extra_requesters: Vec<String>,
    #[validate(length(max = 100000))]
    #[serde(default, alias = "extra_acceptors", rename = "extraAcceptors")]
    pub extra_acceptors: Vec<String>,
}

impl PairRequest {
    /// Entries counted against the per-request limit
    ///
    /// The longest of the three sequences plus every registered extra, so a
    /// body cannot grow past the limit through the extras alone.
    pub fn entry_count(&self) -> usize {
        self.requesters
            .len()
            .max(self.acceptors.len())
            .max(self.scores.len())
            + self.extra_requesters.len()
            + self.extra_acceptors.len()
    }

    pub fn to_scored_pairs(&self) -> Result<ScoredPairs<String>, PairingError> {
        let mut pairs = ScoredPairs::from_columns(&self.requesters, &self.acceptors, &self.scores)?;
        for requester in &self.extra_requesters {
            pairs.register_requester(requester.clone());
        }
        for acceptor in &self.extra_acceptors {
            pairs.register_acceptor(acceptor.clone());
        }
        Ok(pairs)
    }
}
