use crate::core::{DualPairing, PairingResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Both mappings of one run plus its statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingSummary {
    #[serde(rename = "requesterToAcceptor")]
    pub requester_to_acceptor: BTreeMap<String, Option<String>>,
    #[serde(rename = "acceptorToRequester")]
    pub acceptor_to_requester: BTreeMap<String, Option<String>>,
    pub rounds: usize,
    pub proposals: usize,
    #[serde(rename = "matchedCount")]
    pub matched_count: usize,
}

impl From<PairingResult<String>> for PairingSummary {
    fn from(result: PairingResult<String>) -> Self {
        let matched_count = result.matched_count();
        Self {
            requester_to_acceptor: result.requester_to_acceptor,
            acceptor_to_requester: result.acceptor_to_requester,
            rounds: result.rounds,
            proposals: result.proposals,
            matched_count,
        }
    }
}

/// Response for the pairing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    #[serde(flatten)]
    pub pairing: PairingSummary,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the role-swap pairing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualPairResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    pub forward: PairingSummary,
    pub swapped: PairingSummary,
    pub mirrored: bool,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

impl DualPairResponse {
    pub fn new(run_id: String, dual: DualPairing<String>) -> Self {
        let mirrored = dual.is_mirrored();
        Self {
            run_id,
            forward: dual.forward.into(),
            swapped: dual.swapped.into(),
            mirrored,
            computed_at: chrono::Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
