use thiserror::Error;

/// Errors raised while validating pairing input
///
/// All variants are detected before the proposal loop starts, so a failed
/// call never produces a partial pairing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PairingError {
    #[error("Invalid input: parallel sequences differ in length (requesters: {requesters}, acceptors: {acceptors}, scores: {scores})")]
    InvalidInput {
        requesters: usize,
        acceptors: usize,
        scores: usize,
    },

    #[error("Invalid score at index {index}: {score} is not totally ordered")]
    InvalidScore { index: usize, score: f64 },

    #[error("Duplicate pair at index {index}: pair already scored earlier in the input")]
    DuplicatePair { index: usize },
}

impl PairingError {
    /// Short machine-readable code used in error responses
    pub fn code(&self) -> &'static str {
        match self {
            PairingError::InvalidInput { .. } => "invalid_input",
            PairingError::InvalidScore { .. } => "invalid_score",
            PairingError::DuplicatePair { .. } => "duplicate_pair",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PairingError::InvalidInput {
            requesters: 2,
            acceptors: 3,
            scores: 2,
        };
        assert!(err.to_string().contains("acceptors: 3"));
        assert_eq!(err.code(), "invalid_input");

        let err = PairingError::InvalidScore { index: 4, score: f64::NAN };
        assert!(err.to_string().contains("index 4"));
        assert_eq!(err.code(), "invalid_score");
    }
}
