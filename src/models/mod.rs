// Model exports
pub mod requests;
pub mod responses;

pub use requests::PairRequest;
pub use responses::{DualPairResponse, ErrorResponse, HealthResponse, PairResponse, PairingSummary};
