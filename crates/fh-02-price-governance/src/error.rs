//! Error types for the Price Governance subsystem

use crate::domain::RecommendationStatus;
use shared_types::{AccessError, Amount};
use thiserror::Error;

/// Price Governance errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// Caller lacks the role required by the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AccessError),

    /// Zero prices are rejected
    #[error("Invalid price: must be greater than zero")]
    InvalidPrice,

    /// Confidence score above the maximum
    #[error("Invalid confidence score {score}: must be at most {max}")]
    InvalidConfidenceScore { score: u8, max: u8 },

    #[error("Justification must not be empty")]
    EmptyJustification,

    /// Justification longer than the configured maximum (in characters)
    #[error("Justification too long: {length} characters, max {max}")]
    JustificationTooLong { length: usize, max: usize },

    /// Proposed price outside the deviation bound around the current price
    #[error("Price {price} out of bounds [{min}, {max}]")]
    PriceOutOfBounds {
        price: Amount,
        min: Amount,
        max: Amount,
    },

    /// Id is 0 or greater than the number of recommendations
    #[error("Invalid recommendation id {id} (count {count})")]
    InvalidRecommendationId { id: u64, count: u64 },

    /// Recommendation is already in a terminal state
    #[error("Recommendation {id} already processed: {status}")]
    AlreadyProcessed {
        id: u64,
        status: RecommendationStatus,
    },
}

impl GovernanceError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GovernanceError::Unauthorized(_) => "unauthorized",
            GovernanceError::InvalidPrice => "invalid_price",
            GovernanceError::InvalidConfidenceScore { .. } => "invalid_confidence_score",
            GovernanceError::EmptyJustification => "empty_justification",
            GovernanceError::JustificationTooLong { .. } => "justification_too_long",
            GovernanceError::PriceOutOfBounds { .. } => "price_out_of_bounds",
            GovernanceError::InvalidRecommendationId { .. } => "invalid_recommendation_id",
            GovernanceError::AlreadyProcessed { .. } => "already_processed",
        }
    }
}

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
