//! Price recommendation lifecycle
//!
//! State Machine:
//! ```text
//! [PENDING] ──accept──→ [ACCEPTED]   (terminal)
//!     │
//!     └──────reject──→ [REJECTED]   (terminal)
//! ```
//!
//! No other transitions exist. A terminal record never changes again.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp};
use std::fmt;

/// Recommendation status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationStatus {
    /// Awaiting a manager decision
    #[default]
    Pending,
    /// Accepted; its price became the current price
    Accepted,
    /// Rejected; current price unchanged
    Rejected,
}

impl RecommendationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecommendationStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "pending",
            RecommendationStatus::Accepted => "accepted",
            RecommendationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manager decision on a pending recommendation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    fn target(self) -> RecommendationStatus {
        match self {
            Decision::Accept => RecommendationStatus::Accepted,
            Decision::Reject => RecommendationStatus::Rejected,
        }
    }
}

/// A submitted price recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    /// Sequential id, starting at 1
    pub id: u64,
    pub price: Amount,
    /// 0..=100
    pub confidence: u8,
    pub justification: String,
    pub created_at: Timestamp,
    pub status: RecommendationStatus,
    pub submitter: Address,
    /// Set when the record reaches a terminal state
    pub processed_at: Option<Timestamp>,
    pub processed_by: Option<Address>,
}

impl PriceRecommendation {
    pub fn new(
        id: u64,
        price: Amount,
        confidence: u8,
        justification: String,
        submitter: Address,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            price,
            confidence,
            justification,
            created_at,
            status: RecommendationStatus::Pending,
            submitter,
            processed_at: None,
            processed_by: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RecommendationStatus::Pending
    }

    /// Apply a decision.
    ///
    /// Returns the current (terminal) status as the error if the record was
    /// already processed; the record is left untouched in that case.
    pub fn decide(
        &mut self,
        decision: Decision,
        by: Address,
        at: Timestamp,
    ) -> Result<RecommendationStatus, RecommendationStatus> {
        if self.status.is_terminal() {
            return Err(self.status);
        }
        self.status = decision.target();
        self.processed_at = Some(at);
        self.processed_by = Some(by);
        Ok(self.status)
    }
}
