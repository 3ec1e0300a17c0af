//! Domain module for Price Governance
//!
//! - bounds: deviation bound around the current price
//! - config: governance configuration
//! - recommendation: recommendation record and its lifecycle

pub mod bounds;
pub mod config;
pub mod recommendation;

pub use bounds::PriceBounds;
pub use config::GovernanceConfig;
pub use recommendation::{Decision, PriceRecommendation, RecommendationStatus};
