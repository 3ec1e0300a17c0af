//! # fh-02-price-governance
//!
//! Bounded price recommendations and the single current price of the asset.
//!
//! ## Overview
//!
//! - Recommendations come from an external analysis pipeline and must fall
//!   within `max_deviation_bps` of the current price (inclusive)
//! - Managers accept or reject pending recommendations; both are terminal
//! - Accepting a recommendation is the only way the current price changes
//!
//! ## Lifecycle
//!
//! ```text
//! submit ──→ [PENDING] ──accept──→ [ACCEPTED]  (current price := price)
//!                 │
//!                 └──────reject──→ [REJECTED]
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fh_02_price_governance::{GovernanceConfig, PriceGovernance, PriceGovernanceApi};
//!
//! let governance = PriceGovernance::new(GovernanceConfig::default(), admin, 2_000, clock)?;
//! governance.grant_role(admin, Role::RecommendationSubmitter, analyst)?;
//! let id = governance.submit_recommendation(analyst, 2_100, 85, "comparable sales")?;
//! governance.accept_recommendation(admin, id)?;
//! assert_eq!(governance.current_price(), 2_100);
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::{
    Decision, GovernanceConfig, PriceBounds, PriceRecommendation, RecommendationStatus,
};
pub use error::{GovernanceError, GovernanceResult};
pub use events::GovernanceEvent;
pub use ports::PriceGovernanceApi;
pub use service::PriceGovernance;
