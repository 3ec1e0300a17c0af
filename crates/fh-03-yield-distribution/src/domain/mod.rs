//! Domain module for Yield Distribution
//!
//! - config: engine configuration
//! - holders: registered holder set
//! - payout: pro-rata split and annualised yield arithmetic
//! - record: distribution records and payout plans

pub mod config;
pub mod holders;
pub mod payout;
pub mod record;

pub use config::DistributionConfig;
pub use holders::RegisteredHolders;
pub use payout::{annualized_yield_bps, per_unit_amount, plan_payouts};
pub use record::{DistributionRecord, Payout, PayoutPlan};
