//! Ports for Price Governance
//!
//! Time is the only driven dependency and comes from `shared_types::TimeSource`.

pub mod inbound;

pub use inbound::PriceGovernanceApi;
