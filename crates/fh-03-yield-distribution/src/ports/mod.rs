//! Ports for Yield Distribution

pub mod inbound;
pub mod outbound;

pub use inbound::YieldDistributionApi;
pub use outbound::{BalanceProvider, PaymentVault, PriceFeed};
