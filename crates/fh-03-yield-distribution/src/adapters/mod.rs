//! Adapters for Yield Distribution

pub mod memory_vault;

pub use memory_vault::InMemoryPaymentVault;
