//! Ports for the Ownership Ledger
//!
//! The ledger has no driven dependencies; only the inbound API is defined.

pub mod inbound;

pub use inbound::OwnershipLedgerApi;
