//! # Genesis
//!
//! Builds the three subsystem services for a new asset.

pub mod builder;

pub use builder::{FreeholdDistributor, Genesis, GenesisBuilder, GenesisError};
