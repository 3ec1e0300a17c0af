//! # Asset Container
//!
//! Holds the services of one asset with their configuration.

pub mod config;
pub mod services;

pub use config::{AssetConfig, ConfigError};
pub use services::{AssetSnapshot, FreeholdContainer, FreeholdEvent};
