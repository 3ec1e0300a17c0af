//! # Shared Types Crate
//!
//! Types shared by the Freehold subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Amount` and `Timestamp` are
//!   defined once and used by every subsystem.
//! - **Explicit Permissions**: Role checks are table lookups
//!   ([`AccessControl`]), never trait hierarchies.
//! - **Injected Time**: Subsystems read time through [`TimeSource`].

pub mod access;
pub mod entities;
pub mod errors;
pub mod time;

pub use access::{AccessControl, Role};
pub use entities::*;
pub use errors::*;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
