//! One-way capability flags.
//!
//! `controllable` and `issuable` start enabled and can only be switched off.
//! There is deliberately no method that turns a flag back on.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayFlag {
    enabled: bool,
}

impl OneWayFlag {
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch the flag off. Returns true if this call changed it.
    pub fn renounce(&mut self) -> bool {
        std::mem::replace(&mut self.enabled, false)
    }
}

impl Default for OneWayFlag {
    fn default() -> Self {
        Self::enabled()
    }
}
