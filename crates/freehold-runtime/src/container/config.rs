//! # Asset Configuration
//!
//! Parameters for one fractionalised asset: token metadata, genesis
//! allocation, pricing and distribution limits.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FH_ASSET_NAME` | `name` |
//! | `FH_ASSET_SYMBOL` | `symbol` |
//! | `FH_DECIMALS` | `decimals` |
//! | `FH_ADMIN` | `admin` (hex address) |
//! | `FH_INITIAL_HOLDER` | `initial_holder` (hex address) |
//! | `FH_INITIAL_SUPPLY` | `initial_supply` |
//! | `FH_INITIAL_PRICE` | `initial_price` |
//! | `FH_VALUATION` | `valuation` |
//! | `FH_MAX_DEVIATION_BPS` | `max_deviation_bps` |
//! | `FH_MAX_HOLDERS` | `max_registered_holders` |
//! | `FH_PAYMENT_DECIMALS` | `payment_decimals` |
//! | `FH_VALUATION_DECIMALS` | `valuation_decimals` |
//! | `FH_ENFORCE_PRICE_FLOOR` | `enforce_price_floor` |

use fh_01_ownership_ledger::LedgerConfig;
use fh_02_price_governance::GovernanceConfig;
use fh_03_yield_distribution::DistributionConfig;
use shared_types::{is_zero_address, parse_address, Address, Amount, ZERO_ADDRESS};
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },

    /// A required address is the zero address.
    #[error("{field} must not be the zero address")]
    ZeroAddress { field: &'static str },

    /// A required amount or limit is zero.
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    /// Token name or symbol is empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Complete asset configuration.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Display decimals of ownership units.
    pub decimals: u8,
    /// Receives every administrative role at genesis.
    pub admin: Address,
    /// Receives the initial supply, whitelisted and registered at genesis.
    pub initial_holder: Address,
    pub initial_supply: Amount,
    /// Governed price at genesis.
    pub initial_price: Amount,
    /// Asset valuation used for annualised yield.
    pub valuation: Amount,
    /// Allowed deviation of a recommendation from the current price.
    pub max_deviation_bps: u128,
    pub max_registered_holders: usize,
    pub payment_decimals: u8,
    pub valuation_decimals: u8,
    /// Reject rental payments below the governed current price.
    pub enforce_price_floor: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let ledger = LedgerConfig::default();
        let governance = GovernanceConfig::default();
        let distribution = DistributionConfig::default();
        Self {
            name: ledger.name,
            symbol: ledger.symbol,
            decimals: ledger.decimals,
            admin: ZERO_ADDRESS, // MUST be overridden
            initial_holder: ZERO_ADDRESS,
            initial_supply: 0,
            initial_price: 0,
            valuation: distribution.valuation,
            max_deviation_bps: governance.max_deviation_bps,
            max_registered_holders: distribution.max_registered_holders,
            payment_decimals: distribution.payment_decimals,
            valuation_decimals: distribution.valuation_decimals,
            enforce_price_floor: false,
        }
    }
}

impl AssetConfig {
    /// Local development asset with fixed addresses.
    pub fn devnet() -> Self {
        Self {
            name: "Freehold Devnet Property".to_string(),
            symbol: "FHDEV".to_string(),
            admin: [0xAD; 20],
            initial_holder: [0x01; 20],
            initial_supply: 1_000,
            initial_price: 2_000,
            ..Default::default()
        }
    }

    /// Default configuration with `FH_*` environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, keyed by `FH_*` variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(name) = lookup("FH_ASSET_NAME") {
            self.name = name;
        }
        if let Some(symbol) = lookup("FH_ASSET_SYMBOL") {
            self.symbol = symbol;
        }
        override_parsed(&lookup, "FH_DECIMALS", &mut self.decimals)?;
        override_address(&lookup, "FH_ADMIN", &mut self.admin)?;
        override_address(&lookup, "FH_INITIAL_HOLDER", &mut self.initial_holder)?;
        override_parsed(&lookup, "FH_INITIAL_SUPPLY", &mut self.initial_supply)?;
        override_parsed(&lookup, "FH_INITIAL_PRICE", &mut self.initial_price)?;
        override_parsed(&lookup, "FH_VALUATION", &mut self.valuation)?;
        override_parsed(&lookup, "FH_MAX_DEVIATION_BPS", &mut self.max_deviation_bps)?;
        override_parsed(&lookup, "FH_MAX_HOLDERS", &mut self.max_registered_holders)?;
        override_parsed(&lookup, "FH_PAYMENT_DECIMALS", &mut self.payment_decimals)?;
        override_parsed(&lookup, "FH_VALUATION_DECIMALS", &mut self.valuation_decimals)?;
        override_parsed(&lookup, "FH_ENFORCE_PRICE_FLOOR", &mut self.enforce_price_floor)?;
        Ok(self)
    }

    /// Reject configurations genesis cannot build from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Empty { field: "name" });
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Empty { field: "symbol" });
        }
        if is_zero_address(&self.admin) {
            return Err(ConfigError::ZeroAddress { field: "admin" });
        }
        if is_zero_address(&self.initial_holder) {
            return Err(ConfigError::ZeroAddress {
                field: "initial_holder",
            });
        }
        if self.initial_price == 0 {
            return Err(ConfigError::ZeroValue {
                field: "initial_price",
            });
        }
        if self.valuation == 0 {
            return Err(ConfigError::ZeroValue { field: "valuation" });
        }
        if self.max_registered_holders == 0 {
            return Err(ConfigError::ZeroValue {
                field: "max_registered_holders",
            });
        }
        Ok(())
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            ..LedgerConfig::default()
        }
    }

    pub fn governance_config(&self) -> GovernanceConfig {
        GovernanceConfig {
            max_deviation_bps: self.max_deviation_bps,
            ..GovernanceConfig::default()
        }
    }

    pub fn distribution_config(&self) -> DistributionConfig {
        DistributionConfig {
            max_registered_holders: self.max_registered_holders,
            valuation: self.valuation,
            payment_decimals: self.payment_decimals,
            valuation_decimals: self.valuation_decimals,
            ..DistributionConfig::default()
        }
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value })?;
    }
    Ok(())
}

fn override_address(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    target: &mut Address,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *target = parse_address(&value).ok_or(ConfigError::InvalidVar { var, value })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_requires_addresses() {
        assert_eq!(
            AssetConfig::default().validate(),
            Err(ConfigError::ZeroAddress { field: "admin" })
        );
        assert!(AssetConfig::devnet().validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = AssetConfig::devnet()
            .with_overrides(lookup(&[
                ("FH_ASSET_SYMBOL", "MAPLE"),
                ("FH_INITIAL_SUPPLY", "5000"),
                ("FH_ADMIN", "0x0202020202020202020202020202020202020202"),
                ("FH_ENFORCE_PRICE_FLOOR", "true"),
            ]))
            .unwrap();
        assert_eq!(config.symbol, "MAPLE");
        assert_eq!(config.initial_supply, 5_000);
        assert_eq!(config.admin, [0x02; 20]);
        assert!(config.enforce_price_floor);
        assert_eq!(config.initial_price, 2_000);
    }

    #[test]
    fn test_invalid_override_reported() {
        let err = AssetConfig::devnet()
            .with_overrides(lookup(&[("FH_VALUATION", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVar {
                var: "FH_VALUATION",
                value: "lots".to_string()
            }
        );

        let err = AssetConfig::devnet()
            .with_overrides(lookup(&[("FH_INITIAL_HOLDER", "0x1234")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "FH_INITIAL_HOLDER", .. }));
    }

    #[test]
    fn test_validation_rules() {
        let mut config = AssetConfig::devnet();
        config.valuation = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroValue { field: "valuation" }));

        let mut config = AssetConfig::devnet();
        config.symbol = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::Empty { field: "symbol" }));
    }

    #[test]
    fn test_subsystem_configs() {
        let mut config = AssetConfig::devnet();
        config.max_deviation_bps = 1_000;
        config.max_registered_holders = 7;
        assert_eq!(config.governance_config().max_deviation_bps, 1_000);
        assert_eq!(config.distribution_config().max_registered_holders, 7);
        assert_eq!(config.ledger_config().symbol, "FHDEV");
    }
}
