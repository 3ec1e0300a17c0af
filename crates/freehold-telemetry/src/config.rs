//! Telemetry configuration.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `FH_SERVICE_NAME` | `freehold` | `service_name` |
//! | `FH_LOG_LEVEL`, then `RUST_LOG` | `info` | `log_level` |
//! | `FH_LOG_FORMAT` | `json` in containers, else `pretty` | `format` |
//! | `FH_CONSOLE_OUTPUT` | `true` | `console_output` |
//! | `FH_METRICS_ENABLED` | `true` | `metrics_enabled` |

use std::env;

/// Log line rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, coloured
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Attached to the startup log line
    pub service_name: String,

    /// `EnvFilter` directive, e.g. `info` or `fh_03_yield_distribution=debug`
    pub log_level: String,

    pub format: LogFormat,

    /// When false, the filter is installed without an output layer
    pub console_output: bool,

    /// Register Prometheus collectors at startup
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "freehold".to_string(),
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            console_output: true,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let in_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();
        if in_container {
            config.format = LogFormat::Json;
        }

        if let Some(name) = lookup("FH_SERVICE_NAME") {
            config.service_name = name;
        }
        if let Some(level) = lookup("FH_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }
        if let Some(format) = lookup("FH_LOG_FORMAT").as_deref().and_then(LogFormat::parse) {
            config.format = format;
        }
        if let Some(flag) = lookup("FH_CONSOLE_OUTPUT").as_deref().and_then(parse_flag) {
            config.console_output = flag;
        }
        if let Some(flag) = lookup("FH_METRICS_ENABLED").as_deref().and_then(parse_flag) {
            config.metrics_enabled = flag;
        }
        config
    }
}

/// `true/1/yes/on` or `false/0/no/off`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
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
    fn test_defaults_without_environment() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config.service_name, "freehold");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.console_output);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_containers_default_to_json() {
        let config = TelemetryConfig::from_lookup(lookup(&[("DOCKER_CONTAINER", "1")]));
        assert_eq!(config.format, LogFormat::Json);

        let config = TelemetryConfig::from_lookup(lookup(&[
            ("DOCKER_CONTAINER", "1"),
            ("FH_LOG_FORMAT", "pretty"),
        ]));
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_level_precedence() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("FH_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.log_level, "debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_unparseable_flags_keep_defaults() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("FH_METRICS_ENABLED", "off"),
            ("FH_CONSOLE_OUTPUT", "sometimes"),
            ("FH_LOG_FORMAT", "xml"),
        ]));
        assert!(!config.metrics_enabled);
        assert!(config.console_output);
        assert_eq!(config.format, LogFormat::Pretty);
    }
}
