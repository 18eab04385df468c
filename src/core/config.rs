//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and an optional `.env` file) once at startup. The
//! resulting values are immutable for the lifetime of the process.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default number of decimal digits results are rounded to.
pub const DEFAULT_MAX_PRECISION: i32 = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Evaluator configuration.
    pub calculator: CalculatorConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the calculator domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Number of decimal digits every result is rounded to (`MAX_PRECISION`).
    /// Negative values round to tens, hundreds and so on.
    pub max_precision: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_precision: DEFAULT_MAX_PRECISION,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read the log level from the environment (after loading `.env`).
    ///
    /// `main` calls this to start logging before the full configuration is read.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL").or_else(|_| std::env::var("LOG_LEVEL")) {
            logging.level = level;
        }
        logging
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "calculator".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            calculator: CalculatorConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `MAX_PRECISION` and `LOG_LEVEL` are read unprefixed; the remaining
    /// settings use the `MCP_` prefix (`MCP_SERVER_NAME`, `MCP_TRANSPORT`, ...).
    /// `MCP_LOG_LEVEL` is accepted as an alias and wins over `LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        if let Ok(precision) = std::env::var("MAX_PRECISION") {
            config.calculator.max_precision = parse_precision(&precision);
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

fn parse_precision(value: &str) -> i32 {
    match value.trim().parse::<i32>() {
        Ok(precision) => precision,
        Err(e) => {
            warn!(
                "Invalid MAX_PRECISION '{}' ({}), using default {}",
                value, e, DEFAULT_MAX_PRECISION
            );
            DEFAULT_MAX_PRECISION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "calculator");
        assert_eq!(config.calculator.max_precision, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_precision_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MAX_PRECISION", "4");
        }
        let config = Config::from_env();
        assert_eq!(config.calculator.max_precision, 4);
        unsafe {
            std::env::remove_var("MAX_PRECISION");
        }
    }

    #[test]
    fn test_invalid_precision_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MAX_PRECISION", "lots");
        }
        let config = Config::from_env();
        assert_eq!(config.calculator.max_precision, DEFAULT_MAX_PRECISION);
        unsafe {
            std::env::remove_var("MAX_PRECISION");
        }
    }

    #[test]
    fn test_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::set_var("LOG_LEVEL", "debug");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");

        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "warn");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "warn");

        unsafe {
            std::env::remove_var("LOG_LEVEL");
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }

    #[test]
    fn test_parse_precision() {
        assert_eq!(parse_precision(" 3 "), 3);
        assert_eq!(parse_precision("-2"), -2);
        assert_eq!(parse_precision("2.5"), DEFAULT_MAX_PRECISION);
        assert_eq!(parse_precision(""), DEFAULT_MAX_PRECISION);
    }
}
