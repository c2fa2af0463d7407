//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CLEANUP_INTERVAL_SECS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// TTLs and the preload routing table are compiled in and not configurable.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Origin of the upstream Wakademy API
    pub api_base_url: String,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Whether the periodic sweep runs at all
    pub sweep_enabled: bool,
    /// Queue the essential preload set at startup
    pub preload_on_startup: bool,
    /// Seconds to wait for the preloader to drain on shutdown
    pub shutdown_grace: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `API_BASE_URL` - Upstream API origin (default: http://localhost:3001)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 600)
    /// - `CACHE_SWEEP_ENABLED` - Run the periodic sweep (default: true)
    /// - `PRELOAD_ON_STARTUP` - Warm essential content at boot (default: true)
    /// - `SHUTDOWN_GRACE` - Preloader drain timeout in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            sweep_enabled: env_or("CACHE_SWEEP_ENABLED", defaults.sweep_enabled),
            preload_on_startup: env_or("PRELOAD_ON_STARTUP", defaults.preload_on_startup),
            shutdown_grace: env_or("SHUTDOWN_GRACE", defaults.shutdown_grace),
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_base_url: "http://localhost:3001".to_string(),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL_SECS,
            sweep_enabled: true,
            preload_on_startup: true,
            shutdown_grace: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.cleanup_interval, 600);
        assert!(config.sweep_enabled);
        assert!(config.preload_on_startup);
        assert_eq!(config.shutdown_grace(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("API_BASE_URL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CACHE_SWEEP_ENABLED");
        env::remove_var("PRELOAD_ON_STARTUP");
        env::remove_var("SHUTDOWN_GRACE");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 600);
        assert!(config.sweep_enabled);
    }

    #[test]
    fn test_env_or_ignores_unparseable_values() {
        env::set_var("WAKADEMY_TEST_BOGUS_BOOL", "maybe");
        assert!(env_or("WAKADEMY_TEST_BOGUS_BOOL", true));
        env::set_var("WAKADEMY_TEST_BOGUS_BOOL", "false");
        assert!(!env_or("WAKADEMY_TEST_BOGUS_BOOL", true));
        env::remove_var("WAKADEMY_TEST_BOGUS_BOOL");
    }

    #[test]
    fn test_cleanup_interval_never_zero() {
        let config = Config {
            cleanup_interval: 0,
            ..Config::default()
        };
        assert_eq!(config.cleanup_interval(), Duration::from_secs(1));
    }
}
