//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `PUBLIC_BASE_URL` - Prefix joined with the code to form the short URL
//!   (default: `http://localhost:8080/r`)
//! - `STORE_BACKEND` - `memory` or `file` (default: `file`)
//! - `STORE_FILE` - JSON file used by the `file` backend (default: `Data.json`)
//! - `PROBE_POLICY` - `warn`, `strict` or `off` (default: `warn`)
//! - `PROBE_TIMEOUT_SECONDS` - Reachability probe timeout, 1..=60 (default: 5)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Nothing is required; an empty environment runs a file-backed server on
//! port 8080.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which [`AliasStore`](crate::domain::repositories::AliasStore) the server builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Transient table, lost on restart.
    Memory,
    /// Single JSON file on disk.
    File,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => anyhow::bail!("STORE_BACKEND must be 'memory' or 'file', got '{}'", other),
        }
    }
}

/// What `shorten` does when the reachability probe fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePolicy {
    /// Store the alias anyway and attach a warning to the response.
    Warn,
    /// Reject the request with `502 Bad Gateway`.
    Strict,
    /// Skip probing entirely.
    Off,
}

impl ProbePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Strict => "strict",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for ProbePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "warn" => Ok(Self::Warn),
            "strict" => Ok(Self::Strict),
            "off" => Ok(Self::Off),
            other => anyhow::bail!(
                "PROBE_POLICY must be 'warn', 'strict' or 'off', got '{}'",
                other
            ),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Joined with `/` and the code to build the returned short URL.
    pub public_base_url: String,
    pub store_backend: StoreBackend,
    /// Only read when `store_backend` is [`StoreBackend::File`].
    pub store_file: String,
    pub probe_policy: ProbePolicy,
    pub probe_timeout_seconds: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            public_base_url: "http://localhost:8080/r".to_string(),
            store_backend: StoreBackend::File,
            store_file: "Data.json".to_string(),
            probe_policy: ProbePolicy::Warn,
            probe_timeout_seconds: 5,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an enum-valued variable holds an unknown value or
    /// `PROBE_TIMEOUT_SECONDS` is not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let public_base_url = env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url);

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse().context("Failed to read STORE_BACKEND")?,
            Err(_) => defaults.store_backend,
        };
        let store_file = env::var("STORE_FILE").unwrap_or(defaults.store_file);

        let probe_policy = match env::var("PROBE_POLICY") {
            Ok(v) => v.parse().context("Failed to read PROBE_POLICY")?,
            Err(_) => defaults.probe_policy,
        };
        let probe_timeout_seconds = match env::var("PROBE_TIMEOUT_SECONDS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PROBE_TIMEOUT_SECONDS must be a number, got '{}'", v))?,
            Err(_) => defaults.probe_timeout_seconds,
        };

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            public_base_url,
            store_backend,
            store_file,
            probe_policy,
            probe_timeout_seconds,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `public_base_url` is not an `http(s)://` URL
    /// - `store_file` is empty while the file backend is selected
    /// - `probe_timeout_seconds` is outside 1..=60
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "PUBLIC_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.public_base_url
            );
        }

        if self.store_backend == StoreBackend::File && self.store_file.trim().is_empty() {
            anyhow::bail!("STORE_FILE must not be empty when STORE_BACKEND=file");
        }

        if !(1..=60).contains(&self.probe_timeout_seconds) {
            anyhow::bail!(
                "PROBE_TIMEOUT_SECONDS must be between 1 and 60, got {}",
                self.probe_timeout_seconds
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Public base URL: {}", self.public_base_url);
        match self.store_backend {
            StoreBackend::File => tracing::info!("  Store: file ({})", self.store_file),
            StoreBackend::Memory => tracing::info!("  Store: memory (not persisted)"),
        }
        tracing::info!(
            "  Probe: {} (timeout {}s)",
            self.probe_policy,
            self.probe_timeout_seconds
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "PUBLIC_BASE_URL",
        "STORE_BACKEND",
        "STORE_FILE",
        "PROBE_POLICY",
        "PROBE_TIMEOUT_SECONDS",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:8080".to_string();

        config.public_base_url = "localhost:8080/r".to_string();
        assert!(config.validate().is_err());

        config.public_base_url = "https://s.example.com".to_string();

        config.probe_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.probe_timeout_seconds = 61;
        assert!(config.validate().is_err());
        config.probe_timeout_seconds = 10;

        config.store_file = "  ".to_string();
        assert!(config.validate().is_err());

        config.store_backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("FILE".parse::<StoreBackend>().unwrap(), StoreBackend::File);
        assert!("redis".parse::<StoreBackend>().is_err());

        assert_eq!("warn".parse::<ProbePolicy>().unwrap(), ProbePolicy::Warn);
        assert_eq!("Strict".parse::<ProbePolicy>().unwrap(), ProbePolicy::Strict);
        assert_eq!("off".parse::<ProbePolicy>().unwrap(), ProbePolicy::Off);
        assert!("sometimes".parse::<ProbePolicy>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.public_base_url, "http://localhost:8080/r");
        assert_eq!(config.store_backend, StoreBackend::File);
        assert_eq!(config.store_file, "Data.json");
        assert_eq!(config.probe_policy, ProbePolicy::Warn);
        assert_eq!(config.probe_timeout_seconds, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LISTEN", "127.0.0.1:9000");
            env::set_var("PUBLIC_BASE_URL", "https://s.example.com/r");
            env::set_var("STORE_BACKEND", "memory");
            env::set_var("PROBE_POLICY", "strict");
            env::set_var("PROBE_TIMEOUT_SECONDS", "2");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.public_base_url, "https://s.example.com/r");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.probe_policy, ProbePolicy::Strict);
        assert_eq!(config.probe_timeout_seconds, 2);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_backend() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("STORE_BACKEND", "postgres");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_timeout() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PROBE_TIMEOUT_SECONDS", "soon");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
