//! TOML configuration for the `liftlog` binary.
//!
//! Every section and key is optional; a missing file, section, or key falls
//! back to its default. Command-line flags override whatever the file says.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use usecases::DEFAULT_COUNTER_KEY;

use crate::observability::{LogFormat, LogLevel};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub counter: CounterConfig,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    /// OTLP gRPC collector endpoint, e.g. `http://localhost:4317`. Spans are
    /// only exported when this is set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

/// `[counter]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CounterConfig {
    /// Storage key the counter lives under.
    #[serde(default = "default_counter_key")]
    pub key: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            key: default_counter_key(),
        }
    }
}

fn default_counter_key() -> String {
    DEFAULT_COUNTER_KEY.to_string()
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("invalid configuration file")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.counter.key.trim().is_empty() {
            anyhow::bail!("counter.key must not be empty");
        }
        if let Some(endpoint) = &self.logging.otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("logging.otlp_endpoint must not be empty when set");
            }
        }
        Ok(())
    }
}
