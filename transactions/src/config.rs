//! Transaction-building configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use votelink_types::NetworkType;

use crate::TransactionError;

/// Network-level settings used when building transactions locally.
///
/// Can be loaded from a TOML file via [`TransactionConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfig {
    /// Which network transactions are built for.
    #[serde(default = "default_network_type")]
    pub network_type: NetworkType,

    /// Seconds between the Unix epoch and the network epoch.
    #[serde(default = "default_epoch_adjustment_secs")]
    pub epoch_adjustment_secs: u64,

    /// How far in the future new deadlines are set, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Fee ceiling written into new transactions.
    #[serde(default)]
    pub max_fee: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network_type() -> NetworkType {
    NetworkType::TestNet
}

fn default_epoch_adjustment_secs() -> u64 {
    1_667_250_467
}

fn default_deadline_secs() -> u64 {
    2 * 3600
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TransactionConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TransactionError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TransactionError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TransactionError> {
        toml::from_str(s).map_err(|e| TransactionError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, TransactionError> {
        toml::to_string_pretty(self).map_err(|e| TransactionError::Config(e.to_string()))
    }
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            network_type: default_network_type(),
            epoch_adjustment_secs: default_epoch_adjustment_secs(),
            deadline_secs: default_deadline_secs(),
            max_fee: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = TransactionConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = TransactionConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = TransactionConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network_type, NetworkType::TestNet);
        assert_eq!(config.deadline_secs, 7200);
        assert_eq!(config.max_fee, 0);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network_type = "mainnet"
            epoch_adjustment_secs = 1615853185
            max_fee = 2000
        "#;
        let config = TransactionConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network_type, NetworkType::MainNet);
        assert_eq!(config.epoch_adjustment_secs, 1_615_853_185);
        assert_eq!(config.max_fee, 2000);
        assert_eq!(config.deadline_secs, 7200); // default
    }

    #[test]
    fn unknown_network_is_config_error() {
        let result = TransactionConfig::from_toml_str(r#"network_type = "moonnet""#);
        assert!(matches!(result, Err(TransactionError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "deadline_secs = 600").unwrap();
        let config = TransactionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.deadline_secs, 600);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = TransactionConfig::from_toml_file("/nonexistent/votelink.toml");
        assert!(matches!(result, Err(TransactionError::Config(_))));
    }
}
