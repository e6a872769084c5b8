//! Processor configuration with TOML file support.

use std::path::Path;

use obol_crypto::NODE_ACCOUNT_FAMILY;
use obol_transactions::NODE_ACCOUNT_VERSION;
use obol_types::PublicKey;
use obol_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::ProcessorError;

/// Configuration for the node-account processor.
///
/// Can be loaded from a TOML file via [`ProcessorConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Transaction family served by the handler.
    #[serde(default = "default_family_name")]
    pub family_name: String,

    #[serde(default = "default_family_version")]
    pub family_version: String,

    /// Hex public key allowed to issue the genesis transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_authority: Option<String>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_family_name() -> String {
    NODE_ACCOUNT_FAMILY.to_string()
}

fn default_family_version() -> String {
    NODE_ACCOUNT_VERSION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ProcessorConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ProcessorError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ProcessorError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ProcessorError> {
        toml::from_str(s).map_err(|e| ProcessorError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ProcessorError> {
        toml::to_string_pretty(self).map_err(|e| ProcessorError::Config(e.to_string()))
    }

    /// Install the global subscriber with the configured format and level.
    pub fn init_logging(&self) -> Result<(), ProcessorError> {
        obol_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| ProcessorError::Config(e.to_string()))
    }

    /// The parsed genesis authority, if one is configured.
    pub fn genesis_authority_key(&self) -> Result<Option<PublicKey>, ProcessorError> {
        self.genesis_authority
            .as_deref()
            .map(|raw| {
                PublicKey::from_hex(raw)
                    .map_err(|e| ProcessorError::Config(format!("genesis_authority: {e}")))
            })
            .transpose()
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            family_name: default_family_name(),
            family_version: default_family_version(),
            genesis_authority: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ProcessorConfig {
            genesis_authority: Some("ab".repeat(32)),
            ..ProcessorConfig::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = ProcessorConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ProcessorConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.family_name, "node_account");
        assert_eq!(config.family_version, "0.1");
        assert_eq!(config.genesis_authority, None);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            log_format = "json"
            log_level = "debug"
        "#;
        let config = ProcessorConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.family_name, "node_account"); // default
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let result = ProcessorConfig::from_toml_str("log_format = \"xml\"");
        assert!(matches!(result, Err(ProcessorError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "genesis_authority = \"{}\"", "0f".repeat(32)).unwrap();
        let config = ProcessorConfig::from_toml_file(file.path()).unwrap();
        let key = config.genesis_authority_key().unwrap().unwrap();
        assert_eq!(key.to_hex(), "0f".repeat(32));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessorConfig::from_toml_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ProcessorError::Config(_))));
    }

    #[test]
    fn bad_log_level_is_config_error() {
        // RUST_LOG takes precedence over the configured level.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = ProcessorConfig {
            log_level: "obol_processor=loudest".into(),
            ..ProcessorConfig::default()
        };
        let err = config.init_logging().unwrap_err();
        assert!(matches!(&err, ProcessorError::Config(msg) if msg.contains("obol_processor=loudest")));
    }

    #[test]
    fn malformed_genesis_authority_rejected() {
        let config = ProcessorConfig {
            genesis_authority: Some("not-a-key".into()),
            ..ProcessorConfig::default()
        };
        assert!(matches!(
            config.genesis_authority_key(),
            Err(ProcessorError::Config(_))
        ));
    }
}
