//! Configuration parsing for the futu bridge.
//!
//! Two files are involved:
//!
//! - the application config (`AppConfig`), optional, pointing the metadata
//!   cache at its root, tables, and snapshot directory;
//! - the connection settings (`connect_futu.json` under the metadata root),
//!   consumed by the brokerage session.
//!
//! # Example config
//!
//! ```json
//! {
//!   "metadata": {
//!     "root": "/srv/trader/.trader",
//!     "snapshot_namespace": "backtrader_futu",
//!     "memo_capacity": 999,
//!     "missing_settings": "fail"
//!   }
//! }
//! ```
//!
//! Every field has a default, so `{}` is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FtbError;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub metadata: MetadataConfig,
}

/// Where and how the metadata cache persists its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Explicit metadata root. When unset, `<cwd>/<marker_dir>` is used if it
    /// exists, else `<home>/<marker_dir>` (created on demand).
    pub root: Option<PathBuf>,

    /// Name of the marker folder searched for in cwd and home.
    pub marker_dir: String,

    /// Snapshot directory; defaults to `<root>/contracts_cache`.
    pub snapshot_dir: Option<PathBuf>,

    /// Prefix of snapshot file names (`{namespace}_contracts_{YYYYMMDD}`).
    pub snapshot_namespace: String,

    /// Entry bound of each memoization layer.
    pub memo_capacity: usize,

    pub basic_info_file: String,
    pub contracts_file: String,
    pub trading_info_file: String,
    pub connect_settings_file: String,

    /// What to do when the connection settings file is absent.
    pub missing_settings: MissingSettings,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            root: None,
            marker_dir: ".trader".to_string(),
            snapshot_dir: None,
            snapshot_namespace: "backtrader_futu".to_string(),
            memo_capacity: 999,
            basic_info_file: "stock_basic_info.json".to_string(),
            contracts_file: "constracts_info.json".to_string(),
            trading_info_file: "trading_info.json".to_string(),
            connect_settings_file: "connect_futu.json".to_string(),
            missing_settings: MissingSettings::Fail,
        }
    }
}

/// Policy for an absent or empty connection settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSettings {
    /// Return a config error.
    #[default]
    Fail,
    /// Fall back to a local simulated OpenD gateway, logged at `warn`.
    DevelopmentDefaults,
}

/// Brokerage connection settings for the OpenD gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectSettings {
    pub host: String,
    pub port: u16,
    /// Default market for the trade context (`HK`, `US`, ...).
    pub market: String,
    /// `simulate` or `real`.
    pub trd_env: String,
    /// Trade unlock password.
    pub password: String,
    /// Snapshot directory override for the session.
    #[serde(default)]
    pub contracts_cache_path: Option<PathBuf>,
}

impl ConnectSettings {
    fn development(contracts_cache_path: &Path) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11111,
            market: "HK".to_string(),
            trd_env: "simulate".to_string(),
            password: "123456".to_string(),
            contracts_cache_path: Some(contracts_cache_path.to_path_buf()),
        }
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> Result<AppConfig, FtbError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| FtbError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|source| FtbError::Json { path: path.to_path_buf(), source })
}

/// Load connection settings, applying `policy` when the file is absent or empty.
///
/// `default_cache_dir` fills `contracts_cache_path` for development defaults.
pub fn load_connect_settings(
    path: &Path,
    policy: MissingSettings,
    default_cache_dir: &Path,
) -> Result<ConnectSettings, FtbError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => return Err(FtbError::Io { path: path.to_path_buf(), source }),
    };

    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return match policy {
            MissingSettings::Fail => Err(FtbError::Config(format!(
                "connection settings {} not found",
                path.display()
            ))),
            MissingSettings::DevelopmentDefaults => {
                warn!(
                    "{} not found, using development defaults (simulated OpenD on 127.0.0.1:11111)",
                    path.display()
                );
                Ok(ConnectSettings::development(default_cache_dir))
            }
        };
    }

    serde_json::from_str(trimmed).map_err(|source| FtbError::Json { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.metadata.memo_capacity, 999);
        assert_eq!(cfg.metadata.contracts_file, "constracts_info.json");
        assert_eq!(cfg.metadata.missing_settings, MissingSettings::Fail);
    }

    #[test]
    fn partial_metadata_section() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{"metadata": {"memo_capacity": 16, "missing_settings": "development_defaults"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.metadata.memo_capacity, 16);
        assert_eq!(cfg.metadata.snapshot_namespace, "backtrader_futu");
        assert_eq!(cfg.metadata.missing_settings, MissingSettings::DevelopmentDefaults);
    }

    #[test]
    fn missing_settings_fail_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect_futu.json");
        let err = load_connect_settings(&path, MissingSettings::Fail, dir.path()).unwrap_err();
        assert!(matches!(err, FtbError::Config(_)));
    }

    #[test]
    fn missing_settings_development_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect_futu.json");
        std::fs::write(&path, "").unwrap();
        let cache = dir.path().join("contracts_cache");
        let s = load_connect_settings(&path, MissingSettings::DevelopmentDefaults, &cache).unwrap();
        assert_eq!(s.port, 11111);
        assert_eq!(s.trd_env, "simulate");
        assert_eq!(s.contracts_cache_path.as_deref(), Some(cache.as_path()));
    }

    #[test]
    fn present_settings_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect_futu.json");
        std::fs::write(
            &path,
            r#"{"host":"10.0.0.5","port":11112,"market":"US","trd_env":"real","password":"x"}"#,
        )
        .unwrap();
        let s = load_connect_settings(&path, MissingSettings::Fail, dir.path()).unwrap();
        assert_eq!(s.host, "10.0.0.5");
        assert_eq!(s.market, "US");
        assert!(s.contracts_cache_path.is_none());
    }
}
