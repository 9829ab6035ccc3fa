//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - config.toml (default configuration)
//! - config.local.toml (git-ignored local overrides)
//! - Environment variables (TABLEFLOW_* prefix)
//!
//! `GlobalSettings` is the subset of `Config` the workflow driver and
//! every step's `execute` receive — `spec.md` §4.2/§4.3 calls it
//! `global_settings` and specifies only `root_folder`; `performance`
//! is ambient configuration in the same vein as the teacher's
//! `StorageConfig`/`PerformanceConfig` split.
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [workflow]
//! root_folder = "/var/lib/tableflow/data"
//!
//! [workflow.performance]
//! num_threads = 0
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! TABLEFLOW_WORKFLOW__ROOT_FOLDER=/custom/path
//! TABLEFLOW_LOGGING__LEVEL=debug
//! ```

use figment::{providers::{Env, Format, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, merged from file + environment layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub workflow: GlobalSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings threaded through every step's `execute` call.
///
/// `root_folder` anchors every relative file path a `read_*`/`write_*`
/// step resolves (`spec.md` §4.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub root_folder: PathBuf,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Engine tuning knobs. `num_threads = 0` means "let the engine decide",
/// mirroring the teacher's `PerformanceConfig::num_threads` convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default)]
    pub num_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig { num_threads: 0 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Merges in order:
    /// 1. config.toml (base configuration)
    /// 2. config.local.toml (local overrides, git-ignored)
    /// 3. Environment variables (TABLEFLOW_* prefix)
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("TABLEFLOW_").split("__"))
            .extract()
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("TABLEFLOW_").split("__"))
            .extract()
    }
}

impl GlobalSettings {
    pub fn new(root_folder: impl Into<PathBuf>) -> Self {
        GlobalSettings {
            root_folder: root_folder.into(),
            performance: PerformanceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_settings_new_defaults_performance() {
        let settings = GlobalSettings::new("/data");
        assert_eq!(settings.root_folder, PathBuf::from("/data"));
        assert_eq!(settings.performance.num_threads, 0);
    }

    #[test]
    fn config_serializes_with_expected_sections() {
        let config = Config {
            workflow: GlobalSettings::new("./data"),
            logging: LoggingConfig::default(),
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[workflow]"));
        assert!(toml_str.contains("root_folder"));
    }
}
