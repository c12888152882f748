//! Portfolio configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional user file, which is in turn overridden by the
//! environment for the one value that differs per deployment: the service
//! base address.
//!
//! ## Config File Location
//!
//! `config.toml` in the directory passed as `--config-dir` (default: the
//! working directory). A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "http://localhost:8001"  # Requests go to <base_url>/api/...
//! timeout_secs = 10                   # Per-request timeout
//!
//! [reveal]
//! threshold = 0.1                     # Visible fraction that reveals a grid cell
//! margin = 50.0                       # Pixels around the viewport for grid cells
//! section_threshold = 0.2             # Visible fraction that reveals a section
//!
//! [carousel]
//! autoplay_ms = 5000                  # Autoplay interval
//! swipe_threshold = 50.0              # Minimum swipe travel in pixels
//! ```
//!
//! ## Environment
//!
//! `FOLIO_API_URL`, when set and non-empty, replaces `api.base_url`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::CarouselOptions;
use crate::viewport::RevealOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Remote service settings.
    pub api: ApiConfig,
    /// Reveal thresholds for grid cells and section roots.
    pub reveal: RevealConfig,
    /// Testimonial carousel timing and gesture settings.
    pub carousel: CarouselConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Service root, without the `/api` suffix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub threshold: f64,
    pub margin: f64,
    pub section_threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            margin: 50.0,
            section_threshold: 0.2,
        }
    }
}

impl RevealConfig {
    pub fn cell_options(&self) -> RevealOptions {
        RevealOptions {
            threshold: self.threshold,
            margin: self.margin,
        }
    }

    /// Section roots reveal without a margin.
    pub fn section_options(&self) -> RevealOptions {
        RevealOptions {
            threshold: self.section_threshold,
            margin: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay_ms: u64,
    pub swipe_threshold: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_ms: 5000,
            swipe_threshold: 50.0,
        }
    }
}

impl CarouselConfig {
    pub fn options(&self) -> CarouselOptions {
        CarouselOptions {
            autoplay_interval: Duration::from_millis(self.autoplay_ms),
            swipe_threshold: self.swipe_threshold,
        }
    }
}

impl FolioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "api.base_url must start with http:// or https://".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }
        for (key, value) in [
            ("reveal.threshold", self.reveal.threshold),
            ("reveal.section_threshold", self.reveal.section_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!("{key} must be 0.0-1.0")));
            }
        }
        if !(self.reveal.margin >= 0.0) {
            return Err(ConfigError::Validation(
                "reveal.margin must not be negative".into(),
            ));
        }
        if self.carousel.autoplay_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_ms must be greater than 0".into(),
            ));
        }
        if !(self.carousel.swipe_threshold >= 0.0) {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FolioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge, apply environment overrides, deserialize, validate.
pub fn resolve_config(
    overlay: Option<toml::Value>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<FolioConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: FolioConfig = merged.try_into()?;
    config.apply_env(env);
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in `dir` plus the process environment.
pub fn load_config(dir: &Path) -> Result<FolioConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    resolve_config(overlay, |key| std::env::var(key).ok())
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Remote portfolio service
# ---------------------------------------------------------------------------
[api]
# Service root. Requests go to <base_url>/api/photos, /api/testimonials,
# /api/about and /api/contact. The FOLIO_API_URL environment variable
# overrides this value.
base_url = "http://localhost:8001"

# Per-request timeout in seconds.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Scroll reveals
# ---------------------------------------------------------------------------
[reveal]
# Fraction of a grid cell (0.0-1.0) that must be on screen to reveal it.
threshold = 0.1

# Pixels added around the viewport so grid cells reveal slightly early.
margin = 50.0

# Fraction of a section (about, testimonials, contact) that must be on
# screen to reveal it.
section_threshold = 0.2

# ---------------------------------------------------------------------------
# Testimonial carousel
# ---------------------------------------------------------------------------
[carousel]
# Autoplay interval in milliseconds. Hovering the carousel pauses autoplay.
autoplay_ms = 5000

# Minimum horizontal swipe distance in pixels to change testimonial.
swipe_threshold = 50.0
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_config_values() {
        let config = FolioConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8001");
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.margin, 50.0);
        assert_eq!(config.carousel.autoplay_ms, 5000);
        assert_eq!(
            config.carousel.options().autoplay_interval,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[carousel]
autoplay_ms = 8000
"#;
        let config: FolioConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.carousel.autoplay_ms, 8000);
        // Defaults preserved
        assert_eq!(config.carousel.swipe_threshold, 50.0);
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let overlay = load_raw_config(tmp.path()).unwrap();
        assert!(overlay.is_none());
        let config = resolve_config(overlay, no_env).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[api]
base_url = "https://folio.example.com"

[reveal]
section_threshold = 0.5
"#,
        )
        .unwrap();
        let config = resolve_config(load_raw_config(tmp.path()).unwrap(), no_env).unwrap();
        assert_eq!(config.api.base_url, "https://folio.example.com");
        assert_eq!(config.reveal.section_options().threshold, 0.5);
        assert_eq!(config.reveal.section_options().margin, 0.0);
        assert_eq!(config.reveal.threshold, 0.1);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[api\nbase_url = ").unwrap();
        assert!(matches!(
            load_raw_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_base_url() {
        let env = |key: &str| (key == API_URL_ENV).then(|| "https://api.example.com".to_string());
        let config = resolve_config(None, env).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = resolve_config(None, |_| Some("  ".to_string())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8001");
    }

    #[test]
    fn env_value_is_validated() {
        let result = resolve_config(None, |_| Some("localhost:8001".to_string()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("[carousel]\nspeed = 3\n").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay), no_env),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_section_rejected() {
        let overlay: toml::Value = toml::from_str("[lightbox]\nenabled = true\n").unwrap();
        assert!(resolve_config(Some(overlay), no_env).is_err());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let overlay: toml::Value = toml::from_str("[reveal]\nthreshold = 1.5\n").unwrap();
        let err = resolve_config(Some(overlay), no_env).unwrap_err();
        assert!(err.to_string().contains("reveal.threshold"));
    }

    #[test]
    fn zero_autoplay_rejected() {
        let mut config = FolioConfig::default();
        config.carousel.autoplay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_margin_rejected() {
        let mut config = FolioConfig::default();
        config.reveal.margin = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let config: FolioConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, FolioConfig::default());
    }
}
