//! CMS connection settings.
//!
//! Provides the [`CmsSettings`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `OPAL_CONFIG` environment variable
//! 3. XDG default: `~/.config/opal/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

// ============================================================================
// Settings structs
// ============================================================================

/// Connection and defaults for the content-management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSettings {
    /// Base URL of the CMS instance (e.g. `https://cms.example.com`).
    pub base_url: String,

    /// API root path appended to the base URL.
    pub api_path: String,

    /// Credentials for the management API.
    pub auth: AuthSettings,

    /// Defaults applied when a tool call omits the field.
    pub defaults: ContentDefaults,
}

/// Credentials for the management API.
///
/// Basic credentials take priority over a bearer token when both are set;
/// with neither set, requests go out unauthenticated (read endpoints may
/// still accept them).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Username for basic authentication.
    pub basic_username: Option<String>,

    /// Password for basic authentication.
    pub basic_password: Option<String>,

    /// Bearer access token.
    pub access_token: Option<String>,
}

/// Per-instance defaults for content operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDefaults {
    /// Default language branch.
    pub language: String,

    /// Default target status for created content.
    pub status: String,

    /// Fallback root identifier when root resolution fails.
    pub root: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_path: "api/episerver/v3.0".to_string(),
            auth: AuthSettings::default(),
            defaults: ContentDefaults::default(),
        }
    }
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            status: "Published".to_string(),
            root: "1".to_string(),
        }
    }
}

// ============================================================================
// Settings loading
// ============================================================================

impl CmsSettings {
    /// Load settings from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `OPAL_CONFIG` env var
    /// 3. XDG default: `~/.config/opal/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("settings init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("settings file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("OPAL");
        env_opts.add_section("auth");
        env_opts.add_section("defaults");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("settings env: {e}")))?;

        let settings: Self = builder
            .build()
            .map_err(|e| Error::config(format!("settings build: {e}")))?;

        Ok(settings)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("OPAL_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("opal").join("config.toml"))
    }

    /// Fail unless the settings can reach a CMS instance.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config(
                "CMS settings are missing a base_url; configure base_url in settings",
            ));
        }
        Ok(())
    }

    /// Serialize these settings to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CmsSettings::default();
        assert_eq!(settings.api_path, "api/episerver/v3.0");
        assert_eq!(settings.defaults.language, "en");
        assert_eq!(settings.defaults.status, "Published");
        assert_eq!(settings.defaults.root, "1");
        assert!(settings.auth.basic_username.is_none());
    }

    #[test]
    fn test_validate_requires_base_url() {
        let settings = CmsSettings::default();
        assert!(settings.validate().is_err());

        let configured = CmsSettings {
            base_url: "https://cms.example.com".into(),
            ..CmsSettings::default()
        };
        assert!(configured.validate().is_ok());
    }

    #[test]
    fn test_resolve_config_path_explicit_wins() {
        let path = CmsSettings::resolve_config_path(Some("/tmp/opal.toml"));
        assert_eq!(path, Some(PathBuf::from("/tmp/opal.toml")));
    }

    #[test]
    fn test_to_toml_string_roundtrip() {
        let settings = CmsSettings {
            base_url: "https://cms.example.com".into(),
            ..CmsSettings::default()
        };
        let rendered = settings.to_toml_string().unwrap();
        assert!(rendered.contains("base_url"));

        let parsed: CmsSettings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.base_url, settings.base_url);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://cms.example.com\"\n\n[defaults]\nlanguage = \"sv\"\n",
        )
        .unwrap();

        let settings = CmsSettings::load(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(settings.base_url, "https://cms.example.com");
        assert_eq!(settings.defaults.language, "sv");
        // Untouched sections keep their defaults.
        assert_eq!(settings.defaults.status, "Published");
    }
}
