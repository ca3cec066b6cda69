use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::infra::pricing::{DEFAULT_API_HOST, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CityCostCompare";
const APP_NAME: &str = "CityCostCompare";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pricing: PricingSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_host: String,
    pub timeout_secs: u64,
    /// Seeds the generator for estimated values so runs can be reproduced.
    pub fallback_seed: Option<u64>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            fallback_seed: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

impl Settings {
    /// Resets out-of-range values to their defaults and reports each one.
    pub fn sanitize(&mut self) -> Vec<SettingsError> {
        let mut errors = Vec::new();
        if self.pricing.timeout_secs == 0 {
            errors.push(SettingsError::InvalidValue {
                key: "pricing.timeout_secs",
                value: self.pricing.timeout_secs.to_string(),
            });
            self.pricing.timeout_secs = DEFAULT_TIMEOUT.as_secs();
        }
        errors
    }
}

/// Settings file (if any) overlaid with environment variables. Problems with
/// either are logged and the affected values keep their defaults.
pub fn load_settings() -> Settings {
    let mut settings = match settings_file() {
        Some(path) if path.exists() => match read_settings(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
                Settings::default()
            }
        },
        _ => Settings::default(),
    };

    for error in apply_env_overrides(&mut settings, |key| std::env::var(key).ok()) {
        warn!(%error, "ignoring invalid environment override");
    }
    settings
}

pub fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses a settings file. Values that parse but are out of range fall back
/// to their defaults with a warning.
pub fn parse_settings(content: &str) -> Result<Settings, SettingsError> {
    let mut settings: Settings = toml::from_str(content)?;
    for error in settings.sanitize() {
        warn!(%error, "ignoring invalid settings value");
    }
    Ok(settings)
}

/// Applies `CITYCOST_*` overrides; `RAPIDAPI_KEY` is accepted as an alias for
/// the API key. Each invalid value is skipped and returned; the remaining
/// overrides still apply.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Vec<SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let pricing = &mut settings.pricing;
    let mut errors = Vec::new();

    if let Some(url) = lookup("CITYCOST_PRICING_URL") {
        pricing.base_url = url;
    }
    if let Some(key) = lookup("CITYCOST_API_KEY").or_else(|| lookup("RAPIDAPI_KEY")) {
        pricing.api_key = Some(key);
    }
    if let Some(host) = lookup("CITYCOST_API_HOST") {
        pricing.api_host = host;
    }
    if let Some(raw) = lookup("CITYCOST_TIMEOUT_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => pricing.timeout_secs = secs,
            _ => errors.push(SettingsError::InvalidValue {
                key: "CITYCOST_TIMEOUT_SECS",
                value: raw,
            }),
        }
    }
    if let Some(raw) = lookup("CITYCOST_FALLBACK_SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => pricing.fallback_seed = Some(seed),
            Err(_) => errors.push(SettingsError::InvalidValue {
                key: "CITYCOST_FALLBACK_SEED",
                value: raw,
            }),
        }
    }
    errors
}
