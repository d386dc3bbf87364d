//! Shared configuration for the casona CLI and any other front end.
//!
//! TOML file + environment merge, credential resolution (env + keyring
//! + plaintext), placeholder detection, and translation to
//! `casona_store::StoreConfig`. Whether a `StoreConfig` can be produced
//! at all is the online/offline decision: `None` means demo mode.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use casona_store::StoreConfig;

/// Placeholder endpoint that demo deployments ship with. Treated as
/// absent during mode selection.
pub const PLACEHOLDER_URL: &str = "https://demo.supabase.co";
/// Placeholder anonymous key, same treatment.
pub const PLACEHOLDER_ANON_KEY: &str = "demo-anon-key";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Flat configuration merged from the TOML file and `CASONA_STORE_*`
/// environment variables.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Remote store base URL.
    pub url: Option<String>,

    /// Anonymous-access key (plaintext -- prefer an env var or the OS keyring).
    pub anon_key: Option<String>,

    /// Environment variable name holding the anonymous key.
    pub anon_key_env: Option<String>,

    /// Privileged key for administrative operations. Never consulted
    /// for mode selection.
    pub service_role_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            anon_key_env: None,
            service_role_key: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("ar", "casona", "casona").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("casona");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("CASONA_STORE_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the anonymous key from the credential chain.
pub fn resolve_anon_key(config: &Config) -> Option<SecretString> {
    // 1. Named env var from the config
    if let Some(ref env_name) = config.anon_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("casona", "store/anon-key") {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config (already merged from CASONA_STORE_ANON_KEY)
    config.anon_key.clone().map(SecretString::from)
}

/// Whether a credential pair counts as absent for mode selection.
pub fn is_placeholder(url: &str, anon_key: &str) -> bool {
    url == PLACEHOLDER_URL || anon_key == PLACEHOLDER_ANON_KEY
}

// ── Mode selection ──────────────────────────────────────────────────

/// Build a `StoreConfig` from the merged config, or decide demo mode.
///
/// `Ok(None)` is the offline decision: missing or placeholder
/// credentials are not an error. A present-but-unparseable URL is.
pub fn resolve_store_config(config: &Config) -> Result<Option<StoreConfig>, ConfigError> {
    let Some(ref url_str) = config.url else {
        return Ok(None);
    };
    let Some(anon_key) = resolve_anon_key(config) else {
        return Ok(None);
    };

    {
        use secrecy::ExposeSecret;
        if is_placeholder(url_str, anon_key.expose_secret()) {
            return Ok(None);
        }
    }

    let url: url::Url = url_str.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    Ok(Some(StoreConfig {
        url,
        anon_key,
        service_role_key: config.service_role_key.clone().map(SecretString::from),
        timeout: Duration::from_secs(config.timeout),
    }))
}
