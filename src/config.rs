//! Relay configuration, resolved once at startup.
//!
//! - **Environment**: URL and token variables, named by the selected [`Profile`].
//! - **Settings** (`config.json`): optional fallback values, read from the
//!   platform config directory (e.g. `~/.config/hook-relay/`).
//!
//! Environment variables win over the settings file.

use crate::error::ConfigError;
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Hard bound on the whole request (connect + response).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Which family of environment variables to read, for the `--profile` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    /// `CLAUDE_HOOK_MONITOR_URL` / `CLAUDE_HOOK_MONITOR_TOKEN`, URL used as-is
    #[default]
    Monitor,
    /// `SIGAGENT_URL` / `SIGAGENT_TOKEN`, URL is a base for `/v0/claude/hook`
    SigAgent,
}

impl Profile {
    pub fn url_var(self) -> &'static str {
        match self {
            Profile::Monitor => "CLAUDE_HOOK_MONITOR_URL",
            Profile::SigAgent => "SIGAGENT_URL",
        }
    }

    pub fn token_var(self) -> &'static str {
        match self {
            Profile::Monitor => "CLAUDE_HOOK_MONITOR_TOKEN",
            Profile::SigAgent => "SIGAGENT_TOKEN",
        }
    }

    /// Expand a configured URL into the endpoint that receives the POST.
    fn endpoint(self, url: &str) -> String {
        match self {
            Profile::Monitor => url.to_string(),
            Profile::SigAgent => format!("{}/v0/claude/hook", url.trim_end_matches('/')),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Optional fallback values (persisted to config.json by the user).
#[derive(Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout override in seconds; 0 is ignored.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Default settings path (e.g. `~/.config/hook-relay/config.json`).
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hook-relay").join("config.json"))
}

/// Load settings from `path`, or from [`default_settings_path`] when `None`.
///
/// A missing or invalid file yields defaults; the relay must still run.
pub fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => load_settings_from(path),
        None => match default_settings_path() {
            Some(path) => load_settings_from(&path),
            None => Settings::default(),
        },
    }
}

fn load_settings_from(path: &Path) -> Settings {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!("no settings at {}: {e}", path.display());
            return Settings::default();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        debug!("ignoring invalid settings at {}: {e}", path.display());
        Settings::default()
    })
}

// ---------------------------------------------------------------------------
// RelayConfig
// ---------------------------------------------------------------------------

/// Everything the relay needs for one send. Immutable once built.
#[derive(Clone)]
pub struct RelayConfig {
    pub url: Url,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RelayConfig {
    /// Build from an endpoint URL and bearer token with the default timeout.
    ///
    /// The token is trimmed; an empty one is rejected.
    pub fn new(url: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = non_empty(Some(token.into())).ok_or(ConfigError::EmptyToken)?;
        Ok(Self {
            url: parse_endpoint(url)?,
            token,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve from the process environment, falling back to `settings`.
    pub fn from_env(profile: Profile, settings: &Settings) -> Result<Self, ConfigError> {
        Self::from_lookup(profile, settings, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` for environment variables.
    ///
    /// Values are trimmed; empty or whitespace-only counts as missing. When
    /// values are missing, the error names every missing variable.
    pub fn from_lookup(
        profile: Profile,
        settings: &Settings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = non_empty(lookup(profile.url_var())).or_else(|| non_empty(settings.url.clone()));
        let token =
            non_empty(lookup(profile.token_var())).or_else(|| non_empty(settings.token.clone()));

        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(profile.url_var());
        }
        if token.is_none() {
            missing.push(profile.token_var());
        }
        let (Some(url), Some(token)) = (url, token) else {
            return Err(ConfigError::Missing { vars: missing });
        };

        let timeout = settings
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            url: parse_endpoint(&profile.endpoint(&url))?,
            token,
            timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_endpoint(url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
