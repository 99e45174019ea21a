//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ghissues/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::StartScreen;
use crate::github::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start: Option<StartScreen>,
    pub user: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

/// Values that came from the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub start: Option<StartScreen>,
    pub user: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

// ============================================================================
// Resolved Config (concrete values, no Options except genuinely optional ones)
// ============================================================================

#[derive(Clone)]
pub struct ResolvedConfig {
    pub token: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    pub start: StartScreen,
    pub user: Option<String>,
}

// Hand-written so the token never reaches the log file.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("start", &self.start)
            .field("user", &self.user)
            .finish()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ghissues/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ghissues").join("config.toml"))
}

/// Load config from `~/.ghissues/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AppConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AppConfig::default());
        }
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Field-level debug, skipping the token.
    debug!(
        "Config: start={:?}, user={:?}, base_url={:?}, token set: {}",
        config.general.start,
        config.general.user,
        config.github.base_url,
        config.github.token.is_some()
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# ghissues Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start = "repos"                     # "repos" or "orgs"
# user = "octocat"                    # browse this user's repositories instead of your own

# [github]
# token = "ghp_..."                   # Or set GITHUB_TOKEN env var
# base_url = "https://api.github.com" # Or set GITHUB_API_URL env var
# user_agent = "ghissues"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AppConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Token: env → config
    let token = std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| config.github.token.clone());

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or_else(|| std::env::var("GITHUB_API_URL").ok())
        .or_else(|| config.github.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Start screen: CLI → config → default
    let start = cli.start.or(config.general.start).unwrap_or_default();

    // User: CLI → config
    let user = cli
        .user
        .map(str::to_string)
        .or_else(|| config.general.user.clone());

    ResolvedConfig {
        token,
        base_url,
        user_agent: config
            .github
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        start,
        user,
    }
}
