//! Configuration for folio.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (FOLIO_HOME, FOLIO_DATABASE, FOLIO_SITE_URL)
//! 2. Config file (.folio/config.yaml)
//! 3. Defaults (~/.folio)
//!
//! Config file discovery:
//! - Searches current directory and parents for .folio/config.yaml
//! - Paths in config file are relative to the project root (parent of .folio/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Browser-identifying user agent sent with article fetches
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 15;

pub const DEFAULT_SITE_URL: &str = "http://localhost:8000";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub site: Option<SiteConfig>,
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to project root)
    pub home: Option<String>,
    /// SQLite database file (relative to project root)
    pub database: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to folio home
    pub home: PathBuf,
    /// Absolute path to the SQLite database
    pub database: PathBuf,
    /// Public site root used for sitemap locations
    pub site_url: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Article fetch settings
    pub fetch: FetchSettings,
}

/// Settings for the outbound article fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn from_file(fetch: Option<&FetchConfig>) -> Self {
        let defaults = Self::default();
        Self {
            timeout_seconds: fetch
                .and_then(|f| f.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            user_agent: fetch
                .and_then(|f| f.user_agent.clone())
                .unwrap_or(defaults.user_agent),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".folio").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".folio");

    let config_file = find_config_file();

    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    // Project root is the parent of .folio/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let home = if let Ok(env_home) = std::env::var("FOLIO_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home_path) = file.as_ref().and_then(|f| f.paths.home.as_deref()) {
        resolve_path(base_dir, home_path)
    } else {
        default_home
    };

    let database = if let Ok(env_db) = std::env::var("FOLIO_DATABASE") {
        PathBuf::from(env_db)
    } else if let Some(db_path) = file.as_ref().and_then(|f| f.paths.database.as_deref()) {
        resolve_path(base_dir, db_path)
    } else {
        home.join("folio.sqlite3")
    };

    let site_url = std::env::var("FOLIO_SITE_URL")
        .ok()
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.site.as_ref())
                .and_then(|s| s.base_url.clone())
        })
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

    let fetch = FetchSettings::from_file(file.as_ref().and_then(|f| f.fetch.as_ref()));

    Ok(ResolvedConfig {
        home,
        database,
        site_url,
        config_file,
        fetch,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the SQLite database path.
pub fn database_path() -> Result<PathBuf> {
    Ok(config()?.database.clone())
}
