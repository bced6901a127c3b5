//! User configuration at `~/.flyer/config.yaml`.
//!
//! # API pattern
//!
//! Every function touching the filesystem has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Environment overrides (`FLYER_API_BASE`, `FLYER_TIMEOUT_SECS`) are applied
//! on top of the file by [`FlyerConfig::with_env_overrides`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_API_BASE: &str = "http://localhost:4000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE: &str = "FLYER_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "FLYER_TIMEOUT_SECS";

/// Settings shared by every `flyer` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerConfig {
    /// Base URL of the catalog + rendering service, without trailing slash.
    pub api_base: String,
    /// Per-request timeout for the remote service.
    pub timeout_secs: u64,
    /// Directory of `.tera` files overriding the local renderer's templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Local catalog file used instead of the remote catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            template_dir: None,
            catalog_file: None,
        }
    }
}

impl FlyerConfig {
    /// Apply environment overrides using `lookup` (normally `std::env::var`).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    /// `{api_base}/{path}` with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.flyer/`
pub fn flyer_root(home: &Path) -> PathBuf {
    home.join(".flyer")
}

/// `<home>/.flyer/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    flyer_root(home).join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load config from `<home>/.flyer/config.yaml`; an absent file yields
/// defaults, a malformed one `ConfigError::Parse` with the path.
pub fn load_at(home: &Path) -> Result<FlyerConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(FlyerConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(FlyerConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper, with environment overrides applied.
pub fn load() -> Result<FlyerConfig, ConfigError> {
    load_at(&home()?)?.with_env_overrides(|var| std::env::var(var).ok())
}

/// Atomically write `config` to `<home>/.flyer/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &FlyerConfig) -> Result<PathBuf, ConfigError> {
    let root = flyer_root(home);
    if !root.exists() {
        std::fs::create_dir_all(&root)?;
        set_dir_permissions(&root)?;
    }
    let path = config_path_at(home);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(path)
}

/// Resolve the user's home directory.
pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
