use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfsaError};
use crate::limits::LimitSchedule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir_string")]
    pub data_dir: String,
    /// Account key used when `--account` is not given.
    #[serde(default)]
    pub default_account: Option<String>,
    /// JSON file replacing the built-in limit schedule.
    #[serde(default)]
    pub limits_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir_string(),
            default_account: None,
            limits_file: None,
        }
    }
}

impl Settings {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Pick the account key: explicit flag first, then the configured default.
    pub fn resolve_account(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_account.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or(TfsaError::NoAccount)
    }

    pub fn limit_schedule(&self) -> Result<LimitSchedule> {
        match &self.limits_file {
            Some(path) => LimitSchedule::load(&PathBuf::from(shellexpand_path(path))),
            None => Ok(LimitSchedule::tfsa()),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tfsa")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tfsa")
}

fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TfsaError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    tracing::debug!(path = %settings_path().display(), "saved settings");
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
