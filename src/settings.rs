use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};

pub const DATA_ENV: &str = "SALESDASH_DATA";
pub const DEFAULT_DATA_FILE: &str = "data.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Dataset used when neither `--data` nor the environment names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("salesdash")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

fn load_settings_from(path: &Path) -> Settings {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Settings::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("ignoring malformed settings at {}: {e}", path.display());
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SalesError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Pick the dataset path: flag, then environment, then settings, then
/// `data.csv` in the working directory.
pub fn resolve_data_path(flag: Option<&str>) -> PathBuf {
    let env = std::env::var(DATA_ENV).ok();
    resolve_from(flag, env.as_deref(), &load_settings())
}

fn resolve_from(flag: Option<&str>, env: Option<&str>, settings: &Settings) -> PathBuf {
    let chosen = flag
        .or(env.filter(|v| !v.is_empty()))
        .or(settings.data_file.as_deref())
        .unwrap_or(DEFAULT_DATA_FILE);
    PathBuf::from(expand_home(chosen))
}

/// Expand a bare `~` or a leading `~/` to the home directory. Other
/// `~user` forms are left alone.
pub fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{rest}", home.to_string_lossy()),
        None => path.to_string(),
    }
}

/// Expand `~` and make the path absolute where it exists.
pub fn shellexpand_path(path: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_home(path));
    std::fs::canonicalize(&expanded).unwrap_or(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("settings.json");
        let settings = Settings {
            data_file: Some("/tmp/sales.csv".to_string()),
        };
        save_settings_to(&settings, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), Settings::default());

        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{"data_file": "a.csv", "theme": "dark"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.data_file.as_deref(), Some("a.csv"));
    }

    #[test]
    fn test_resolution_order() {
        let stored = Settings {
            data_file: Some("stored.csv".to_string()),
        };
        assert_eq!(
            resolve_from(Some("flag.csv"), Some("env.csv"), &stored),
            PathBuf::from("flag.csv")
        );
        assert_eq!(resolve_from(None, Some("env.csv"), &stored), PathBuf::from("env.csv"));
        assert_eq!(resolve_from(None, Some(""), &stored), PathBuf::from("stored.csv"));
        assert_eq!(
            resolve_from(None, None, &Settings::default()),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            PathBuf::from(expand_home("~/sales.csv")),
            PathBuf::from(format!("{}/sales.csv", home.to_string_lossy()))
        );
        assert_eq!(expand_home("/abs/sales.csv"), "/abs/sales.csv");
        assert_eq!(PathBuf::from(expand_home("~")), home);
        assert_eq!(expand_home("~alice/sales.csv"), "~alice/sales.csv");
    }
}
