use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::loader::{default_accounts_url, default_branches_url, default_clients_url, Sources};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_clients_url")]
    pub clients_url: String,
    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,
    #[serde(default = "default_branches_url")]
    pub branches_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clients_url: default_clients_url(),
            accounts_url: default_accounts_url(),
            branches_url: default_branches_url(),
        }
    }
}

impl Settings {
    pub fn sources(&self) -> Sources {
        Sources {
            clients: self.clients_url.clone(),
            accounts: self.accounts_url.clone(),
            branches: self.branches_url.clone(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clientes")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults; partial files merge
/// with them.
pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

/// Relative file paths are stored absolute so the settings keep working from
/// any directory. URLs are kept as given.
pub fn normalize_location(location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    let path = if let Some(rest) = location.strip_prefix('~') {
        match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(location),
        }
    } else {
        PathBuf::from(location)
    };
    std::fs::canonicalize(&path)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            clients_url: "/data/clientes.csv".to_string(),
            ..Settings::default()
        };
        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
        assert!(s.clients_url.ends_with("sheet=clientes"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"accounts_url": "/tmp/contas.csv"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.accounts_url, "/tmp/contas.csv");
        assert_eq!(s.branches_url, default_branches_url());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&path, &Settings::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_normalize_location_keeps_urls() {
        let url = "https://example.com/x.csv";
        assert_eq!(normalize_location(url), url);
    }

    #[test]
    fn test_normalize_location_absolutizes_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.csv");
        std::fs::write(&path, "id\n").unwrap();
        let normalized = normalize_location(path.to_str().unwrap());
        assert!(PathBuf::from(normalized).is_absolute());
    }
}
