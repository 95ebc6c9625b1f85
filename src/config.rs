use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.phish-checkr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Registration-lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Classifier model settings.
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize)]
pub struct LookupConfig {
    /// RDAP base endpoint queried for registration records.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-lookup timeout in seconds. A hung registry must not stall
    /// scoring, so this is always bounded.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Path to the trained model file.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

fn default_endpoint() -> String {
    "https://rdap.org".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/phishing_model.json")
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.phish-checkr/config.toml`
/// 3. `~/.config/phish-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".phish-checkr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("phish-checkr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.lookup.endpoint, "https://rdap.org");
        assert_eq!(cfg.lookup.timeout_secs, 5);
        assert_eq!(cfg.model.path, PathBuf::from("model/phishing_model.json"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[lookup]").unwrap();
        writeln!(f, "timeout_secs = 2").unwrap();

        let cfg = load_config(Some(f.path())).unwrap();
        assert_eq!(cfg.lookup.timeout_secs, 2);
        assert_eq!(cfg.lookup.endpoint, "https://rdap.org");
        assert_eq!(cfg.model.path, PathBuf::from("model/phishing_model.json"));
    }

    #[test]
    fn test_full_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[lookup]").unwrap();
        writeln!(f, "endpoint = \"https://rdap.example.net\"").unwrap();
        writeln!(f, "timeout_secs = 10").unwrap();
        writeln!(f, "[model]").unwrap();
        writeln!(f, "path = \"custom/model.json\"").unwrap();

        let cfg = load_config(Some(f.path())).unwrap();
        assert_eq!(cfg.lookup.endpoint, "https://rdap.example.net");
        assert_eq!(cfg.lookup.timeout_secs, 10);
        assert_eq!(cfg.model.path, PathBuf::from("custom/model.json"));
    }

    #[test]
    fn test_missing_override_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
