// FILE: src/cli/config.rs

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub output_format: Option<String>,
    pub pretty: Option<bool>,
    pub skip_pending: Option<bool>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    log::info!("Loaded configuration from {}", config_path);
    let config_content = fs::read_to_string(config_path).map_err(|e| ValidationError::FileNotFound {
        path: format!("Config file {}: {}", config_path, e),
    })?;

    if config_path.ends_with(".json") {
        serde_json::from_str(&config_content)
            .map_err(|e| ValidationError::invalid_format(format!("Invalid JSON config: {}", e)))
    } else if config_path.ends_with(".toml") {
        toml::from_str(&config_content)
            .map_err(|e| ValidationError::invalid_format(format!("Invalid TOML config: {}", e)))
    } else {
        Err(ValidationError::invalid_format(
            "Config file must be .json or .toml format",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("csspv.json");
        fs::write(&path, r#"{"base_url": "https://example.org/", "pretty": true}"#).unwrap();

        let config = load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.org/"));
        assert_eq!(config.pretty, Some(true));
        assert_eq!(config.skip_pending, None);
    }

    #[test]
    fn test_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("csspv.toml");
        fs::write(&path, "output_format = \"debug\"\nskip_pending = true\n").unwrap();

        let config = load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.output_format.as_deref(), Some("debug"));
        assert_eq!(config.skip_pending, Some(true));
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("csspv.yaml");
        fs::write(&path, "pretty: true").unwrap();
        assert!(matches!(
            load(path.to_str().unwrap()),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            load(path.to_str().unwrap()),
            Err(ValidationError::InvalidFormat { .. })
        ));

        assert!(matches!(
            load("/nonexistent/csspv.toml"),
            Err(ValidationError::FileNotFound { .. })
        ));
    }
}
