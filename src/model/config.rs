use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "LGPD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Classification behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSettings {
    /// Apply the technology escalation rule on the matrix strategy unless a request overrides it
    #[serde(default = "default_escalate_technology")]
    pub escalate_technology: bool,
    /// Page size for supplier listings when the request does not give one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_escalate_technology() -> bool {
    true
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            escalate_technology: default_escalate_technology(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub classification: ClassificationSettings,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub classification: ClassificationSettings,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let classification = Self::load_config_file(&config_path)
            .map(|cf| cf.classification)
            .unwrap_or_default();

        Self {
            classification,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str, path: &Path) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse_config("  \n", Path::new("config.yaml")).unwrap();
        assert!(config.classification.escalate_technology);
        assert_eq!(config.classification.default_page_size, 20);
    }

    #[test]
    fn test_partial_classification_section() {
        let yaml = "classification:\n  escalate_technology: false\n";
        let config = Config::parse_config(yaml, Path::new("config.yaml")).unwrap();
        assert!(!config.classification.escalate_technology);
        assert_eq!(config.classification.default_page_size, 20);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let yaml = "classification: [not, a, map";
        assert!(Config::parse_config(yaml, Path::new("config.yaml")).is_none());
    }
}
