use std::sync::OnceLock;
use serde::{Serialize, Deserialize};

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "SATSEARCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Endpoint returning the full satellite collection as a JSON array
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_url() -> String {
    "http://localhost:8000/satellites".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_url: default_catalog_url(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl WebConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path, e))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: OnceLock<WebConfig> = OnceLock::new();

/// Path of the configuration file: `$SATSEARCH_CONFIG` or `config.toml`
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load the configuration once; a missing file falls back to defaults.
pub fn read_config() -> anyhow::Result<&'static WebConfig> {
    let path = config_path();
    let config = if std::path::Path::new(&path).exists() {
        WebConfig::from_file(&path)?
    } else {
        WebConfig::default()
    };

    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = WebConfig::from_toml("").unwrap();
        assert_eq!(config.catalog_url, "http://localhost:8000/satellites");
        assert_eq!(config.server_address(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = WebConfig::from_toml(
            r#"
            port = 8080
            catalog_url = "http://catalog.internal/satellites"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.catalog_url, "http://catalog.internal/satellites");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(WebConfig::from_toml("port = \"not a number\"").is_err());
    }
}
