use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "maint-predict.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListenConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// Default value functions
fn default_address() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_true() -> bool { true }

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config '{}': {}", path, e))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit path, or from the default path if it exists,
    /// or fall back to built-in defaults. `PORT` is applied last.
    pub fn resolve(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };
        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(config)
    }

    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = port {
            self.listen.port = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", raw, e))?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen.address, self.listen.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.listen.port, 8000);
        assert_eq!(config.listen.address, "0.0.0.0");
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [listen]
            port = 9100

            [cors]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9100");
        assert!(!config.cors.enabled);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::parse("[listen\nport = ").is_err());
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port_override(Some("5000")).unwrap();
        assert_eq!(config.listen.port, 5000);

        config.apply_port_override(None).unwrap();
        assert_eq!(config.listen.port, 5000);

        assert!(config.apply_port_override(Some("eighty")).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/maint-predict.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
