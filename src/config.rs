use crate::credentials::Credentials;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// On-disk credentials file:
///
/// ```toml
/// [proxy]
/// username = "csz123456"
/// password = "secret"
/// category = "phd"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    pub proxy: ProxySection,
}

#[derive(Debug, Deserialize)]
pub struct ProxySection {
    pub username: String,
    pub password: String,
    pub category: String,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl From<Config> for Credentials {
    fn from(config: Config) -> Self {
        Credentials {
            username: config.proxy.username,
            password: config.proxy.password,
            category: config.proxy.category,
        }
    }
}
