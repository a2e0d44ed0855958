//! Configuration management for airledger

use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Sane defaults when config.toml is absent
        Config {
            database: DatabaseConfig::default(),
        }
    } else {
        toml::from_str(&config_str)?
    };

    if config.database.path.is_empty() {
        return Err("database.path must be set in config.toml".into());
    }

    Ok(config)
}

fn default_db_path() -> String {
    "./airledger.db".to_string()
}
