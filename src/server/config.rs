use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::services::billing_service::DEFAULT_RATE_PER_HOUR;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_total_slots")]
    pub total_slots: i32,

    #[serde(default = "default_rate_per_hour")]
    pub rate_per_hour: i64,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    host: Option<String>,
    port: Option<u16>,
    database_path: Option<String>,
    static_dir: Option<String>,
    log_dir: Option<String>,
    total_slots: Option<i32>,
    rate_per_hour: Option<i64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "parking.db".to_string()
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_total_slots() -> i32 {
    20
}

fn default_rate_per_hour() -> i64 {
    DEFAULT_RATE_PER_HOUR
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            static_dir: default_static_dir(),
            log_dir: default_log_dir(),
            total_slots: default_total_slots(),
            rate_per_hour: default_rate_per_hour(),
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by the optional TOML file, overridden by the environment.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path_str) if Path::new(path_str).exists() => {
                let contents = fs::read_to_string(path_str).map_err(|source| ConfigError::Read {
                    path: path_str.to_string(),
                    source,
                })?;
                parse_file_config(path_str, &contents)?
            }
            _ => PartialServerConfig::default(),
        };

        // 2. Merge: environment overrides file
        Self::merge(file_config, |key| env::var(key).ok())
    }

    fn merge(
        file_config: PartialServerConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let final_config = ServerConfig {
            host: env_lookup("HOST")
                .or(file_config.host)
                .unwrap_or_else(default_host),
            port: env_value(&env_lookup, "PORT")?
                .or(file_config.port)
                .unwrap_or_else(default_port),
            database_path: env_lookup("DATABASE_PATH")
                .or(file_config.database_path)
                .unwrap_or_else(default_database_path),
            static_dir: env_lookup("STATIC_DIR")
                .or(file_config.static_dir)
                .unwrap_or_else(default_static_dir),
            log_dir: env_lookup("LOG_DIR")
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            total_slots: env_value(&env_lookup, "TOTAL_SLOTS")?
                .or(file_config.total_slots)
                .unwrap_or_else(default_total_slots),
            rate_per_hour: env_value(&env_lookup, "RATE_PER_HOUR")?
                .or(file_config.rate_per_hour)
                .unwrap_or_else(default_rate_per_hour),
        };

        if final_config.total_slots < 1 {
            return Err(ConfigError::InvalidValue {
                key: "total_slots",
                value: final_config.total_slots.to_string(),
                reason: "a lot needs at least one slot".to_string(),
            });
        }

        Ok(final_config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_file_config(path: &str, contents: &str) -> Result<PartialServerConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn env_value<T>(
    env_lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env_lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                value: raw,
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::merge(PartialServerConfig::default(), lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.total_slots, 20);
        assert_eq!(config.rate_per_hour, 20);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn environment_overrides_file() {
        let file = parse_file_config(
            "parkwatch.toml",
            "port = 8080\nrate_per_hour = 30\ndatabase_path = \"/var/lib/parking.db\"\n",
        )
        .unwrap();
        let config = ServerConfig::merge(file, lookup(&[("PORT", "9090")])).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.rate_per_hour, 30);
        assert_eq!(config.database_path, "/var/lib/parking.db");
    }

    #[test]
    fn unparseable_env_value_is_an_error() {
        let err = ServerConfig::merge(PartialServerConfig::default(), lookup(&[("PORT", "abc")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn zero_slots_is_rejected() {
        let err = ServerConfig::merge(
            PartialServerConfig::default(),
            lookup(&[("TOTAL_SLOTS", "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "total_slots", .. }));
    }

    #[test]
    fn malformed_toml_is_reported_with_its_path() {
        let err = parse_file_config("bad.toml", "port = [").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = ServerConfig::load(path.to_str()).unwrap();
        assert!(config.total_slots >= 1);
    }
}
