use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::layout::{GridDims, SeatInitEmission};

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub upstream: UpstreamConfig,
    pub layout: LayoutConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

// Внешний REST API кинотеатров
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
}

// Сетка мест зала
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub rows: usize,
    pub cols: usize,
    pub init_emission: SeatInitEmission,
}

impl LayoutConfig {
    pub fn dims(&self) -> GridDims {
        GridDims::new(self.rows, self.cols)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let rows: usize = parse(&lookup, "SEAT_GRID_ROWS", "15", "a positive number")?;
        let cols: usize = parse(&lookup, "SEAT_GRID_COLS", "10", "a positive number")?;
        for (name, value) in [("SEAT_GRID_ROWS", rows), ("SEAT_GRID_COLS", cols)] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    name,
                    expected: "a positive number",
                    value: value.to_string(),
                });
            }
        }

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse(&lookup, "PORT", "8000", "a valid port number")?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "cinema_admin=debug,tower_http=debug"),
                log_format: parse(&lookup, "LOG_FORMAT", "pretty", "pretty or json")?,
            },
            upstream: UpstreamConfig {
                base_url: var("UPSTREAM_BASE_URL", "http://localhost:8080/api/v1"),
            },
            layout: LayoutConfig {
                rows,
                cols,
                init_emission: parse(&lookup, "SEAT_INIT_EMISSION", "root_only", "root_only or every_cell")?,
            },
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, expected, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_observed_deployment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert_eq!(config.layout.dims(), GridDims::new(15, 10));
        assert_eq!(config.layout.init_emission, SeatInitEmission::RootOnly);
        assert_eq!(config.upstream.base_url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("SEAT_GRID_ROWS", "20"),
            ("SEAT_GRID_COLS", "12"),
            ("SEAT_INIT_EMISSION", "every_cell"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.layout.dims(), GridDims::new(20, 12));
        assert_eq!(config.layout.init_emission, SeatInitEmission::EveryCell);
        assert_eq!(config.app.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_are_reported_not_panicked() {
        assert_eq!(
            config_from(&[("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                expected: "a valid port number",
                value: "eighty".to_string()
            }
        );
        assert!(config_from(&[("SEAT_GRID_COLS", "0")]).is_err());
        assert!(config_from(&[("SEAT_INIT_EMISSION", "sometimes")]).is_err());
    }
}
