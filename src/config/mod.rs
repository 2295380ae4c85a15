use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

// Настройки MySQL
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
}

// Секрет для подписи cookie сессии
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "127.0.0.1"),
                port: parse_var("PORT", var("PORT", "5000"))?,
                rust_log: var("RUST_LOG", "boxoffice=debug,tower_http=debug"),
            },
            database: DatabaseConfig {
                host: var("DB_HOST", "localhost"),
                port: parse_var("DB_PORT", var("DB_PORT", "3306"))?,
                user: var("DB_USER", "root"),
                password: var("DB_PASSWORD", ""),
                name: var("DB_NAME", "boxoffice_db"),
                pool_size: parse_var("DB_POOL_SIZE", var("DB_POOL_SIZE", "10"))?,
                acquire_timeout: Duration::from_millis(parse_var(
                    "DB_ACQUIRE_TIMEOUT_MS",
                    var("DB_ACQUIRE_TIMEOUT_MS", "5000"),
                )?),
            },
            session: SessionConfig {
                secret: var("SECRET_KEY", "default_secret_key"),
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
