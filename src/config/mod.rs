use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub grid: GridConfig,
    pub booked_seats: BookedSeatsConfig,
    pub store: StoreConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_json: bool,
}

// Идентификаторы элементов страницы, с которыми работает сетка
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub container_id: String,
    pub timings_id: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            container_id: "seating-grid".to_string(),
            timings_id: "timings-list".to_string(),
        }
    }
}

// Настройки клиента для /api/show/{id}/booked_seats/
#[derive(Debug, Clone, Deserialize)]
pub struct BookedSeatsConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl BookedSeatsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for BookedSeatsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 10,
        }
    }
}

// Откуда сервер берёт фильмы и сеансы
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub shows_file: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let grid_defaults = GridConfig::default();
        let client_defaults = BookedSeatsConfig::default();

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "8000", "port number")?,
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seat_grid=debug,tower_http=debug".to_string()),
                log_json: env::var("LOG_FORMAT")
                    .map(|v| v.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            },
            grid: GridConfig {
                container_id: env::var("SEATING_GRID_ID").unwrap_or(grid_defaults.container_id),
                timings_id: env::var("TIMINGS_LIST_ID").unwrap_or(grid_defaults.timings_id),
            },
            booked_seats: BookedSeatsConfig {
                base_url: env::var("BOOKED_SEATS_BASE_URL").unwrap_or(client_defaults.base_url),
                timeout_seconds: parse_var("BOOKED_SEATS_TIMEOUT_SECS", "10", "number of seconds")?,
            },
            store: StoreConfig {
                shows_file: env::var("SHOWS_FILE").ok().filter(|s| !s.trim().is_empty()),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    key: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        expected,
        value,
    })
}
