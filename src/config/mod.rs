use config::Environment;
use serde::Deserialize;
use validator::Validate;

use crate::error::ConfigError;
use crate::models::MovieContext;

pub const DEFAULT_ROWS: u32 = 9;
pub const DEFAULT_COLS: u32 = 11;
pub const DEFAULT_SEAT_PRICE: i64 = 150;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 500;
pub const DEFAULT_SLIDE_INTERVAL_MS: u64 = 3500;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub app: AppConfig,
    #[validate(nested)]
    pub api: ApiConfig,
    #[validate(nested)]
    pub page: PageConfig,
    #[validate(nested)]
    pub seating: SeatingConfig,
    #[validate(nested)]
    pub circuit_breaker: CircuitBreakerConfig,
    #[validate(nested)]
    pub chat: ChatConfig,
    #[validate(nested)]
    pub slider: SliderConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    /// `text` or `json`.
    pub log_format: String,
}

// Сервер бронирования
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiConfig {
    #[validate(url)]
    pub base_url: String,
    /// Upper bound for every checkout request; a hung call is reported as a failure.
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

/// Data the booking page embeds for the seat picker.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageConfig {
    #[validate(range(min = 1))]
    pub movie_id: i64,
    #[validate(range(min = 0))]
    pub seat_price: i64,
    /// JSON array literal of booked seats. When absent they are fetched from the server.
    #[serde(default)]
    pub booked: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeatingConfig {
    #[validate(range(min = 1, max = 100))]
    pub rows: u32,
    #[validate(range(min = 1, max = 100))]
    pub cols: u32,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CircuitBreakerConfig {
    #[validate(range(min = 1))]
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SliderConfig {
    #[validate(range(min = 1))]
    pub interval_ms: u64,
    /// Comma separated banner names.
    pub banners: String,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS, cols: DEFAULT_COLS }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self { failure_threshold: 5, timeout_seconds: 60 }
    }
}

impl PageConfig {
    pub fn movie(&self) -> MovieContext {
        MovieContext::new(self.movie_id, self.seat_price)
    }
}

impl SliderConfig {
    pub fn banner_list(&self) -> Vec<String> {
        self.banners
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Config {
    /// Defaults overlaid with `BOOKING__<SECTION>__<KEY>` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(
            Environment::with_prefix("BOOKING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }

    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "seat_booking=info")?
            .set_default("app.log_format", "text")?
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("api.request_timeout_secs", 15_i64)?
            .set_default("page.movie_id", 1_i64)?
            .set_default("page.seat_price", DEFAULT_SEAT_PRICE)?
            .set_default("seating.rows", i64::from(DEFAULT_ROWS))?
            .set_default("seating.cols", i64::from(DEFAULT_COLS))?
            .set_default("circuit_breaker.failure_threshold", 5_i64)?
            .set_default("circuit_breaker.timeout_seconds", 60_i64)?
            .set_default("chat.reply_delay_ms", DEFAULT_REPLY_DELAY_MS as i64)?
            .set_default("slider.interval_ms", DEFAULT_SLIDE_INTERVAL_MS as i64)?
            .set_default("slider.banners", "loki.webp,interstellar.jpg")?
            .add_source(source)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
