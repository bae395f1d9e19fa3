pub mod commands;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod page;
pub mod seating;
pub mod services;
pub mod ui;

use tracing::info;

use crate::controllers::SeatPicker;
use crate::error::ApiError;
use crate::models::{seat::parse_booked_literal, SeatId};
use crate::page::Page;
use crate::services::{BookingApi, BookingApiClient};

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub api: BookingApiClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self, ApiError> {
        let api = BookingApiClient::from_config(&config.api, &config.circuit_breaker)?;
        Ok(Self { config, api })
    }

    /// Booked seats from the page literal, or from the server when the page has none.
    pub async fn booked_seats(&self) -> Result<Vec<SeatId>, ApiError> {
        match self.config.page.booked.as_deref() {
            Some(literal) => {
                let seats = parse_booked_literal(literal)?;
                info!(count = seats.len(), "Booked seats taken from page data");
                Ok(seats)
            }
            None => {
                let seats = self.api.booked_seats(self.config.page.movie_id).await?;
                info!(count = seats.len(), movie_id = self.config.page.movie_id, "Booked seats fetched");
                Ok(seats)
            }
        }
    }

    /// Loads the booked seats and assembles the page with every widget enabled at build time.
    pub async fn into_page(self) -> Result<Page<BookingApiClient>, ApiError> {
        let booked = self.booked_seats().await?;
        let Self { config, api } = self;

        let picker = SeatPicker::new(config.page.movie(), config.seating.rows, config.seating.cols, booked);
        let page = Page::new(api, picker);

        #[cfg(feature = "chat")]
        let page = page.with_chat(controllers::ChatWidget::new(
            controllers::ChatResponder::default(),
            std::time::Duration::from_millis(config.chat.reply_delay_ms),
        ));

        #[cfg(feature = "slider")]
        let page = {
            let banners = config.slider.banner_list();
            if banners.is_empty() {
                tracing::warn!("No banners configured, slider disabled");
            }
            page.with_slider(controllers::Slider::new(
                banners,
                std::time::Duration::from_millis(config.slider.interval_ms),
            ))
        };

        Ok(page)
    }
}
