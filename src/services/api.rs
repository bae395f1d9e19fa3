//! api.rs
//!
//! Клиент сервера бронирования.
//!
//! 1.  **BookingApi**: трейт с тремя вызовами страницы бронирования - создание заказа,
//!     подтверждение оплаты по QR и загрузка уже занятых мест. Контроллер выбора мест
//!     зависит только от трейта, поэтому в тестах его легко подменить.
//! 2.  **BookingApiClient**: реализация поверх `reqwest`. Каждый запрос ограничен таймаутом
//!     и проходит через `CircuitBreaker`.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{ApiConfig, CircuitBreakerConfig};
use crate::error::ApiError;
use crate::models::order::parse_checkout_body;
use crate::models::{BookedSeatsResponse, BookingConfirmed, OrderContext, OrderCreated, SeatId};
use crate::services::circuit_breaker::{CircuitBreaker, CircuitState};

#[async_trait]
pub trait BookingApi: Send + Sync {
    /// POST /create-order
    async fn create_order(&self, order: &OrderContext) -> Result<OrderCreated, ApiError>;

    /// POST /confirm-booking
    async fn confirm_booking(&self, order: &OrderContext) -> Result<BookingConfirmed, ApiError>;

    /// GET /api/booked/<movie_id>
    async fn booked_seats(&self, movie_id: i64) -> Result<Vec<SeatId>, ApiError>;
}

/// HTTP client for the booking server.
#[derive(Clone)]
pub struct BookingApiClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl BookingApiClient {
    pub fn from_config(api: &ApiConfig, breaker: &CircuitBreakerConfig) -> Result<Self, ApiError> {
        Self::new(
            &api.base_url,
            Duration::from_secs(api.request_timeout_secs),
            CircuitBreaker::new(breaker.failure_threshold, Duration::from_secs(breaker.timeout_seconds)),
        )
    }

    pub fn new(base_url: &str, timeout: Duration, circuit_breaker: CircuitBreaker) -> Result<Self, ApiError> {
        reqwest::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            circuit_breaker: Arc::new(circuit_breaker),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Пропускает запрос через Circuit Breaker. Ответ с `error` считается успешным обменом.
    async fn execute_with_circuit_breaker<F, T>(&self, endpoint: &'static str, operation: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if !self.circuit_breaker.can_execute() {
            warn!(endpoint, "Circuit breaker is OPEN - blocking booking request");
            return Err(ApiError::CircuitOpen);
        }

        match operation.await {
            Err(e) if e.is_outage() => {
                error!(endpoint, error = %e, "Booking request failed");
                self.circuit_breaker.record_failure();
                Err(e)
            }
            other => {
                self.circuit_breaker.record_success();
                other
            }
        }
    }

    async fn post_order(&self, path: &str, order: &OrderContext) -> Result<Map<String, Value>, ApiError> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(order)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(path, %status, "Booking server responded");
        // Сервер отдаёт 400 вместе с {error}, поэтому статус не проверяем
        parse_checkout_body(&body)
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }
}

#[async_trait]
impl BookingApi for BookingApiClient {
    async fn create_order(&self, order: &OrderContext) -> Result<OrderCreated, ApiError> {
        info!(movie_id = order.movie_id, seats = order.seats.len(), "Creating order");
        self.execute_with_circuit_breaker("create-order", async {
            let body = self.post_order("/create-order", order).await?;
            OrderCreated::from_body(&body)
        })
        .await
    }

    async fn confirm_booking(&self, order: &OrderContext) -> Result<BookingConfirmed, ApiError> {
        info!(movie_id = order.movie_id, seats = order.seats.len(), "Confirming booking");
        self.execute_with_circuit_breaker("confirm-booking", async {
            let body = self.post_order("/confirm-booking", order).await?;
            Ok::<_, ApiError>(BookingConfirmed::from_body(&body))
        })
        .await
    }

    async fn booked_seats(&self, movie_id: i64) -> Result<Vec<SeatId>, ApiError> {
        self.execute_with_circuit_breaker("booked", async {
            let body = self
                .http_client
                .get(self.url(&format!("/api/booked/{movie_id}")))
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            let parsed: BookedSeatsResponse = serde_json::from_str(&body)?;
            Ok::<_, ApiError>(parsed.booked)
        })
        .await
    }
}
