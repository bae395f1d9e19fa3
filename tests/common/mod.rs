#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use seat_booking::error::ApiError;
use seat_booking::models::{BookingConfirmed, MovieContext, OrderContext, OrderCreated, SeatId};
use seat_booking::services::{BookingApi, BookingApiClient, CircuitBreaker};

pub fn seat(n: u32) -> SeatId {
    SeatId::new(n).unwrap()
}

pub fn seats(ns: &[u32]) -> Vec<SeatId> {
    ns.iter().copied().map(seat).collect()
}

/// The hall from the booking page: 9 x 11, seats 5 and 12 taken, 150 per seat.
pub fn standard_movie() -> MovieContext {
    MovieContext::new(1, 150)
}

pub fn client(uri: &str) -> BookingApiClient {
    client_with(uri, Duration::from_secs(2), 5)
}

pub fn client_with(uri: &str, timeout: Duration, failure_threshold: u32) -> BookingApiClient {
    BookingApiClient::new(uri, timeout, CircuitBreaker::new(failure_threshold, Duration::from_secs(60))).unwrap()
}

/// In-process stand-in for the booking server that records every order it sees.
pub struct StubApi {
    pub create: fn() -> Result<OrderCreated, ApiError>,
    pub confirm: fn() -> Result<BookingConfirmed, ApiError>,
    pub orders: Mutex<Vec<(&'static str, OrderContext)>>,
}

impl StubApi {
    pub fn happy() -> Self {
        Self {
            create: || Ok(OrderCreated { booking_id: Some(1) }),
            confirm: || Ok(BookingConfirmed { message: Some("Booking confirmed via QR".into()) }),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(&'static str, OrderContext)> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for StubApi {
    async fn create_order(&self, order: &OrderContext) -> Result<OrderCreated, ApiError> {
        self.orders.lock().unwrap().push(("create", order.clone()));
        (self.create)()
    }

    async fn confirm_booking(&self, order: &OrderContext) -> Result<BookingConfirmed, ApiError> {
        self.orders.lock().unwrap().push(("confirm", order.clone()));
        (self.confirm)()
    }

    async fn booked_seats(&self, _movie_id: i64) -> Result<Vec<SeatId>, ApiError> {
        Ok(seats(&[5, 12]))
    }
}

/// Happy server that takes `delay` to answer every checkout call.
pub struct SlowApi {
    pub delay: Duration,
    pub inner: StubApi,
}

impl SlowApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay, inner: StubApi::happy() }
    }
}

#[async_trait]
impl BookingApi for SlowApi {
    async fn create_order(&self, order: &OrderContext) -> Result<OrderCreated, ApiError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_order(order).await
    }

    async fn confirm_booking(&self, order: &OrderContext) -> Result<BookingConfirmed, ApiError> {
        tokio::time::sleep(self.delay).await;
        self.inner.confirm_booking(order).await
    }

    async fn booked_seats(&self, movie_id: i64) -> Result<Vec<SeatId>, ApiError> {
        self.inner.booked_seats(movie_id).await
    }
}
