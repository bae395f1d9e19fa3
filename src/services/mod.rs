pub mod api;
pub mod circuit_breaker;

pub use api::{BookingApi, BookingApiClient};
pub use circuit_breaker::{CircuitBreaker, CircuitState};
