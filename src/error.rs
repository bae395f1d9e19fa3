use thiserror::Error;

use crate::controllers::seat_picker::CheckoutState;

/// Failures talking to the booking server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Сервер ответил и явно указал причину отказа (например, место уже занято).
    #[error("{0}")]
    Domain(String),
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("circuit breaker is open - booking server temporarily unavailable")]
    CircuitOpen,
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True when the server never produced a usable answer.
    pub fn is_outage(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_) | Self::Decode(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

/// Checkout actions rejected by the seat picker before any request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("no seats selected")]
    EmptySelection,
    #[error("checkout is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: CheckoutState,
        actual: CheckoutState,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SliderError {
    #[error("slide {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
