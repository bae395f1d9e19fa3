use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SeatId;
use crate::error::ApiError;

/// Marker `/create-order` returns once the QR code may be shown.
pub const QR_READY: &str = "qr_ready";

/// Body of both checkout calls. Captured once per checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderContext {
    pub movie_id: i64,
    pub seats: Vec<SeatId>,
}

/// `/create-order` answered with `qr_ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCreated {
    pub booking_id: Option<i64>,
}

/// `/confirm-booking` answered without an `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmed {
    pub message: Option<String>,
}

// GET /api/booked/<movie_id>
#[derive(Debug, Deserialize)]
pub struct BookedSeatsResponse {
    #[serde(default)]
    pub booked: Vec<SeatId>,
}

/// Parses a checkout response body into a JSON object and surfaces a server-reported error.
pub(crate) fn parse_checkout_body(body: &str) -> Result<Map<String, Value>, ApiError> {
    let object: Map<String, Value> = serde_json::from_str(body)?;
    match object.get("error") {
        Some(Value::String(reason)) if !reason.is_empty() => Err(ApiError::Domain(reason.clone())),
        Some(other) if is_truthy(other) => Err(ApiError::Domain(other.to_string())),
        _ => Ok(object),
    }
}

// Страница проверяет `if (data.error)`: null, false, 0 и "" ошибкой не считаются
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl OrderCreated {
    pub(crate) fn from_body(object: &Map<String, Value>) -> Result<Self, ApiError> {
        match object.get("message").and_then(Value::as_str) {
            Some(QR_READY) => Ok(Self {
                booking_id: object.get("booking_id").and_then(Value::as_i64),
            }),
            _ => Err(ApiError::UnexpectedResponse(Value::Object(object.clone()).to_string())),
        }
    }
}

impl BookingConfirmed {
    // Положительной схемы ответа нет: успех = отсутствие поля error
    pub(crate) fn from_body(object: &Map<String, Value>) -> Self {
        Self {
            message: object.get("message").and_then(Value::as_str).map(str::to_string),
        }
    }
}
