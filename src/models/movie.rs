use serde::{Deserialize, Serialize};

/// Movie identifier and per-seat price the page hands to the seat picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieContext {
    pub movie_id: i64,
    pub unit_price: i64,
}

impl MovieContext {
    pub fn new(movie_id: i64, unit_price: i64) -> Self {
        Self { movie_id, unit_price }
    }
}
