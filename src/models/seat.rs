use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Row-major seat number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SeatId(u32);

impl SeatId {
    /// Returns `None` for 0, seat numbers start at 1.
    pub fn new(n: u32) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Seat number for a 1-based `(row, col)` in a grid `cols` wide.
    /// `None` when the position is outside the grid or its number does not fit in `u32`.
    pub fn at(row: u32, col: u32, cols: u32) -> Option<Self> {
        if row == 0 || col == 0 || col > cols {
            return None;
        }
        (row - 1).checked_mul(cols)?.checked_add(col).and_then(Self::new)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Страница отдаёт занятые места строками ("5"), API принимает числа - поддерживаем оба варианта
impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeatIdVisitor;

        impl Visitor<'_> for SeatIdVisitor {
            type Value = SeatId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a positive seat number or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SeatId, E> {
                u32::try_from(v)
                    .ok()
                    .and_then(SeatId::new)
                    .ok_or_else(|| E::custom(format!("invalid seat number {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SeatId, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid seat number {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SeatId, E> {
                v.trim()
                    .parse::<u64>()
                    .map_err(|_| E::custom(format!("invalid seat number {v:?}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(SeatIdVisitor)
    }
}

/// Parses the booked-seat array literal embedded in the page, e.g. `["5","12"]` or `[5, 12]`.
pub fn parse_booked_literal(literal: &str) -> Result<Vec<SeatId>, serde_json::Error> {
    serde_json::from_str(literal)
}
