use std::fmt;

use super::Selection;
use crate::models::SeatId;

pub const NO_SEATS_SELECTED: &str = "No seats selected";

/// Price summary shown under the grid, recomputed after every toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Empty,
    Seats { seats: Vec<SeatId>, total: i64 },
}

impl Summary {
    pub fn compute(selection: &Selection, unit_price: i64) -> Self {
        if selection.is_empty() {
            return Self::Empty;
        }
        let seats = selection.to_vec();
        let total = (seats.len() as i64).saturating_mul(unit_price);
        Self::Seats { seats, total }
    }

    pub fn total(&self) -> i64 {
        match self {
            Self::Empty => 0,
            Self::Seats { total, .. } => *total,
        }
    }

    /// Pay is offered only for a non-empty selection.
    pub fn pay_enabled(&self) -> bool {
        matches!(self, Self::Seats { .. })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(NO_SEATS_SELECTED),
            Self::Seats { seats, total } => {
                f.write_str("Seats: ")?;
                for (i, seat) in seats.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{seat}")?;
                }
                write!(f, " — Total: {total}")
            }
        }
    }
}
