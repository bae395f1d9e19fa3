use std::collections::BTreeSet;

use crate::models::SeatId;

/// Seats the user picked but has not paid for yet. Iterates in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    seats: BTreeSet<SeatId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`; returns true if the seat is now selected.
    pub fn toggle(&mut self, id: SeatId) -> bool {
        if self.seats.remove(&id) {
            false
        } else {
            self.seats.insert(id);
            true
        }
    }

    pub fn contains(&self, id: SeatId) -> bool {
        self.seats.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.seats.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<SeatId> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}
