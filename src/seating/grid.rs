use std::collections::BTreeSet;
use tracing::warn;

use crate::models::SeatId;

/// One cell of the hall. `booked` is fixed at render time and only ever flips to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCell {
    pub id: SeatId,
    pub row: u32,
    pub col: u32,
    booked: bool,
}

impl SeatCell {
    pub fn is_booked(&self) -> bool {
        self.booked
    }
}

/// Fixed `rows x cols` hall, numbered row-major from 1.
#[derive(Debug, Clone)]
pub struct SeatGrid {
    rows: u32,
    cols: u32,
    cells: Vec<SeatCell>,
    locked: bool,
}

impl SeatGrid {
    /// Builds one cell per seat number in `1..=rows*cols`. Booked numbers outside the hall are dropped.
    /// A hall whose seat count does not fit in `u32` renders empty.
    pub fn render(rows: u32, cols: u32, booked: impl IntoIterator<Item = SeatId>) -> Self {
        let Some(total) = rows.checked_mul(cols) else {
            warn!(rows, cols, "Hall too large to number, rendering no seats");
            return Self { rows: 0, cols: 0, cells: Vec::new(), locked: false };
        };
        let booked: BTreeSet<SeatId> = booked
            .into_iter()
            .filter(|id| {
                let inside = id.get() <= total;
                if !inside {
                    warn!(seat = %id, rows, cols, "Booked seat outside the hall, ignoring");
                }
                inside
            })
            .collect();

        let mut cells = Vec::with_capacity(total as usize);
        for row in 1..=rows {
            for col in 1..=cols {
                // row и col начинаются с 1, поэтому номер всегда валиден
                let Some(id) = SeatId::at(row, col, cols) else { continue };
                cells.push(SeatCell { id, row, col, booked: booked.contains(&id) });
            }
        }

        Self { rows, cols, cells, locked: false }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[SeatCell] {
        &self.cells
    }

    /// Cells grouped by row, front row first.
    pub fn row_cells(&self) -> impl Iterator<Item = &[SeatCell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    pub fn cell(&self, id: SeatId) -> Option<&SeatCell> {
        self.cells.get(id.get() as usize - 1)
    }

    pub fn is_booked(&self, id: SeatId) -> bool {
        self.cell(id).is_some_and(SeatCell::is_booked)
    }

    pub fn booked_seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.cells.iter().filter(|c| c.booked).map(|c| c.id)
    }

    /// A cell accepts clicks only if it exists, is free and the grid is not locked for payment.
    pub fn is_interactive(&self, id: SeatId) -> bool {
        !self.locked && self.cell(id).is_some_and(|c| !c.booked)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }

    pub(crate) fn mark_booked(&mut self, id: SeatId) -> bool {
        match self.cells.get_mut(id.get() as usize - 1) {
            Some(cell) => {
                cell.booked = true;
                true
            }
            None => false,
        }
    }
}
