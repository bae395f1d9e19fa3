//! Seat grid, selection set and the price summary derived from them.

pub mod grid;
pub mod selection;
pub mod summary;

pub use grid::{SeatCell, SeatGrid};
pub use selection::Selection;
pub use summary::Summary;
