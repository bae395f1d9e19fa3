pub mod movie;
pub mod order;
pub mod seat;

pub use movie::MovieContext;
pub use order::{BookedSeatsResponse, BookingConfirmed, OrderContext, OrderCreated};
pub use seat::SeatId;
