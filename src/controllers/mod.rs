pub mod seat_picker;
#[cfg(feature = "chat")]
pub mod chat;
#[cfg(feature = "slider")]
pub mod slider;

pub use seat_picker::{CheckoutOutcome, CheckoutState, Notice, SeatClick, SeatPicker};
#[cfg(feature = "chat")]
pub use chat::{ChatResponder, ChatWidget};
#[cfg(feature = "slider")]
pub use slider::Slider;
