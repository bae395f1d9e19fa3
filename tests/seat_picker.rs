mod common;

use common::{seat, seats, standard_movie, StubApi};
use seat_booking::controllers::seat_picker::{
    CellState, CheckoutOutcome, CheckoutState, IgnoreReason, Notice, SeatClick, SeatPicker, BOOKING_COMPLETED,
    CONFIRM_LABEL, ORDER_FAILED, PAY_BUSY_LABEL, PAY_LABEL,
};
use seat_booking::error::{ApiError, CheckoutError};
use seat_booking::models::OrderContext;

fn picker() -> SeatPicker {
    SeatPicker::new(standard_movie(), 9, 11, seats(&[5, 12]))
}

#[test]
fn renders_the_whole_hall() {
    let picker = picker();
    assert_eq!(picker.grid().len(), 99);
    assert_eq!(picker.cell_state(seat(5)), Some(CellState::Booked));
    assert_eq!(picker.cell_state(seat(6)), Some(CellState::Available));
    assert_eq!(picker.cell_state(seat(100)), None);
    assert_eq!(picker.summary().to_string(), "No seats selected");
    assert!(!picker.pay_button().enabled);
}

#[test]
fn selecting_two_seats_prices_them() {
    let mut picker = picker();
    assert_eq!(picker.click(seat(2)), SeatClick::Selected(seat(2)));
    assert_eq!(picker.click(seat(1)), SeatClick::Selected(seat(1)));
    assert_eq!(picker.summary().to_string(), "Seats: 1, 2 — Total: 300");
    assert!(picker.pay_button().enabled);

    assert_eq!(picker.click(seat(5)), SeatClick::Ignored(IgnoreReason::Booked));
    assert_eq!(picker.summary().to_string(), "Seats: 1, 2 — Total: 300");
    assert!(!picker.selection().contains(seat(5)));
}

#[test]
fn deselecting_everything_disables_pay() {
    let mut picker = picker();
    picker.click(seat(7));
    assert_eq!(picker.click(seat(7)), SeatClick::Deselected(seat(7)));
    assert!(picker.selection().is_empty());
    assert_eq!(picker.summary().to_string(), "No seats selected");
    assert!(!picker.pay_button().enabled);
}

#[test]
fn seats_outside_the_hall_are_ignored() {
    let mut picker = picker();
    assert_eq!(picker.click(seat(500)), SeatClick::Ignored(IgnoreReason::UnknownSeat));
}

#[test]
fn pay_needs_a_selection() {
    let mut picker = picker();
    assert_eq!(picker.begin_order(), Err(CheckoutError::EmptySelection));
    assert_eq!(picker.state(), CheckoutState::Idle);
}

#[test]
fn order_in_flight_blocks_a_second_one() {
    let mut picker = picker();
    picker.click(seat(3));
    let order = picker.begin_order().unwrap();
    assert_eq!(order, OrderContext { movie_id: 1, seats: seats(&[3]) });
    assert_eq!(picker.pay_button().label, PAY_BUSY_LABEL);
    assert!(!picker.pay_button().enabled);

    assert_eq!(
        picker.begin_order(),
        Err(CheckoutError::InvalidState {
            expected: CheckoutState::Idle,
            actual: CheckoutState::CreatingOrder,
        })
    );
}

#[test]
fn timeout_restores_the_pay_button() {
    let mut picker = picker();
    picker.click(seat(3));
    picker.begin_order().unwrap();

    let outcome = picker.finish_order(Err(ApiError::Timeout)).unwrap();
    assert_eq!(outcome, CheckoutOutcome::Failed);
    assert_eq!(picker.state(), CheckoutState::Idle);
    assert_eq!(picker.pay_button().label, PAY_LABEL);
    assert!(picker.pay_button().enabled);
    assert_eq!(picker.take_notices(), vec![Notice::Error(ORDER_FAILED.to_string())]);
    assert!(picker.selection().contains(seat(3)));
}

#[test]
fn confirm_is_rejected_before_qr() {
    let mut picker = picker();
    picker.click(seat(3));
    assert!(matches!(
        picker.begin_confirmation(),
        Err(CheckoutError::InvalidState { expected: CheckoutState::AwaitingPayment, .. })
    ));
}

#[tokio::test]
async fn qr_ready_freezes_the_grid() {
    let api = StubApi::happy();
    let mut picker = picker();
    picker.click(seat(1));

    assert_eq!(picker.pay(&api).await, Ok(CheckoutOutcome::QrReady));
    assert_eq!(picker.state(), CheckoutState::AwaitingPayment);
    assert!(picker.qr_visible());
    assert!(!picker.pay_button().visible);
    assert!(picker.grid().cells().iter().all(|c| !picker.grid().is_interactive(c.id)));

    assert_eq!(picker.click(seat(1)), SeatClick::Ignored(IgnoreReason::Locked));
    assert_eq!(picker.click(seat(40)), SeatClick::Ignored(IgnoreReason::Locked));
    assert_eq!(picker.summary().to_string(), "Seats: 1 — Total: 150");
    assert!(matches!(picker.pay(&api).await, Err(CheckoutError::InvalidState { .. })));
}

#[tokio::test]
async fn confirmation_books_the_seats() {
    let api = StubApi::happy();
    let mut picker = picker();
    picker.click(seat(1));
    picker.click(seat(2));
    picker.pay(&api).await.unwrap();

    let outcome = picker.confirm(&api).await.unwrap();
    assert_eq!(outcome, CheckoutOutcome::Confirmed(seats(&[1, 2])));

    for n in [1, 2] {
        assert_eq!(picker.cell_state(seat(n)), Some(CellState::Booked));
        assert_eq!(picker.click(seat(n)), SeatClick::Ignored(IgnoreReason::Booked));
    }
    assert!(picker.selection().is_empty());
    assert_eq!(picker.summary().to_string(), "No seats selected");
    assert_eq!(picker.state(), CheckoutState::Idle);
    assert!(!picker.qr_visible());
    assert!(!picker.grid().is_locked());

    let pay = picker.pay_button();
    assert!(pay.visible);
    assert_eq!(pay.label, PAY_LABEL);
    let confirm = picker.confirm_button();
    assert!(confirm.enabled);
    assert_eq!(confirm.label, CONFIRM_LABEL);
    assert_eq!(picker.take_notices(), vec![Notice::Success(BOOKING_COMPLETED.to_string())]);

    // Обе фазы отправили один и тот же заказ
    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, calls[1].1);
    assert_eq!(calls[1].1.seats, seats(&[1, 2]));

    // Pay enables again as soon as something new is picked
    picker.click(seat(3));
    assert!(picker.pay_button().enabled);
}

#[tokio::test]
async fn refused_confirmation_keeps_waiting_for_payment() {
    let api = StubApi {
        confirm: || Err(ApiError::Domain("Payment not received".into())),
        ..StubApi::happy()
    };
    let mut picker = picker();
    picker.click(seat(8));
    picker.pay(&api).await.unwrap();

    let outcome = picker.confirm(&api).await.unwrap();
    assert_eq!(outcome, CheckoutOutcome::Rejected("Payment not received".into()));
    assert_eq!(picker.state(), CheckoutState::AwaitingPayment);
    assert!(picker.qr_visible());
    assert!(picker.grid().is_locked());
    assert!(picker.confirm_button().enabled);
    assert_eq!(picker.confirm_button().label, CONFIRM_LABEL);
    assert_eq!(picker.take_notices(), vec![Notice::Error("Payment not received".into())]);
    assert_eq!(picker.cell_state(seat(8)), Some(CellState::Selected));
}

#[test]
fn pickers_do_not_share_state() {
    let mut first = picker();
    let second = picker();
    first.click(seat(1));
    assert_ne!(first.session_id(), second.session_id());
    assert!(second.selection().is_empty());
}
