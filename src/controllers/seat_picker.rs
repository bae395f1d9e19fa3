//! Seat picker with the two-phase QR checkout.
//!
//! `Idle -> CreatingOrder -> AwaitingPayment -> ConfirmingPayment -> Idle`.
//! Each phase is split into `begin_*` (guards, disables the control, captures the order)
//! and `finish_*` (applies the server outcome) so a caller can drive the request itself;
//! `pay` and `confirm` compose both halves around a [`BookingApi`] call.

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ApiError, CheckoutError};
use crate::models::{BookingConfirmed, MovieContext, OrderContext, OrderCreated, SeatId};
use crate::seating::{SeatGrid, Selection, Summary};
use crate::services::BookingApi;

pub const PAY_LABEL: &str = "Pay";
pub const PAY_BUSY_LABEL: &str = "Processing...";
pub const CONFIRM_LABEL: &str = "Confirm Payment";
pub const CONFIRM_BUSY_LABEL: &str = "Confirming...";
pub const ORDER_FAILED: &str = "Error creating order.";
pub const CONFIRM_FAILED: &str = "Error confirming payment.";
pub const BOOKING_COMPLETED: &str = "Payment confirmed via QR and booking completed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    /// `/create-order` in flight.
    CreatingOrder,
    /// QR shown, waiting for the user to confirm payment.
    AwaitingPayment,
    /// `/confirm-booking` in flight.
    ConfirmingPayment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub visible: bool,
    pub enabled: bool,
    pub label: &'static str,
}

impl ButtonState {
    const fn new(visible: bool, enabled: bool, label: &'static str) -> Self {
        Self { visible, enabled, label }
    }
}

/// Message surfaced to the user (an `alert` on the page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Booked,
    UnknownSeat,
    /// The grid is frozen while a payment is pending.
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatClick {
    Selected(SeatId),
    Deselected(SeatId),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Available,
    Selected,
    Booked,
}

/// What a finished checkout phase did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    QrReady,
    Confirmed(Vec<SeatId>),
    /// The server refused with a reason; shown verbatim.
    Rejected(String),
    /// Transport, timeout or malformed response; shown as a generic message.
    Failed,
}

/// One booking page's seat picker. Owns all of its state; instances never share anything.
#[derive(Debug)]
pub struct SeatPicker {
    session_id: Uuid,
    movie: MovieContext,
    grid: SeatGrid,
    selection: Selection,
    summary: Summary,
    state: CheckoutState,
    pending_order: Option<OrderContext>,
    pay_button: ButtonState,
    confirm_button: ButtonState,
    qr_visible: bool,
    notices: Vec<Notice>,
}

impl SeatPicker {
    pub fn new(movie: MovieContext, rows: u32, cols: u32, booked: impl IntoIterator<Item = SeatId>) -> Self {
        let grid = SeatGrid::render(rows, cols, booked);
        let session_id = Uuid::new_v4();
        info!(
            %session_id,
            movie_id = movie.movie_id,
            seats = grid.len(),
            booked = grid.booked_seats().count(),
            "Seat picker ready"
        );

        Self {
            session_id,
            movie,
            grid,
            selection: Selection::new(),
            summary: Summary::Empty,
            state: CheckoutState::Idle,
            pending_order: None,
            pay_button: ButtonState::new(true, false, PAY_LABEL),
            confirm_button: ButtonState::new(true, true, CONFIRM_LABEL),
            qr_visible: false,
            notices: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn movie(&self) -> MovieContext {
        self.movie
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn pay_button(&self) -> ButtonState {
        self.pay_button
    }

    pub fn confirm_button(&self) -> ButtonState {
        self.confirm_button
    }

    pub fn qr_visible(&self) -> bool {
        self.qr_visible
    }

    pub fn cell_state(&self, id: SeatId) -> Option<CellState> {
        let cell = self.grid.cell(id)?;
        Some(if cell.is_booked() {
            CellState::Booked
        } else if self.selection.contains(id) {
            CellState::Selected
        } else {
            CellState::Available
        })
    }

    /// Notices raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Toggles a free seat. Booked, unknown and locked seats are left alone.
    pub fn click(&mut self, id: SeatId) -> SeatClick {
        let Some(cell) = self.grid.cell(id) else {
            return SeatClick::Ignored(IgnoreReason::UnknownSeat);
        };
        if cell.is_booked() {
            return SeatClick::Ignored(IgnoreReason::Booked);
        }
        if self.grid.is_locked() {
            return SeatClick::Ignored(IgnoreReason::Locked);
        }

        let outcome = if self.selection.toggle(id) {
            SeatClick::Selected(id)
        } else {
            SeatClick::Deselected(id)
        };
        self.refresh_summary();
        debug!(session_id = %self.session_id, ?outcome, summary = %self.summary, "Seat toggled");
        outcome
    }

    fn refresh_summary(&mut self) {
        self.summary = Summary::compute(&self.selection, self.movie.unit_price);
        self.pay_button.enabled = self.summary.pay_enabled();
    }

    fn expect_state(&self, expected: CheckoutState) -> Result<(), CheckoutError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidState { expected, actual: self.state })
        }
    }

    fn order_context(&self) -> OrderContext {
        OrderContext {
            movie_id: self.movie.movie_id,
            seats: self.selection.to_vec(),
        }
    }

    /* ---------- phase 1: order creation ---------- */

    pub fn begin_order(&mut self) -> Result<OrderContext, CheckoutError> {
        self.expect_state(CheckoutState::Idle)?;
        if self.selection.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }

        let order = self.order_context();
        self.pending_order = Some(order.clone());
        self.state = CheckoutState::CreatingOrder;
        self.pay_button = ButtonState::new(true, false, PAY_BUSY_LABEL);
        info!(session_id = %self.session_id, seats = ?order.seats, "Order creation started");
        Ok(order)
    }

    pub fn finish_order(&mut self, result: Result<OrderCreated, ApiError>) -> Result<CheckoutOutcome, CheckoutError> {
        self.expect_state(CheckoutState::CreatingOrder)?;

        match result {
            Ok(created) => {
                info!(session_id = %self.session_id, booking_id = ?created.booking_id, "QR ready, awaiting payment");
                self.state = CheckoutState::AwaitingPayment;
                self.qr_visible = true;
                self.pay_button.visible = false;
                self.grid.lock();
                Ok(CheckoutOutcome::QrReady)
            }
            Err(e) => {
                self.abort_order();
                Ok(self.report_failure(e, ORDER_FAILED))
            }
        }
    }

    fn abort_order(&mut self) {
        self.state = CheckoutState::Idle;
        self.pending_order = None;
        self.pay_button = ButtonState::new(true, self.summary.pay_enabled(), PAY_LABEL);
    }

    /// Runs phase 1 against `api`.
    pub async fn pay<A>(&mut self, api: &A) -> Result<CheckoutOutcome, CheckoutError>
    where
        A: BookingApi + ?Sized,
    {
        let order = self.begin_order()?;
        let span = info_span!("create_order", session_id = %self.session_id);
        let result = api.create_order(&order).instrument(span).await;
        self.finish_order(result)
    }

    /* ---------- phase 2: payment confirmation ---------- */

    pub fn begin_confirmation(&mut self) -> Result<OrderContext, CheckoutError> {
        self.expect_state(CheckoutState::AwaitingPayment)?;
        if self.selection.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }

        let order = self
            .pending_order
            .clone()
            .unwrap_or_else(|| self.order_context());
        self.state = CheckoutState::ConfirmingPayment;
        self.confirm_button = ButtonState::new(true, false, CONFIRM_BUSY_LABEL);
        info!(session_id = %self.session_id, seats = ?order.seats, "Payment confirmation started");
        Ok(order)
    }

    pub fn finish_confirmation(
        &mut self,
        result: Result<BookingConfirmed, ApiError>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.expect_state(CheckoutState::ConfirmingPayment)?;

        match result {
            Ok(confirmed) => {
                let seats = self.pending_order.take().map(|o| o.seats).unwrap_or_else(|| self.selection.to_vec());
                for &seat in &seats {
                    self.grid.mark_booked(seat);
                }
                self.selection.clear();
                self.refresh_summary();
                self.notices.push(Notice::Success(BOOKING_COMPLETED.to_string()));

                self.state = CheckoutState::Idle;
                self.qr_visible = false;
                self.grid.unlock();
                self.pay_button = ButtonState::new(true, self.summary.pay_enabled(), PAY_LABEL);
                self.confirm_button = ButtonState::new(true, true, CONFIRM_LABEL);
                info!(
                    session_id = %self.session_id,
                    seats = ?seats,
                    message = ?confirmed.message,
                    "Booking completed"
                );
                Ok(CheckoutOutcome::Confirmed(seats))
            }
            Err(e) => {
                // Остаёмся в ожидании оплаты, пользователь может повторить подтверждение
                self.state = CheckoutState::AwaitingPayment;
                self.confirm_button = ButtonState::new(true, true, CONFIRM_LABEL);
                Ok(self.report_failure(e, CONFIRM_FAILED))
            }
        }
    }

    /// Runs phase 2 against `api`.
    pub async fn confirm<A>(&mut self, api: &A) -> Result<CheckoutOutcome, CheckoutError>
    where
        A: BookingApi + ?Sized,
    {
        let order = self.begin_confirmation()?;
        let span = info_span!("confirm_booking", session_id = %self.session_id);
        let result = api.confirm_booking(&order).instrument(span).await;
        self.finish_confirmation(result)
    }

    fn report_failure(&mut self, e: ApiError, generic: &str) -> CheckoutOutcome {
        match e {
            ApiError::Domain(reason) => {
                warn!(session_id = %self.session_id, %reason, "Booking server refused");
                self.notices.push(Notice::Error(reason.clone()));
                CheckoutOutcome::Rejected(reason)
            }
            other => {
                warn!(session_id = %self.session_id, error = %other, "Booking request failed");
                self.notices.push(Notice::Error(generic.to_string()));
                CheckoutOutcome::Failed
            }
        }
    }
}
