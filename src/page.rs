use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

use crate::commands::{Command, HELP};
use crate::controllers::{CheckoutOutcome, SeatPicker};
use crate::error::{ApiError, CheckoutError};
use crate::models::{BookingConfirmed, OrderCreated};
#[cfg(feature = "chat")]
use crate::controllers::ChatWidget;
#[cfg(feature = "slider")]
use crate::controllers::Slider;
use crate::services::BookingApi;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Background work that finished and was applied to the page.
#[derive(Debug, PartialEq, Eq)]
pub enum PageEvent {
    Checkout(Result<CheckoutOutcome, CheckoutError>),
    ChatReply,
}

enum CheckoutReply {
    Order(Result<OrderCreated, ApiError>),
    Confirmation(Result<BookingConfirmed, ApiError>),
}

// Запрос живёт отдельно от &mut Page, пока он идёт страница принимает команды
type InFlight = Pin<Box<dyn Future<Output = CheckoutReply> + Send>>;

/// The booking page: seat picker plus the optional chat and banner widgets.
/// Widgets are independent; a command only ever touches one of them.
/// Commands never wait on the network: checkout requests and chat replies
/// finish through [`Page::next_event`].
pub struct Page<A> {
    api: Arc<A>,
    picker: SeatPicker,
    request: Option<InFlight>,
    #[cfg(feature = "chat")]
    chat: Option<ChatWidget>,
    #[cfg(feature = "slider")]
    slider: Option<Slider>,
    feedback: Vec<String>,
}

impl<A: BookingApi + 'static> Page<A> {
    pub fn new(api: A, picker: SeatPicker) -> Self {
        Self {
            api: Arc::new(api),
            picker,
            request: None,
            #[cfg(feature = "chat")]
            chat: None,
            #[cfg(feature = "slider")]
            slider: None,
            feedback: Vec::new(),
        }
    }

    #[cfg(feature = "chat")]
    pub fn with_chat(mut self, chat: ChatWidget) -> Self {
        self.chat = Some(chat);
        self
    }

    #[cfg(feature = "slider")]
    pub fn with_slider(mut self, slider: Slider) -> Self {
        self.slider = Some(slider);
        self
    }

    pub fn picker(&self) -> &SeatPicker {
        &self.picker
    }

    /// True while a `/create-order` or `/confirm-booking` call is pending.
    pub fn request_in_flight(&self) -> bool {
        self.request.is_some()
    }

    #[cfg(feature = "chat")]
    pub fn chat(&self) -> Option<&ChatWidget> {
        self.chat.as_ref()
    }

    #[cfg(feature = "slider")]
    pub fn slider(&self) -> Option<&Slider> {
        self.slider.as_ref()
    }

    /// Lines to show the user since the last call: picker notices first, then command feedback.
    pub fn take_feedback(&mut self) -> Vec<String> {
        let mut lines: Vec<String> = self.picker.take_notices().iter().map(ui::render_notice).collect();
        lines.append(&mut self.feedback);
        lines
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        #[cfg(feature = "slider")]
        if let Some(slider) = &self.slider {
            out.push_str(&ui::render_slider(slider));
        }
        out.push_str(&ui::render_picker(&self.picker));
        #[cfg(feature = "chat")]
        if let Some(chat) = &self.chat {
            out.push_str(&ui::render_chat(chat));
        }
        out
    }

    /// Period of the banner rotation, if there is anything to rotate.
    pub fn tick_interval(&self) -> Option<std::time::Duration> {
        #[cfg(feature = "slider")]
        if let Some(slider) = self.slider.as_ref().filter(|s| !s.is_empty()) {
            return Some(slider.interval());
        }
        None
    }

    /// Timer tick: rotates the banner. Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        #[cfg(feature = "slider")]
        if let Some(slider) = self.slider.as_mut() {
            return slider.advance().is_some();
        }
        false
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        debug!(?command, "Handling command");
        match command {
            Command::Seat(id) => {
                self.picker.click(id);
            }
            Command::Pay => self.start_order(),
            Command::Confirm => self.start_confirmation(),
            Command::Chat(text) => self.chat_message(&text),
            Command::OpenChat => self.toggle_chat(true),
            Command::CloseChat => self.toggle_chat(false),
            Command::Dot(index) => self.go_to_slide(index),
            Command::Show => {}
            Command::Help => self.feedback.push(HELP.to_string()),
            Command::Quit => {
                info!(session_id = %self.picker.session_id(), "Leaving booking page");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn start_order(&mut self) {
        match self.picker.begin_order() {
            Ok(order) => {
                let api = Arc::clone(&self.api);
                let span = info_span!("create_order", session_id = %self.picker.session_id());
                let request: InFlight =
                    Box::pin(async move { CheckoutReply::Order(api.create_order(&order).await) }.instrument(span));
                self.request = Some(request);
            }
            Err(e) => self.feedback.push(format!("cannot pay: {e}")),
        }
    }

    fn start_confirmation(&mut self) {
        match self.picker.begin_confirmation() {
            Ok(order) => {
                let api = Arc::clone(&self.api);
                let span = info_span!("confirm_booking", session_id = %self.picker.session_id());
                let request: InFlight = Box::pin(
                    async move { CheckoutReply::Confirmation(api.confirm_booking(&order).await) }.instrument(span),
                );
                self.request = Some(request);
            }
            Err(e) => self.feedback.push(format!("cannot confirm: {e}")),
        }
    }

    /// Waits for the pending checkout request or the next due chat reply and applies it.
    /// Never resolves while nothing is pending. Safe to drop and call again: the
    /// request and the reply queue are owned by the page, not by this future.
    pub async fn next_event(&mut self) -> PageEvent {
        #[cfg(feature = "chat")]
        let chat_reply = wait_chat_reply(&mut self.chat);
        #[cfg(not(feature = "chat"))]
        let chat_reply = std::future::pending::<()>();

        tokio::select! {
            reply = wait_request(&mut self.request) => {
                let outcome = match reply {
                    CheckoutReply::Order(result) => self.picker.finish_order(result),
                    CheckoutReply::Confirmation(result) => self.picker.finish_confirmation(result),
                };
                debug!(?outcome, "Checkout request finished");
                PageEvent::Checkout(outcome)
            }
            () = chat_reply => PageEvent::ChatReply,
        }
    }

    #[cfg(feature = "chat")]
    fn chat_message(&mut self, text: &str) {
        match self.chat.as_mut() {
            Some(chat) => {
                chat.post(text);
            }
            None => self.feedback.push("chat is not available".to_string()),
        }
    }

    #[cfg(not(feature = "chat"))]
    fn chat_message(&mut self, _text: &str) {
        self.feedback.push("chat is not available".to_string());
    }

    #[cfg(feature = "chat")]
    fn toggle_chat(&mut self, open: bool) {
        match self.chat.as_mut() {
            Some(chat) if open => chat.open(),
            Some(chat) => chat.close(),
            None => self.feedback.push("chat is not available".to_string()),
        }
    }

    #[cfg(not(feature = "chat"))]
    fn toggle_chat(&mut self, _open: bool) {
        self.feedback.push("chat is not available".to_string());
    }

    #[cfg(feature = "slider")]
    fn go_to_slide(&mut self, index: usize) {
        match self.slider.as_mut() {
            Some(slider) => {
                if let Err(e) = slider.go(index) {
                    self.feedback.push(e.to_string());
                }
            }
            None => self.feedback.push("no banners on this page".to_string()),
        }
    }

    #[cfg(not(feature = "slider"))]
    fn go_to_slide(&mut self, _index: usize) {
        self.feedback.push("no banners on this page".to_string());
    }
}

async fn wait_request(request: &mut Option<InFlight>) -> CheckoutReply {
    let Some(in_flight) = request.as_mut() else {
        return std::future::pending().await;
    };
    let reply = in_flight.await;
    *request = None;
    reply
}

#[cfg(feature = "chat")]
async fn wait_chat_reply(chat: &mut Option<ChatWidget>) {
    match chat {
        Some(chat) => {
            chat.next_reply().await;
        }
        None => std::future::pending().await,
    }
}
