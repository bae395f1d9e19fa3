//! Plain-text rendering of the booking page for the terminal driver.

use std::fmt::Write as _;

use crate::controllers::seat_picker::{ButtonState, CellState, Notice, SeatPicker};
#[cfg(feature = "chat")]
use crate::controllers::chat::{Author, ChatWidget};
#[cfg(feature = "slider")]
use crate::controllers::slider::Slider;

/// Last chat entries shown when the panel is open.
const CHAT_TAIL: usize = 6;

fn cell(picker: &SeatPicker, cell: &crate::seating::SeatCell) -> String {
    match picker.cell_state(cell.id) {
        Some(CellState::Selected) => format!("[{:>3}]", cell.id),
        Some(CellState::Booked) => "  xx ".to_string(),
        _ => format!(" {:>3} ", cell.id),
    }
}

fn button(b: ButtonState) -> Option<String> {
    if !b.visible {
        return None;
    }
    Some(if b.enabled {
        format!("<{}>", b.label)
    } else {
        format!("<{}> (disabled)", b.label)
    })
}

pub fn render_picker(picker: &SeatPicker) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "            SCREEN");
    for row in picker.grid().row_cells() {
        let line: String = row.iter().map(|c| cell(picker, c)).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    if picker.grid().is_locked() {
        let _ = writeln!(out, "(seat selection paused while payment is pending)");
    }
    let _ = writeln!(out, "{}", picker.summary());
    if let Some(pay) = button(picker.pay_button()) {
        let _ = writeln!(out, "{pay}");
    }
    if picker.qr_visible() {
        let _ = writeln!(out, "[QR] scan the code to pay, then type `confirm`");
        if let Some(confirm) = button(picker.confirm_button()) {
            let _ = writeln!(out, "{confirm}");
        }
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Error(text) => format!("! {text}"),
        Notice::Success(text) => format!("* {text}"),
    }
}

#[cfg(feature = "chat")]
pub fn render_chat(chat: &ChatWidget) -> String {
    if !chat.is_open() {
        return "[chat] type `open` to talk to the assistant\n".to_string();
    }
    let mut out = String::from("--- chat (type `close` to hide) ---\n");
    let start = chat.transcript().len().saturating_sub(CHAT_TAIL);
    for message in &chat.transcript()[start..] {
        let who = match message.author {
            Author::User => "you",
            Author::Bot => "bot",
        };
        let _ = writeln!(out, "{who}: {}", message.text);
    }
    out
}

#[cfg(feature = "slider")]
pub fn render_slider(slider: &Slider) -> String {
    let Some(current) = slider.current() else {
        return String::new();
    };
    let dots: Vec<&str> = slider.dots().into_iter().map(|on| if on { "●" } else { "○" }).collect();
    format!("banner {}/{}: {current}  {}\n", slider.index() + 1, slider.len(), dots.join(" "))
}
