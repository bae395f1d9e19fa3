use std::str::FromStr;
use thiserror::Error;

use crate::models::SeatId;

/// One line typed into the booking page driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Seat(SeatId),
    Pay,
    Confirm,
    Chat(String),
    OpenChat,
    CloseChat,
    /// 0-based slide index (the user types it 1-based).
    Dot(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a seat number")]
    InvalidSeat(String),
    #[error("`{0}` is not a slide number")]
    InvalidSlide(String),
}

pub const HELP: &str = "\
seat <n>     select / deselect seat n
pay          create the order and show the QR code
confirm      confirm the QR payment
chat <text>  ask the assistant
open, close  show / hide the chat
dot <n>      jump to banner n
show         redraw the page
quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "seat" | "s" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("seat"));
                }
                rest.parse::<u32>()
                    .ok()
                    .and_then(SeatId::new)
                    .map(Command::Seat)
                    .ok_or_else(|| CommandError::InvalidSeat(rest.to_string()))
            }
            "pay" => Ok(Command::Pay),
            "confirm" => Ok(Command::Confirm),
            // пустой текст допустим: виджет сам его отбросит
            "chat" => Ok(Command::Chat(rest.to_string())),
            "open" => Ok(Command::OpenChat),
            "close" => Ok(Command::CloseChat),
            "dot" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("dot"));
                }
                rest.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .map(Command::Dot)
                    .ok_or_else(|| CommandError::InvalidSlide(rest.to_string()))
            }
            "" | "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
