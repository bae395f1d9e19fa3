use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

pub const FALLBACK_REPLY: &str =
    "Sorry, I didn't understand that. Try asking about movies, booking, or payment.";

// Предопределённые ответы: ключ - точное слово в нижнем регистре
const DEFAULT_REPLIES: &[(&str, &str)] = &[
    ("hi", "Hello! How can I help you today?"),
    ("hello", "Hi! Ask me anything about movies or booking."),
    ("movie", "You can check all available movies on the homepage!"),
    ("movies", "We have multiple movies available. Click a movie to see details."),
    ("price", "Ticket price varies between ₹150 to ₹200 depending on the movie."),
    ("booking", "To book a ticket, open any movie and select your seats."),
    ("payment", "We support QR code payment currently."),
    ("qr", "Scan the QR code and click 'Confirm Payment'."),
    ("help", "You can ask about movies, booking, price, or payment."),
];

/// Fixed keyword table; matching is case-insensitive and exact.
#[derive(Debug, Clone)]
pub struct ChatResponder {
    replies: HashMap<String, String>,
    fallback: String,
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLIES.iter().copied(), FALLBACK_REPLY)
    }
}

impl ChatResponder {
    pub fn new<K, V>(replies: impl IntoIterator<Item = (K, V)>, fallback: impl Into<String>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            replies: replies
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    pub fn reply_for(&self, message: &str) -> &str {
        self.replies
            .get(&message.to_lowercase())
            .map_or(self.fallback.as_str(), String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Chat panel: transcript plus open/closed visibility.
/// Replies wait in a queue until their deadline instead of holding the page.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    responder: ChatResponder,
    transcript: Vec<ChatMessage>,
    reply_delay: Duration,
    pending: VecDeque<(Instant, String)>,
    open: bool,
}

impl ChatWidget {
    pub fn new(responder: ChatResponder, reply_delay: Duration) -> Self {
        Self {
            responder,
            transcript: Vec::new(),
            reply_delay,
            pending: VecDeque::new(),
            open: false,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Index of the entry the transcript is scrolled to; always the latest one.
    pub fn scroll_position(&self) -> Option<usize> {
        self.transcript.len().checked_sub(1)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The launcher button is shown exactly when the panel is hidden.
    pub fn launcher_visible(&self) -> bool {
        !self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn push(&mut self, author: Author, text: String) {
        self.transcript.push(ChatMessage { author, text, sent_at: Utc::now() });
    }

    /// Records the user's trimmed message and returns the reply to deliver later.
    /// Blank input records nothing.
    pub fn submit(&mut self, raw: &str) -> Option<String> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }
        let reply = self.responder.reply_for(message).to_string();
        self.push(Author::User, message.to_string());
        debug!(%message, "Chat message submitted");
        Some(reply)
    }

    pub fn deliver(&mut self, reply: String) {
        self.push(Author::Bot, reply);
    }

    /// `submit` with the reply scheduled `reply_delay` from now. Returns false for blank input.
    pub fn post(&mut self, raw: &str) -> bool {
        let Some(reply) = self.submit(raw) else {
            return false;
        };
        self.pending.push_back((Instant::now() + self.reply_delay, reply));
        true
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the oldest scheduled reply.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|(due, _)| *due)
    }

    /// Waits for the oldest scheduled reply and appends it to the transcript.
    /// Never resolves while the queue is empty. Dropping the future loses nothing:
    /// a reply leaves the queue only once it is due.
    pub async fn next_reply(&mut self) -> Option<&ChatMessage> {
        let Some(due) = self.next_due() else {
            return std::future::pending().await;
        };
        tokio::time::sleep_until(due).await;
        let (_, reply) = self.pending.pop_front()?;
        self.deliver(reply);
        self.transcript.last()
    }
}
