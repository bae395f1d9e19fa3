use std::time::Duration;
use tracing::debug;

use crate::error::SliderError;

/// Banner carousel: one active slide, one active dot, rotates on a fixed period.
#[derive(Debug, Clone)]
pub struct Slider {
    slides: Vec<String>,
    index: usize,
    interval: Duration,
}

impl Slider {
    pub fn new(slides: Vec<String>, interval: Duration) -> Self {
        Self { slides, index: 0, interval }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    /// Horizontal offset of the slide strip, in percent of one slide.
    pub fn offset_percent(&self) -> usize {
        100 * self.index
    }

    /// `true` at the active slide's position.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.slides.len()).map(|i| i == self.index).collect()
    }

    pub fn go(&mut self, index: usize) -> Result<(), SliderError> {
        if index >= self.slides.len() {
            return Err(SliderError::OutOfRange { index, len: self.slides.len() });
        }
        self.index = index;
        debug!(index, slide = ?self.current(), "Slide changed");
        Ok(())
    }

    /// Next slide with wrap-around. Inert without slides.
    pub fn advance(&mut self) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }
        let next = (self.index + 1) % self.slides.len();
        self.go(next).ok()?;
        Some(next)
    }
}
