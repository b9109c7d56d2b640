//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function. They come from the terminal
//! (keys, paste, resize) or from the clock actor.

use crossterm::event::KeyEvent;

use crate::clock::Timestamp;

/// Input messages to the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Terminal events
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),

    // From the clock actor
    Tick(Timestamp),
}
