//! The Elm Architecture (TEA) store for the datenum TUI.
//!
//! - `Model`: pure application state, including the derived labels
//! - `Message`: inputs (keystrokes, paste, clock ticks)
//! - `Command`: side effects requested by `update` (clock lifecycle, quit)
//! - `update`: the only place state changes

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::Command;
pub use message::Message;
pub use model::{Field, FormState, Model, Screen};
pub use update::update;
