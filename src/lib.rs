pub mod bindings;
pub mod clock;
pub mod config;
pub mod error;
pub mod headless;
pub mod input;
pub mod locale;
pub mod log;
pub mod messages;
pub mod number;
pub mod timer;

// Decoupled game loop architecture
pub mod actors;
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
