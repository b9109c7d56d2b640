//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function, executed by the logic
//! thread after `update` returns.

/// Output commands from the update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the periodic clock tick (first tick is immediate).
    StartClock,
    /// Cancel the periodic clock tick.
    StopClock,
    Quit,
}
