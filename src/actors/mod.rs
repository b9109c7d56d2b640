//! Background actors.
//!
//! Actors run on tokio tasks and talk to the logic thread only by sending
//! [`Message`](crate::tea::Message)s. Keyboard input is not an actor: the
//! logic thread polls it directly.

pub mod clock;

use tokio_util::sync::CancellationToken;

pub use clock::ClockActor;

/// Handle to a running task, used for shutdown.
pub struct ActorHandle {
    cancel: CancellationToken,
}

impl ActorHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the task to stop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
