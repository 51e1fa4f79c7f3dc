//! Module to control shutdown in flotsam.
//!
//! The emission loop runs until it is told to stop. Telling it to stop is
//! the responsibility of the code in this module, specifically [`Shutdown`]:
//! the binary holds one instance and wires ctrl-c to it, the loop holds a
//! clone and watches it while pausing between lines.

use std::sync::Arc;

use tokio::sync::broadcast;

/// Errors produced by [`Shutdown`]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The mechanism underlaying [`Shutdown`] failed catastrophically.
    #[error("shutdown broadcast failed: {0}")]
    Tokio(#[from] broadcast::error::SendError<()>),
}

#[derive(Debug)]
/// Mechanism to control shutdown in flotsam.
///
/// Everything that participates in controlled shutdown does so by holding a
/// clone of this struct.
pub struct Shutdown {
    /// The broadcast sender, singleton for all `Shutdown` instances derived
    /// from the same root `Shutdown`.
    sender: Arc<broadcast::Sender<()>>,

    /// The receive half of the channel used to listen for shutdown. One per
    /// instance.
    notify: broadcast::Receiver<()>,

    /// `true` if the shutdown signal has been received
    shutdown: bool,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    /// Create a new `Shutdown` instance. There should be only one call to
    /// this function and all subsequent instances should be created through
    /// clones.
    #[must_use]
    pub fn new() -> Self {
        let (shutdown_snd, shutdown_rcv) = broadcast::channel(1);

        Self {
            sender: Arc::new(shutdown_snd),
            notify: shutdown_rcv,
            shutdown: false,
        }
    }

    /// Receive the shutdown notice. This function will block if a notice has
    /// not already been sent.
    pub async fn recv(&mut self) {
        // If the shutdown signal has already been received, then return
        // immediately.
        if self.shutdown {
            return;
        }

        // Cannot receive a "lag error" as only one value is ever sent.
        let _ = self.notify.recv().await;

        // Remember that the signal has been received.
        self.shutdown = true;
    }

    /// Send the shutdown signal through to this and all derived `Shutdown`
    /// instances. Returns the number of active instances, or error.
    ///
    /// # Errors
    ///
    /// Function will return an error if the underlying tokio broadcast
    /// mechanism fails.
    pub fn signal(&self) -> Result<usize, Error> {
        Ok(self.sender.send(())?)
    }
}

impl Clone for Shutdown {
    fn clone(&self) -> Self {
        let notify = self.sender.subscribe();

        Self {
            shutdown: self.shutdown,
            notify,
            sender: Arc::clone(&self.sender),
        }
    }
}
