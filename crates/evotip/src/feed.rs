//! # Discovery Feed
//!
//! The widget scanner runs wherever the host lets it walk views; the core
//! drains what it found on its own cadence.
//!
//! ```text
//! ┌─────────────┐  Sighting   ┌─────────────┐  drain   ┌─────────────┐
//! │  Discovery  │────────────>│   bounded   │─────────>│ IconScanner │
//! │   layer     │ try_send    │   channel   │          │             │
//! └─────────────┘             └─────────────┘          └─────────────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use evotip_ui::WidgetId;

/// A widget seen showing a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    /// Widget showing the sprite.
    pub widget: WidgetId,
    /// Host sprite name currently on the widget.
    pub visual_key: String,
}

impl Sighting {
    /// Creates a sighting.
    #[must_use]
    pub fn new(widget: WidgetId, visual_key: impl Into<String>) -> Self {
        Self {
            widget,
            visual_key: visual_key.into(),
        }
    }
}

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn sighting_channel(capacity: usize) -> (SightingSender, SightingReceiver) {
    let (sender, receiver) = bounded(capacity);
    (SightingSender { sender }, SightingReceiver { receiver })
}

/// Handle for the discovery layer.
#[derive(Clone, Debug)]
pub struct SightingSender {
    sender: Sender<Sighting>,
}

impl SightingSender {
    /// Reports a sighting (non-blocking).
    ///
    /// Returns `false` if the feed is full or the overlay detached. A dropped
    /// sighting is re-reported by the next discovery pass.
    #[inline]
    pub fn send(&self, sighting: Sighting) -> bool {
        match self.sender.try_send(sighting) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("discovery feed full; sighting dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle held by the scanner.
#[derive(Debug)]
pub struct SightingReceiver {
    receiver: Receiver<Sighting>,
}

impl SightingReceiver {
    /// Receives all pending sightings (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<Sighting> {
        let mut sightings = Vec::with_capacity(self.receiver.len());
        while let Ok(sighting) = self.receiver.try_recv() {
            sightings.push(sighting);
        }
        sightings
    }

    /// Discards everything pending.
    pub fn discard(&self) {
        while self.receiver.try_recv().is_ok() {}
    }

    /// Returns the number of pending sightings.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
