//! Bounded, lossy progress reporting for downloads.
//!
//! Single producer, single consumer. Intermediate fractions are delivered
//! at-most-once: when the consumer is not currently receiving they are
//! dropped rather than blocking the download. The terminal completion event
//! is best-effort-delivered-once, and the channel always closes afterward so
//! the consumer can detect end-of-stream deterministically even when the
//! completion event itself was dropped.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};

/// Default channel capacity; enough to smooth a redraw hiccup without
/// buffering a meaningful backlog of stale fractions.
pub const PROGRESS_CAPACITY: usize = 16;

/// Events observed by the consumer side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// Download fraction in `0.0..=1.0`; only meaningful when the total
    /// size is known.
    Fraction(f64),

    /// The download (and extraction) finished. The channel closes right
    /// after this is attempted.
    Completed,
}

/// Producer handle held by the download loop.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: SyncSender<ProgressEvent>,
}

/// Create a bounded progress channel with the given capacity.
pub fn progress_channel(capacity: usize) -> (ProgressReporter, Receiver<ProgressEvent>) {
    let (tx, rx) = sync_channel(capacity);
    (ProgressReporter { tx }, rx)
}

impl ProgressReporter {
    /// Report an intermediate fraction. Never blocks; dropped when the
    /// buffer is full or the consumer went away.
    pub fn update(&self, fraction: f64) {
        match self.tx.try_send(ProgressEvent::Fraction(fraction)) {
            Ok(()) | Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {}
        }
    }

    /// Attempt to deliver the terminal event, then close the channel by
    /// dropping the sender. Consumers must treat channel closure, not the
    /// event itself, as the authoritative end-of-stream signal.
    pub fn complete(self) {
        let _ = self.tx.try_send(ProgressEvent::Completed);
    }
}
