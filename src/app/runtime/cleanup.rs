//! Shutdown of background tasks on exit.

use std::sync::atomic::Ordering;

use super::channels::Channels;

/// What: Signal background threads to stop on exit.
///
/// Inputs:
/// - `channels`: Communication channels
///
/// Details:
/// - Sets the event-thread cancellation flag. The API worker stops on its own
///   once the request sender is dropped with `channels`.
pub fn cleanup_on_exit(channels: &Channels) {
    tracing::debug!("main loop exited");
    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
}
