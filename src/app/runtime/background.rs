//! Terminal event reader thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

/// What: Spawn the thread that reads terminal events.
///
/// Inputs:
/// - `event_tx`: Sender for terminal events.
/// - `cancelled`: Flag set on exit.
///
/// Details:
/// - Polls with a 50ms timeout so the cancellation flag is observed promptly.
/// - Exits when the flag is set or the receiver is dropped.
pub fn spawn_event_thread(
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
) {
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    // ignore transient read errors
                    if let Ok(ev) = crossterm::event::read() {
                        if cancelled.load(Ordering::Relaxed) {
                            break;
                        }
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "terminal poll failed");
                }
            }
        }
        tracing::debug!("event thread stopped");
    });
}
