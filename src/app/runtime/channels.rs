//! Channels between the event loop, the reader thread and the API worker.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::{ApiRequest, ApiResponse};

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Contains the senders and receivers used between the main event loop,
///   the terminal event thread, and the API worker.
pub struct Channels {
    /// Terminal events from the reader thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal events consumed by the loop.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit to stop the reader thread.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Requests to the API worker.
    pub api_req_tx: mpsc::UnboundedSender<ApiRequest>,
    /// Answers from the API worker.
    pub api_res_rx: mpsc::UnboundedReceiver<ApiResponse>,
}

/// Worker-side ends handed to `spawn_api_worker`.
pub struct WorkerEnds {
    /// Requests to serve.
    pub req_rx: mpsc::UnboundedReceiver<ApiRequest>,
    /// Where answers go.
    pub res_tx: mpsc::UnboundedSender<ApiResponse>,
}

impl Channels {
    /// What: Create all runtime channels.
    ///
    /// Output:
    /// - Loop-side channels plus the ends the API worker owns.
    #[must_use]
    pub fn new() -> (Self, WorkerEnds) {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let (api_req_tx, req_rx) = mpsc::unbounded_channel::<ApiRequest>();
        let (res_tx, api_res_rx) = mpsc::unbounded_channel::<ApiResponse>();
        (
            Self {
                event_tx,
                event_rx,
                event_thread_cancelled: Arc::new(AtomicBool::new(false)),
                api_req_tx,
                api_res_rx,
            },
            WorkerEnds { req_rx, res_tx },
        )
    }
}
