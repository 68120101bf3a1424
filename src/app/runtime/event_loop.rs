//! Draw-and-wait loop over terminal events and API answers.

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::select;

use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;
use super::handlers::handle_api_response;

/// What: Process one channel message.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels
///
/// Output: `true` if the event loop should exit
///
/// Details:
/// - Exits as well when every channel has closed.
async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            crate::events::handle_event(&ev, app, &channels.api_req_tx)
        }
        Some(res) = channels.api_res_rx.recv() => {
            let outcome = handle_api_response(app, res);
            tracing::trace!(?outcome, "applied API response");
            false
        }
        else => true
    }
}

/// What: Run the main event loop, rendering after every message.
///
/// Inputs:
/// - `terminal`: Terminal for rendering (`None` in headless mode)
/// - `app`: Application state
/// - `channels`: Communication channels
pub async fn run_event_loop(
    terminal: &mut Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
    app: &mut AppState,
    channels: &mut Channels,
) {
    loop {
        if let Some(t) = terminal.as_mut()
            && let Err(e) = t.draw(|f| ui(f, app))
        {
            tracing::warn!(error = %e, "frame draw failed");
        }

        if process_channel_messages(app, channels).await {
            break;
        }
    }
}
