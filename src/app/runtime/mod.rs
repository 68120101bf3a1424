//! Runtime wiring: data source selection, channels, worker, event loop and
//! terminal lifecycle.

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::sources::ApiClient;
use crate::state::AppState;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod channels;
mod cleanup;
mod event_loop;
pub mod handlers;
pub mod worker;

use background::spawn_event_thread;
use channels::Channels;
use cleanup::cleanup_on_exit;
use event_loop::run_event_loop;
use worker::{ApiSource, spawn_api_worker};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Pick the data source for this session.
///
/// Inputs:
/// - `settings`: Effective settings.
/// - `demo`: Serve built-in fixtures instead of the server.
///
/// Output:
/// - The API source, or an error when the HTTP client cannot be built.
pub fn select_source(settings: &Settings, demo: bool) -> Result<ApiSource> {
    if demo {
        return Ok(ApiSource::Demo);
    }
    let client = ApiClient::new(&settings.server_url, settings.request_timeout())?;
    Ok(ApiSource::Http(client))
}

/// What: Run the dashboard end-to-end: set up the terminal, spawn the API worker and
/// event thread, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Effective settings after command-line overrides.
/// - `demo`: Serve built-in fixtures instead of contacting the server.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on terminal setup or client errors.
///
/// Details:
/// - Both pages issue their mount-time requests before the first frame.
/// - The terminal is restored even when the loop ends because all channels closed.
pub async fn run(settings: Settings, demo: bool) -> Result<()> {
    let source = select_source(&settings, demo)?;
    tracing::info!(source = %source.label(), "starting dashboard");

    let mut app = AppState::new(
        settings.default_context(),
        settings.known_contexts(),
        settings.installation_filter(),
        source.label(),
    );

    let (mut channels, worker_ends) = Channels::new();
    spawn_api_worker(source, worker_ends.req_rx, worker_ends.res_tx);

    setup_terminal()?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
        Ok(t) => Some(t),
        Err(e) => {
            restore_terminal()?;
            return Err(e.into());
        }
    };

    spawn_event_thread(
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    app.mount(&channels.api_req_tx);

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    cleanup_on_exit(&channels);
    restore_terminal()?;
    Ok(())
}
