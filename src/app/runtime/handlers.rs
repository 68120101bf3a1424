//! Applies API worker answers to the dashboard state.

use crate::logic::lazy_cache::Completion;
use crate::state::{ApiResponse, AppState};

/// What: Apply one API worker response to the application state.
///
/// Inputs:
/// - `app`: Application state
/// - `res`: Response from the API worker
///
/// Output:
/// - Completion of the underlying view-model update.
///
/// Details:
/// - Failures surface as a status-bar notice; the affected panel shows its own
///   error state. Stale answers are dropped silently.
pub fn handle_api_response(app: &mut AppState, res: ApiResponse) -> Completion {
    match res {
        ApiResponse::Components {
            context,
            seq,
            result,
        } => {
            let message = result
                .as_ref()
                .err()
                .map(|e| format!("Listing components of {context} failed: {e}"));
            let outcome = app.browser.handle_components_result(&context, seq, result);
            if outcome == Completion::Failed
                && let Some(m) = message
            {
                app.notify_error(m);
            }
            outcome
        }
        ApiResponse::Versions { ticket, result } => {
            let message = result
                .as_ref()
                .err()
                .map(|e| format!("Versions of {} unavailable: {e}", ticket.key.component));
            let outcome = app.browser.handle_versions_result(ticket, result);
            if outcome == Completion::Failed
                && let Some(m) = message
            {
                app.notify_error(m);
            }
            outcome
        }
        ApiResponse::Installations { seq, result } => {
            let message = result
                .as_ref()
                .err()
                .map(|e| format!("Loading installations failed: {e}"));
            let outcome = app.tree.handle_installations_result(seq, result);
            match outcome {
                Completion::Failed => {
                    if let Some(m) = message {
                        app.notify_error(m);
                    }
                }
                Completion::Applied => {
                    let count = app.tree.forest().len();
                    app.notify_info(format!("Loaded {count} installation(s)"));
                }
                Completion::Stale => {}
            }
            outcome
        }
    }
}
