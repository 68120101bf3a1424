//! Keys while the repository context picker is open.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::state::{ApiRequest, AppState};

/// What: Apply one key press to the open picker.
///
/// Details:
/// - Typing edits the input; Up/Down move the highlight.
/// - Enter commits and switches the browser context; Esc closes without change.
pub(super) fn handle_picker_key(
    ke: &KeyEvent,
    app: &mut AppState,
    api_tx: &mpsc::UnboundedSender<ApiRequest>,
) {
    match ke.code {
        KeyCode::Esc => app.picker = None,
        KeyCode::Enter => app.commit_picker(api_tx),
        KeyCode::Up => {
            if let Some(p) = app.picker.as_mut() {
                p.move_highlight(-1);
            }
        }
        KeyCode::Down => {
            if let Some(p) = app.picker.as_mut() {
                p.move_highlight(1);
            }
        }
        KeyCode::Backspace => {
            if let Some(p) = app.picker.as_mut() {
                p.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(p) = app.picker.as_mut() {
                p.push(c);
            }
        }
        _ => {}
    }
}
