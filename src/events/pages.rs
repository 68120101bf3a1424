//! Page-specific keys for the component browser and the installation tree.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::state::{ApiRequest, AppState};

/// What: Navigate and expand the component list.
///
/// Details:
/// - Up/Down or `k`/`j` move, Enter/Space/Right toggle the selected component,
///   Left collapses it. Home/End jump to the ends.
pub(super) fn handle_components_key(
    ke: &KeyEvent,
    app: &mut AppState,
    api_tx: &mpsc::UnboundedSender<ApiRequest>,
) {
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') => app.browser.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.browser.move_selection(1),
        KeyCode::Home => app.browser.move_selection(isize::MIN),
        KeyCode::End => app.browser.move_selection(isize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
            app.browser.toggle_selected(api_tx);
        }
        KeyCode::Left => {
            if let Some(name) = app.browser.selected_component().map(|c| c.name.clone()) {
                app.browser.collapse_component(&name);
            }
        }
        _ => {}
    }
}

/// What: Navigate and expand the installation tree.
///
/// Details:
/// - Same movement keys as the component list; Left collapses the selected node.
pub(super) fn handle_installations_key(ke: &KeyEvent, app: &mut AppState) {
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') => app.tree.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.tree.move_selection(1),
        KeyCode::Home => app.tree.move_selection(isize::MIN),
        KeyCode::End => app.tree.move_selection(isize::MAX),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => app.tree.toggle_selected(),
        KeyCode::Left => app.tree.collapse_selected(),
        _ => {}
    }
}
