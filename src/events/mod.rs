//! Event handling layer for the dashboard TUI.
//!
//! `handle_event` routes key presses to the open picker, the global
//! shortcuts, or the visible page.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{ApiRequest, AppState, Page};

mod pages;
mod picker;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: &CEvent,
    app: &mut AppState,
    api_tx: &mpsc::UnboundedSender<ApiRequest>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }
    if is_ctrl_c(ke) {
        return true;
    }
    if app.picker.is_some() {
        picker::handle_picker_key(ke, app, api_tx);
        return false;
    }
    if handle_global_key(ke, app, api_tx) {
        return ke.code == KeyCode::Char('q');
    }
    match app.page {
        Page::Components => pages::handle_components_key(ke, app, api_tx),
        Page::Installations => pages::handle_installations_key(ke, app),
    }
    false
}

fn is_ctrl_c(ke: &KeyEvent) -> bool {
    ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c')
}

/// What: Handle shortcuts that work on every page.
///
/// Output:
/// - `true` when the key was consumed.
///
/// Details:
/// - `q` quits (the caller turns it into an exit), `Tab` switches page,
///   `r` reloads the visible page, `c` or `/` opens the context picker,
///   `Esc` dismisses the notice.
fn handle_global_key(
    ke: &KeyEvent,
    app: &mut AppState,
    api_tx: &mpsc::UnboundedSender<ApiRequest>,
) -> bool {
    match ke.code {
        KeyCode::Char('q') => true,
        KeyCode::Tab | KeyCode::BackTab => {
            app.page = app.page.next();
            true
        }
        KeyCode::Char('r') => {
            let issued = match app.page {
                Page::Components => app.browser.refresh(api_tx),
                Page::Installations => app.tree.load_installations(api_tx),
            };
            if !issued {
                app.notify_error("Request could not be sent; the API worker has stopped");
            }
            true
        }
        KeyCode::Char('c' | '/') => {
            app.open_picker();
            true
        }
        KeyCode::Esc if app.notice.is_some() => {
            app.notice = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InstallationFilter, RepositoryContext};

    pub(super) fn key(code: KeyCode) -> CEvent {
        CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub(super) fn new_app() -> AppState {
        AppState::new(
            RepositoryContext::new("eu.gcr.io/a"),
            vec!["eu.gcr.io/a".to_string(), "ghcr.io/acme".to_string()],
            InstallationFilter::default(),
            "demo",
        )
    }

    #[test]
    /// What: `q` and Ctrl-C exit; other keys do not.
    fn quit_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        assert!(handle_event(&key(KeyCode::Char('q')), &mut app, &tx));
        let ctrl_c = CEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(handle_event(&ctrl_c, &mut app, &tx));
        assert!(!handle_event(&key(KeyCode::Down), &mut app, &tx));
    }

    #[test]
    /// What: Tab toggles pages and `r` reloads only the visible page.
    fn tab_and_reload() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        handle_event(&key(KeyCode::Tab), &mut app, &tx);
        assert_eq!(app.page, Page::Installations);
        handle_event(&key(KeyCode::Char('r')), &mut app, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(ApiRequest::ListInstallations { .. })
        ));
        assert!(rx.try_recv().is_err());
        handle_event(&key(KeyCode::BackTab), &mut app, &tx);
        assert_eq!(app.page, Page::Components);
    }

    #[test]
    /// What: While the picker is open, `q` is typed instead of quitting.
    fn picker_captures_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        handle_event(&key(KeyCode::Char('/')), &mut app, &tx);
        assert!(app.picker.is_some());
        assert!(!handle_event(&key(KeyCode::Char('q')), &mut app, &tx));
        assert_eq!(app.picker.as_ref().map(|p| p.input().to_string()), Some("q".to_string()));
        handle_event(&key(KeyCode::Esc), &mut app, &tx);
        assert!(app.picker.is_none());
    }

    #[test]
    /// What: Esc clears a notice.
    fn esc_dismisses_notice() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = new_app();
        app.notify_error("boom");
        handle_event(&key(KeyCode::Esc), &mut app, &tx);
        assert!(app.notice.is_none());
    }
}
