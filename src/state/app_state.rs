//! Central `AppState` container owned by the event loop.

use tokio::sync::mpsc;

use crate::logic::components::ComponentBrowser;
use crate::logic::contexts::ContextPicker;
use crate::logic::installations::InstallationTree;
use crate::state::messages::ApiRequest;
use crate::state::types::{InstallationFilter, RepositoryContext};

/// Top-level page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    /// Component repository browser.
    #[default]
    Components,
    /// Installation status overview.
    Installations,
}

impl Page {
    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Components => "Components",
            Self::Installations => "Installations",
        }
    }

    /// The other page.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Components => Self::Installations,
            Self::Installations => Self::Components,
        }
    }
}

/// Non-blocking status-bar message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Text shown.
    pub message: String,
    /// Rendered as an error.
    pub is_error: bool,
}

/// Application state shared by the event, networking, and UI layers.
///
/// Owns both page view-models; nothing here is global.
#[derive(Debug)]
pub struct AppState {
    /// Visible page.
    pub page: Page,
    /// Component browser view-model.
    pub browser: ComponentBrowser,
    /// Installation tree view-model.
    pub tree: InstallationTree,
    /// Open context picker, if any.
    pub picker: Option<ContextPicker>,
    /// Contexts offered by the picker.
    pub known_contexts: Vec<String>,
    /// Status-bar message.
    pub notice: Option<Notice>,
    /// Where data comes from, shown in the title (`http://…` or `demo`).
    pub source_label: String,
}

impl AppState {
    /// What: Build the page state for one dashboard session.
    ///
    /// Inputs:
    /// - `context`: Initial repository context.
    /// - `known_contexts`: Picker options.
    /// - `filter`: Installation filter.
    /// - `source_label`: Data source shown in the title.
    #[must_use]
    pub fn new(
        context: RepositoryContext,
        known_contexts: Vec<String>,
        filter: InstallationFilter,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            page: Page::default(),
            browser: ComponentBrowser::new(context),
            tree: InstallationTree::new(filter),
            picker: None,
            known_contexts,
            notice: None,
            source_label: source_label.into(),
        }
    }

    /// What: Issue the mount-time requests of both pages.
    pub fn mount(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) {
        self.browser.mount(tx);
        self.tree.load_installations(tx);
    }

    /// Show an error in the status bar.
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
            is_error: true,
        });
    }

    /// Show an informational message in the status bar.
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
            is_error: false,
        });
    }

    /// Open the repository context picker.
    pub fn open_picker(&mut self) {
        self.picker = Some(ContextPicker::new(self.known_contexts.clone()));
    }

    /// What: Close the picker and switch to its chosen context, if any.
    pub fn commit_picker(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        if let Some(ctx) = picker.commit() {
            if !self.known_contexts.iter().any(|k| k == ctx.as_str()) {
                self.known_contexts.push(ctx.as_str().to_string());
            }
            self.browser.set_repository_context(ctx, tx);
        }
    }
}
