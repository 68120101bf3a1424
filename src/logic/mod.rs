//! Core non-UI logic: the lazy cache and the page view-models built on it.

pub mod components;
pub mod contexts;
pub mod installations;
pub mod lazy_cache;

pub use components::{ComponentBrowser, ComponentDetail, ListingState};
pub use contexts::ContextPicker;
pub use installations::{
    DeployItemLine, InstallationTree, PhaseGlyph, RenderedNode, StatusSummary, TreeLoad, TreeRow,
    phase_glyph, render_node,
};
pub use lazy_cache::{Completion, FetchTicket, LazyCache, Lookup, Slot};
