//! Dashboard application runtime: terminal lifecycle, API worker, and event loop.

/// Runtime event loop and background workers.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::handlers::handle_api_response;
pub use runtime::worker::{ApiSource, spawn_api_worker};
pub use runtime::{run, select_source};
