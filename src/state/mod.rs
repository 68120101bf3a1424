//! Dashboard state: wire types, worker messages and the `AppState` container.

pub mod app_state;
pub mod messages;
pub mod types;

pub use app_state::{AppState, Notice, Page};
pub use messages::{ApiRequest, ApiResponse};
pub use types::{
    ComponentSummary, DeployItemData, ExecutionData, InstallationFilter, InstallationNode, Phase,
    RepositoryContext, VersionKey,
};
