//! Messages exchanged between the event loop and the API worker.

use crate::logic::lazy_cache::FetchTicket;
use crate::sources::FetchError;
use crate::state::types::{
    ComponentSummary, InstallationFilter, InstallationNode, RepositoryContext, VersionKey,
};

/// Work item for the API worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    /// `listComponents` for a context; `seq` identifies the listing attempt.
    ListComponents {
        /// Context to list.
        context: RepositoryContext,
        /// Listing sequence number.
        seq: u64,
    },
    /// `listComponentVersions` for a cached key.
    ListComponentVersions {
        /// Ticket from the version cache; carries context and component.
        ticket: FetchTicket<VersionKey>,
    },
    /// `listInstallationData`.
    ListInstallations {
        /// Namespace / sub-installation filter.
        filter: InstallationFilter,
        /// Load sequence number.
        seq: u64,
    },
}

/// Answer from the API worker, echoing the identifying parts of the request.
#[derive(Debug)]
pub enum ApiResponse {
    /// Answer to [`ApiRequest::ListComponents`].
    Components {
        /// Context the listing was for.
        context: RepositoryContext,
        /// Listing sequence number.
        seq: u64,
        /// Listing or failure.
        result: Result<Vec<ComponentSummary>, FetchError>,
    },
    /// Answer to [`ApiRequest::ListComponentVersions`].
    Versions {
        /// Ticket from the request.
        ticket: FetchTicket<VersionKey>,
        /// Versions or failure.
        result: Result<Vec<String>, FetchError>,
    },
    /// Answer to [`ApiRequest::ListInstallations`].
    Installations {
        /// Load sequence number.
        seq: u64,
        /// Forest or failure.
        result: Result<Vec<InstallationNode>, FetchError>,
    },
}
