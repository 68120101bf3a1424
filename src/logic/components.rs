//! Component browser view-model: active repository context, component
//! listing and the per-component version cache.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::logic::lazy_cache::{Completion, FetchTicket, LazyCache, Lookup, Slot};
use crate::sources::FetchError;
use crate::state::messages::ApiRequest;
use crate::state::types::{ComponentSummary, RepositoryContext, VersionKey};

/// Progress of the component listing for the active context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingState {
    /// Nothing requested yet (before mount).
    Idle,
    /// A listing request is outstanding.
    Loading,
    /// Last listing succeeded.
    Loaded,
    /// Last listing failed; the previously held list stays displayed.
    Failed(String),
}

/// What a component's detail panel should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentDetail<'a> {
    /// Versions were never fetched for this context; `loading` while a fetch is outstanding.
    NoDataYet {
        /// A fetch is in flight.
        loading: bool,
    },
    /// Fetched, non-empty list in server order.
    Versions(&'a [String]),
    /// Fetched, and the component has no versions.
    NoVersions,
    /// Last fetch failed; re-expand retries.
    Error(&'a str),
}

/// State of the component browser page.
#[derive(Debug)]
pub struct ComponentBrowser {
    /// Active repository context.
    context: RepositoryContext,
    /// Components for `context`, in server order.
    components: Vec<ComponentSummary>,
    /// Listing progress.
    listing: ListingState,
    /// Sequence number of the newest listing request.
    listing_seq: u64,
    /// Version lists keyed by `(context, component)`.
    versions: LazyCache<VersionKey, Vec<String>>,
    /// Names of expanded component panels.
    expanded: HashSet<String>,
    /// Highlighted row.
    selected: usize,
}

/// What: Send a request to the API worker.
///
/// Output:
/// - `true` when the request was queued; `false` when the worker is gone.
fn dispatch(tx: &mpsc::UnboundedSender<ApiRequest>, req: ApiRequest) -> bool {
    match tx.send(req) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(request = ?e.0, "API worker unavailable; request dropped");
            false
        }
    }
}

impl ComponentBrowser {
    /// What: Create the browser for an initial context without fetching.
    #[must_use]
    pub fn new(context: RepositoryContext) -> Self {
        Self {
            context,
            components: Vec::new(),
            listing: ListingState::Idle,
            listing_seq: 0,
            versions: LazyCache::new(),
            expanded: HashSet::new(),
            selected: 0,
        }
    }

    /// What: Issue the initial listing (page mount).
    pub fn mount(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) {
        self.request_listing(tx);
    }

    /// Active repository context.
    #[must_use]
    pub const fn context(&self) -> &RepositoryContext {
        &self.context
    }

    /// Components of the active context.
    #[must_use]
    pub fn components(&self) -> &[ComponentSummary] {
        &self.components
    }

    /// Listing progress.
    #[must_use]
    pub const fn listing(&self) -> &ListingState {
        &self.listing
    }

    /// Highlighted row index.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Highlighted component.
    #[must_use]
    pub fn selected_component(&self) -> Option<&ComponentSummary> {
        self.components.get(self.selected)
    }

    /// Whether a component's panel is open.
    #[must_use]
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    /// What: Issue a listing for the active context under a fresh sequence number.
    fn request_listing(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) -> bool {
        self.listing_seq = self.listing_seq.wrapping_add(1);
        let req = ApiRequest::ListComponents {
            context: self.context.clone(),
            seq: self.listing_seq,
        };
        tracing::debug!(context = %self.context, seq = self.listing_seq, "requesting component listing");
        if dispatch(tx, req) {
            self.listing = ListingState::Loading;
            true
        } else {
            self.listing = ListingState::Failed("API worker unavailable".to_string());
            false
        }
    }

    /// What: Switch to another repository context.
    ///
    /// Inputs:
    /// - `context`: New context.
    /// - `tx`: Request channel to the API worker.
    ///
    /// Output:
    /// - `true` when a new listing was issued.
    ///
    /// Details:
    /// - Clears the component list, open panels and every cached version list,
    ///   then lists the new context.
    /// - Selecting the active context again only re-lists when the previous
    ///   listing failed.
    pub fn set_repository_context(
        &mut self,
        context: RepositoryContext,
        tx: &mpsc::UnboundedSender<ApiRequest>,
    ) -> bool {
        if context == self.context {
            return if matches!(self.listing, ListingState::Failed(_) | ListingState::Idle) {
                self.request_listing(tx)
            } else {
                false
            };
        }
        tracing::info!(from = %self.context, to = %context, "repository context changed");
        self.context = context;
        self.components.clear();
        self.expanded.clear();
        self.selected = 0;
        self.versions.invalidate();
        self.request_listing(tx)
    }

    /// What: Re-list the active context, keeping the current list until the answer arrives.
    pub fn refresh(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) -> bool {
        self.request_listing(tx)
    }

    /// What: Apply a listing answer.
    ///
    /// Output:
    /// - `Stale` when the answer is for another context or an older request;
    ///   otherwise `Applied` or `Failed`.
    ///
    /// Details:
    /// - Success replaces the list in full. Failure keeps the previous list.
    pub fn handle_components_result(
        &mut self,
        context: &RepositoryContext,
        seq: u64,
        result: Result<Vec<ComponentSummary>, FetchError>,
    ) -> Completion {
        if seq != self.listing_seq || *context != self.context {
            tracing::debug!(%context, seq, current = self.listing_seq, "discarding stale component listing");
            return Completion::Stale;
        }
        match result {
            Ok(list) => {
                tracing::debug!(%context, count = list.len(), "component listing applied");
                self.components = list;
                let known: HashSet<&str> = self.components.iter().map(|c| c.name.as_str()).collect();
                self.expanded.retain(|n| known.contains(n.as_str()));
                self.selected = self.selected.min(self.components.len().saturating_sub(1));
                self.listing = ListingState::Loaded;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!(%context, error = %e, "component listing failed");
                self.listing = ListingState::Failed(e.to_string());
                Completion::Failed
            }
        }
    }

    /// Cache key of a component in the active context.
    fn key_for(&self, name: &str) -> VersionKey {
        VersionKey {
            context: self.context.clone(),
            component: name.to_string(),
        }
    }

    /// What: Open a component's panel, fetching its versions on first demand.
    ///
    /// Inputs:
    /// - `name`: Component name.
    /// - `tx`: Request channel to the API worker.
    ///
    /// Output:
    /// - What the panel shows right now.
    ///
    /// Details:
    /// - A fetch is issued only when nothing is cached and nothing is in flight
    ///   for `(context, name)`. A previously failed key is retried.
    pub fn expand_component(
        &mut self,
        name: &str,
        tx: &mpsc::UnboundedSender<ApiRequest>,
    ) -> ComponentDetail<'_> {
        self.expanded.insert(name.to_string());
        let key = self.key_for(name);
        let ticket = match self.versions.get_or_fetch(key) {
            Lookup::Issue(ticket) => Some(ticket),
            Lookup::Ready(_) | Lookup::Pending => None,
        };
        if let Some(ticket) = ticket {
            tracing::debug!(context = %ticket.key.context, component = %ticket.key.component, "requesting component versions");
            if !dispatch(tx, ApiRequest::ListComponentVersions { ticket: ticket.clone() }) {
                self.versions.abandon(&ticket);
            }
        }
        self.component_detail(name)
    }

    /// Close a component's panel. Cached versions are kept.
    pub fn collapse_component(&mut self, name: &str) {
        self.expanded.remove(name);
    }

    /// What: Toggle a component's panel.
    ///
    /// Output:
    /// - `true` when the panel is open afterwards.
    pub fn toggle_component(&mut self, name: &str, tx: &mpsc::UnboundedSender<ApiRequest>) -> bool {
        if self.is_expanded(name) {
            self.collapse_component(name);
            false
        } else {
            self.expand_component(name, tx);
            true
        }
    }

    /// What: Toggle the highlighted component's panel.
    pub fn toggle_selected(&mut self, tx: &mpsc::UnboundedSender<ApiRequest>) {
        if let Some(name) = self.selected_component().map(|c| c.name.clone()) {
            self.toggle_component(&name, tx);
        }
    }

    /// What: Move the highlight by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.components.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.components.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// What: Apply a version listing answer.
    ///
    /// Output:
    /// - Cache completion; `Stale` for answers from a previous context.
    pub fn handle_versions_result(
        &mut self,
        ticket: FetchTicket<VersionKey>,
        result: Result<Vec<String>, FetchError>,
    ) -> Completion {
        let context = ticket.key.context.clone();
        let component = ticket.key.component.clone();
        let outcome = self.versions.complete(ticket, result);
        match outcome {
            Completion::Applied => tracing::debug!(%context, %component, "component versions cached"),
            Completion::Failed => tracing::warn!(%context, %component, "component versions fetch failed"),
            Completion::Stale => tracing::debug!(%context, %component, "discarding stale component versions"),
        }
        outcome
    }

    /// What: Panel content for a component in the active context.
    #[must_use]
    pub fn component_detail(&self, name: &str) -> ComponentDetail<'_> {
        match self.versions.slot(&self.key_for(name)) {
            Slot::Missing => ComponentDetail::NoDataYet { loading: false },
            Slot::Pending => ComponentDetail::NoDataYet { loading: true },
            Slot::Ready(v) if v.is_empty() => ComponentDetail::NoVersions,
            Slot::Ready(v) => ComponentDetail::Versions(v),
            Slot::Failed(msg) => ComponentDetail::Error(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> (ComponentBrowser, mpsc::UnboundedSender<ApiRequest>, mpsc::UnboundedReceiver<ApiRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ComponentBrowser::new(RepositoryContext::new("eu.gcr.io/a")), tx, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ApiRequest>) -> Vec<ApiRequest> {
        let mut out = Vec::new();
        while let Ok(r) = rx.try_recv() {
            out.push(r);
        }
        out
    }

    #[test]
    /// What: Mount issues exactly one listing for the default context.
    fn mount_lists_default_context() {
        let (mut b, tx, mut rx) = browser();
        b.mount(&tx);
        let reqs = drain(&mut rx);
        assert_eq!(
            reqs,
            vec![ApiRequest::ListComponents {
                context: RepositoryContext::new("eu.gcr.io/a"),
                seq: 1
            }]
        );
        assert_eq!(b.listing(), &ListingState::Loading);
    }

    #[test]
    /// What: A failed listing keeps the previously displayed list.
    fn failed_refresh_keeps_list() {
        let (mut b, tx, mut rx) = browser();
        b.mount(&tx);
        let ctx = b.context().clone();
        b.handle_components_result(&ctx, 1, Ok(vec![ComponentSummary::new("c1", None)]));
        b.refresh(&tx);
        let out = b.handle_components_result(&ctx, 2, Err(FetchError::Network("down".into())));
        assert_eq!(out, Completion::Failed);
        assert_eq!(b.components().len(), 1);
        assert!(matches!(b.listing(), ListingState::Failed(m) if m.contains("down")));
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[test]
    /// What: Re-selecting the active context only re-lists after a failure.
    fn same_context_is_noop_unless_failed() {
        let (mut b, tx, mut rx) = browser();
        b.mount(&tx);
        let ctx = b.context().clone();
        b.handle_components_result(&ctx, 1, Ok(Vec::new()));
        assert!(!b.set_repository_context(ctx.clone(), &tx));
        b.refresh(&tx);
        b.handle_components_result(&ctx, 2, Err(FetchError::Network("x".into())));
        assert!(b.set_repository_context(ctx, &tx));
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[test]
    /// What: An older listing answer cannot overwrite a newer one.
    fn older_listing_is_stale() {
        let (mut b, tx, _rx) = browser();
        b.mount(&tx);
        b.refresh(&tx);
        let ctx = b.context().clone();
        assert_eq!(
            b.handle_components_result(&ctx, 1, Ok(vec![ComponentSummary::new("old", None)])),
            Completion::Stale
        );
        assert!(b.components().is_empty());
    }

    #[test]
    /// What: Selection clamps to the list bounds.
    fn selection_clamps() {
        let (mut b, tx, _rx) = browser();
        b.mount(&tx);
        let ctx = b.context().clone();
        b.handle_components_result(
            &ctx,
            1,
            Ok(vec![ComponentSummary::new("a", None), ComponentSummary::new("b", None)]),
        );
        b.move_selection(-3);
        assert_eq!(b.selected(), 0);
        b.move_selection(5);
        assert_eq!(b.selected(), 1);
        assert_eq!(b.selected_component().map(|c| c.name.as_str()), Some("b"));
    }

    #[test]
    /// What: Collapsing keeps the cache; re-expanding does not fetch again.
    fn collapse_then_expand_uses_cache() {
        let (mut b, tx, mut rx) = browser();
        b.expand_component("c", &tx);
        let Some(ApiRequest::ListComponentVersions { ticket }) = drain(&mut rx).pop() else {
            panic!("expected a versions request");
        };
        b.handle_versions_result(ticket, Ok(vec!["1.0.0".into()]));
        assert!(!b.toggle_component("c", &tx));
        assert!(b.toggle_component("c", &tx));
        assert!(drain(&mut rx).is_empty());
        assert_eq!(
            b.component_detail("c"),
            ComponentDetail::Versions(&["1.0.0".to_string()])
        );
    }

    #[test]
    /// What: A closed worker channel leaves the key retryable.
    fn dispatch_failure_abandons_ticket() {
        let (mut b, tx, rx) = browser();
        drop(rx);
        assert_eq!(b.expand_component("c", &tx), ComponentDetail::NoDataYet { loading: false });
    }
}
