//! Integration tests for the component browser and its version cache.

use tokio::sync::mpsc;

use landscaper_dashboard::logic::{Completion, ComponentBrowser, ComponentDetail, FetchTicket};
use landscaper_dashboard::sources::FetchError;
use landscaper_dashboard::state::{ApiRequest, ComponentSummary, RepositoryContext, VersionKey};

/// Drain every queued request.
fn drain(rx: &mut mpsc::UnboundedReceiver<ApiRequest>) -> Vec<ApiRequest> {
    let mut out = Vec::new();
    while let Ok(r) = rx.try_recv() {
        out.push(r);
    }
    out
}

/// Version tickets among `reqs`.
fn version_tickets(reqs: &[ApiRequest]) -> Vec<FetchTicket<VersionKey>> {
    reqs.iter()
        .filter_map(|r| match r {
            ApiRequest::ListComponentVersions { ticket } => Some(ticket.clone()),
            _ => None,
        })
        .collect()
}

/// Browser mounted on `ctx` with `names` listed.
fn listed(
    ctx: &str,
    names: &[&str],
) -> (
    ComponentBrowser,
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiRequest>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx = RepositoryContext::new(ctx);
    let mut b = ComponentBrowser::new(ctx.clone());
    b.mount(&tx);
    let seq = match drain(&mut rx).as_slice() {
        [ApiRequest::ListComponents { seq, .. }] => *seq,
        other => panic!("unexpected mount requests: {other:?}"),
    };
    let list = names.iter().map(|n| ComponentSummary::new(n, None)).collect();
    assert_eq!(b.handle_components_result(&ctx, seq, Ok(list)), Completion::Applied);
    (b, tx, rx)
}

#[test]
/// What: The reference walkthrough: list, expand before data, then show both versions.
///
/// Inputs:
/// - Listing `[my-component]`, expansion, versions `["0.0.1","0.0.2"]`.
///
/// Output:
/// - "No data yet" while pending, then the versions in order.
fn my_component_walkthrough() {
    let (mut b, tx, mut rx) = listed("eu.gcr.io/gardener-project/development", &["my-component"]);
    assert_eq!(b.components()[0].name, "my-component");

    let shown = b.expand_component("my-component", &tx);
    assert_eq!(shown, ComponentDetail::NoDataYet { loading: true });

    let tickets = version_tickets(&drain(&mut rx));
    assert_eq!(tickets.len(), 1);
    let outcome = b.handle_versions_result(
        tickets[0].clone(),
        Ok(vec!["0.0.1".to_string(), "0.0.2".to_string()]),
    );
    assert_eq!(outcome, Completion::Applied);
    assert_eq!(
        b.component_detail("my-component"),
        ComponentDetail::Versions(&["0.0.1".to_string(), "0.0.2".to_string()])
    );
}

#[test]
/// What: Expanding twice issues at most one fetch and yields the same list.
fn expand_is_idempotent() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["c"]);
    b.expand_component("c", &tx);
    b.collapse_component("c");
    b.expand_component("c", &tx);
    let tickets = version_tickets(&drain(&mut rx));
    assert_eq!(tickets.len(), 1);

    b.handle_versions_result(tickets[0].clone(), Ok(vec!["1.0.0".to_string()]));
    let first = b.expand_component("c", &tx);
    assert_eq!(first, ComponentDetail::Versions(&["1.0.0".to_string()]));
    let again = b.expand_component("c", &tx);
    assert_eq!(first, again);
    assert!(drain(&mut rx).is_empty());
}

#[test]
/// What: Switching context drops cached versions even for an identical name.
fn switch_invalidates_same_name() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["shared"]);
    b.expand_component("shared", &tx);
    let t = version_tickets(&drain(&mut rx)).remove(0);
    b.handle_versions_result(t, Ok(vec!["a-1".to_string()]));

    assert!(b.set_repository_context(RepositoryContext::new("ctx/b"), &tx));
    assert!(b.components().is_empty());
    let reqs = drain(&mut rx);
    let seq = match reqs.as_slice() {
        [ApiRequest::ListComponents { context, seq }] => {
            assert_eq!(context.as_str(), "ctx/b");
            *seq
        }
        other => panic!("unexpected requests: {other:?}"),
    };
    b.handle_components_result(
        &RepositoryContext::new("ctx/b"),
        seq,
        Ok(vec![ComponentSummary::new("shared", None)]),
    );
    let shown = b.expand_component("shared", &tx);
    assert_eq!(shown, ComponentDetail::NoDataYet { loading: true });
    let tickets = version_tickets(&drain(&mut rx));
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].key.context.as_str(), "ctx/b");
}

#[test]
/// What: A version answer for context A landing after the switch to B is discarded.
fn late_answer_from_old_context_is_stale() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["c"]);
    b.expand_component("c", &tx);
    let old = version_tickets(&drain(&mut rx)).remove(0);

    b.set_repository_context(RepositoryContext::new("ctx/b"), &tx);
    drain(&mut rx);

    let outcome = b.handle_versions_result(old, Ok(vec!["from-a".to_string()]));
    assert_eq!(outcome, Completion::Stale);
    assert_eq!(b.component_detail("c"), ComponentDetail::NoDataYet { loading: false });
}

#[test]
/// What: A listing answer for the previous context never replaces the new list.
fn late_listing_from_old_context_is_stale() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["c"]);
    b.refresh(&tx);
    let old_seq = match drain(&mut rx).as_slice() {
        [ApiRequest::ListComponents { seq, .. }] => *seq,
        other => panic!("unexpected requests: {other:?}"),
    };
    b.set_repository_context(RepositoryContext::new("ctx/b"), &tx);
    let out = b.handle_components_result(
        &RepositoryContext::new("ctx/a"),
        old_seq,
        Ok(vec![ComponentSummary::new("from-a", None)]),
    );
    assert_eq!(out, Completion::Stale);
    assert!(b.components().is_empty());
}

#[test]
/// What: A failed version fetch shows an error and re-expanding retries it.
fn failed_fetch_retries_on_expand() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["c"]);
    b.expand_component("c", &tx);
    let t = version_tickets(&drain(&mut rx)).remove(0);
    let out = b.handle_versions_result(
        t,
        Err(FetchError::Server {
            status: 400,
            message: "a component name has to be set".to_string(),
        }),
    );
    assert_eq!(out, Completion::Failed);
    assert!(matches!(b.component_detail("c"), ComponentDetail::Error(m) if m.contains("400")));

    b.collapse_component("c");
    b.expand_component("c", &tx);
    assert_eq!(version_tickets(&drain(&mut rx)).len(), 1);
}

#[test]
/// What: An empty fetched list is "no versions", not "no data yet".
fn empty_versions_differs_from_unfetched() {
    let (mut b, tx, mut rx) = listed("ctx/a", &["c", "d"]);
    assert_eq!(b.component_detail("c"), ComponentDetail::NoDataYet { loading: false });
    b.expand_component("c", &tx);
    let t = version_tickets(&drain(&mut rx)).remove(0);
    b.handle_versions_result(t, Ok(Vec::new()));
    assert_eq!(b.component_detail("c"), ComponentDetail::NoVersions);
    assert_eq!(b.component_detail("d"), ComponentDetail::NoDataYet { loading: false });
}
