//! Fetch-on-first-demand cache shared by the dashboard panels.
//!
//! A key is fetched at most once at a time. The caller owns dispatching: a
//! lookup on a cold key hands back a [`FetchTicket`] that must be sent to a
//! worker and later fed to [`LazyCache::complete`]. Tickets carry the cache
//! epoch they were issued under, so answers that arrive after
//! [`LazyCache::invalidate`] are recognized and dropped.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

/// Proof that a fetch for `key` was issued under a given cache epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket<K> {
    /// Key the fetch is for.
    pub key: K,
    /// Cache epoch at issue time.
    pub epoch: u64,
}

/// Result of [`LazyCache::get_or_fetch`].
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a, K, V> {
    /// Value is cached.
    Ready(&'a V),
    /// A fetch for the key is already in flight.
    Pending,
    /// No value and nothing in flight; the caller must dispatch this ticket.
    Issue(FetchTicket<K>),
}

/// Read-only view of a key's state.
#[derive(Debug, PartialEq, Eq)]
pub enum Slot<'a, V> {
    /// Never fetched (or invalidated since).
    Missing,
    /// A fetch is in flight.
    Pending,
    /// Cached value.
    Ready(&'a V),
    /// Last fetch failed; the message is kept for display until the next attempt.
    Failed(&'a str),
}

/// Outcome of feeding a fetch result back into the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Value stored.
    Applied,
    /// Fetch failed; key left empty so a retry is possible.
    Failed,
    /// Ticket outlived its epoch or was never in flight; result dropped.
    Stale,
}

/// Keyed memo of lazily fetched values.
#[derive(Debug)]
pub struct LazyCache<K, V> {
    /// Bumped on every invalidation.
    epoch: u64,
    /// Fetched values.
    entries: HashMap<K, V>,
    /// Keys with an outstanding fetch.
    in_flight: HashSet<K>,
    /// Last failure message per key.
    failures: HashMap<K, String>,
}

impl<K, V> Default for LazyCache<K, V> {
    fn default() -> Self {
        Self {
            epoch: 0,
            entries: HashMap::new(),
            in_flight: HashSet::new(),
            failures: HashMap::new(),
        }
    }
}

impl<K, V> LazyCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Create an empty cache at epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// What: Return the cached value or claim the right to fetch it.
    ///
    /// Inputs:
    /// - `key`: Lookup key.
    ///
    /// Output:
    /// - `Ready` with the cached value, `Pending` when a fetch is outstanding,
    ///   or `Issue` with a ticket the caller must dispatch.
    ///
    /// Details:
    /// - Issuing clears any recorded failure for the key and marks it in flight,
    ///   so repeated calls before completion never produce a second ticket.
    pub fn get_or_fetch(&mut self, key: K) -> Lookup<'_, K, V> {
        if self.entries.contains_key(&key) {
            return self.entries.get(&key).map_or(Lookup::Pending, Lookup::Ready);
        }
        if self.in_flight.contains(&key) {
            return Lookup::Pending;
        }
        self.failures.remove(&key);
        self.in_flight.insert(key.clone());
        Lookup::Issue(FetchTicket {
            key,
            epoch: self.epoch,
        })
    }

    /// What: Inspect a key without side effects.
    #[must_use]
    pub fn slot(&self, key: &K) -> Slot<'_, V> {
        if let Some(v) = self.entries.get(key) {
            Slot::Ready(v)
        } else if self.in_flight.contains(key) {
            Slot::Pending
        } else if let Some(msg) = self.failures.get(key) {
            Slot::Failed(msg)
        } else {
            Slot::Missing
        }
    }

    /// Cached value, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// What: Apply a finished fetch.
    ///
    /// Inputs:
    /// - `ticket`: Ticket handed out by `get_or_fetch`.
    /// - `result`: Fetched value or error.
    ///
    /// Output:
    /// - `Applied`, `Failed` or `Stale` (see [`Completion`]).
    ///
    /// Details:
    /// - A ticket from an older epoch, or for a key no longer in flight, is
    ///   stale and leaves the cache untouched.
    pub fn complete<E: Display>(&mut self, ticket: FetchTicket<K>, result: Result<V, E>) -> Completion {
        if ticket.epoch != self.epoch || !self.in_flight.remove(&ticket.key) {
            return Completion::Stale;
        }
        match result {
            Ok(value) => {
                self.entries.insert(ticket.key, value);
                Completion::Applied
            }
            Err(e) => {
                self.failures.insert(ticket.key, e.to_string());
                Completion::Failed
            }
        }
    }

    /// What: Release an in-flight mark whose request could not be dispatched.
    pub fn abandon(&mut self, ticket: &FetchTicket<K>) {
        if ticket.epoch == self.epoch {
            self.in_flight.remove(&ticket.key);
        }
    }

    /// What: Drop every entry, failure and in-flight mark and start a new epoch.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.entries.clear();
        self.in_flight.clear();
        self.failures.clear();
    }

    /// Number of cached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any fetch is outstanding.
    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
