//! Explicit list state and its transitions.
//!
//! [`ListState`] is a plain, synchronous state container. Every mutation goes
//! through a `begin_*` call, which hands out a [`FetchTicket`], and a matching
//! [`ListState::complete`] (or [`ListState::fail`]) call with that ticket.
//! Tickets carry the list generation they were issued for; a completion whose
//! generation is no longer current is discarded.

use std::collections::HashSet;

use tracing::{debug, warn};

use portal_core::{Character, CharacterId, PageCursor, PageResult, Result};

use crate::snapshot::ListSnapshot;

/// Observable phase of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// First page of a (new) listing in flight; the list is empty.
    LoadingInitial,
    /// Settled; end-of-list triggers are accepted.
    Ready,
    /// A follow-up page is in flight.
    LoadingMore,
}

/// Which transition a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

/// A fetch the state has committed to, with everything needed to issue it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub kind: FetchKind,
    pub generation: u64,
    pub query: Option<String>,
    pub cursor: Option<PageCursor>,
}

/// What a completion did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Items were stored; `added` counts the ones that were new.
    Loaded { added: usize },
    /// The fetch failed; the list was left as the failure rules require.
    Failed,
    /// The ticket was superseded and the result ignored.
    Stale,
}

/// Trims search text; blank text means "no filter".
pub fn normalize_query(text: &str) -> String {
    text.trim().to_string()
}

/// Session-scoped state of one listing.
#[derive(Debug, Default)]
pub struct ListState {
    items: Vec<Character>,
    ids: HashSet<CharacterId>,
    cursor: Option<PageCursor>,
    loading: bool,
    loading_more: bool,
    query: String,
    generation: u64,
    count: Option<u32>,
    last_error: Option<String>,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new listing for `query`, clearing the current one.
    ///
    /// Any fetch issued before this call becomes stale.
    pub fn begin_initial(&mut self, query: &str) -> FetchTicket {
        self.generation += 1;
        self.items.clear();
        self.ids.clear();
        self.cursor = None;
        self.count = None;
        self.last_error = None;
        self.loading = true;
        self.loading_more = false;
        self.query = normalize_query(query);

        FetchTicket {
            kind: FetchKind::Initial,
            generation: self.generation,
            query: Some(self.query.clone()).filter(|q| !q.is_empty()),
            cursor: None,
        }
    }

    /// Start fetching the next page, if one exists and nothing is in flight.
    pub fn begin_more(&mut self) -> Option<FetchTicket> {
        if self.loading || self.loading_more {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.loading_more = true;

        Some(FetchTicket {
            kind: FetchKind::More,
            generation: self.generation,
            query: None,
            cursor: Some(cursor),
        })
    }

    /// Apply the outcome of a fetch.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<PageResult>) -> Applied {
        match result {
            Ok(page) => self.apply_page(ticket, page),
            Err(e) => self.fail(ticket, &e.to_string()),
        }
    }

    /// Record a failed fetch.
    ///
    /// A failed initial load leaves an empty, settled list. A failed
    /// follow-up leaves items and cursor untouched.
    pub fn fail(&mut self, ticket: &FetchTicket, message: &str) -> Applied {
        if !self.settle(ticket) {
            return Applied::Stale;
        }
        warn!(kind = ?ticket.kind, error = message, "Character fetch failed");

        if ticket.kind == FetchKind::Initial {
            self.items.clear();
            self.ids.clear();
            self.cursor = None;
        }
        self.last_error = Some(message.to_string());
        Applied::Failed
    }

    fn apply_page(&mut self, ticket: &FetchTicket, page: PageResult) -> Applied {
        if !self.settle(ticket) {
            return Applied::Stale;
        }

        let added = self.append_unique(page.items);
        self.cursor = page.next;
        if page.count.is_some() {
            self.count = page.count;
        }
        self.last_error = None;

        debug!(
            kind = ?ticket.kind,
            added,
            total = self.items.len(),
            has_more = self.cursor.is_some(),
            "Applied character page"
        );
        Applied::Loaded { added }
    }

    /// Clears the flag matching the ticket; false if the ticket is stale.
    fn settle(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale fetch"
            );
            return false;
        }

        let flag = match ticket.kind {
            FetchKind::Initial => &mut self.loading,
            FetchKind::More => &mut self.loading_more,
        };
        std::mem::replace(flag, false)
    }

    /// Appends characters not already listed, keeping their order.
    fn append_unique(&mut self, items: Vec<Character>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.ids.insert(item.id) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::LoadingInitial
        } else if self.loading_more {
            Phase::LoadingMore
        } else if self.generation == 0 {
            Phase::Idle
        } else {
            Phase::Ready
        }
    }

    pub fn items(&self) -> &[Character] {
        &self.items
    }

    pub fn cursor(&self) -> Option<&PageCursor> {
        self.cursor.as_ref()
    }

    /// The normalized query of the current listing.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Build an immutable view of the current state.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            phase: self.phase(),
            items: self.items.clone(),
            query: self.query.clone(),
            has_more: self.has_more(),
            total: self.count,
            last_error: self.last_error.clone(),
            generation: self.generation,
            search_pending: false,
        }
    }
}
