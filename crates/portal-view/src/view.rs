//! The list view controller.
//!
//! [`ListView::mount`] spawns one controller task that owns the
//! [`ListState`]. User input reaches it over a channel, fetches run in a
//! [`JoinSet`] owned by the task, and every state change is published as a
//! [`ListSnapshot`] on a watch channel. Unmounting (or dropping the view)
//! aborts the task, which cancels the pending debounce timer and every
//! in-flight fetch, so nothing resolves into a view that is gone.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{Id, JoinError, JoinHandle, JoinSet};
use tracing::{debug, info, trace, warn};

use portal_core::{CatalogSource, PageResult, Result};

use crate::debounce::Debouncer;
use crate::snapshot::ListSnapshot;
use crate::state::{FetchTicket, ListState, normalize_query};

/// Settings for a mounted list.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Quiet interval before search text triggers a fetch.
    pub debounce: Duration,
    /// Query used for the fetch issued on mount.
    pub initial_query: String,
}

impl ViewConfig {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce: Self::DEFAULT_DEBOUNCE,
            initial_query: String::new(),
        }
    }
}

/// Input to the controller task.
#[derive(Debug)]
enum ViewEvent {
    QueryChanged(String),
    EndReached,
    Refresh,
    /// Acknowledged once every earlier event has been handled.
    Flush(oneshot::Sender<()>),
}

/// Handle to a mounted list.
#[derive(Debug)]
pub struct ListView {
    events: mpsc::UnboundedSender<ViewEvent>,
    snapshots: watch::Receiver<ListSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl ListView {
    /// Mount a list over `source` and start loading its first page.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount<S>(source: Arc<S>, config: ViewConfig) -> Self
    where
        S: CatalogSource + 'static,
    {
        let state = ListState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Controller {
            source,
            state,
            debounce: Debouncer::new(config.debounce),
            fetches: JoinSet::new(),
            in_flight: HashMap::new(),
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(controller.run(event_rx, config.initial_query));

        Self {
            events: event_tx,
            snapshots: snapshot_rx,
            task: Some(task),
        }
    }

    /// Report new search text. Fetching waits for the debounce interval.
    pub fn set_query(&self, text: impl Into<String>) {
        self.send(ViewEvent::QueryChanged(text.into()));
    }

    /// Report that the end of the visible list was reached.
    pub fn end_reached(&self) {
        self.send(ViewEvent::EndReached);
    }

    /// Reload the current listing from its first page.
    pub fn refresh(&self) {
        self.send(ViewEvent::Refresh);
    }

    /// The latest published state.
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published state satisfies `predicate`.
    ///
    /// Returns `None` if the view stops publishing first.
    pub async fn wait_until<F>(&self, mut predicate: F) -> Option<ListSnapshot>
    where
        F: FnMut(&ListSnapshot) -> bool,
    {
        let mut rx = self.snapshots.clone();
        rx.wait_for(|s| predicate(s)).await.ok().map(|s| s.clone())
    }

    /// Wait until every input sent so far has been handled and the list is
    /// settled: no search waiting on the debounce timer and nothing loading.
    ///
    /// Returns `None` if the view stops first.
    pub async fn settled(&self) -> Option<ListSnapshot> {
        let (ack, handled) = oneshot::channel();
        self.send(ViewEvent::Flush(ack));
        handled.await.ok()?;
        self.wait_until(|s| s.is_settled()).await
    }

    /// Stop the view: the pending debounce timer never fires and in-flight
    /// fetches are discarded.
    pub async fn unmount(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await
                && e.is_panic()
            {
                warn!(error = %e, "List controller panicked");
            }
        }
    }

    fn send(&self, event: ViewEvent) {
        if self.events.send(event).is_err() {
            debug!("List controller is gone; dropping event");
        }
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The task that owns a list's state.
struct Controller<S> {
    source: Arc<S>,
    state: ListState,
    debounce: Debouncer<String>,
    fetches: JoinSet<Result<PageResult>>,
    in_flight: HashMap<Id, FetchTicket>,
    snapshots: watch::Sender<ListSnapshot>,
}

impl<S> Controller<S>
where
    S: CatalogSource + 'static,
{
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<ViewEvent>, initial_query: String) {
        self.start_listing(&initial_query);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("List view handle dropped; stopping");
                        break;
                    }
                },
                text = self.debounce.fired() => self.on_query_settled(text),
                Some(joined) = self.fetches.join_next_with_id() => self.on_fetch_done(joined),
            }
        }
    }

    fn handle_event(&mut self, event: ViewEvent) {
        trace!(?event, "List event");
        match event {
            ViewEvent::QueryChanged(text) => {
                self.debounce.schedule(text);
                self.publish();
            }
            ViewEvent::EndReached => match self.state.begin_more() {
                Some(ticket) => {
                    let cursor = ticket.cursor.as_ref();
                    debug!(
                        cursor = ?cursor.map(|c| c.as_str()),
                        page = ?cursor.and_then(|c| c.page()),
                        "Loading more characters"
                    );
                    self.spawn_fetch(ticket);
                    self.publish();
                }
                None => trace!(
                    phase = ?self.state.phase(),
                    has_more = self.state.has_more(),
                    "End of list ignored"
                ),
            },
            ViewEvent::Refresh => {
                let query = self
                    .debounce
                    .cancel()
                    .unwrap_or_else(|| self.state.query().to_string());
                self.start_listing(&query);
            }
            ViewEvent::Flush(ack) => {
                // The caller may have stopped waiting.
                let _ = ack.send(());
            }
        }
    }

    fn on_query_settled(&mut self, text: String) {
        let query = normalize_query(&text);
        if self.state.generation() > 0 && query == self.state.query() {
            debug!(query = %query, "Search text settled on the current query; not refetching");
            self.publish();
            return;
        }
        self.start_listing(&query);
    }

    fn start_listing(&mut self, query: &str) {
        let ticket = self.state.begin_initial(query);
        info!(
            query = ticket.query.as_deref().unwrap_or(""),
            generation = ticket.generation,
            "Loading characters"
        );
        self.spawn_fetch(ticket);
        self.publish();
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let query = ticket.query.clone();
        let cursor = ticket.cursor.clone();

        let handle = self.fetches.spawn(async move {
            source.fetch_page(query.as_deref(), cursor.as_ref()).await
        });
        self.in_flight.insert(handle.id(), ticket);
    }

    fn on_fetch_done(&mut self, joined: std::result::Result<(Id, Result<PageResult>), JoinError>) {
        let (id, outcome) = match joined {
            Ok((id, result)) => (id, Ok(result)),
            Err(e) => (e.id(), Err(e)),
        };
        let Some(ticket) = self.in_flight.remove(&id) else {
            return;
        };

        let applied = match outcome {
            Ok(result) => self.state.complete(&ticket, result),
            Err(e) => self.state.fail(&ticket, &format!("fetch task failed: {e}")),
        };
        trace!(?applied, kind = ?ticket.kind, "Fetch completed");
        self.publish();
    }

    fn publish(&self) {
        let mut snapshot = self.state.snapshot();
        snapshot.search_pending = self.debounce.is_pending();
        self.snapshots.send_replace(snapshot);
    }
}
