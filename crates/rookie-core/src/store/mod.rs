//! Stores - the single owners of application state.
//!
//! Every store is opened through a [`StatePersistence`] port, keeps its
//! state in memory and saves it after each effective mutation. Saving is
//! best-effort: a failed write is logged and the in-memory state stays
//! authoritative for the rest of the session.

mod comment;
mod post;
mod session;

use std::sync::Arc;

use crate::ports::StatePersistence;

pub use comment::{CommentState, CommentStore};
pub use post::{PostState, PostStore};
pub use session::{SessionState, SessionStore};

/// Callback invoked with a read-only view of the state after each change.
pub type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Listeners<S> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener<S>)>,
}

impl<S> Listeners<S> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn add(&mut self, listener: Listener<S>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&self, state: &S) {
        for (_, listener) in &self.entries {
            listener(state);
        }
    }
}

/// Load through the port, falling back to `initial` when nothing usable is stored.
fn load_or<S: Clone>(
    persistence: &Arc<dyn StatePersistence<S>>,
    store: &'static str,
    initial: &S,
) -> S {
    match persistence.load() {
        Ok(Some(state)) => {
            tracing::debug!(store, "Loaded persisted state");
            state
        }
        Ok(None) => {
            tracing::debug!(store, "No persisted state, using initial state");
            initial.clone()
        }
        Err(e) => {
            tracing::warn!(store, error = %e, "Failed to load persisted state, using initial state");
            initial.clone()
        }
    }
}

/// Best-effort save; failures are logged and swallowed.
fn persist<S>(persistence: &Arc<dyn StatePersistence<S>>, store: &'static str, state: &S) {
    if let Err(e) = persistence.save(state) {
        tracing::warn!(store, error = %e, "Failed to persist state, keeping in-memory copy");
    }
}
