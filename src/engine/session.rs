//! Per-identity sessions and the table that owns them.
//!
//! Every session sits behind its own mutex, so events for one identity are
//! serialized while different identities proceed in parallel.

use crate::core::{SessionId, State, StateHistory, StateTransition};
use crate::engine::transition::Trigger;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Binding of one identity to its current state.
#[derive(Debug)]
pub struct Session<S: State> {
    id: SessionId,
    state: S,
    history: StateHistory<S>,
    transition_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<S: State> Session<S> {
    pub(crate) fn new(id: SessionId, initial: S, history_limit: usize) -> Self {
        let now = Utc::now();
        Self {
            id,
            state: initial,
            history: StateHistory::with_limit(history_limit),
            transition_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Move to `to`, recording the transition.
    pub(crate) fn commit(&mut self, trigger: &Trigger, to: S) {
        let now = Utc::now();
        let from = std::mem::replace(&mut self.state, to.clone());
        self.history.record(StateTransition {
            from,
            to,
            trigger: trigger.name().to_string(),
            timestamp: now,
        });
        self.transition_count += 1;
        self.updated_at = now;
    }

    pub fn snapshot(&self) -> SessionSnapshot<S> {
        SessionSnapshot {
            id: self.id.clone(),
            state: self.state.clone(),
            history: self.history.clone(),
            transition_count: self.transition_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Point-in-time copy of a session for introspection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SessionSnapshot<S: State> {
    pub id: SessionId,
    pub state: S,
    pub history: StateHistory<S>,
    /// Every committed transition, including ones evicted from `history`
    pub transition_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) type SessionHandle<S> = Arc<Mutex<Session<S>>>;

/// Session-keyed table. Sessions are created on first use and live for the
/// lifetime of the table.
pub(crate) struct SessionTable<S: State> {
    sessions: DashMap<SessionId, SessionHandle<S>>,
    history_limit: usize,
}

impl<S: State> SessionTable<S> {
    pub(crate) fn new(history_limit: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            history_limit,
        }
    }

    /// Look up a session, creating it in `initial` if unseen.
    ///
    /// The shard guard is released before returning, so callers can lock the
    /// session without blocking other identities.
    pub(crate) fn get_or_create(&self, id: &SessionId, initial: &S) -> SessionHandle<S> {
        if let Some(existing) = self.sessions.get(id) {
            return Arc::clone(existing.value());
        }
        let entry = self.sessions.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(session = %id, state = initial.name(), "session created");
            Arc::new(Mutex::new(Session::new(
                id.clone(),
                initial.clone(),
                self.history_limit,
            )))
        });
        Arc::clone(entry.value())
    }

    pub(crate) fn get(&self, id: &SessionId) -> Option<SessionHandle<S>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }
}
