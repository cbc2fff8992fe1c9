//! State machine that routes events through per-session transitions.

use crate::core::{Event, SessionId, State};
use crate::engine::error::DispatchError;
use crate::engine::handler::{Effect, Handler, HandlerContext, HandlerError};
use crate::engine::session::{SessionSnapshot, SessionTable};
use crate::engine::transition::{Transition, Trigger};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

/// Result of dispatching one event.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch<S: State> {
    /// No transition was eligible; the session is unchanged
    NoOp { state: S },

    /// A transition committed. `effect` is `None` when there was no handler
    /// or the handler chose to stay silent.
    Transitioned {
        from: S,
        to: S,
        trigger: Trigger,
        effect: Option<Effect>,
    },
}

impl<S: State> Dispatch<S> {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp { .. })
    }

    /// State the session is in after the dispatch.
    pub fn state(&self) -> &S {
        match self {
            Self::NoOp { state } => state,
            Self::Transitioned { to, .. } => to,
        }
    }

    pub fn effect(&self) -> Option<&Effect> {
        match self {
            Self::NoOp { .. } => None,
            Self::Transitioned { effect, .. } => effect.as_ref(),
        }
    }

    pub fn into_effect(self) -> Option<Effect> {
        match self {
            Self::NoOp { .. } => None,
            Self::Transitioned { effect, .. } => effect,
        }
    }
}

/// Conversation state machine.
///
/// Owns the transition registry and the session table. Built once through
/// `StateMachineBuilder` and shared by reference (or `Arc`) with the
/// delivery layer.
pub struct StateMachine<S: State + 'static> {
    initial: S,
    states: Vec<S>,
    transitions: Vec<Transition<S>>,
    /// source state -> indices into `transitions`, in registration order
    index: HashMap<S, Vec<usize>>,
    enter_handlers: HashMap<S, Handler<S>>,
    sessions: SessionTable<S>,
}

impl<S: State + 'static> StateMachine<S> {
    /// Assemble a machine from an already validated definition.
    pub(crate) fn from_parts(
        initial: S,
        states: Vec<S>,
        transitions: Vec<Transition<S>>,
        enter_handlers: HashMap<S, Handler<S>>,
        history_limit: usize,
    ) -> Self {
        let mut index: HashMap<S, Vec<usize>> = HashMap::new();
        for (position, transition) in transitions.iter().enumerate() {
            for source in &transition.sources {
                let entries = index.entry(source.clone()).or_default();
                // a transition listing the same source twice is still one candidate
                if entries.last() != Some(&position) {
                    entries.push(position);
                }
            }
        }

        Self {
            initial,
            states,
            transitions,
            index,
            enter_handlers,
            sessions: SessionTable::new(history_limit),
        }
    }

    /// Route an inbound event for `session_id`.
    ///
    /// Candidates are the event-driven transitions leaving the session's
    /// current state, tried in registration order; the first whose guard
    /// passes commits. Guard failures count as "not eligible".
    pub fn dispatch(
        &self,
        session_id: &SessionId,
        event: &Event,
    ) -> Result<Dispatch<S>, DispatchError> {
        self.run(session_id, event, |t| t.trigger.is_event_driven())
    }

    /// Fire a named trigger for `session_id`, regardless of its mode.
    pub fn fire(
        &self,
        session_id: &SessionId,
        trigger: &str,
        event: &Event,
    ) -> Result<Dispatch<S>, DispatchError> {
        if !self.transitions.iter().any(|t| t.trigger.name() == trigger) {
            return Err(DispatchError::UnknownTrigger {
                trigger: trigger.to_string(),
            });
        }
        self.run(session_id, event, |t| t.trigger.name() == trigger)
    }

    /// Transition `dispatch` would select for `event` in `state` (pure).
    pub fn resolve(&self, state: &S, event: &Event) -> Option<&Transition<S>> {
        self.select(state, event, |t| t.trigger.is_event_driven())
    }

    /// Current state of a session. Unseen identities report the initial
    /// state without creating a session.
    pub fn current_state(&self, session_id: &SessionId) -> S {
        match self.sessions.get(session_id) {
            Some(handle) => handle.lock().state().clone(),
            None => self.initial.clone(),
        }
    }

    pub fn snapshot(&self, session_id: &SessionId) -> Option<SessionSnapshot<S>> {
        self.sessions
            .get(session_id)
            .map(|handle| handle.lock().snapshot())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Declared states, in declaration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn is_declared(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Registered transitions, in registration order.
    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    fn run<F>(
        &self,
        session_id: &SessionId,
        event: &Event,
        eligible: F,
    ) -> Result<Dispatch<S>, DispatchError>
    where
        F: Fn(&Transition<S>) -> bool,
    {
        let handle = self.sessions.get_or_create(session_id, &self.initial);
        let mut session = handle.lock();
        let from = session.state().clone();

        let Some(transition) = self.select(&from, event, eligible) else {
            tracing::debug!(
                session = %session_id,
                state = from.name(),
                kind = ?event.kind(),
                "no transition matched"
            );
            return Ok(Dispatch::NoOp { state: from });
        };

        session.commit(&transition.trigger, transition.dest.clone());
        tracing::info!(
            session = %session_id,
            trigger = %transition.trigger,
            from = from.name(),
            to = transition.dest.name(),
            "transition committed"
        );

        let handler = transition
            .handler
            .as_ref()
            .or_else(|| self.enter_handlers.get(&transition.dest));

        let reply = match handler {
            Some(handler) => {
                let context = HandlerContext {
                    session_id,
                    from: &from,
                    to: &transition.dest,
                    trigger: &transition.trigger,
                    event,
                };
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&context)))
                    .unwrap_or(Err(HandlerError::Panicked));
                outcome.map_err(|source| {
                    tracing::warn!(
                        session = %session_id,
                        trigger = %transition.trigger,
                        to = transition.dest.name(),
                        error = %source,
                        "handler failed after transition committed"
                    );
                    DispatchError::Handler {
                        session: session_id.clone(),
                        from: from.name().to_string(),
                        to: transition.dest.name().to_string(),
                        source,
                    }
                })?
            }
            None => None,
        };
        drop(session);

        Ok(Dispatch::Transitioned {
            from,
            to: transition.dest.clone(),
            trigger: transition.trigger.clone(),
            effect: reply.map(|reply| Effect::new(event.reply_token.clone(), reply)),
        })
    }

    fn select<F>(&self, state: &S, event: &Event, eligible: F) -> Option<&Transition<S>>
    where
        F: Fn(&Transition<S>) -> bool,
    {
        let candidates = self.index.get(state)?;
        candidates
            .iter()
            .map(|&position| &self.transitions[position])
            .filter(|transition| eligible(transition))
            .find(|transition| match transition.check_guard(event, state) {
                Ok(pass) => pass,
                Err(error) => {
                    tracing::warn!(
                        state = state.name(),
                        trigger = %transition.trigger,
                        dest = transition.dest.name(),
                        %error,
                        "guard failed, treating transition as not eligible"
                    );
                    false
                }
            })
    }
}
