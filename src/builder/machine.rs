//! Builder for constructing state machines.

use crate::builder::error::{BuildError, RegistrationError};
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, DEFAULT_HISTORY_LIMIT};
use crate::engine::{Handler, HandlerContext, HandlerResult, StateMachine, Transition, TriggerMode};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<RegistrationError>>;

/// Builder for constructing state machines with a fluent API.
///
/// `build()` validates the whole definition and reports every registration
/// problem at once.
pub struct StateMachineBuilder<S: State + 'static> {
    states: Vec<S>,
    initial: Option<S>,
    transitions: Vec<Transition<S>>,
    enter_handlers: Vec<(S, Handler<S>)>,
    history_limit: usize,
}

impl<S: State + 'static> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            enter_handlers: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Declare the state set (required). May be called repeatedly;
    /// duplicates are ignored.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        for state in states {
            if !self.states.contains(&state) {
                self.states.push(state);
            }
        }
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Bind a handler that runs whenever a transition enters `state`.
    pub fn on_enter<F>(mut self, state: S, handler: F) -> Self
    where
        F: Fn(&HandlerContext<'_, S>) -> HandlerResult + Send + Sync + 'static,
    {
        self.enter_handlers.push((state, Arc::new(handler)));
        self
    }

    /// Number of transitions kept in each session's history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let declared: HashSet<&S> = self.states.iter().collect();
        let mut checks: Vec<Check> = Vec::new();

        checks.push(require(declared.contains(&initial), || {
            RegistrationError::UndeclaredInitialState {
                state: initial.name().to_string(),
            }
        }));

        let mut modes: HashMap<&str, TriggerMode> = HashMap::new();
        for (position, transition) in self.transitions.iter().enumerate() {
            let trigger = transition.trigger.name();

            checks.push(require(!transition.sources.is_empty(), || {
                RegistrationError::EmptySources {
                    position,
                    trigger: trigger.to_string(),
                }
            }));

            for source in &transition.sources {
                checks.push(require(declared.contains(source), || {
                    RegistrationError::UndeclaredSource {
                        position,
                        trigger: trigger.to_string(),
                        state: source.name().to_string(),
                    }
                }));
            }

            checks.push(require(declared.contains(&transition.dest), || {
                RegistrationError::UndeclaredDestination {
                    position,
                    trigger: trigger.to_string(),
                    state: transition.dest.name().to_string(),
                }
            }));

            let mode = *modes.entry(trigger).or_insert(transition.trigger.mode());
            checks.push(require(mode == transition.trigger.mode(), || {
                RegistrationError::ConflictingTriggerMode {
                    trigger: trigger.to_string(),
                }
            }));
        }

        let mut enter_handlers: HashMap<S, Handler<S>> = HashMap::new();
        for (state, handler) in &self.enter_handlers {
            checks.push(require(declared.contains(state), || {
                RegistrationError::UndeclaredHandlerState {
                    state: state.name().to_string(),
                }
            }));

            let first = enter_handlers
                .insert(state.clone(), Arc::clone(handler))
                .is_none();
            checks.push(require(first, || RegistrationError::DuplicateEntryHandler {
                state: state.name().to_string(),
            }));
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks).map(|_| ()) {
            let errors: Vec<RegistrationError> = errors.iter().cloned().collect();
            tracing::warn!(problems = errors.len(), "rejected state machine definition");
            return Err(BuildError::Registration { errors });
        }

        tracing::info!(
            states = self.states.len(),
            transitions = self.transitions.len(),
            initial = initial.name(),
            "state machine built"
        );

        Ok(StateMachine::from_parts(
            initial,
            self.states,
            self.transitions,
            enter_handlers,
            self.history_limit,
        ))
    }
}

impl<S: State + 'static> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn require<F>(ok: bool, error: F) -> Check
where
    F: FnOnce() -> RegistrationError,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}
