//! Build errors for state machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Call .states(...) before .build()")]
    NoStates,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition trigger not specified. Call .trigger(trigger)")]
    MissingTrigger,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Invalid machine definition ({} problem(s)): {}", .errors.len(), summarize(.errors))]
    Registration { errors: Vec<RegistrationError> },
}

/// A single problem found while validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("initial state '{state}' is not declared")]
    UndeclaredInitialState { state: String },

    #[error("transition #{position} ('{trigger}') leaves undeclared state '{state}'")]
    UndeclaredSource {
        position: usize,
        trigger: String,
        state: String,
    },

    #[error("transition #{position} ('{trigger}') targets undeclared state '{state}'")]
    UndeclaredDestination {
        position: usize,
        trigger: String,
        state: String,
    },

    #[error("transition #{position} ('{trigger}') has no source states")]
    EmptySources { position: usize, trigger: String },

    #[error("trigger '{trigger}' is registered both as event-driven and explicit")]
    ConflictingTriggerMode { trigger: String },

    #[error("entry handler bound to undeclared state '{state}'")]
    UndeclaredHandlerState { state: String },

    #[error("more than one entry handler bound to state '{state}'")]
    DuplicateEntryHandler { state: String },
}

fn summarize(errors: &[RegistrationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
