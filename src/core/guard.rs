//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the inbound event and the current
//! state. They decide whether a candidate transition is eligible and never
//! touch session data.

use super::event::Event;
use super::state::State;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Errors a guard can report instead of a verdict.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardError {
    #[error("Guard '{guard}' failed: {message}")]
    Failed { guard: String, message: String },

    #[error("Guard '{guard}' panicked")]
    Panicked { guard: String },
}

pub type GuardResult<T> = Result<T, GuardError>;

type Predicate<S> = Arc<dyn Fn(&Event, &S) -> GuardResult<bool> + Send + Sync>;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use chatmode::core::{Event, Guard, ReplyToken, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Mode { Idle, Help }
///
/// impl State for Mode {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Help => "Help",
///         }
///     }
/// }
///
/// let wants_help = Guard::<Mode>::command("help");
/// let event = Event::message(" HELP ", ReplyToken::new("t"));
///
/// assert!(wants_help.check(&event, &Mode::Idle).unwrap());
/// ```
pub struct Guard<S: State> {
    description: String,
    predicate: Predicate<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from an infallible pure predicate.
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(move |event, state| Ok(predicate(event, state))),
        }
    }

    /// Create a guard from a predicate that may fail.
    ///
    /// A failure is reported to the engine, which treats it as "not eligible".
    pub fn fallible<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event, &S) -> GuardResult<bool> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Passes for every event.
    pub fn always() -> Self {
        Self::new("always", |_, _| true)
    }

    /// Passes when the message text equals `command`, ignoring surrounding
    /// whitespace and ASCII case.
    pub fn command(command: impl Into<String>) -> Self {
        let command = command.into().trim().to_string();
        Self::new(format!("text == {command:?}"), move |event, _| {
            event
                .text()
                .is_some_and(|text| text.trim().eq_ignore_ascii_case(&command))
        })
    }

    /// Passes when the message text contains `needle`.
    pub fn text_contains(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self::new(format!("text contains {needle:?}"), move |event, _| {
            event.text().is_some_and(|text| text.contains(needle.as_str()))
        })
    }

    /// Passes when the event is a postback carrying exactly `data`.
    pub fn postback(data: impl Into<String>) -> Self {
        let data = data.into();
        Self::new(format!("postback == {data:?}"), move |event, _| {
            event.postback_data() == Some(data.as_str())
        })
    }

    /// Passes when either guard passes. `other` is only consulted when
    /// `self` does not pass; an error from either side is propagated.
    pub fn or(self, other: Guard<S>) -> Self {
        let description = format!("{} || {}", self.description, other.description);
        let (left, right) = (self.predicate, other.predicate);
        Self {
            description,
            predicate: Arc::new(move |event, state| {
                if left(event, state)? {
                    return Ok(true);
                }
                right(event, state)
            }),
        }
    }

    /// Inverts the guard's verdict. Errors stay errors.
    pub fn not(self) -> Self {
        let description = format!("!({})", self.description);
        let inner = self.predicate;
        Self {
            description,
            predicate: Arc::new(move |event, state| inner(event, state).map(|pass| !pass)),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Evaluate the guard for an event observed in `state`.
    ///
    /// A panicking predicate is reported as [`GuardError::Panicked`].
    pub fn check(&self, event: &Event, state: &S) -> GuardResult<bool> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)(event, state))).unwrap_or_else(
            |_| {
                Err(GuardError::Panicked {
                    guard: self.description.clone(),
                })
            },
        )
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
