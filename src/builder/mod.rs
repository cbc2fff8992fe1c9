//! Builder API for ergonomic state machine construction.
//!
//! The builders resolve the whole transition registry up front, so a
//! misregistered state is reported by `build()` instead of surfacing while
//! a conversation is running.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, RegistrationError};
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Guard, State};
use crate::engine::{Transition, Trigger};

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use chatmode::builder::simple_transition;
/// use chatmode::engine::Trigger;
/// use chatmode::state_enum;
///
/// state_enum! {
///     enum Mode {
///         Meme,
///         Help,
///         Idle,
///     }
/// }
///
/// let go_back = simple_transition(Trigger::on_event("go_back"), [Mode::Meme, Mode::Help], Mode::Idle);
/// assert!(go_back.applies_to(&Mode::Help));
/// ```
pub fn simple_transition<S>(
    trigger: Trigger,
    sources: impl IntoIterator<Item = S>,
    dest: S,
) -> Transition<S>
where
    S: State + 'static,
{
    Transition {
        trigger,
        sources: sources.into_iter().collect(),
        dest,
        guard: None,
        handler: None,
    }
}

/// Create a transition gated by `guard`.
///
/// # Example
///
/// ```
/// use chatmode::builder::guarded_transition;
/// use chatmode::core::Guard;
/// use chatmode::engine::Trigger;
/// use chatmode::state_enum;
///
/// state_enum! {
///     enum Mode {
///         Idle,
///         Help,
///     }
/// }
///
/// let enter_help = guarded_transition(
///     Trigger::on_event("advance"),
///     Mode::Idle,
///     Mode::Help,
///     Guard::command("help"),
/// );
/// assert!(enter_help.is_guarded());
/// ```
pub fn guarded_transition<S>(trigger: Trigger, from: S, to: S, guard: Guard<S>) -> Transition<S>
where
    S: State + 'static,
{
    Transition {
        trigger,
        sources: vec![from],
        dest: to,
        guard: Some(guard),
        handler: None,
    }
}
