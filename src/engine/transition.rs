//! Transition rules and the triggers that name them.

use crate::core::{Event, Guard, GuardResult, State};
use crate::engine::handler::Handler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a trigger is activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Considered for every dispatched event.
    Event,
    /// Only fired by name through `StateMachine::fire`.
    Explicit,
}

/// Named action a transition responds to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    name: String,
    mode: TriggerMode,
}

impl Trigger {
    /// Trigger evaluated against every dispatched event.
    pub fn on_event(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: TriggerMode::Event,
        }
    }

    /// Trigger that only fires when invoked by name.
    pub fn explicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: TriggerMode::Explicit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn is_event_driven(&self) -> bool {
        self.mode == TriggerMode::Event
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A guarded move from one of `sources` to `dest`.
///
/// `handler`, when set, replaces the destination state's entry handler for
/// this transition.
pub struct Transition<S: State> {
    pub trigger: Trigger,
    pub sources: Vec<S>,
    pub dest: S,
    pub guard: Option<Guard<S>>,
    pub handler: Option<Handler<S>>,
}

impl<S: State> Transition<S> {
    /// Check if this transition leaves from `state` (pure)
    pub fn applies_to(&self, state: &S) -> bool {
        self.sources.contains(state)
    }

    /// Evaluate the guard for `event` seen in `state`.
    ///
    /// An unguarded transition is always eligible.
    pub fn check_guard(&self, event: &Event, state: &S) -> GuardResult<bool> {
        match &self.guard {
            Some(guard) => guard.check(event, state),
            None => Ok(true),
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

impl<S: State> Clone for Transition<S> {
    fn clone(&self) -> Self {
        Self {
            trigger: self.trigger.clone(),
            sources: self.sources.clone(),
            dest: self.dest.clone(),
            guard: self.guard.clone(),
            handler: self.handler.as_ref().map(Arc::clone),
        }
    }
}

impl<S: State> fmt::Debug for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("trigger", &self.trigger)
            .field("sources", &self.sources)
            .field("dest", &self.dest)
            .field("guard", &self.guard.as_ref().map(Guard::description))
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuardError, ReplyToken};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Meme,
        Help,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Meme => "Meme",
                Self::Help => "Help",
            }
        }
    }

    fn event(text: &str) -> Event {
        Event::message(text, ReplyToken::new("t"))
    }

    #[test]
    fn applies_to_any_listed_source() {
        let transition = Transition {
            trigger: Trigger::on_event("go_back"),
            sources: vec![TestState::Meme, TestState::Help],
            dest: TestState::Idle,
            guard: None,
            handler: None,
        };

        assert!(transition.applies_to(&TestState::Meme));
        assert!(transition.applies_to(&TestState::Help));
        assert!(!transition.applies_to(&TestState::Idle));
    }

    #[test]
    fn unguarded_transition_is_always_eligible() {
        let transition = Transition {
            trigger: Trigger::on_event("go_back"),
            sources: vec![TestState::Meme],
            dest: TestState::Idle,
            guard: None,
            handler: None,
        };

        assert!(!transition.is_guarded());
        assert_eq!(transition.check_guard(&event("whatever"), &TestState::Meme), Ok(true));
    }

    #[test]
    fn check_guard_respects_guard() {
        let transition = Transition {
            trigger: Trigger::on_event("advance"),
            sources: vec![TestState::Idle],
            dest: TestState::Meme,
            guard: Some(Guard::command("meme")),
            handler: None,
        };

        assert_eq!(transition.check_guard(&event("meme"), &TestState::Idle), Ok(true));
        assert_eq!(transition.check_guard(&event("help"), &TestState::Idle), Ok(false));
    }

    #[test]
    fn check_guard_surfaces_guard_errors() {
        let transition = Transition {
            trigger: Trigger::on_event("advance"),
            sources: vec![TestState::Idle],
            dest: TestState::Meme,
            guard: Some(Guard::new("broken", |_, _| panic!("bad guard"))),
            handler: None,
        };

        assert!(matches!(
            transition.check_guard(&event("meme"), &TestState::Idle),
            Err(GuardError::Panicked { .. })
        ));
    }

    fn summarize<S: State>(transition: &Transition<S>) -> String {
        format!("{:?}", transition.clone())
    }

    #[test]
    fn debug_shows_guard_description() {
        let transition = Transition {
            trigger: Trigger::on_event("advance"),
            sources: vec![TestState::Idle],
            dest: TestState::Help,
            guard: Some(Guard::command("help")),
            handler: None,
        };

        let debug = summarize(&transition);
        assert!(debug.contains("text == \"help\""));
        assert!(debug.contains("has_handler: false"));
    }

    #[test]
    fn trigger_modes() {
        assert!(Trigger::on_event("advance").is_event_driven());
        assert!(!Trigger::explicit("go_fsm").is_event_driven());
        assert_eq!(Trigger::explicit("go_fsm").mode(), TriggerMode::Explicit);
        assert_eq!(Trigger::on_event("advance").to_string(), "advance");
    }
}
