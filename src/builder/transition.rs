//! Builder for constructing state transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::engine::{Handler, HandlerContext, HandlerResult, Transition, Trigger};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State> {
    trigger: Option<Trigger>,
    sources: Vec<S>,
    to: Option<S>,
    guard: Option<Guard<S>>,
    handler: Option<Handler<S>>,
}

impl<S: State + 'static> TransitionBuilder<S> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            trigger: None,
            sources: Vec::new(),
            to: None,
            guard: None,
            handler: None,
        }
    }

    /// Set the trigger (required).
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Add a source state. At least one is required; may be called repeatedly.
    pub fn from(mut self, state: S) -> Self {
        self.sources.push(state);
        self
    }

    /// Add several source states at once.
    pub fn from_any(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.sources.extend(states);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional). Without one the transition is unconditional.
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(self, description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event, &S) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(description, predicate))
    }

    /// Bind a handler to this transition, taking precedence over the
    /// destination state's entry handler (optional).
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&HandlerContext<'_, S>) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S>, BuildError> {
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;
        if self.sources.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let dest = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            trigger,
            sources: self.sources,
            dest,
            guard: self.guard,
            handler: self.handler,
        })
    }
}

impl<S: State + 'static> Default for TransitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReplyToken;
    use crate::engine::Reply;
    use serde::{Deserialize, Serialize};

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

    #[test]
    fn builder_requires_trigger() {
        let result = TransitionBuilder::<TestState>::new()
            .from(TestState::Idle)
            .to(TestState::Meme)
            .build();

        assert!(matches!(result, Err(BuildError::MissingTrigger)));
    }

    #[test]
    fn builder_requires_source() {
        let result = TransitionBuilder::<TestState>::new()
            .trigger(Trigger::on_event("advance"))
            .to(TestState::Meme)
            .build();

        assert!(matches!(result, Err(BuildError::MissingFromState)));
    }

    #[test]
    fn builder_requires_target() {
        let result = TransitionBuilder::<TestState>::new()
            .trigger(Trigger::on_event("advance"))
            .from(TestState::Idle)
            .build();

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn from_any_collects_sources_in_order() {
        let transition = TransitionBuilder::new()
            .trigger(Trigger::on_event("go_back"))
            .from(TestState::Meme)
            .from_any([TestState::Help])
            .to(TestState::Idle)
            .build()
            .unwrap();

        assert_eq!(transition.sources, vec![TestState::Meme, TestState::Help]);
        assert!(!transition.is_guarded());
    }

    #[test]
    fn when_installs_closure_guard() {
        let transition = TransitionBuilder::new()
            .trigger(Trigger::on_event("advance"))
            .from(TestState::Idle)
            .to(TestState::Meme)
            .when("says meme", |event, _| event.text() == Some("meme"))
            .build()
            .unwrap();

        let token = ReplyToken::new("t");
        assert_eq!(
            transition.check_guard(&Event::message("meme", token.clone()), &TestState::Idle),
            Ok(true)
        );
        assert_eq!(
            transition.check_guard(&Event::message("help", token), &TestState::Idle),
            Ok(false)
        );
    }

    #[test]
    fn handler_is_attached() {
        let transition = TransitionBuilder::new()
            .trigger(Trigger::on_event("advance"))
            .from(TestState::Idle)
            .to(TestState::Help)
            .handler(|_ctx| Ok(Some(Reply::text("help"))))
            .build()
            .unwrap();

        assert!(transition.handler.is_some());
    }
}
