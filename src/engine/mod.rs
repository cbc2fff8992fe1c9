//! The stateful shell around the pure core.
//!
//! This module owns everything that changes over time: the per-session
//! state table, committed transitions and the handlers that turn them into
//! replies.
//!
//! # Key Concepts
//!
//! - **Transitions**: guarded moves between states, named by a trigger
//! - **State Machine**: selects and commits at most one transition per event
//! - **Handlers**: compose the reply once a transition has committed
//! - **Effects**: replies handed back to the caller for delivery

mod error;
mod handler;
mod machine;
mod session;
mod transition;

pub use error::DispatchError;
pub use handler::{
    Effect, Handler, HandlerContext, HandlerError, HandlerResult, OutboundMessage,
    PostbackAction, Reply,
};
pub use machine::{Dispatch, StateMachine};
pub use session::{Session, SessionSnapshot};
pub use transition::{Transition, Trigger, TriggerMode};
