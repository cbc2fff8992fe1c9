//! Core state machine types and logic.
//!
//! This module contains the pure part of the machine:
//! - State definitions via the `State` trait
//! - Inbound events and session identities
//! - Guard predicates for transition control
//! - Bounded history tracking
//!
//! Nothing in here owns or mutates session state.

mod event;
mod guard;
mod history;
mod state;

pub use event::{Event, EventKind, Payload, ReplyToken, SessionId};
pub use guard::{Guard, GuardError, GuardResult};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;
