//! Chatmode: per-session conversational modes for chat bots
//!
//! Chatmode routes each inbound chat event through a finite-state machine
//! that decides which mode a user's conversation is in and which handler
//! answers. The decision logic is pure; the engine only adds a session
//! table and hands replies back to the caller for delivery.
//!
//! # Core Concepts
//!
//! - **State**: Type-safe conversational modes via the `State` trait
//! - **Guards**: Pure predicates over the inbound event
//! - **Transitions**: Guarded moves, first match in registration order wins
//! - **Sessions**: One current state per user, created on first contact
//! - **Effects**: Replies returned from `dispatch`, never sent by the engine
//!
//! # Example
//!
//! ```rust
//! use chatmode::builder::{StateMachineBuilder, TransitionBuilder};
//! use chatmode::core::{Event, Guard, ReplyToken, SessionId};
//! use chatmode::engine::{Reply, Trigger};
//! use chatmode::state_enum;
//!
//! state_enum! {
//!     enum Mode {
//!         Idle,
//!         Help,
//!     }
//! }
//!
//! let machine = StateMachineBuilder::new()
//!     .states(Mode::ALL.iter().copied())
//!     .initial(Mode::Idle)
//!     .transition(
//!         TransitionBuilder::new()
//!             .trigger(Trigger::on_event("advance"))
//!             .from(Mode::Idle)
//!             .to(Mode::Help)
//!             .guard(Guard::command("help")),
//!     )?
//!     .transition(
//!         TransitionBuilder::new()
//!             .trigger(Trigger::on_event("go_back"))
//!             .from(Mode::Help)
//!             .to(Mode::Idle),
//!     )?
//!     .on_enter(Mode::Help, |_ctx| Ok(Some(Reply::text("How can I help?"))))
//!     .build()?;
//!
//! let user = SessionId::from("U123");
//! let result = machine.dispatch(&user, &Event::message("help", ReplyToken::new("r1")))?;
//!
//! assert_eq!(machine.current_state(&user), Mode::Help);
//! assert_eq!(result.effect().unwrap().reply, Reply::text("How can I help?"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bot;
pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod logging;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use core::{Event, Guard, SessionId, State};
pub use engine::{Dispatch, DispatchError, Effect, Reply, StateMachine, Trigger};
