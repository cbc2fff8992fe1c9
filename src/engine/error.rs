//! Dispatch errors.

use crate::core::SessionId;
use crate::engine::handler::HandlerError;
use thiserror::Error;

/// Errors surfaced by `dispatch` and `fire`.
///
/// An event that matches no transition is not an error; see `Dispatch::NoOp`.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler failed after the transition committed. The session stays
    /// in `to`.
    #[error("Handler for '{from}' -> '{to}' failed in session '{session}': {source}")]
    Handler {
        session: SessionId,
        from: String,
        to: String,
        #[source]
        source: HandlerError,
    },

    #[error("Trigger '{trigger}' is not registered")]
    UnknownTrigger { trigger: String },
}
