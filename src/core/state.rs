//! Core State trait for conversational modes.
//!
//! A state names the mode a session is currently in. States are plain values:
//! the engine compares, hashes and clones them, and never asks them to do
//! anything beyond reporting their name.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into session records and history
/// - `Eq` + `Hash`: the transition registry is indexed by source state
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: session snapshots are serializable
///
/// # Example
///
/// ```rust
/// use chatmode::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Mode {
///     Idle,
///     Help,
/// }
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
/// assert_eq!(Mode::Help.name(), "Help");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
