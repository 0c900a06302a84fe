//! Core state machine vocabulary.
//!
//! This module contains the pure pieces of the engine:
//! - State and event labels via the `State` and `Event` traits
//! - Guard predicates over machine context
//! - The append-only record of fired transitions
//!
//! Nothing here mutates a context; mutation happens only through transition
//! actions in [`crate::effects`].

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{Event, State};
