//! Execution of guarded transitions over a caller-owned context.
//!
//! # Key Concepts
//!
//! - **Transitions**: rules keyed on `(state, event)` with an optional guard
//!   and an optional action
//! - **Tables**: the immutable, ordered rule set a machine runs on
//! - **Machine**: dispatches one event at a time, mutating the context only
//!   through the action of the rule that fires
//!
//! Execution is synchronous. `exec` never blocks, retries, or waits; a caller
//! that needs a deadline bounds its own driver loop.

mod machine;
mod table;
mod transition;

pub use machine::Machine;
pub use table::TransitionTable;
pub use transition::{Transition, TransitionAction, TransitionError};
