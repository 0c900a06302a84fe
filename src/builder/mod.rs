//! Builder API for transition tables.
//!
//! This module provides fluent builders, structural validation, and macros
//! for declaring machines with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;
pub mod validate;

pub use error::{BuildError, TableFault};
pub use table::TransitionTableBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State};
use crate::effects::Transition;

/// Create an unconditional transition with no action.
///
/// # Example
///
/// ```
/// use mathq::builder::simple_transition;
/// use mathq::effects::Transition;
/// use mathq::{event_enum, state_enum};
///
/// state_enum! {
///     enum Gate {
///         Shut,
///         Ajar,
///     }
///     final: [Ajar]
/// }
///
/// event_enum! {
///     enum Knock {
///         Once,
///     }
/// }
///
/// let transition: Transition<Gate, Knock, (), ()> =
///     simple_transition(Gate::Shut, Knock::Once, Gate::Ajar);
/// assert!(transition.matches(&Gate::Shut, &Knock::Once));
/// ```
pub fn simple_transition<S, V, C, E>(from: S, event: V, to: S) -> Transition<S, V, C, E>
where
    S: State,
    V: Event,
{
    Transition {
        from,
        event,
        to,
        guard: None,
        action: None,
    }
}

/// Create a transition gated by an infallible predicate over the context.
pub fn guarded_transition<S, V, C, E, F>(from: S, event: V, to: S, guard: F) -> Transition<S, V, C, E>
where
    S: State,
    V: Event,
    C: 'static,
    E: 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Transition {
        from,
        event,
        to,
        guard: Some(Guard::when(guard)),
        action: None,
    }
}
