//! State and event labels for guarded state machines.
//!
//! States and events carry no behavior of their own. A machine's behavior
//! lives entirely in its transition table; these traits only let the engine
//! compare, name, and record the labels it dispatches on.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// States form a small enumerable set per machine. All methods are pure.
///
/// # Required Traits
///
/// - `Clone`: the current state is copied into the transition history
/// - `PartialEq`: the engine matches rules by comparing states
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: histories can be exported
///
/// # Example
///
/// ```rust
/// use mathq::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum ScanState {
///     Scanning,
///     Done,
///     Rejected,
/// }
///
/// impl State for ScanState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Scanning => "Scanning",
///             Self::Done => "Done",
///             Self::Rejected => "Rejected",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done | Self::Rejected)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Rejected)
///     }
/// }
///
/// assert!(ScanState::Rejected.is_final());
/// assert!(!ScanState::Done.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is a terminal error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for external stimuli fed to a machine.
///
/// An event is matched against the `event` field of each transition rule
/// leaving the current state.
///
/// # Example
///
/// ```rust
/// use mathq::core::Event;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Input {
///     Char,
///     End,
/// }
///
/// impl Event for Input {
///     fn name(&self) -> &str {
///         match self {
///             Self::Char => "Char",
///             Self::End => "End",
///         }
///     }
/// }
///
/// assert_eq!(Input::End.name(), "End");
/// ```
pub trait Event: Clone + PartialEq + Debug + Send + Sync {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
