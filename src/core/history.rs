//! Record of the transitions a machine has fired.
//!
//! A machine appends one [`StateTransition`] per successful dispatch. Failed
//! dispatches leave no trace here because they never change state.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use mathq::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Open,
///     Closed,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: Phase::Open,
///     to: Phase::Closed,
///     event: "Close".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "Close");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the event that fired the transition
    pub event: String,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only history of fired transitions.
///
/// # Example
///
/// ```rust
/// use mathq::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Step { A, B, C }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///             Self::C => "C",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Step::A,
///         to: Step::B,
///         event: "next".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Step::B,
///         to: Step::C,
///         event: "next".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path(), vec![&Step::A, &Step::B, &Step::C]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the `to`
    /// state of every transition. Empty when nothing has fired.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Names of the events that fired, in order.
    pub fn events(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.event.as_str()).collect()
    }

    /// Time between the first and last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Reading,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Reading => "Reading",
                Self::Done => "Done",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    fn fired(from: TestState, to: TestState, event: &str) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(fired(TestState::Initial, TestState::Reading, "Token"))
            .record(fired(TestState::Reading, TestState::Reading, "Token"))
            .record(fired(TestState::Reading, TestState::Done, "End"));

        let path = history.get_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[3], &TestState::Done);
        assert_eq!(history.events(), vec!["Token", "Token", "End"]);
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history =
            StateHistory::new().record(fired(TestState::Initial, TestState::Done, "End"));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StateHistory::new().record(fired(TestState::Initial, TestState::Reading, "Token"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.transitions()[0].event, "Token");
    }
}
