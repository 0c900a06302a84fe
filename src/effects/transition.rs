//! Transition rules with guards and context-mutating actions.

use crate::core::{Event, Guard, State};
use std::fmt;
use std::sync::Arc;

/// Errors raised by the engine itself, as opposed to guards or actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("No transition from state '{state}' on event '{event}'")]
    NoTransition { state: String, event: String },
}

/// Action run when a rule fires.
///
/// Receives the firing rule and the machine context. This is the only path
/// through which a machine mutates its context. An `Err` aborts the dispatch
/// and leaves the machine in the rule's `from` state.
pub type TransitionAction<S, V, C, E> =
    Arc<dyn Fn(&Transition<S, V, C, E>, &mut C) -> Result<(), E> + Send + Sync>;

/// A single rule of a transition table.
pub struct Transition<S, V, C, E> {
    pub from: S,
    pub event: V,
    pub to: S,
    pub guard: Option<Guard<C, E>>,
    pub action: Option<TransitionAction<S, V, C, E>>,
}

impl<S: State, V: Event, C, E> Transition<S, V, C, E> {
    /// Check whether this rule is keyed on `(state, event)` (pure).
    pub fn matches(&self, state: &S, event: &V) -> bool {
        self.from == *state && self.event == *event
    }

    /// Evaluate the guard against the context. Unguarded rules always admit.
    pub fn admits(&self, ctx: &C) -> Result<bool, E> {
        match &self.guard {
            Some(guard) => guard.check(ctx),
            None => Ok(true),
        }
    }

    /// Run the action, if any.
    pub fn apply(&self, ctx: &mut C) -> Result<(), E> {
        match &self.action {
            Some(action) => action(self, ctx),
            None => Ok(()),
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

impl<S: Clone, V: Clone, C, E> Clone for Transition<S, V, C, E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: fmt::Debug, V: fmt::Debug, C, E> fmt::Debug for Transition<S, V, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::End => "End",
            }
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    enum TestEvent {
        Go,
        Stop,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Go => "Go",
                Self::Stop => "Stop",
            }
        }
    }

    type Rule = Transition<TestState, TestEvent, Vec<u8>, String>;

    #[test]
    fn matches_requires_state_and_event() {
        let rule: Rule = Transition {
            from: TestState::Start,
            event: TestEvent::Go,
            to: TestState::End,
            guard: None,
            action: None,
        };

        assert!(rule.matches(&TestState::Start, &TestEvent::Go));
        assert!(!rule.matches(&TestState::Start, &TestEvent::Stop));
        assert!(!rule.matches(&TestState::End, &TestEvent::Go));
    }

    #[test]
    fn unguarded_rule_always_admits() {
        let rule: Rule = Transition {
            from: TestState::Start,
            event: TestEvent::Go,
            to: TestState::End,
            guard: None,
            action: None,
        };

        assert_eq!(rule.admits(&vec![]), Ok(true));
    }

    #[test]
    fn guarded_rule_consults_context() {
        let rule: Rule = Transition {
            from: TestState::Start,
            event: TestEvent::Go,
            to: TestState::End,
            guard: Some(Guard::when(|bytes: &Vec<u8>| bytes.len() > 2)),
            action: None,
        };

        assert_eq!(rule.admits(&vec![1]), Ok(false));
        assert_eq!(rule.admits(&vec![1, 2, 3]), Ok(true));
    }

    #[test]
    fn apply_runs_action_with_rule() {
        let rule: Rule = Transition {
            from: TestState::Start,
            event: TestEvent::Go,
            to: TestState::End,
            guard: None,
            action: Some(Arc::new(|rule: &Rule, bytes: &mut Vec<u8>| -> Result<(), String> {
                bytes.push(rule.to.name().len() as u8);
                Ok(())
            })),
        };

        let mut bytes = Vec::new();
        rule.apply(&mut bytes).unwrap();
        assert_eq!(bytes, vec![3]);
    }
}
