//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::effects::{Transition, TransitionAction};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, V, C, E> {
    from: Option<S>,
    event: Option<V>,
    to: Option<S>,
    guard: Option<Guard<C, E>>,
    action: Option<TransitionAction<S, V, C, E>>,
}

impl<S: State, V: Event, C: 'static, E: 'static> TransitionBuilder<S, V, C, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: V) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add an infallible guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::when(predicate));
        self
    }

    /// Set the action run when the rule fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Transition<S, V, C, E>, &mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, V, C, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from,
            event,
            to,
            guard: self.guard,
            action: self.action,
        })
    }
}

impl<S: State, V: Event, C: 'static, E: 'static> Default for TransitionBuilder<S, V, C, E> {
    fn default() -> Self {
        Self::new()
    }
}
