//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validate::validate_table;
use crate::core::{Event, State};
use crate::effects::{Transition, TransitionTable};
use stillwater::validation::Validation;

/// Builder for constructing transition tables with a fluent API.
///
/// Rules keep the order in which they are added; that order decides which
/// guard the engine consults first for a shared `(state, event)` pair.
pub struct TransitionTableBuilder<S, V, C, E> {
    initial: Option<S>,
    transitions: Vec<Transition<S, V, C, E>>,
}

impl<S: State, V: Event, C: 'static, E: 'static> TransitionTableBuilder<S, V, C, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(
        mut self,
        builder: TransitionBuilder<S, V, C, E>,
    ) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, V, C, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, V, C, E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build and validate the table.
    ///
    /// Structural faults are accumulated and reported together as
    /// [`BuildError::InvalidTable`].
    pub fn build(self) -> Result<TransitionTable<S, V, C, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        match validate_table(&initial, &self.transitions) {
            Validation::Success(_) => Ok(TransitionTable::from_parts(initial, self.transitions)),
            Validation::Failure(errors) => {
                Err(BuildError::InvalidTable(errors.iter().cloned().collect()))
            }
        }
    }
}

impl<S: State, V: Event, C: 'static, E: 'static> Default for TransitionTableBuilder<S, V, C, E> {
    fn default() -> Self {
        Self::new()
    }
}
