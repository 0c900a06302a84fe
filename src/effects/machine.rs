//! Machine that dispatches events against a transition table.

use crate::core::{Event, State, StateHistory, StateTransition};
use crate::effects::table::TransitionTable;
use crate::effects::transition::{Transition, TransitionError};
use chrono::Utc;

/// A running machine: current state, a shared table, and a borrowed context.
///
/// The machine never owns its context. The pipeline stage that creates the
/// machine decides the context's shape and gets it back once the machine is
/// dropped. Fired transitions are only recorded after
/// [`with_history`](Machine::with_history).
pub struct Machine<'a, S: State, V: Event, C, E> {
    current: S,
    table: &'a TransitionTable<S, V, C, E>,
    context: &'a mut C,
    history: Option<StateHistory<S>>,
}

impl<'a, S: State, V: Event, C, E> Machine<'a, S, V, C, E>
where
    E: From<TransitionError>,
{
    /// Create a machine in the table's initial state.
    pub fn new(table: &'a TransitionTable<S, V, C, E>, context: &'a mut C) -> Self {
        Self {
            current: table.initial().clone(),
            table,
            context,
            history: None,
        }
    }

    /// Record every fired transition from now on.
    pub fn with_history(mut self) -> Self {
        self.history.get_or_insert_with(StateHistory::new);
        self
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Transitions fired since recording was enabled, if it was (pure)
    pub fn history(&self) -> Option<&StateHistory<S>> {
        self.history.as_ref()
    }

    /// Read-only view of the context.
    pub fn context(&self) -> &C {
        &*self.context
    }

    /// Dispatch one event.
    ///
    /// Rules keyed on `(current state, event)` are tried in table order; the
    /// first whose guard holds (or which has no guard) fires. Its action runs
    /// against the context, and only if the action succeeds does the machine
    /// move to the rule's target state.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::NoTransition`] when no rule is keyed on the pair
    ///   or every candidate's guard is false.
    /// - Any error returned by a guard or an action, unchanged. The state is
    ///   left as it was.
    pub fn exec(&mut self, event: V) -> Result<&S, E> {
        let rule = self.select(&event)?;

        if let Err(err) = rule.apply(&mut *self.context) {
            tracing::debug!(
                target: "mathq::fsm",
                state = self.current.name(),
                event = event.name(),
                "Transition action failed"
            );
            return Err(err);
        }

        tracing::trace!(
            target: "mathq::fsm",
            from = rule.from.name(),
            to = rule.to.name(),
            event = event.name(),
            "Transition fired"
        );

        if let Some(history) = self.history.take() {
            self.history = Some(history.record(StateTransition {
                from: self.current.clone(),
                to: rule.to.clone(),
                event: event.name().to_string(),
                timestamp: Utc::now(),
            }));
        }
        self.current = rule.to.clone();

        Ok(&self.current)
    }

    fn select(&self, event: &V) -> Result<&'a Transition<S, V, C, E>, E> {
        let table = self.table;
        let candidates = table
            .rules()
            .iter()
            .filter(|rule| rule.matches(&self.current, event));

        for rule in candidates {
            if rule.admits(&*self.context)? {
                return Ok(rule);
            }
        }

        tracing::debug!(
            target: "mathq::fsm",
            state = self.current.name(),
            event = event.name(),
            "No transition matched"
        );
        Err(TransitionError::NoTransition {
            state: self.current.name().to_string(),
            event: event.name().to_string(),
        }
        .into())
    }
}
