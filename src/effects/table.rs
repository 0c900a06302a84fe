//! Immutable transition tables.

use crate::core::{Event, State};
use crate::effects::transition::Transition;

/// The complete, ordered rule set of a machine plus its initial state.
///
/// Tables are built once through
/// [`TransitionTableBuilder`](crate::builder::TransitionTableBuilder), which
/// validates them, and are then shared read-only by every machine that runs
/// on them.
pub struct TransitionTable<S, V, C, E> {
    initial: S,
    rules: Vec<Transition<S, V, C, E>>,
}

impl<S: State, V: Event, C, E> TransitionTable<S, V, C, E> {
    pub(crate) fn from_parts(initial: S, rules: Vec<Transition<S, V, C, E>>) -> Self {
        Self { initial, rules }
    }

    /// State every machine on this table starts in.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// All rules in table order.
    pub fn rules(&self) -> &[Transition<S, V, C, E>] {
        &self.rules
    }

    /// Rules keyed on `(state, event)`, in table order.
    pub fn rules_for<'t>(
        &'t self,
        state: &'t S,
        event: &'t V,
    ) -> impl Iterator<Item = &'t Transition<S, V, C, E>> + 't {
        self.rules.iter().filter(move |rule| rule.matches(state, event))
    }

    /// Every state named by the table, initial state first, without duplicates.
    pub fn states(&self) -> Vec<&S> {
        let mut states = vec![&self.initial];
        for rule in &self.rules {
            for state in [&rule.from, &rule.to] {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: std::fmt::Debug, V: std::fmt::Debug, C, E> std::fmt::Debug for TransitionTable<S, V, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionTable")
            .field("initial", &self.initial)
            .field("rules", &self.rules)
            .finish()
    }
}
