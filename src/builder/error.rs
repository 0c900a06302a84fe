//! Build errors for transition tables and transitions.

use thiserror::Error;

/// Errors that can occur when building transition tables and transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition table is inconsistent: {}", join_faults(.0))]
    InvalidTable(Vec<TableFault>),
}

/// A structural fault in an otherwise complete table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableFault {
    #[error("rule #{index} for ('{state}', '{event}') is unreachable behind an unguarded rule")]
    ShadowedTransition {
        state: String,
        event: String,
        index: usize,
    },

    #[error("initial state '{state}' has no outgoing rule")]
    DeadInitialState { state: String },
}

fn join_faults(faults: &[TableFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
