//! Structural checks for transition tables.
//!
//! Checks run through Stillwater's `Validation` so that a table with several
//! faults reports all of them in one build instead of one per attempt.

use crate::builder::error::TableFault;
use crate::core::{Event, State};
use crate::effects::Transition;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TableFault>>;

/// Validate a complete rule set, accumulating every fault.
pub fn validate_table<S: State, V: Event, C, E>(
    initial: &S,
    rules: &[Transition<S, V, C, E>],
) -> Validation<(), NonEmptyVec<TableFault>> {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(initial_state_has_exit(initial, rules));

    for (index, rule) in rules.iter().enumerate() {
        checks.push(reachable(index, rule, rules));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn initial_state_has_exit<S: State, V: Event, C, E>(
    initial: &S,
    rules: &[Transition<S, V, C, E>],
) -> Check {
    if rules.iter().any(|rule| rule.from == *initial) {
        Validation::success(())
    } else {
        Validation::fail(TableFault::DeadInitialState {
            state: initial.name().to_string(),
        })
    }
}

/// A rule is unreachable when an earlier rule for the same pair has no guard:
/// the engine stops at the first admitting rule, so nothing after it can fire.
fn reachable<S: State, V: Event, C, E>(
    index: usize,
    rule: &Transition<S, V, C, E>,
    rules: &[Transition<S, V, C, E>],
) -> Check {
    let shadowed = rules[..index]
        .iter()
        .any(|earlier| earlier.matches(&rule.from, &rule.event) && !earlier.is_guarded());

    if shadowed {
        Validation::fail(TableFault::ShadowedTransition {
            state: rule.from.name().to_string(),
            event: rule.event.name().to_string(),
            index,
        })
    } else {
        Validation::success(())
    }
}
