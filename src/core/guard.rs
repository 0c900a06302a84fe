//! Guard predicates for disambiguating transitions.
//!
//! A guard inspects the machine's context, never its state: two rules that
//! share a `(state, event)` pair are told apart by what the context holds at
//! dispatch time. Guards must be side-effect free.

use std::fmt;
use std::sync::Arc;

type Predicate<C, E> = dyn Fn(&C) -> Result<bool, E> + Send + Sync;

/// Pure predicate over a machine context.
///
/// The predicate may fail, for instance when the context is not in a shape
/// it can judge. That error is surfaced verbatim by the engine.
///
/// # Example
///
/// ```rust
/// use mathq::core::Guard;
///
/// struct Buffer {
///     items: Vec<u32>,
/// }
///
/// let non_empty: Guard<Buffer, ()> = Guard::when(|b: &Buffer| !b.items.is_empty());
/// let empty = non_empty.clone().negate();
///
/// let buffer = Buffer { items: vec![7] };
/// assert_eq!(non_empty.check(&buffer), Ok(true));
/// assert_eq!(empty.check(&buffer), Ok(false));
/// ```
pub struct Guard<C, E> {
    predicate: Arc<Predicate<C, E>>,
}

impl<C: 'static, E: 'static> Guard<C, E> {
    /// Create a guard from a fallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> Result<bool, E> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Create a guard from a predicate that cannot fail.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::new(move |ctx| Ok(predicate(ctx)))
    }

    /// Guard that holds exactly when `self` does not.
    ///
    /// Errors from the inner predicate pass through unchanged.
    pub fn negate(self) -> Self {
        let inner = self.predicate;
        Guard {
            predicate: Arc::new(move |ctx: &C| inner(ctx).map(|held| !held)),
        }
    }
}

impl<C, E> Guard<C, E> {
    /// Evaluate the guard against a context.
    pub fn check(&self, ctx: &C) -> Result<bool, E> {
        (self.predicate)(ctx)
    }
}

impl<C, E> Clone for Guard<C, E> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tally {
        seen: Vec<char>,
    }

    #[test]
    fn guard_reads_context() {
        let guard: Guard<Tally, ()> = Guard::when(|t: &Tally| t.seen.contains(&'?'));

        assert_eq!(guard.check(&Tally { seen: vec!['?'] }), Ok(true));
        assert_eq!(guard.check(&Tally { seen: vec!['a'] }), Ok(false));
    }

    #[test]
    fn negated_guard_flips_result() {
        let guard: Guard<Tally, ()> = Guard::when(|t: &Tally| t.seen.is_empty()).negate();

        assert_eq!(guard.check(&Tally { seen: vec![] }), Ok(false));
        assert_eq!(guard.check(&Tally { seen: vec!['x'] }), Ok(true));
    }

    #[test]
    fn negation_preserves_errors() {
        let guard: Guard<Tally, String> =
            Guard::new(|_: &Tally| Err("cannot judge".to_string())).negate();

        assert_eq!(
            guard.check(&Tally { seen: vec![] }),
            Err("cannot judge".to_string())
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let tally = Tally {
            seen: vec!['1', '2'],
        };
        let guard: Guard<Tally, ()> = Guard::when(|t: &Tally| t.seen.len() > 1);

        assert_eq!(guard.check(&tally), guard.check(&tally));
    }

    #[test]
    fn cloned_guards_share_predicate() {
        let guard: Guard<Tally, ()> = Guard::when(|t: &Tally| t.seen.len() == 2);
        let clone = guard.clone();
        let tally = Tally {
            seen: vec!['a', 'b'],
        };

        assert_eq!(guard.check(&tally), clone.check(&tally));
    }
}
