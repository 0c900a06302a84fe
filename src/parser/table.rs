//! Transition rules of the parser machine.
//!
//! Accepts `Question Number (Operand Number)* Punctuation`. Every other
//! `(state, event)` pair leads to `SyntaxError` with an action that reports
//! what the state expected.

use super::context::ParserContext;
use super::{ParserEvent, ParserState};
use crate::builder::{BuildError, TransitionTableBuilder};
use crate::effects::{Transition, TransitionTable};
use crate::error::{Error, SyntaxFault};
use std::sync::Arc;

pub(crate) type ParserTable = TransitionTable<ParserState, ParserEvent, ParserContext, Error>;
type Rule = Transition<ParserState, ParserEvent, ParserContext, Error>;
type Action = fn(&Rule, &mut ParserContext) -> Result<(), Error>;

fn keep_token(_: &Rule, ctx: &mut ParserContext) -> Result<(), Error> {
    ctx.keep();
    Ok(())
}

fn drop_token(_: &Rule, ctx: &mut ParserContext) -> Result<(), Error> {
    ctx.skip();
    Ok(())
}

fn reject(rule: &Rule, ctx: &mut ParserContext) -> Result<(), Error> {
    Err(Error::InvalidSyntax {
        fault: expected_in(&rule.from),
        position: ctx.position(),
    })
}

/// What was wrong with a token that arrived in `state`.
pub(crate) fn expected_in(state: &ParserState) -> SyntaxFault {
    match state {
        ParserState::Initial => SyntaxFault::MissingQuestion,
        ParserState::AfterQuestion | ParserState::AfterOperand => SyntaxFault::ExpectedNumber,
        ParserState::AfterNumber => SyntaxFault::ExpectedOperationOrEnd,
        ParserState::Final => SyntaxFault::TrailingTokens,
        ParserState::SyntaxError => SyntaxFault::UnexpectedEnd,
    }
}

fn rule(from: ParserState, event: ParserEvent, to: ParserState, action: Action) -> Rule {
    Transition {
        from,
        event,
        to,
        guard: None,
        action: Some(Arc::new(action)),
    }
}

pub(crate) fn parser_table() -> Result<ParserTable, BuildError> {
    use ParserEvent::*;
    use ParserState::*;

    let accepting = vec![
        rule(Initial, Question, AfterQuestion, drop_token),
        rule(AfterQuestion, Number, AfterNumber, keep_token),
        rule(AfterNumber, Operand, AfterOperand, keep_token),
        rule(AfterNumber, Punctuation, Final, drop_token),
        rule(AfterOperand, Number, AfterNumber, keep_token),
    ];

    let rejecting: [(ParserState, &[ParserEvent]); 5] = [
        (Initial, &[Number, Operand, Punctuation]),
        (AfterQuestion, &[Question, Operand, Punctuation]),
        (AfterNumber, &[Question, Number]),
        (AfterOperand, &[Question, Operand, Punctuation]),
        (Final, &[Question, Number, Operand, Punctuation]),
    ];
    let rejections = rejecting.into_iter().flat_map(|(from, events)| {
        events
            .iter()
            .map(move |event| rule(from.clone(), *event, SyntaxError, reject))
    });

    TransitionTableBuilder::new()
        .initial(Initial)
        .transitions(accepting)
        .transitions(rejections.collect())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: [ParserEvent; 4] = [
        ParserEvent::Question,
        ParserEvent::Number,
        ParserEvent::Operand,
        ParserEvent::Punctuation,
    ];

    #[test]
    fn every_live_state_handles_every_event_once() {
        let table = parser_table().unwrap();

        for state in table.states() {
            if state == &ParserState::SyntaxError {
                continue;
            }
            for event in EVENTS {
                assert_eq!(
                    table.rules_for(state, &event).count(),
                    1,
                    "{state:?} x {event:?}"
                );
            }
        }
    }

    #[test]
    fn faults_follow_the_arrival_state() {
        assert_eq!(expected_in(&ParserState::Initial), SyntaxFault::MissingQuestion);
        assert_eq!(
            expected_in(&ParserState::AfterNumber),
            SyntaxFault::ExpectedOperationOrEnd
        );
        assert_eq!(expected_in(&ParserState::Final), SyntaxFault::TrailingTokens);
    }
}
