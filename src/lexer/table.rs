//! Transition rules of the lexer machine.

use super::context::LexerContext;
use super::{LexerEvent, LexerState};
use crate::builder::{BuildError, TransitionBuilder, TransitionTableBuilder};
use crate::core::Guard;
use crate::effects::{Transition, TransitionTable};
use crate::error::Error;

pub(crate) type LexerTable = TransitionTable<LexerState, LexerEvent, LexerContext, Error>;
type Rule = Transition<LexerState, LexerEvent, LexerContext, Error>;
type Builder = TransitionBuilder<LexerState, LexerEvent, LexerContext, Error>;

fn consume(_: &Rule, ctx: &mut LexerContext) -> Result<(), Error> {
    ctx.consume_token()?;
    Ok(())
}

fn reject_non_math(_: &Rule, ctx: &mut LexerContext) -> Result<(), Error> {
    Err(Error::NonMathQuestion {
        input: ctx.source().to_string(),
    })
}

fn reject_unsupported(_: &Rule, ctx: &mut LexerContext) -> Result<(), Error> {
    Err(Error::UnsupportedOperation {
        fragment: ctx.unrecognized_fragment().to_string(),
        offset: ctx.offset(),
    })
}

fn without_question() -> Guard<LexerContext, Error> {
    Guard::when(LexerContext::has_question).negate()
}

/// Unrecognized input before the question phrase is off-topic; after it,
/// an unsupported arithmetic phrase.
pub(crate) fn lexer_table() -> Result<LexerTable, BuildError> {
    use LexerEvent::*;
    use LexerState::*;

    TransitionTableBuilder::new()
        .initial(Tokenizing)
        .transition(
            Builder::new()
                .from(Tokenizing)
                .on(RecognizedToken)
                .to(Tokenizing)
                .action(consume),
        )?
        .transition(
            Builder::new()
                .from(Tokenizing)
                .on(EndOfInput)
                .to(Done)
                .when(LexerContext::has_question),
        )?
        .transition(
            Builder::new()
                .from(Tokenizing)
                .on(EndOfInput)
                .to(NonMathQuestion)
                .guard(without_question())
                .action(reject_non_math),
        )?
        .transition(
            Builder::new()
                .from(Tokenizing)
                .on(UnrecognizedToken)
                .to(NonMathQuestion)
                .guard(without_question())
                .action(reject_non_math),
        )?
        .transition(
            Builder::new()
                .from(Tokenizing)
                .on(UnrecognizedToken)
                .to(UnsupportedOperation)
                .when(LexerContext::has_question)
                .action(reject_unsupported),
        )?
        .build()
}
