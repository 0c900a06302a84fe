//! Parser stage: grammar check plus projection onto significant tokens.
//!
//! One pass validates `Question Number (Operand Number)* Punctuation` and,
//! as a side effect of the accepting transitions, keeps only the numbers and
//! operands the evaluator needs.

mod context;
mod table;

pub use context::ParserContext;

use crate::effects::Machine;
use crate::error::{Error, SyntaxFault};
use crate::token::{Token, TokenKind};
use crate::{event_enum, state_enum};
use table::ParserTable;

state_enum! {
    pub enum ParserState {
        Initial,
        AfterQuestion,
        AfterNumber,
        AfterOperand,
        Final,
        SyntaxError,
    }
    final: [Final, SyntaxError]
    error: [SyntaxError]
}

event_enum! {
    /// One event per token kind.
    pub enum ParserEvent {
        Question,
        Number,
        Operand,
        Punctuation,
    }
}

impl From<TokenKind> for ParserEvent {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Question => ParserEvent::Question,
            TokenKind::Number => ParserEvent::Number,
            TokenKind::Operand => ParserEvent::Operand,
            TokenKind::Punctuation => ParserEvent::Punctuation,
        }
    }
}

/// Reusable parser holding its compiled table.
#[derive(Debug)]
pub struct Parser {
    table: ParserTable,
}

impl Parser {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            table: table::parser_table()?,
        })
    }

    /// Validate `tokens` and return the significant subsequence.
    ///
    /// The output, when the parse succeeds, starts and ends with a number and
    /// alternates number and operand.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSyntax`] at the first token the grammar rejects, or
    /// with [`SyntaxFault::UnexpectedEnd`] when the tokens run out before the
    /// question mark.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Vec<Token>, Error> {
        let mut context = ParserContext::new(tokens);
        let finished = {
            let mut machine = Machine::new(&self.table, &mut context);
            if tracing::enabled!(target: "mathq::fsm", tracing::Level::TRACE) {
                machine = machine.with_history();
            }
            while let Some(kind) = machine.context().peek_kind() {
                machine.exec(ParserEvent::from(kind))?;
            }

            if let Some(history) = machine.history() {
                tracing::trace!(
                    target: "mathq::fsm",
                    path = ?history.get_path(),
                    "Parser run"
                );
            }
            machine.current_state().clone()
        };

        if finished != ParserState::Final {
            tracing::debug!(
                target: "mathq::parser",
                state = ?finished,
                position = context.position(),
                "Token sequence ended early"
            );
            return Err(Error::InvalidSyntax {
                fault: SyntaxFault::UnexpectedEnd,
                position: context.position(),
            });
        }

        Ok(context.into_output())
    }
}

/// Parse with a default [`Parser`].
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Token>, Error> {
    Parser::new()?.parse(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q() -> Token {
        Token::Question("What is".to_string())
    }

    fn n(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    fn op(text: &str) -> Token {
        Token::Operand(text.to_string())
    }

    fn p() -> Token {
        Token::Punctuation("?".to_string())
    }

    fn fault_of(result: Result<Vec<Token>, Error>) -> (SyntaxFault, usize) {
        match result {
            Err(Error::InvalidSyntax { fault, position }) => (fault, position),
            other => panic!("Expected InvalidSyntax, got {other:?}"),
        }
    }

    #[test]
    fn projects_significant_tokens() {
        let parsed = parse(vec![
            q(),
            n("3"),
            op("plus"),
            n("10"),
            op("minus"),
            n("5"),
            p(),
        ])
        .unwrap();

        assert_eq!(
            parsed,
            vec![n("3"), op("plus"), n("10"), op("minus"), n("5")]
        );
    }

    #[test]
    fn single_number_question_parses() {
        assert_eq!(parse(vec![q(), n("7"), p()]).unwrap(), vec![n("7")]);
    }

    #[test]
    fn must_begin_with_question() {
        assert_eq!(
            fault_of(parse(vec![n("1"), p()])),
            (SyntaxFault::MissingQuestion, 0)
        );
    }

    #[test]
    fn trailing_operand_is_rejected() {
        assert_eq!(
            fault_of(parse(vec![q(), n("1"), op("plus"), p()])),
            (SyntaxFault::ExpectedNumber, 3)
        );
    }

    #[test]
    fn tokens_after_question_mark_are_rejected() {
        assert_eq!(
            fault_of(parse(vec![q(), n("1"), p(), op("plus"), n("2"), p()])),
            (SyntaxFault::TrailingTokens, 3)
        );
    }

    #[test]
    fn duplicate_markers_are_rejected() {
        assert_eq!(
            fault_of(parse(vec![q(), q(), n("1"), p()])),
            (SyntaxFault::ExpectedNumber, 1)
        );
        assert_eq!(
            fault_of(parse(vec![q(), n("1"), n("2"), p()])),
            (SyntaxFault::ExpectedOperationOrEnd, 2)
        );
    }

    #[test]
    fn missing_question_mark_is_unexpected_end() {
        assert_eq!(
            fault_of(parse(vec![q(), n("1"), op("plus"), n("2")])),
            (SyntaxFault::UnexpectedEnd, 4)
        );
        assert_eq!(
            fault_of(parse(vec![q()])),
            (SyntaxFault::UnexpectedEnd, 1)
        );
        assert_eq!(fault_of(parse(vec![])), (SyntaxFault::UnexpectedEnd, 0));
    }

    #[test]
    fn event_follows_token_kind() {
        assert_eq!(ParserEvent::from(TokenKind::Operand), ParserEvent::Operand);
        assert_eq!(
            ParserEvent::from(p().kind()),
            ParserEvent::Punctuation
        );
    }
}
