//! Lexer stage: raw question text to a token sequence.
//!
//! The lexer is a four-state machine. A driver loop classifies the prefix of
//! the remaining input as recognized or unrecognized and dispatches the
//! matching event; the guards on the failure rules decide whether unknown
//! text is an off-topic question or an unsupported arithmetic phrase.
//!
//! # Example
//!
//! ```rust
//! use mathq::lexer::Lexer;
//! use mathq::token::Token;
//!
//! let lexer = Lexer::new().unwrap();
//! let tokens = lexer.lex("What is 3 plus 10?").unwrap();
//!
//! assert_eq!(tokens[1], Token::Number("3".to_string()));
//! assert_eq!(tokens.len(), 5);
//! ```

mod context;
mod table;

pub use context::LexerContext;

use crate::effects::Machine;
use crate::error::Error;
use crate::token::{RecognizerSet, Token};
use crate::{event_enum, state_enum};
use std::sync::Arc;
use table::LexerTable;

state_enum! {
    pub enum LexerState {
        Tokenizing,
        Done,
        NonMathQuestion,
        UnsupportedOperation,
    }
    final: [Done, NonMathQuestion, UnsupportedOperation]
    error: [NonMathQuestion, UnsupportedOperation]
}

event_enum! {
    pub enum LexerEvent {
        RecognizedToken,
        UnrecognizedToken,
        EndOfInput,
    }
}

/// Reusable lexer. Each call to [`Lexer::lex`] runs a fresh machine over a
/// fresh context, so one lexer can serve many threads.
#[derive(Debug)]
pub struct Lexer {
    table: LexerTable,
    recognizers: Arc<RecognizerSet>,
    max_input_len: Option<usize>,
}

impl Lexer {
    /// Lexer over the standard recognizers with no length cap.
    pub fn new() -> Result<Self, Error> {
        Self::with_recognizers(Arc::new(RecognizerSet::standard()?))
    }

    pub fn with_recognizers(recognizers: Arc<RecognizerSet>) -> Result<Self, Error> {
        Ok(Self {
            table: table::lexer_table()?,
            recognizers,
            max_input_len: None,
        })
    }

    /// Reject inputs longer than `max` bytes before lexing them.
    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }

    /// Split `input` into tokens.
    ///
    /// # Errors
    ///
    /// - [`Error::InputTooLong`] when the input exceeds the configured cap.
    /// - [`Error::NonMathQuestion`] when unrecognized text or the end of
    ///   input arrives before any question phrase.
    /// - [`Error::UnsupportedOperation`] when unrecognized text follows the
    ///   question phrase.
    /// - An internal error if the recognizers are inconsistent.
    pub fn lex(&self, input: &str) -> Result<Vec<Token>, Error> {
        if let Some(max) = self.max_input_len {
            if input.len() > max {
                return Err(Error::InputTooLong {
                    len: input.len(),
                    max,
                });
            }
        }

        let mut context = LexerContext::new(input, Arc::clone(&self.recognizers));
        {
            let mut machine = Machine::new(&self.table, &mut context);
            if tracing::enabled!(target: "mathq::fsm", tracing::Level::TRACE) {
                machine = machine.with_history();
            }
            while !machine.context().is_exhausted() {
                let event = if machine.context().recognizes_prefix() {
                    LexerEvent::RecognizedToken
                } else {
                    LexerEvent::UnrecognizedToken
                };
                machine.exec(event)?;
            }
            machine.exec(LexerEvent::EndOfInput)?;

            if let Some(history) = machine.history() {
                tracing::trace!(
                    target: "mathq::fsm",
                    path = ?history.get_path(),
                    events = ?history.events(),
                    "Lexer run"
                );
            }
        }

        tracing::debug!(
            target: "mathq::lexer",
            tokens = context.tokens().len(),
            "Lexed input"
        );
        Ok(context.into_tokens())
    }
}

/// Lex with a default [`Lexer`].
pub fn lex(input: &str) -> Result<Vec<Token>, Error> {
    Lexer::new()?.lex(input)
}
