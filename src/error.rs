//! Error taxonomy for the question pipeline.
//!
//! Every failure of lexing, parsing, or evaluation is an [`Error`]. Callers
//! classify failures by [`ErrorKind`], which is also the key the
//! error-frequency store counts under.

use crate::builder::BuildError;
use crate::effects::TransitionError;
use crate::token::RecognizerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input is not an arithmetic question at all.
    NonMathQuestion,
    /// A question contains a phrase that is not a supported operation.
    UnsupportedOperation,
    /// The tokens do not form `Question Number (Operand Number)* Punctuation`.
    InvalidSyntax,
    /// The arithmetic itself failed (division by zero, overflow).
    Arithmetic,
    /// The input exceeds the configured length cap.
    InputTooLong,
    /// A fault in a transition table or recognizer set. Never user-facing.
    Internal,
}

impl ErrorKind {
    /// Whether this kind describes a problem with the caller's input rather
    /// than with the interpreter itself.
    pub fn is_user_facing(self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NonMathQuestion => "non-math question",
            ErrorKind::UnsupportedOperation => "unsupported operation",
            ErrorKind::InvalidSyntax => "invalid syntax",
            ErrorKind::Arithmetic => "arithmetic error",
            ErrorKind::InputTooLong => "input too long",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was wrong with a token sequence that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxFault {
    /// The statement does not open with the question phrase.
    MissingQuestion,
    /// A number was required after the question phrase or an operation.
    ExpectedNumber,
    /// An operation or the question mark was required after a number.
    ExpectedOperationOrEnd,
    /// Tokens follow the terminating question mark.
    TrailingTokens,
    /// The sequence ran out before the terminating question mark.
    UnexpectedEnd,
}

impl fmt::Display for SyntaxFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SyntaxFault::MissingQuestion => "statement must begin with a question",
            SyntaxFault::ExpectedNumber => "expected a number",
            SyntaxFault::ExpectedOperationOrEnd => "expected an operation or a question mark",
            SyntaxFault::TrailingTokens => "nothing may follow the question mark",
            SyntaxFault::UnexpectedEnd => "statement ended before the question mark",
        };
        f.write_str(msg)
    }
}

/// Failures of integer evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero ({dividend} divided by 0)")]
    DivisionByZero { dividend: i64 },

    #[error("{left} {operation} {right} overflows a 64-bit integer")]
    Overflow {
        left: i64,
        operation: &'static str,
        right: i64,
    },

    #[error("number {text} does not fit in a 64-bit integer")]
    NumberOutOfRange { text: String },
}

/// Any failure of the lex → parse → evaluate pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("non-math question")]
    NonMathQuestion { input: String },

    #[error("unsupported operation {fragment:?} at offset {offset}")]
    UnsupportedOperation { fragment: String, offset: usize },

    #[error("invalid syntax at token {position}: {fault}")]
    InvalidSyntax { fault: SyntaxFault, position: usize },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InputTooLong { len: usize, max: usize },

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Recognizer(#[from] RecognizerError),

    #[error(transparent)]
    Table(#[from] BuildError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonMathQuestion { .. } => ErrorKind::NonMathQuestion,
            Error::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Error::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            Error::Arithmetic(_) => ErrorKind::Arithmetic,
            Error::InputTooLong { .. } => ErrorKind::InputTooLong,
            Error::Transition(_) | Error::Recognizer(_) | Error::Table(_) => ErrorKind::Internal,
        }
    }
}
