//! Left-to-right integer evaluation of a parsed question.
//!
//! There is no operator precedence: `2 plus 3 multiplied by 4` is
//! `(2 + 3) * 4`.

use crate::error::{ArithmeticError, Error, SyntaxFault};
use crate::token::Token;
use std::fmt;
use std::str::FromStr;

/// The supported arithmetic phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Plus,
    Minus,
    MultipliedBy,
    DividedBy,
}

impl Operation {
    pub fn phrase(self) -> &'static str {
        match self {
            Operation::Plus => "plus",
            Operation::Minus => "minus",
            Operation::MultipliedBy => "multiplied by",
            Operation::DividedBy => "divided by",
        }
    }

    /// Apply with checked arithmetic. Division truncates toward zero.
    pub fn apply(self, left: i64, right: i64) -> Result<i64, ArithmeticError> {
        let result = match self {
            Operation::Plus => left.checked_add(right),
            Operation::Minus => left.checked_sub(right),
            Operation::MultipliedBy => left.checked_mul(right),
            Operation::DividedBy => {
                if right == 0 {
                    return Err(ArithmeticError::DivisionByZero { dividend: left });
                }
                left.checked_div(right)
            }
        };
        result.ok_or(ArithmeticError::Overflow {
            left,
            operation: self.phrase(),
            right,
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Returned when a phrase names no supported operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation {0:?}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" => Ok(Operation::Plus),
            "minus" => Ok(Operation::Minus),
            "multiplied by" => Ok(Operation::MultipliedBy),
            "divided by" => Ok(Operation::DividedBy),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

fn number_at(tokens: &[Token], position: usize) -> Result<i64, Error> {
    match tokens.get(position) {
        Some(Token::Number(text)) => text.parse::<i64>().map_err(|_| {
            ArithmeticError::NumberOutOfRange {
                text: text.clone(),
            }
            .into()
        }),
        Some(_) => Err(Error::InvalidSyntax {
            fault: SyntaxFault::ExpectedNumber,
            position,
        }),
        None => Err(Error::InvalidSyntax {
            fault: SyntaxFault::UnexpectedEnd,
            position,
        }),
    }
}

/// An operand whose phrase names no operation is a syntax fault at that
/// token, like any other token that is not an operation.
fn operation_at(tokens: &[Token], position: usize) -> Result<Operation, Error> {
    tokens
        .get(position)
        .and_then(|token| match token {
            Token::Operand(text) => text.parse::<Operation>().ok(),
            _ => None,
        })
        .ok_or(Error::InvalidSyntax {
            fault: SyntaxFault::ExpectedOperationOrEnd,
            position,
        })
}

/// Reduce a significant-token sequence (`Number (Operand Number)*`) to an
/// integer, strictly left to right.
pub fn evaluate(tokens: &[Token]) -> Result<i64, Error> {
    let mut result = number_at(tokens, 0)?;
    let mut position = 1;

    while position < tokens.len() {
        let operation = operation_at(tokens, position)?;
        let operand = number_at(tokens, position + 1)?;
        result = operation.apply(result, operand)?;
        position += 2;
    }

    tracing::trace!(target: "mathq::eval", tokens = tokens.len(), result, "Evaluated");
    Ok(result)
}
