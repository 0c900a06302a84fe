//! The lex → parse → evaluate pipeline behind one trait.

use crate::config::Config;
use crate::error::Error;
use crate::eval;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Token;

/// Something that can check and answer arithmetic questions.
///
/// Implementations are shared across threads by the expression service.
pub trait Interpreter: Send + Sync {
    /// Check that `question` is well formed without computing its value.
    fn validate(&self, question: &str) -> Result<(), Error>;

    /// Answer `question`.
    fn evaluate(&self, question: &str) -> Result<i64, Error>;
}

/// The standard interpreter: one lexer and one parser, reused for every
/// question.
#[derive(Debug)]
pub struct Pipeline {
    lexer: Lexer,
    parser: Parser,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            lexer: Lexer::new()?.with_max_input_len(config.max_input_len),
            parser: Parser::new()?,
        })
    }

    /// Lex and parse, returning the significant tokens.
    pub fn tokens(&self, question: &str) -> Result<Vec<Token>, Error> {
        let tokens = self.lexer.lex(question)?;
        self.parser.parse(tokens)
    }
}

impl Interpreter for Pipeline {
    fn validate(&self, question: &str) -> Result<(), Error> {
        self.tokens(question).map(|_| ())
    }

    fn evaluate(&self, question: &str) -> Result<i64, Error> {
        let tokens = self.tokens(question)?;
        eval::evaluate(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pipeline() -> Pipeline {
        Pipeline::new(&Config::default()).unwrap()
    }

    #[test]
    fn evaluates_left_to_right() {
        let answer = pipeline()
            .evaluate("What is 42 divided by 6 plus 3 multiplied by 8?")
            .unwrap();
        assert_eq!(answer, 80);
    }

    #[test]
    fn validate_does_not_evaluate() {
        assert!(pipeline().validate("What is 1 divided by 0?").is_ok());
        assert_eq!(
            pipeline()
                .evaluate("What is 1 divided by 0?")
                .unwrap_err()
                .kind(),
            ErrorKind::Arithmetic
        );
    }

    #[test]
    fn stage_errors_surface_unchanged() {
        let p = pipeline();
        assert_eq!(p.validate("Who are you?").unwrap_err().kind(), ErrorKind::NonMathQuestion);
        assert_eq!(
            p.validate("What is 2 cubed?").unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(
            p.validate("What is 2 plus?").unwrap_err().kind(),
            ErrorKind::InvalidSyntax
        );
    }

    #[test]
    fn config_caps_input_length() {
        let p = Pipeline::new(&Config {
            max_input_len: 12,
            ..Config::default()
        })
        .unwrap();
        assert_eq!(
            p.validate("What is 1 plus 1?").unwrap_err().kind(),
            ErrorKind::InputTooLong
        );
    }
}
