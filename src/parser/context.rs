//! Mutable state threaded through the parser machine.

use crate::token::{Token, TokenKind};
use std::collections::VecDeque;

/// Tokens still to read and the significant tokens kept so far.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    input: VecDeque<Token>,
    position: usize,
    output: Vec<Token>,
}

impl ParserContext {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            input: tokens.into_iter().collect(),
            position: 0,
            output: Vec::new(),
        }
    }

    /// Kind of the next unread token.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.input.front().map(Token::kind)
    }

    /// Index of the next unread token in the original sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.input.is_empty()
    }

    pub fn output(&self) -> &[Token] {
        &self.output
    }

    pub fn into_output(self) -> Vec<Token> {
        self.output
    }

    /// Move the next token to the output.
    pub fn keep(&mut self) {
        if let Some(token) = self.advance() {
            self.output.push(token);
        }
    }

    /// Discard the next token.
    pub fn skip(&mut self) {
        self.advance();
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.input.pop_front()?;
        self.position += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_and_skip_consume_in_order() {
        let mut ctx = ParserContext::new(vec![
            Token::Question("What is".to_string()),
            Token::Number("4".to_string()),
        ]);

        assert_eq!(ctx.peek_kind(), Some(TokenKind::Question));
        ctx.skip();
        assert_eq!(ctx.position(), 1);
        ctx.keep();

        assert!(ctx.is_exhausted());
        assert_eq!(ctx.output(), &[Token::Number("4".to_string())]);
        assert_eq!(ctx.position(), 2);
    }

    #[test]
    fn consuming_an_empty_context_is_a_no_op() {
        let mut ctx = ParserContext::default();
        ctx.keep();
        ctx.skip();

        assert_eq!(ctx.position(), 0);
        assert!(ctx.output().is_empty());
    }
}
