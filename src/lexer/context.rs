//! Mutable state threaded through the lexer machine.

use crate::token::{RecognizerError, RecognizerSet, Token, TokenKind};
use std::sync::Arc;

/// Input remainder, accumulated tokens, and the recognizers that classify
/// the next chunk.
///
/// The remainder is tracked as a byte cursor into the owned source so that
/// error reports can point at an offset in the original text.
#[derive(Debug, Clone)]
pub struct LexerContext {
    source: String,
    cursor: usize,
    tokens: Vec<Token>,
    seen_question: bool,
    recognizers: Arc<RecognizerSet>,
}

impl LexerContext {
    /// Create a context over `source`, skipping any leading whitespace.
    pub fn new(source: impl Into<String>, recognizers: Arc<RecognizerSet>) -> Self {
        let mut context = Self {
            source: source.into(),
            cursor: 0,
            tokens: Vec::new(),
            seen_question: false,
            recognizers,
        };
        context.skip_whitespace();
        context
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Input not yet consumed. Never starts with whitespace.
    pub fn remaining(&self) -> &str {
        &self.source[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Byte offset of the remainder within the source.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Whether a question phrase has been consumed already.
    pub fn has_question(&self) -> bool {
        self.seen_question
    }

    /// Whether some token pattern matches the start of the remainder.
    pub fn recognizes_prefix(&self) -> bool {
        self.recognizers.matches_prefix(self.remaining())
    }

    /// Consume the recognized prefix as a token, then trim whitespace.
    pub fn consume_token(&mut self) -> Result<(), RecognizerError> {
        let (kind, text) = self
            .recognizers
            .recognize(self.remaining())?
            .ok_or(RecognizerError::NoMatch {
                offset: self.cursor,
            })?;
        let consumed = text.len();
        let token = Token::new(kind, text);

        self.cursor += consumed;
        self.seen_question |= kind == TokenKind::Question;
        self.tokens.push(token);
        self.skip_whitespace();
        Ok(())
    }

    /// The unrecognized remainder up to the next whitespace.
    pub fn unrecognized_fragment(&self) -> &str {
        self.remaining()
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.cursor += rest.len() - rest.trim_start().len();
    }
}
