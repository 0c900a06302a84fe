//! Tokens of an arithmetic question and the patterns that recognize them.
//!
//! Each token kind is recognized by one regular expression applied to the
//! *prefix* of the remaining input. Patterns must be disjoint: when two of
//! them match the same prefix the recognizer set is misconfigured, and
//! [`RecognizerSet::recognize`] reports it instead of picking one.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const QUESTION_PATTERN: &str = "^What is";
pub const NUMBER_PATTERN: &str = "^[0-9]+";
pub const OPERAND_PATTERN: &str = "^(plus|minus|multiplied by|divided by)";
pub const PUNCTUATION_PATTERN: &str = r"^\?";

/// The four kinds of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Question,
    Number,
    Operand,
    Punctuation,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Question,
        TokenKind::Number,
        TokenKind::Operand,
        TokenKind::Punctuation,
    ];

    /// The standard recognition pattern for this kind.
    pub fn pattern(self) -> &'static str {
        match self {
            TokenKind::Question => QUESTION_PATTERN,
            TokenKind::Number => NUMBER_PATTERN,
            TokenKind::Operand => OPERAND_PATTERN,
            TokenKind::Punctuation => PUNCTUATION_PATTERN,
        }
    }

    /// Numbers and operands take part in arithmetic; the rest is structure.
    pub fn is_significant(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Operand)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Question => "Question",
            TokenKind::Number => "Number",
            TokenKind::Operand => "Operand",
            TokenKind::Punctuation => "Punctuation",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable token carrying the exact text it was recognized from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum Token {
    Question(String),
    Number(String),
    Operand(String),
    Punctuation(String),
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        let text = text.into();
        match kind {
            TokenKind::Question => Token::Question(text),
            TokenKind::Number => Token::Number(text),
            TokenKind::Operand => Token::Operand(text),
            TokenKind::Punctuation => Token::Punctuation(text),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Question(_) => TokenKind::Question,
            Token::Number(_) => TokenKind::Number,
            Token::Operand(_) => TokenKind::Operand,
            Token::Punctuation(_) => TokenKind::Punctuation,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Question(text)
            | Token::Number(text)
            | Token::Operand(text)
            | Token::Punctuation(text) => text,
        }
    }

    pub fn is_significant(&self) -> bool {
        self.kind().is_significant()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind(), self.text())
    }
}

/// Misconfiguration of a recognizer set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecognizerError {
    #[error("pattern for {kind} tokens does not compile: {source}")]
    InvalidPattern {
        kind: TokenKind,
        #[source]
        source: regex::Error,
    },

    #[error("pattern for {kind} tokens matches the empty string")]
    MatchesEmpty { kind: TokenKind },

    #[error("no pattern given for {kind} tokens")]
    MissingPattern { kind: TokenKind },

    #[error("patterns for {first} and {second} both match {prefix:?}")]
    Overlap {
        first: TokenKind,
        second: TokenKind,
        prefix: String,
    },

    #[error("no pattern matches the input at offset {offset}")]
    NoMatch { offset: usize },
}

#[derive(Debug, Clone)]
struct Recognizer {
    kind: TokenKind,
    regex: Regex,
}

impl Recognizer {
    /// Non-empty match anchored at the start of `input`.
    fn find<'i>(&self, input: &'i str) -> Option<&'i str> {
        self.regex
            .find(input)
            .filter(|m| m.start() == 0 && !m.is_empty())
            .map(|m| m.as_str())
    }
}

/// Compiled patterns for all four token kinds plus their union.
#[derive(Debug, Clone)]
pub struct RecognizerSet {
    recognizers: Vec<Recognizer>,
    any: Regex,
}

impl RecognizerSet {
    /// The standard English question grammar.
    pub fn standard() -> Result<Self, RecognizerError> {
        Self::from_patterns(TokenKind::ALL.map(|kind| (kind, kind.pattern())))
    }

    /// Compile a custom pattern per kind. Every kind needs exactly one pattern.
    pub fn from_patterns<'p, I>(patterns: I) -> Result<Self, RecognizerError>
    where
        I: IntoIterator<Item = (TokenKind, &'p str)>,
    {
        let mut recognizers: Vec<Recognizer> = Vec::with_capacity(TokenKind::ALL.len());
        for (kind, pattern) in patterns {
            let regex = Regex::new(pattern)
                .map_err(|source| RecognizerError::InvalidPattern { kind, source })?;
            if regex.is_match("") {
                return Err(RecognizerError::MatchesEmpty { kind });
            }
            recognizers.retain(|r| r.kind != kind);
            recognizers.push(Recognizer { kind, regex });
        }

        if let Some(kind) = TokenKind::ALL
            .into_iter()
            .find(|kind| !recognizers.iter().any(|r| r.kind == *kind))
        {
            return Err(RecognizerError::MissingPattern { kind });
        }

        let union = recognizers
            .iter()
            .map(|r| format!("(?:{})", r.regex.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let any = Regex::new(&union).map_err(|source| RecognizerError::InvalidPattern {
            kind: recognizers[0].kind,
            source,
        })?;

        Ok(Self { recognizers, any })
    }

    /// Whether some pattern matches a non-empty prefix of `input`.
    pub fn matches_prefix(&self, input: &str) -> bool {
        self.any
            .find(input)
            .is_some_and(|m| m.start() == 0 && !m.is_empty())
    }

    /// Classify the prefix of `input`.
    ///
    /// Returns `Ok(None)` when no pattern matches, and an error when more
    /// than one does.
    pub fn recognize<'i>(
        &self,
        input: &'i str,
    ) -> Result<Option<(TokenKind, &'i str)>, RecognizerError> {
        let mut found: Option<(TokenKind, &'i str)> = None;
        for recognizer in &self.recognizers {
            let Some(text) = recognizer.find(input) else {
                continue;
            };
            if let Some((first, _)) = found {
                return Err(RecognizerError::Overlap {
                    first,
                    second: recognizer.kind,
                    prefix: text.to_string(),
                });
            }
            found = Some((recognizer.kind, text));
        }
        Ok(found)
    }
}
