//! Mathq: answers arithmetic questions written in plain English.
//!
//! Questions such as `What is 3 plus 10 minus 5?` pass through three stages:
//!
//! - **Lexer**: a guarded state machine that splits the text into tokens and
//!   tells off-topic questions apart from unsupported arithmetic
//! - **Parser**: a second machine that checks the grammar and keeps only
//!   numbers and operations
//! - **Evaluator**: strict left-to-right integer arithmetic
//!
//! Both machines run on the generic engine in [`core`], [`effects`], and
//! [`builder`]. The [`service`] module wraps the pipeline with an
//! error-frequency store, [`server`] puts that service behind HTTP, and
//! [`client`] talks to it from elsewhere.
//!
//! # Example
//!
//! ```rust
//! use mathq::{Config, Interpreter, Pipeline};
//!
//! let pipeline = Pipeline::new(&Config::default()).unwrap();
//! let answer = pipeline
//!     .evaluate("What is 42 divided by 6 plus 3 multiplied by 8?")
//!     .unwrap();
//!
//! assert_eq!(answer, 80);
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod server;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use builder::{BuildError, TransitionBuilder, TransitionTableBuilder};
pub use client::{ClientError, ExpressionClient};
pub use config::{Config, ConfigError};
pub use core::{Event, Guard, State, StateHistory, StateTransition};
pub use effects::{Machine, Transition, TransitionError, TransitionTable};
pub use error::{ArithmeticError, Error, ErrorKind, SyntaxFault};
pub use eval::{evaluate, Operation};
pub use interpreter::{Interpreter, Pipeline};
pub use lexer::{lex, Lexer};
pub use parser::{parse, Parser};
pub use server::{router, serve, ExpressionErrorResponse, ValidateResponse};
pub use service::{
    ErrorRepository, ErrorSnapshot, ExpressionError, ExpressionService, InMemoryErrorRepository,
    Method, ServiceError,
};
pub use token::{RecognizerSet, Token, TokenKind};
