//! Expression service: answers questions and counts the ones that fail.

pub mod repository;
pub mod snapshot;

pub use repository::{ErrorRepository, ExpressionError, InMemoryErrorRepository, RepositoryError};
pub use snapshot::{ErrorSnapshot, SnapshotError, SNAPSHOT_VERSION};

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::interpreter::Interpreter;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which service entry point a question came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Validate,
    Evaluate,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Validate => "validate",
            Method::Evaluate => "evaluate",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The question itself is at fault. It has been counted.
    #[error(transparent)]
    Expression(Error),

    /// The interpreter failed for reasons unrelated to the question.
    #[error("unsupported interpreter error: {0}")]
    UnsupportedInterpreter(#[source] Error),

    #[error("error store failed: {0}")]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Kind of the underlying pipeline error, if there is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceError::Expression(err) | ServiceError::UnsupportedInterpreter(err) => {
                Some(err.kind())
            }
            ServiceError::Repository(_) => None,
        }
    }
}

/// Front door for callers: runs the interpreter and records user-facing
/// failures in the error store.
pub struct ExpressionService<I, R> {
    interpreter: I,
    repository: R,
    record_errors: bool,
}

impl<I: Interpreter, R: ErrorRepository> ExpressionService<I, R> {
    pub fn new(interpreter: I, repository: R) -> Self {
        Self {
            interpreter,
            repository,
            record_errors: true,
        }
    }

    pub fn with_config(interpreter: I, repository: R, config: &Config) -> Self {
        Self {
            record_errors: config.record_errors,
            ..Self::new(interpreter, repository)
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn validate(&self, expression: &str) -> Result<(), ServiceError> {
        self.run(Method::Validate, expression, |interpreter| {
            interpreter.validate(expression)
        })
    }

    pub fn evaluate(&self, expression: &str) -> Result<i64, ServiceError> {
        self.run(Method::Evaluate, expression, |interpreter| {
            interpreter.evaluate(expression)
        })
    }

    /// Every recorded failure, sorted by expression.
    pub fn expression_errors(&self) -> Result<Vec<ExpressionError>, ServiceError> {
        Ok(self.repository.all()?)
    }

    fn run<T>(
        &self,
        method: Method,
        expression: &str,
        call: impl FnOnce(&I) -> Result<T, Error>,
    ) -> Result<T, ServiceError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            target: "mathq::service",
            "request",
            %request_id,
            method = method.as_str()
        );
        let _entered = span.enter();

        match call(&self.interpreter) {
            Ok(value) => {
                tracing::debug!(target: "mathq::service", "Question answered");
                Ok(value)
            }
            Err(err) if !err.kind().is_user_facing() => {
                tracing::warn!(target: "mathq::service", error = %err, "Interpreter fault");
                Err(ServiceError::UnsupportedInterpreter(err))
            }
            Err(err) => {
                let kind = err.kind();
                if self.record_errors {
                    let frequency = self.repository.increment(expression, method, kind)?;
                    tracing::debug!(
                        target: "mathq::service",
                        kind = kind.as_str(),
                        frequency,
                        "Question rejected"
                    );
                }
                Err(ServiceError::Expression(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TransitionError;
    use crate::interpreter::Pipeline;
    use std::sync::Arc;

    fn service() -> ExpressionService<Pipeline, Arc<InMemoryErrorRepository>> {
        ExpressionService::new(
            Pipeline::new(&Config::default()).unwrap(),
            Arc::new(InMemoryErrorRepository::new()),
        )
    }

    struct Broken;

    impl Interpreter for Broken {
        fn validate(&self, _: &str) -> Result<(), Error> {
            Err(TransitionError::NoTransition {
                state: "Done".to_string(),
                event: "EndOfInput".to_string(),
            }
            .into())
        }

        fn evaluate(&self, question: &str) -> Result<i64, Error> {
            self.validate(question).map(|_| 0)
        }
    }

    #[test]
    fn answers_are_not_recorded() {
        let service = service();
        assert_eq!(service.evaluate("What is 5?").unwrap(), 5);
        assert!(service.validate("What is 5 minus 6?").is_ok());
        assert!(service.expression_errors().unwrap().is_empty());
    }

    #[test]
    fn user_facing_failures_are_counted() {
        let service = service();

        for _ in 0..3 {
            let err = service.evaluate("What is 52 cubed?").unwrap_err();
            assert_eq!(err.kind(), Some(ErrorKind::UnsupportedOperation));
        }
        service.validate("Who is the president?").unwrap_err();

        let errors = service.expression_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].expression, "What is 52 cubed?");
        assert_eq!(errors[0].frequency, 3);
        assert_eq!(errors[1].method, Method::Validate);
        assert_eq!(errors[1].kind, ErrorKind::NonMathQuestion);
    }

    #[test]
    fn internal_faults_are_not_counted() {
        let repository = Arc::new(InMemoryErrorRepository::new());
        let service = ExpressionService::new(Broken, Arc::clone(&repository));

        let err = service.evaluate("What is 1?").unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedInterpreter(_)));
        assert!(err.to_string().starts_with("unsupported interpreter error"));
        assert!(repository.is_empty());
    }

    #[test]
    fn recording_can_be_disabled() {
        let repository = Arc::new(InMemoryErrorRepository::new());
        let config = Config {
            record_errors: false,
            ..Config::default()
        };
        let service = ExpressionService::with_config(
            Pipeline::new(&config).unwrap(),
            Arc::clone(&repository),
            &config,
        );

        assert!(matches!(
            service.evaluate("What is 1 divided by 0?"),
            Err(ServiceError::Expression(_))
        ));
        assert!(repository.is_empty());
    }
}
