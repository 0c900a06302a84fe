//! JSON bodies exchanged over HTTP.

use crate::error::ErrorKind;
use crate::service::{ExpressionError, Method};
use serde::{Deserialize, Serialize};

pub const EVALUATE_PATH: &str = "/evaluate";
pub const VALIDATE_PATH: &str = "/validate";
pub const ERRORS_PATH: &str = "/errors";

/// Body of `/evaluate` and `/validate` requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub result: i64,
}

/// Answer to `/validate`. A rejected question is still a successful call;
/// `reason` says what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

/// One entry of the `/errors` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionErrorResponse {
    pub expression: String,
    pub endpoint: String,
    pub frequency: u64,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

pub fn endpoint(method: Method) -> &'static str {
    match method {
        Method::Evaluate => EVALUATE_PATH,
        Method::Validate => VALIDATE_PATH,
    }
}

impl From<&ExpressionError> for ExpressionErrorResponse {
    fn from(error: &ExpressionError) -> Self {
        Self {
            expression: error.expression.clone(),
            endpoint: endpoint(error.method).to_string(),
            frequency: error.frequency,
            kind: error.kind,
        }
    }
}
