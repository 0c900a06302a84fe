//! HTTP client for a remote mathq server.

use crate::error::ErrorKind;
use crate::server::{
    ErrorResponse, EvaluateResponse, ExpressionErrorResponse, ExpressionRequest, ValidateResponse,
    ERRORS_PATH, EVALUATE_PATH, VALIDATE_PATH,
};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the question (HTTP 400).
    #[error("{message}")]
    Rejected {
        kind: Option<ErrorKind>,
        message: String,
    },

    #[error("server answered {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Kind of the server-side failure, when the server reported one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Rejected { kind, .. } => *kind,
            ClientError::Server { .. } | ClientError::Http(_) => None,
        }
    }
}

/// Talks to the routes served by [`crate::server::router`].
#[derive(Debug, Clone)]
pub struct ExpressionClient {
    client: Client,
    url: String,
}

impl ExpressionClient {
    /// Client for the server at `url`, e.g. `http://localhost:8080`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn evaluate(&self, expression: &str) -> Result<i64, ClientError> {
        let response = self.post_expression(EVALUATE_PATH, expression).await?;
        let body: EvaluateResponse = response.json().await?;
        Ok(body.result)
    }

    pub async fn validate(&self, expression: &str) -> Result<ValidateResponse, ClientError> {
        let response = self.post_expression(VALIDATE_PATH, expression).await?;
        Ok(response.json().await?)
    }

    pub async fn expression_errors(&self) -> Result<Vec<ExpressionErrorResponse>, ClientError> {
        let response = self
            .client
            .post(format!("{}{ERRORS_PATH}", self.url))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn post_expression(&self, path: &str, expression: &str) -> Result<Response, ClientError> {
        let request = ExpressionRequest {
            expression: expression.to_string(),
        };
        let response = self
            .client
            .post(format!("{}{path}", self.url))
            .json(&request)
            .send()
            .await?;
        tracing::debug!(
            target: "mathq::client",
            path,
            status = response.status().as_u16(),
            "Server answered"
        );
        check(response).await
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let (kind, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => (error.kind, error.message),
        Err(_) => (None, body),
    };

    if status == StatusCode::BAD_REQUEST {
        Err(ClientError::Rejected { kind, message })
    } else {
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_the_url() {
        let client = ExpressionClient::new("http://localhost:8080/");
        assert_eq!(client.url(), "http://localhost:8080");
    }

    #[test]
    fn only_rejections_carry_a_kind() {
        let rejected = ClientError::Rejected {
            kind: Some(ErrorKind::InvalidSyntax),
            message: "invalid syntax".to_string(),
        };
        assert_eq!(rejected.kind(), Some(ErrorKind::InvalidSyntax));
        assert_eq!(rejected.to_string(), "invalid syntax");

        let server = ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(server.kind(), None);
    }
}
