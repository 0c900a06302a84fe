//! HTTP front end for [`ExpressionService`].
//!
//! Three POST routes take and return JSON:
//!
//! - `/evaluate` answers `{"result": n}`, or 400 with `{"message"}` when the
//!   question is rejected
//! - `/validate` always answers `{"valid", "reason"}` for a question the
//!   service could judge
//! - `/errors` lists recorded failures (GET is accepted too)
//!
//! Failures unrelated to the question are reported as 500.

pub mod types;

pub use types::{
    ErrorResponse, EvaluateResponse, ExpressionErrorResponse, ExpressionRequest,
    ValidateResponse, ERRORS_PATH, EVALUATE_PATH, VALIDATE_PATH,
};

use crate::interpreter::Interpreter;
use crate::service::{ErrorRepository, ExpressionService, ServiceError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;

type Shared<I, R> = Arc<ExpressionService<I, R>>;

/// Routes for `service`.
pub fn router<I, R>(service: Shared<I, R>) -> Router
where
    I: Interpreter + 'static,
    R: ErrorRepository + 'static,
{
    Router::new()
        .route(EVALUATE_PATH, post(evaluate::<I, R>))
        .route(VALIDATE_PATH, post(validate::<I, R>))
        .route(ERRORS_PATH, post(errors::<I, R>).get(errors::<I, R>))
        .with_state(service)
}

/// Serve `service` on `listener` until `shutdown` resolves.
pub async fn serve<I, R>(
    listener: TcpListener,
    service: Shared<I, R>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()>
where
    I: Interpreter + 'static,
    R: ErrorRepository + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(target: "mathq::server", %addr, "Listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!(target: "mathq::server", %addr, "Stopped");
    Ok(())
}

async fn evaluate<I, R>(
    State(service): State<Shared<I, R>>,
    Json(request): Json<ExpressionRequest>,
) -> Response
where
    I: Interpreter + 'static,
    R: ErrorRepository + 'static,
{
    match service.evaluate(&request.expression) {
        Ok(result) => Json(EvaluateResponse { result }).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn validate<I, R>(
    State(service): State<Shared<I, R>>,
    Json(request): Json<ExpressionRequest>,
) -> Response
where
    I: Interpreter + 'static,
    R: ErrorRepository + 'static,
{
    let verdict = match service.validate(&request.expression) {
        Ok(()) => ValidateResponse {
            valid: true,
            reason: None,
        },
        Err(ServiceError::Expression(err)) => ValidateResponse {
            valid: false,
            reason: Some(err.to_string()),
        },
        Err(err) => return error_response(&err),
    };
    Json(verdict).into_response()
}

async fn errors<I, R>(State(service): State<Shared<I, R>>) -> Response
where
    I: Interpreter + 'static,
    R: ErrorRepository + 'static,
{
    match service.expression_errors() {
        Ok(records) => {
            let listed: Vec<ExpressionErrorResponse> =
                records.iter().map(ExpressionErrorResponse::from).collect();
            Json(listed).into_response()
        }
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status = match err {
        ServiceError::Expression(_) => StatusCode::BAD_REQUEST,
        ServiceError::UnsupportedInterpreter(_) | ServiceError::Repository(_) => {
            tracing::error!(target: "mathq::server", error = %err, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = ErrorResponse {
        message: err.to_string(),
        kind: err.kind(),
    };
    (status, Json(body)).into_response()
}
