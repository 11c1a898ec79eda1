//! HTTP surface of the ledger.
//!
//! Routes:
//! - `GET  /user/{userId}/balance`
//! - `POST /user/{userId}/transaction` (requires a `Source-Type` header)
//! - `GET  /health`

use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::engine::Engine;
use crate::validation::{ValidationError, validate_transaction, validate_user};

mod error;
pub use error::{ApiError, ErrorBody};

mod response;
pub use response::{BalanceResponse, TransactionResponse};

/// Name of the header carrying the transaction source.
pub const SOURCE_TYPE_HEADER: &str = "Source-Type";

/// Build the service router around a shared engine.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/user/:user_id/balance", get(get_balance))
        .route("/user/:user_id/transaction", post(post_transaction))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// The raw `userId` segment. A segment axum cannot decode (not UTF-8 after
/// percent-decoding) is an invalid user id like any other.
fn user_segment(
    path: Result<Path<String>, PathRejection>,
    uri: &Uri,
) -> Result<String, ValidationError> {
    path.map(|Path(user_id)| user_id).map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "undecodable user id segment");
        let raw = uri.path().split('/').nth(2).unwrap_or_default();
        ValidationError::InvalidUserId(raw.to_string())
    })
}

async fn get_balance(
    State(engine): State<Arc<Engine>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let user_id = user_segment(path, &uri)?;
    let user = validate_user(engine.ledger(), &user_id)?;
    let balance = engine.balance(user).await?;

    Ok(Json(BalanceResponse {
        user_id: user,
        balance,
    }))
}

async fn post_transaction(
    State(engine): State<Arc<Engine>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TransactionResponse>, ApiError> {
    let user_id = user_segment(path, &uri)?;

    // a non UTF-8 header value is treated like a missing one
    let source = headers
        .get(SOURCE_TYPE_HEADER)
        .and_then(|value| value.to_str().ok());

    let tx = validate_transaction(engine.ledger(), &user_id, source, &body)?;
    let receipt = engine.process(tx).await?;

    Ok(Json(receipt.into()))
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    error!(panic = %detail, "request handler panicked");
    ApiError::Internal.into_response()
}
