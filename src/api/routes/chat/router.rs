//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};

use super::public;
use crate::api::state::AppState;
use crate::relay::{RelayFailure, RelayResult, relay};

type SharedState = Arc<AppState>;

impl IntoResponse for RelayResult {
    fn into_response(self) -> Response {
        match self {
            RelayResult::Success(message) => {
                (StatusCode::OK, Json(public::ChatResponse::success(message))).into_response()
            }
            RelayResult::Failure(RelayFailure::Upstream {
                status,
                content_type,
                body,
            }) => {
                let content_type = content_type.unwrap_or_else(|| "application/json".to_string());
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            RelayResult::Failure(failure) => (
                failure.status(),
                Json(public::ChatResponse::failure(&failure.to_string())),
            )
                .into_response(),
        }
    }
}

/// Relay the transcript to the completion API and respond with the
/// next message
async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::ChatRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected chat request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(public::ChatResponse::failure(&rejection.body_text())),
            )
                .into_response();
        }
    };

    relay(&state.config, payload.messages).await.into_response()
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
