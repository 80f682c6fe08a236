//! HTTP API over the remittance service.
//!
//! JSON in and out; failures come back as `{ "error": … }` with a status
//! code derived from the error kind.

use crate::application::RemittanceService;
use crate::error::RemitError;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

mod corridors;
mod parties;
mod remittances;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<RemittanceService>,
}

/// Error envelope for every failure response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Wraps a service error for the wire.
pub struct ApiError(RemitError);

fn status_for(err: &RemitError) -> StatusCode {
    match err {
        RemitError::NotFound(_) => StatusCode::NOT_FOUND,
        RemitError::DuplicateReference(_)
        | RemitError::AlreadyRegistered(_)
        | RemitError::InvalidTransition(_) => StatusCode::CONFLICT,
        RemitError::CodeSpaceExhausted(_) | RemitError::Io(_) | RemitError::Serde(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RemitError::InvalidAmount(_)
        | RemitError::InvalidRate(_)
        | RemitError::UnsupportedMethod(_)
        | RemitError::LimitExceeded(_)
        | RemitError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Internal failures are logged and reported without detail.
fn message_for(err: RemitError) -> String {
    match err {
        RemitError::CodeSpaceExhausted(attempts) => {
            tracing::error!("reference code space exhausted after {attempts} attempts");
            "internal server error".to_string()
        }
        RemitError::Io(err) => {
            tracing::error!("io failure: {err}");
            "internal server error".to_string()
        }
        RemitError::Serde(err) => {
            tracing::error!("serialization failure: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(&self.0);
        let error = message_for(self.0);

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<RemitError> for ApiError {
    fn from(value: RemitError) -> Self {
        Self(value)
    }
}

/// Builds the full route table over the given service.
pub fn router(service: Arc<RemittanceService>) -> Router {
    let state = ApiState { service };
    Router::new()
        .route("/health", get(health))
        .route(
            "/remittances",
            post(remittances::create).get(remittances::list),
        )
        .route("/remittances/stats", get(remittances::stats))
        .route(
            "/remittances/by-tracking/{code}",
            get(remittances::get_by_tracking),
        )
        .route(
            "/remittances/{id}",
            get(remittances::get)
                .patch(remittances::update)
                .delete(remittances::delete),
        )
        .route("/remittances/{id}/process", post(remittances::process))
        .route("/remittances/{id}/complete", post(remittances::complete))
        .route("/remittances/{id}/cancel", post(remittances::cancel))
        .route("/remittances/{id}/fail", post(remittances::fail))
        .route("/senders", post(parties::register_sender))
        .route("/senders/{id}", get(parties::get_sender))
        .route("/senders/{id}/allowance", get(parties::get_allowance))
        .route("/recipients", post(parties::register_recipient))
        .route("/recipients/{id}", get(parties::get_recipient))
        .route(
            "/corridors",
            post(corridors::register).get(corridors::list),
        )
        .route("/corridors/stats", get(corridors::stats))
        .route(
            "/corridors/{code}",
            get(corridors::get)
                .patch(corridors::update)
                .delete(corridors::remove),
        )
        .route(
            "/corridors/{code}/remittances",
            get(corridors::remittances),
        )
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = state.service.stats().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "remittances": stats.total_remittances,
    })))
}

/// Serves the API on an already-bound listener until the task is dropped.
pub async fn run_with_listener(
    service: Arc<RemittanceService>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("API listening on {addr}");

    axum::serve(listener, router(service)).await
}

/// Spawns the server onto the runtime and hands back the bound address,
/// which is what tests want.
pub fn spawn_with_listener(
    service: Arc<RemittanceService>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(service, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let res = ApiError::from(RemitError::NotFound("remittance x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let res = ApiError::from(RemitError::InvalidTransition(
            "completed -> pending".to_string(),
        ))
        .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn already_registered_maps_to_409() {
        let res =
            ApiError::from(RemitError::AlreadyRegistered("sender x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn limit_exceeded_maps_to_422() {
        let res = ApiError::from(RemitError::LimitExceeded("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invalid_amount_maps_to_422() {
        let res = ApiError::from(RemitError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn exhausted_code_space_maps_to_500() {
        let res = ApiError::from(RemitError::CodeSpaceExhausted(32)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
