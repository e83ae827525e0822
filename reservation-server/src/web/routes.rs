//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::domain::{RecordId, ReservationInput, ScheduleInput};
use crate::reservations::{ErrorKind, ReservationError};

use super::dto::ErrorResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .route("/api/reservation/add-reservation", post(create_reservation))
        .route("/api/reservations", get(list_reservations))
        .route(
            "/api/reservation/:id",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .route(
            "/api/reservations/summary/:traveller_id",
            get(upcoming_reservations),
        )
        .route(
            "/api/traveller/reservations/:traveller_id",
            get(traveller_history),
        )
        .route(
            "/api/train-schedules/add-train-schedule",
            post(create_schedule),
        )
        .route("/api/train-schedules", get(list_schedules))
        .route(
            "/api/train-schedules/:id",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Landing text.
async fn landing() -> &'static str {
    "Train reservation API"
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Validate an identifier taken from the request path.
fn parse_id(raw: String) -> Result<RecordId, AppError> {
    RecordId::new(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Book a reservation.
async fn create_reservation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let input: ReservationInput = parse_json(&body)?;
    let reservation = state.reservations.create(input).await?;
    Ok((StatusCode::CREATED, Json(reservation)).into_response())
}

/// All reservations with schedule details.
async fn list_reservations(State(state): State<AppState>) -> Result<Response, AppError> {
    let details = state.reservations.list_with_details().await?;
    Ok(Json(details).into_response())
}

/// One reservation with schedule details.
async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(id)?;
    let details = state
        .reservations
        .get_with_details(&id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Reservation with ID {id} not found."),
        })?;
    Ok(Json(details).into_response())
}

/// Replace a reservation.
async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = parse_id(id)?;
    let input: ReservationInput = parse_json(&body)?;
    let reservation = state.reservations.update(&id, input).await?;
    Ok(Json(reservation).into_response())
}

/// Cancel a reservation.
async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    state.reservations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A traveller's upcoming reservations (dashboard summary).
async fn upcoming_reservations(
    State(state): State<AppState>,
    Path(traveller_id): Path<String>,
) -> Result<Response, AppError> {
    let traveller_id = parse_id(traveller_id)?;
    let details = state
        .reservations
        .upcoming_for_traveller(&traveller_id)
        .await?;
    Ok(Json(details).into_response())
}

/// A traveller's full reservation history.
async fn traveller_history(
    State(state): State<AppState>,
    Path(traveller_id): Path<String>,
) -> Result<Response, AppError> {
    let traveller_id = parse_id(traveller_id)?;
    let details = state
        .reservations
        .history_for_traveller(&traveller_id)
        .await?;
    Ok(Json(details).into_response())
}

/// Publish a train schedule.
async fn create_schedule(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let input: ScheduleInput = parse_json(&body)?;
    let schedule = state.schedules.create(input).await?;
    Ok((StatusCode::CREATED, Json(schedule)).into_response())
}

/// All train schedules.
async fn list_schedules(State(state): State<AppState>) -> Result<Response, AppError> {
    let schedules = state.schedules.list().await?;
    Ok(Json(schedules).into_response())
}

/// One train schedule.
async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(id)?;
    let schedule = state
        .schedules
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Train schedule with ID {id} not found."),
        })?;
    Ok(Json(schedule).into_response())
}

/// Replace a schedule's details, keeping its reservations.
async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = parse_id(id)?;
    let input: ScheduleInput = parse_json(&body)?;
    let schedule = state.schedules.update(&id, input).await?;
    Ok(Json(schedule).into_response())
}

/// Delete a schedule with no reservations.
async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    state.schedules.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        let message = e.to_string();
        match e.kind() {
            ErrorKind::NotFound => AppError::NotFound { message },
            ErrorKind::InvalidArgument => AppError::BadRequest { message },
            ErrorKind::InvalidOperation | ErrorKind::Conflict => AppError::Conflict { message },
            ErrorKind::Internal => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::info!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
