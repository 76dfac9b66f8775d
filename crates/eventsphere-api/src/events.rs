use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use eventsphere_types::api::{ErrorBody, EventRegistrationRequest, EventRegistrationResponse};
use eventsphere_types::models::NewRegistration;

use crate::error::ApiError;
use crate::{AppState, run_blocking};

const FETCH_FAILED: &str = "Failed to fetch events";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// GET /api/events: the catalog ordered by date, then time.
pub async fn list_events(State(state): State<AppState>) -> Response {
    match run_blocking(&state, |store| store.list_events()).await {
        Ok(events) => Json(events).into_response(),
        Err(e) => {
            e.log("Fetching events");
            let body = ErrorBody {
                success: None,
                error: e.user_message(FETCH_FAILED),
            };
            (e.status(), Json(body)).into_response()
        }
    }
}

/// POST /api/events/register: validate, persist, acknowledge.
pub async fn register_for_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRegistrationRequest>, JsonRejection>,
) -> Response {
    match register(&state, payload).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            e.log("Event registration");
            let body = ErrorBody {
                success: Some(false),
                error: e.user_message(REGISTRATION_FAILED),
            };
            (e.status(), Json(body)).into_response()
        }
    }
}

async fn register(
    state: &AppState,
    payload: Result<Json<EventRegistrationRequest>, JsonRejection>,
) -> Result<EventRegistrationResponse, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::Body(e.body_text()))?;
    let registration = validate(req)?;

    let email = registration.email.clone();
    let event_id = registration.event_id;
    let registration_id =
        run_blocking(state, move |store| store.insert_registration(registration)).await?;

    info!("Event registration {} saved: {} for event {}", registration_id, email, event_id);
    Ok(EventRegistrationResponse {
        success: true,
        message: "Registration successful!".to_string(),
        registration_id,
    })
}

/// Required: a selected event, first name, last name and email. Blank
/// optional fields are stored as absent.
fn validate(req: EventRegistrationRequest) -> Result<NewRegistration, ApiError> {
    let event_id = req
        .event_id
        .ok_or_else(|| ApiError::validation("No event selected. Please try again."))?;

    Ok(NewRegistration {
        event_id,
        first_name: required(req.first_name, "First name is required.")?,
        last_name: required(req.last_name, "Last name is required.")?,
        email: required(req.email, "Email is required.")?,
        phone: non_blank(req.phone),
        message: non_blank(req.message),
    })
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    non_blank(value).ok_or_else(|| ApiError::validation(message))
}
