use serde::{Deserialize, Serialize};

// -- Event registration --

/// Body of `POST /api/events/register`. Every field is optional on the wire
/// so that missing input is reported by validation rather than by the JSON
/// extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationRequest {
    pub event_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationResponse {
    pub success: bool,
    pub message: String,
    pub registration_id: i64,
}

/// Failure body shared by the JSON endpoints. `success` is only present on
/// the registration endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
}
