//! The Patients API as seen by the desk.

use crate::model::{
    FollowUpReminder, Patient, PatientDraft, PatientId, RiskAnalysis, TreatmentDraft,
};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Failures talking to the Patients API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, refused connection).
    #[error("transport failure: {0}")]
    Transport(String),
    /// Lookup of a single record answered 404.
    #[error("not found")]
    NotFound,
    /// Any other non-2xx status. `message` is the `error` field of a JSON body, if present.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, message: Option<String> },
    /// A 2xx response whose body could not be decoded.
    #[error("malformed response payload: {0}")]
    Payload(String),
}

impl ApiError {
    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error body convention of the Patients API: `{ "error": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// HTTP/JSON Patients API.
///
/// | Operation | Request |
/// |---|---|
/// | `list_patients` | `GET /api/patients` |
/// | `get_patient` | `GET /api/patients/{id}` |
/// | `save_patient` | `POST /api/patients` |
/// | `patient_risk` | `GET /api/patients/{id}/risk` |
/// | `patient_reminder` | `GET /api/patients/{id}/reminder` |
/// | `record_treatment` | `POST /api/treatments` |
///
/// Lookups of a single record report a 404 as [`ApiError::NotFound`]; the two `POST`
/// operations report every failure status as [`ApiError::Status`].
pub trait PatientsApi: Send + Sync {
    fn list_patients(&self) -> impl Future<Output = ApiResult<Vec<Patient>>> + Send;

    fn get_patient(&self, id: &PatientId) -> impl Future<Output = ApiResult<Patient>> + Send;

    /// Create or update; only success or failure is reported.
    fn save_patient(&self, draft: &PatientDraft) -> impl Future<Output = ApiResult<()>> + Send;

    fn patient_risk(&self, id: &PatientId)
        -> impl Future<Output = ApiResult<RiskAnalysis>> + Send;

    fn patient_reminder(
        &self,
        id: &PatientId,
    ) -> impl Future<Output = ApiResult<FollowUpReminder>> + Send;

    fn record_treatment(
        &self,
        draft: &TreatmentDraft,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_only_for_status_errors() {
        let err = ApiError::Status {
            status: 500,
            message: Some("Email already in use".into()),
        };
        assert_eq!(err.server_message(), Some("Email already in use"));
        assert_eq!(err.to_string(), "HTTP error! status: 500");

        assert!(ApiError::NotFound.server_message().is_none());
        assert!(ApiError::Transport("refused".into())
            .server_message()
            .is_none());
    }

    #[test]
    fn error_body_decodes() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"boom","detail":1}"#).expect("should decode");
        assert_eq!(body.error, "boom");
    }
}
