//! Patient API port: CRUD against the collaborator REST service.

use crate::domain::Patient;

/// Errors from the patient API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, DNS or timeout failure before a response arrived.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success status. `message` carries the server's `{"message": ...}` when present.
    #[error("Server returned {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Localized text shown to the practitioner.
    ///
    /// Server messages are surfaced verbatim; otherwise the status code is shown.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요.".to_string(),
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Status { status, message: None } => format!("요청이 실패했습니다 (HTTP {status})."),
            Self::NotFound(_) => "환자 정보를 찾을 수 없습니다.".to_string(),
            Self::Decode(_) => "서버 응답 형식이 올바르지 않습니다.".to_string(),
        }
    }
}

/// Trait for the patient record service.
///
/// Implementations are shared with the background request worker, so they
/// must be `Send + Sync`.
pub trait PatientApi: Send + Sync {
    /// `GET /patients`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn list_patients(&self) -> Result<Vec<Patient>, ApiError>;

    /// `GET /patients/:id`
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` for an unknown id.
    fn get_patient(&self, id: &str) -> Result<Patient, ApiError>;

    /// `POST /patients`. Returns the record as stored by the server.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError>;

    /// `PATCH /patients/:id` with the given record as body.
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` for an unknown id.
    fn update_patient(&self, id: &str, patient: &Patient) -> Result<Patient, ApiError>;

    /// `DELETE /patients/:id`
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` for an unknown id.
    fn delete_patient(&self, id: &str) -> Result<(), ApiError>;
}

impl<T> PatientApi for Box<T>
where
    T: PatientApi + ?Sized,
{
    fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        (**self).list_patients()
    }

    fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        (**self).get_patient(id)
    }

    fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        (**self).create_patient(patient)
    }

    fn update_patient(&self, id: &str, patient: &Patient) -> Result<Patient, ApiError> {
        (**self).update_patient(id, patient)
    }

    fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete_patient(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = ApiError::Status {
            status: 400,
            message: Some("잘못된 요청입니다".to_string()),
        };
        assert_eq!(err.user_message(), "잘못된 요청입니다");

        let err = ApiError::Status {
            status: 503,
            message: None,
        };
        assert!(err.user_message().contains("503"));
    }
}
