//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors convert into
//! [`AppError`] first, which already knows its status, code and client message.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use tubely_processing::{ProbeError, ProcessingError};
use tubely_storage::StorageError;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both IntoResponse and AppError are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ProbeError> for HttpAppError {
    fn from(err: ProbeError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        HttpAppError(err.into())
    }
}

/// Map a failure while reading multipart fields. Body limit violations surface
/// here as 413, everything else is a malformed request.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE || exceeds_length_limit(&err) {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Unable to parse form file: {}", err.body_text()))
    }
}

/// Map a request that could not be read as multipart at all
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::InvalidInput(format!("Unable to parse form: {}", rejection.body_text()))
    }
}

/// Whether a body length limit error sits anywhere in the source chain.
///
/// Limit layers and the multipart reader each wrap the body error once more,
/// so it is rarely the outermost error.
fn exceeds_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if err.downcast_ref::<LengthLimitError>().is_some() {
            return true;
        }
        current = err.source();
    }
    false
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Error body attached to every error response, so outer layers can
/// re-render it without parsing the JSON again
#[derive(Debug, Clone)]
pub struct RenderedError(pub ErrorResponse);

impl HttpAppError {
    fn to_error_response(&self, hide_details: bool) -> ErrorResponse {
        let app_error = &self.0;
        let (details, error_type) = if hide_details || app_error.is_sensitive() {
            (None, None)
        } else {
            (
                Some(app_error.detailed_message()),
                Some(app_error.error_type().to_string()),
            )
        };

        ErrorResponse {
            error: app_error.client_message(),
            details,
            error_type,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        // Sensitive causes never leave the process. Production hides the
        // remaining details in `hide_error_details`.
        let body = self.to_error_response(false);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(RenderedError(body));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error() {
        let HttpAppError(app_err) = StorageError::UploadFailed("timeout".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));

        let HttpAppError(app_err) =
            StorageError::MalformedReference("no separator".to_string()).into();
        assert!(matches!(app_err, AppError::MalformedReference(_)));
    }

    #[test]
    fn test_from_probe_error() {
        let HttpAppError(app_err) = ProbeError::NoVideoStream.into();
        match app_err {
            AppError::Probe(msg) => assert!(msg.contains("No video stream")),
            _ => panic!("Expected Probe variant"),
        }
    }

    #[test]
    fn test_sensitive_errors_hide_details() {
        let error = HttpAppError(AppError::Storage("bucket tubely: access denied".to_string()));
        let body = error.to_error_response(false);
        assert_eq!(body.code, "STORAGE_ERROR");
        assert!(body.details.is_none());
        assert!(!body.error.contains("access denied"));
    }

    #[test]
    fn test_client_errors_carry_details_outside_production() {
        let error = HttpAppError(AppError::InvalidInput("Invalid ID".to_string()));
        let body = error.to_error_response(false);
        assert_eq!(body.error, "Invalid ID");
        assert!(body.details.is_some());
        assert_eq!(body.error_type.as_deref(), Some("InvalidInput"));

        let body = error.to_error_response(true);
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = HttpAppError(AppError::Forbidden("not yours".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response =
            HttpAppError(AppError::PayloadTooLarge("too big".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_length_limit_found_through_wrapping() {
        use http_body_util::{BodyExt, Full, Limited};

        let body = Limited::new(Full::new(bytes::Bytes::from_static(b"0123456789")), 4);
        let limit_err = body.collect().await.unwrap_err();
        let wrapped = axum::Error::new(axum::Error::new(limit_err));
        assert!(exceeds_length_limit(&wrapped));

        let unrelated = axum::Error::new(std::io::Error::other("connection reset"));
        assert!(!exceeds_length_limit(&unrelated));
    }

    /// Serialized ErrorResponse always carries "error", "code" and "recoverable".
    #[test]
    fn test_error_response_shape() {
        let response = HttpAppError(AppError::NotFound("Video not found".to_string()))
            .to_error_response(true);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json.get("error").and_then(|v| v.as_str()), Some("Video not found"));
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert!(json.get("details").is_none());
    }
}
