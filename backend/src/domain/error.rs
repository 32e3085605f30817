//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// No caller identity was attached to the invocation.
    Unauthenticated,
    /// The caller is authenticated but lacks the admin privilege.
    PermissionDenied,
    /// The request payload is missing or malformed.
    InvalidArgument,
    /// An external collaborator failed while servicing the request.
    Internal,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::InvalidArgument, "uid is required");
/// assert_eq!(err.code(), ErrorCode::InvalidArgument);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    #[schema(example = "permission-denied")]
    code: ErrorCode,
    #[schema(example = "Only administrators may delete user accounts.")]
    message: String,
    /// Optional machine-readable cause reported by the failing collaborator,
    /// e.g. `user-not-found`. Never a raw error object.
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

/// Validation errors emitted by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    ///
    /// Intended for literal messages; use [`DomainError::try_new`] for
    /// messages assembled from external input.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            cause: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Machine-readable cause code, if the failing collaborator supplied one.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Attach a cause code to the error.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::PermissionDenied`].
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::Unauthenticated, "\"unauthenticated\"")]
    #[case(ErrorCode::PermissionDenied, "\"permission-denied\"")]
    #[case(ErrorCode::InvalidArgument, "\"invalid-argument\"")]
    #[case(ErrorCode::Internal, "\"internal\"")]
    fn error_codes_serialize_to_wire_names(#[case] code: ErrorCode, #[case] expected: &str) {
        let json = serde_json::to_string(&code).expect("serialize code");
        assert_eq!(json, expected);
    }

    #[test]
    fn try_new_rejects_blank_messages() {
        let err = DomainError::try_new(ErrorCode::Internal, "   ");
        assert_eq!(err, Err(DomainErrorValidationError::EmptyMessage));
    }

    #[test]
    fn cause_is_omitted_from_json_when_absent() {
        let err = DomainError::invalid_argument("uid is required");
        let json = serde_json::to_value(&err).expect("serialize error");
        assert_eq!(
            json,
            serde_json::json!({
                "code": "invalid-argument",
                "message": "uid is required",
            })
        );
    }

    #[test]
    fn cause_round_trips_when_present() {
        let err = DomainError::internal("delete failed").with_cause("user-not-found");
        let json = serde_json::to_value(&err).expect("serialize error");
        assert_eq!(
            json.get("cause").and_then(|v| v.as_str()),
            Some("user-not-found")
        );
    }
}
