//! Admin-gated account deletion use case.
//!
//! The operation is a single linear pass per invocation: authentication
//! check, authorization check against the user directory, input validation,
//! then the identity-store delete. Each check exits with a terminal domain
//! error; nothing is retried and no state survives the invocation.
//!
//! The permission lookup and the delete are two independent network calls
//! with no atomicity between them; an admin flag revoked in between is not
//! detected.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::ports::{IdentityStore, IdentityStoreError, UserDirectory, UserDirectoryError};
use super::{CallerIdentity, DomainError, Uid};

/// Payload of the callable deletion operation.
///
/// The identifier is kept raw here so the invalid-argument branch is part of
/// the operation itself rather than the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    /// Target account identifier. Required, must not be blank.
    #[serde(default)]
    pub uid: String,
}

/// Successful result of the deletion operation.
///
/// `message` is a single configuration option (the confirmation text), not a
/// second code path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionOutcome {
    /// Always `true`; failures travel as [`DomainError`] instead.
    pub success: bool,
    /// Confirmation text, when the service is configured with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeletionOutcome {
    fn succeeded(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Driving port for the deletion use case.
///
/// Inbound adapters call this without knowing the backing infrastructure,
/// which keeps handler tests deterministic.
#[async_trait]
pub trait AccountDeletionService: Send + Sync {
    /// Delete the requested account on behalf of `caller`.
    ///
    /// # Errors
    /// - [`ErrorCode::Unauthenticated`](super::ErrorCode::Unauthenticated)
    ///   when no caller identity is attached.
    /// - [`ErrorCode::PermissionDenied`](super::ErrorCode::PermissionDenied)
    ///   when the caller's directory record is absent or not flagged admin.
    /// - [`ErrorCode::InvalidArgument`](super::ErrorCode::InvalidArgument)
    ///   when the target identifier is missing or blank.
    /// - [`ErrorCode::Internal`](super::ErrorCode::Internal) when either
    ///   external collaborator fails; the underlying message is carried
    ///   verbatim.
    async fn delete_user(
        &self,
        caller: Option<&CallerIdentity>,
        request: &DeleteUserRequest,
    ) -> Result<DeletionOutcome, DomainError>;
}

/// Concrete implementation of [`AccountDeletionService`].
pub struct AccountDeletionServiceImpl<D, I> {
    directory: Arc<D>,
    identities: Arc<I>,
    confirmation: Option<String>,
}

impl<D, I> AccountDeletionServiceImpl<D, I>
where
    D: UserDirectory,
    I: IdentityStore,
{
    /// Create a service over the given directory and identity store.
    pub fn new(directory: Arc<D>, identities: Arc<I>) -> Self {
        Self {
            directory,
            identities,
            confirmation: None,
        }
    }

    /// Include a confirmation message in successful outcomes.
    pub fn with_confirmation(mut self, message: impl Into<String>) -> Self {
        self.confirmation = Some(message.into());
        self
    }
}

fn map_directory_error(error: UserDirectoryError) -> DomainError {
    // Infrastructure faults during the permission lookup are not the
    // caller's doing; report them as internal, not permission-denied.
    match error {
        UserDirectoryError::Connection { message } | UserDirectoryError::Lookup { message } => {
            DomainError::internal(format!("admin check failed: {message}"))
        }
    }
}

fn map_identity_error(error: IdentityStoreError) -> DomainError {
    match error {
        IdentityStoreError::Connection { message } => {
            DomainError::internal(format!("failed to delete user account: {message}"))
        }
        IdentityStoreError::Delete { message, cause } => {
            let err = DomainError::internal(format!("failed to delete user account: {message}"));
            match cause {
                Some(cause) => err.with_cause(cause),
                None => err,
            }
        }
    }
}

#[async_trait]
impl<D, I> AccountDeletionService for AccountDeletionServiceImpl<D, I>
where
    D: UserDirectory,
    I: IdentityStore,
{
    async fn delete_user(
        &self,
        caller: Option<&CallerIdentity>,
        request: &DeleteUserRequest,
    ) -> Result<DeletionOutcome, DomainError> {
        let Some(caller) = caller else {
            return Err(DomainError::unauthenticated(
                "You must be signed in to perform this action.",
            ));
        };

        let record = self
            .directory
            .find_user(caller.uid())
            .await
            .map_err(map_directory_error)?;
        if !record.is_some_and(|r| r.is_admin) {
            return Err(DomainError::permission_denied(
                "Only administrators may delete user accounts.",
            ));
        }

        let Ok(target) = Uid::new(request.uid.as_str()) else {
            return Err(DomainError::invalid_argument(
                "The target user id (uid) is required.",
            ));
        };

        if let Err(err) = self.identities.delete_account(&target).await {
            error!(uid = %target, error = %err, "account deletion failed");
            return Err(map_identity_error(err));
        }

        Ok(DeletionOutcome::succeeded(self.confirmation.clone()))
    }
}
