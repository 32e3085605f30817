//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the user directory and the identity store). Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::{Uid, UserRecord};

/// Errors surfaced by user-directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// Directory backend is unreachable or timing out.
    #[error("user directory unreachable: {message}")]
    Connection { message: String },
    /// The lookup itself failed (malformed response, backend fault).
    #[error("user directory lookup failed: {message}")]
    Lookup { message: String },
}

impl UserDirectoryError {
    /// Helper for connection-level failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for lookup failures.
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Errors surfaced by identity-store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityStoreError {
    /// Identity store is unreachable or timing out.
    #[error("identity store unreachable: {message}")]
    Connection { message: String },
    /// The delete operation was rejected by the store.
    ///
    /// `cause` carries the store's own machine-readable code when it reports
    /// one (e.g. `user-not-found`); no structure beyond that is preserved.
    #[error("account deletion failed: {message}")]
    Delete {
        message: String,
        cause: Option<String>,
    },
}

impl IdentityStoreError {
    /// Helper for connection-level failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for rejected deletions without a cause code.
    pub fn delete(message: impl Into<String>) -> Self {
        Self::Delete {
            message: message.into(),
            cause: None,
        }
    }

    /// Helper for rejected deletions carrying the store's cause code.
    pub fn delete_with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Delete {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

/// Read-only view over the external users collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user record by identifier; `Ok(None)` when absent.
    async fn find_user(&self, uid: &Uid) -> Result<Option<UserRecord>, UserDirectoryError>;
}

/// Driven port for the external identity-management service.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Delete the account with the given identifier.
    ///
    /// Deleting an unknown identifier is reported however the store reports
    /// it; this port does not special-case that outcome.
    async fn delete_account(&self, uid: &Uid) -> Result<(), IdentityStoreError>;
}

/// In-memory directory used until a real backend is configured.
///
/// Seeds one administrator (`admin-1`) and one regular user (`user-1`) so
/// both authorization branches are reachable in development.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_user(&self, uid: &Uid) -> Result<Option<UserRecord>, UserDirectoryError> {
        let record = match uid.as_str() {
            "admin-1" => Some(UserRecord {
                uid: uid.clone(),
                is_admin: true,
            }),
            "user-1" => Some(UserRecord {
                uid: uid.clone(),
                is_admin: false,
            }),
            _ => None,
        };
        Ok(record)
    }
}

/// In-memory identity store that accepts every deletion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityStore;

#[async_trait]
impl IdentityStore for FixtureIdentityStore {
    async fn delete_account(&self, _uid: &Uid) -> Result<(), IdentityStoreError> {
        Ok(())
    }
}
