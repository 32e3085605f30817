//! Domain primitives and the deletion use case.
//!
//! Everything in this module is transport agnostic: inbound adapters map
//! [`DomainError`] to wire envelopes, and driven adapters implement the
//! [`ports`] traits.

pub mod account;
pub mod deletion;
pub mod error;
pub mod ports;

pub use self::account::{CallerIdentity, Uid, UidValidationError, UserRecord};
pub use self::deletion::{
    AccountDeletionService, AccountDeletionServiceImpl, DeleteUserRequest, DeletionOutcome,
};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
