//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AccountDeletionService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The admin-gated deletion use case.
    pub deletion: Arc<dyn AccountDeletionService>,
}

impl HttpState {
    /// Bundle the deletion use case for injection into handlers.
    pub fn new(deletion: Arc<dyn AccountDeletionService>) -> Self {
        Self { deletion }
    }
}
