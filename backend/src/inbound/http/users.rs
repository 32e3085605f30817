//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users/delete {"uid":"usr-9"}
//! ```
//!
//! The deletion endpoint is the callable surface of the admin-gated
//! deletion use case; all permission logic lives in the domain.

use actix_web::{post, web};

use crate::domain::{DeleteUserRequest, DeletionOutcome, DomainError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::CallerContext;
use crate::inbound::http::state::HttpState;

/// Delete a user account on behalf of an administrator.
///
/// The caller's identity arrives via the auth-proxy header and is handed to
/// the domain explicitly; the handler itself performs no permission checks.
#[utoipa::path(
    post,
    path = "/api/v1/users/delete",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "Account deleted", body = DeletionOutcome),
        (status = 400, description = "Missing target identifier", body = DomainError),
        (status = 401, description = "No caller identity attached", body = DomainError),
        (status = 403, description = "Caller is not an administrator", body = DomainError),
        (status = 500, description = "Identity store failure", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[post("/users/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: CallerContext,
    payload: web::Json<DeleteUserRequest>,
) -> ApiResult<web::Json<DeletionOutcome>> {
    let outcome = state
        .deletion
        .delete_user(caller.identity(), &payload)
        .await?;
    Ok(web::Json(outcome))
}
