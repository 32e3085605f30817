//! Greeter endpoint.
//!
//! Fixed-text response with exactly one log line per request. No parameters,
//! no error path, no persisted effect.

use actix_web::{HttpResponse, get};
use tracing::info;

const GREETING: &str = "Hello!";

/// Respond with a fixed greeting.
#[utoipa::path(
    get,
    path = "/hello",
    tags = ["greeter"],
    security([]),
    responses(
        (status = 200, description = "Fixed greeting", body = String)
    )
)]
#[get("/hello")]
pub async fn hello() -> HttpResponse {
    info!("greeter invoked");
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}
