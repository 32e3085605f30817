//! Health endpoints: liveness and readiness probes for orchestration.
//!
//! The server moves through a linear lifecycle: it starts as `Starting`,
//! becomes `Ready` once its adapters are wired, and enters `Draining` during
//! shutdown. Draining is terminal. The probes project that lifecycle onto
//! HTTP status codes and report the current phase in the body.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Server lifecycle phases reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifecycle {
    /// Adapters are still being wired; not ready for traffic.
    Starting,
    /// Serving traffic.
    Ready,
    /// Shutting down; orchestrators should stop routing here.
    Draining,
}

const STARTING: u8 = 0;
const READY: u8 = 1;
const DRAINING: u8 = 2;

/// Shared lifecycle state backing both probes.
#[derive(Default)]
pub struct HealthState {
    phase: AtomicU8,
}

impl HealthState {
    /// Create a new state in the `Starting` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `Ready`. A draining server is never resurrected.
    pub fn mark_ready(&self) {
        let _ = self
            .phase
            .compare_exchange(STARTING, READY, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Enter the terminal `Draining` phase so probes fail fast during
    /// shutdown.
    pub fn mark_draining(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    /// Current lifecycle phase.
    pub fn lifecycle(&self) -> Lifecycle {
        match self.phase.load(Ordering::Acquire) {
            READY => Lifecycle::Ready,
            DRAINING => Lifecycle::Draining,
            _ => Lifecycle::Starting,
        }
    }
}

#[derive(Serialize)]
struct ProbeBody {
    status: Lifecycle,
}

fn probe_response(probe_ok: bool, status: Lifecycle) -> HttpResponse {
    let mut builder = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody { status })
}

/// Readiness probe. 200 only in the `Ready` phase.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let lifecycle = state.lifecycle();
    probe_response(lifecycle == Lifecycle::Ready, lifecycle)
}

/// Liveness probe. 200 until the server starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let lifecycle = state.lifecycle();
    probe_response(lifecycle != Lifecycle::Draining, lifecycle)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    use super::*;

    async fn read_json<B>(response: actix_web::dev::ServiceResponse<B>) -> Value
    where
        B: actix_web::body::MessageBody,
    {
        serde_json::from_slice(&actix_test::read_body(response).await).expect("JSON body")
    }

    #[actix_web::test]
    async fn readiness_follows_the_lifecycle() {
        let state = web::Data::new(HealthState::new());
        let app =
            actix_test::init_service(App::new().app_data(state.clone()).service(ready)).await;

        let request = actix_test::TestRequest::get()
            .uri("/health/ready")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            read_json(response).await,
            serde_json::json!({ "status": "starting" })
        );

        state.mark_ready();
        let request = actix_test::TestRequest::get()
            .uri("/health/ready")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            serde_json::json!({ "status": "ready" })
        );
    }

    #[actix_web::test]
    async fn liveness_fails_once_draining_begins() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        let app = actix_test::init_service(App::new().app_data(state.clone()).service(live)).await;

        let request = actix_test::TestRequest::get()
            .uri("/health/live")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);

        state.mark_draining();
        let request = actix_test::TestRequest::get()
            .uri("/health/live")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            read_json(response).await,
            serde_json::json!({ "status": "draining" })
        );
    }

    #[actix_web::test]
    async fn a_draining_server_is_never_marked_ready_again() {
        let state = web::Data::new(HealthState::new());
        state.mark_draining();
        state.mark_ready();

        let app =
            actix_test::init_service(App::new().app_data(state.clone()).service(ready)).await;
        let request = actix_test::TestRequest::get()
            .uri("/health/ready")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            read_json(response).await,
            serde_json::json!({ "status": "draining" })
        );
    }
}
