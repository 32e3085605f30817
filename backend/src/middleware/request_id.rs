//! Middleware attaching a request-scoped identifier.
//!
//! Each incoming request receives a UUID that names the tracing span for all
//! log lines emitted while handling it, and is echoed back to the client in
//! an `X-Request-Id` response header for correlation.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::Instrument;
use uuid::Uuid;

/// Response header carrying the request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware factory stamping every request with an identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestId;

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestId`].
pub struct RequestIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut response = fut.await?;
                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use uuid::Uuid;

    use super::*;

    #[actix_web::test]
    async fn responses_carry_a_parseable_request_id_header() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RequestId)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/ping").to_request();
        let response = actix_test::call_service(&app, request).await;

        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("request id header present");
        let raw = header.to_str().expect("ASCII header value");
        Uuid::parse_str(raw).expect("header is a UUID");
    }

    #[actix_web::test]
    async fn each_request_receives_a_distinct_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(RequestId)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let mut seen = Vec::new();
        for _ in 0..2 {
            let request = actix_test::TestRequest::get().uri("/ping").to_request();
            let response = actix_test::call_service(&app, request).await;
            let raw = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
                .expect("request id header present");
            seen.push(raw);
        }
        assert_ne!(seen[0], seen[1]);
    }
}
