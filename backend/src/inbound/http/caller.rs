//! Caller-identity extraction for HTTP handlers.
//!
//! The hosting platform's auth layer terminates authentication in front of
//! this service and injects the verified account id as a request header.
//! This extractor lifts that header into an explicit `Option<CallerIdentity>`
//! so handlers pass identity into the domain as a parameter instead of
//! reading an ambient value.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use crate::domain::{CallerIdentity, Uid};

/// Header stamped by the trusted auth proxy with the authenticated uid.
pub const CALLER_UID_HEADER: &str = "X-Authenticated-Uid";

/// Per-request caller context; `None` means the invocation is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext(Option<CallerIdentity>);

impl CallerContext {
    /// Context for an unauthenticated invocation.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Context for an authenticated invocation.
    pub fn authenticated(identity: CallerIdentity) -> Self {
        Self(Some(identity))
    }

    /// The caller identity, if one was attached.
    pub fn identity(&self) -> Option<&CallerIdentity> {
        self.0.as_ref()
    }

    fn from_http_request(req: &HttpRequest) -> Self {
        let Some(value) = req.headers().get(CALLER_UID_HEADER) else {
            return Self::anonymous();
        };
        let Ok(raw) = value.to_str() else {
            tracing::warn!("non-UTF-8 caller uid header; treating request as anonymous");
            return Self::anonymous();
        };
        match Uid::new(raw) {
            Ok(uid) => Self::authenticated(CallerIdentity::new(uid)),
            Err(err) => {
                tracing::warn!(error = %err, "malformed caller uid header; treating request as anonymous");
                Self::anonymous()
            }
        }
    }
}

impl FromRequest for CallerContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http_request(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn extract(req: &HttpRequest) -> CallerContext {
        CallerContext::from_http_request(req)
    }

    #[test]
    fn missing_header_yields_anonymous_context() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract(&req), CallerContext::anonymous());
    }

    #[test]
    fn present_header_yields_authenticated_context() {
        let req = TestRequest::default()
            .insert_header((CALLER_UID_HEADER, "admin-7"))
            .to_http_request();
        let context = extract(&req);
        assert_eq!(
            context.identity().map(|id| id.uid().as_str()),
            Some("admin-7")
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" padded ")]
    fn malformed_header_is_treated_as_anonymous(#[case] raw: &str) {
        let req = TestRequest::default()
            .insert_header((CALLER_UID_HEADER, raw))
            .to_http_request();
        assert_eq!(extract(&req), CallerContext::anonymous());
    }
}
