//! Security middleware adding protective response headers.
//!
//! Every response carries headers that:
//! - Disable MIME sniffing and framing
//! - Restrict referrer leakage and resource loading
//! - Pin HTTPS through HSTS (production only)

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use pv_shared::config::Environment;

/// Headers added to every response
const SECURITY_HEADERS: [(&str, &str); 7] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("referrer-policy", "no-referrer"),
    ("cross-origin-resource-policy", "same-origin"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none';",
    ),
];

const HSTS_VALUE: &str = "max-age=15552000; includeSubDomains";

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    /// Whether to send `strict-transport-security`
    hsts: bool,
}

impl SecurityMiddleware {
    /// Creates a security middleware for the given environment
    pub fn new(environment: Environment) -> Self {
        let hsts = environment.is_production();
        log::info!("Security middleware configured: hsts={}", hsts);
        Self { hsts }
    }

    /// Creates a security middleware for development (no HSTS)
    pub fn development() -> Self {
        Self { hsts: false }
    }

    /// Creates a security middleware for production (HSTS enabled)
    pub fn production() -> Self {
        Self { hsts: true }
    }
}

impl Default for SecurityMiddleware {
    fn default() -> Self {
        Self::development()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            hsts: self.hsts,
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    hsts: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let hsts = self.hsts;

        Box::pin(async move {
            let mut response = service.call(req).await?;
            add_security_response_headers(&mut response, hsts);
            Ok(response)
        })
    }
}

/// Adds security headers to the response
fn add_security_response_headers<B>(response: &mut ServiceResponse<B>, hsts: bool) {
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    if hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        );
    }

    // Hide the server implementation
    headers.remove(HeaderName::from_static("x-powered-by"));
}
