//! Rate limiting middleware for API endpoints
//!
//! Fixed-window request counting per client IP, kept in process memory.
//! Counters are shared by all workers through the cloned [`RateLimiter`].

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use pv_shared::config::RateLimitConfig;
use pv_shared::types::OtpResponse;

/// Message returned once a client exceeds its quota
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Tracked clients above which expired windows are pruned
const PRUNE_THRESHOLD: usize = 10_000;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Rate limit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    Ok { remaining: u32, reset_after: Duration },
    Exceeded { retry_after: Duration },
}

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with its own counters
    pub fn new(config: RateLimitConfig) -> Self {
        log::info!(
            "Rate limiter configured: enabled={}, max_requests={}, window={}s, trusted_proxies={:?}",
            config.enabled,
            config.max_requests,
            config.window_seconds,
            config.trusted_proxies
        );
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Count one request from `client` and report whether it is allowed
    pub fn check(&self, client: &str) -> RateLimitStatus {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> RateLimitStatus {
        let window = self.window();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if windows.len() > PRUNE_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let reset_after = window.saturating_sub(now.duration_since(entry.started));
        if entry.count >= self.config.max_requests {
            return RateLimitStatus::Exceeded {
                retry_after: reset_after,
            };
        }

        entry.count += 1;
        RateLimitStatus::Ok {
            remaining: self.config.max_requests - entry.count,
            reset_after,
        }
    }
}

/// Middleware implementation for rate limiting
impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if !limiter.config.enabled {
                return service.call(req).await.map(|res| res.map_into_left_body());
            }

            let ip = get_client_ip(&req, &limiter.config.trusted_proxies);
            let limit = limiter.config.max_requests;

            match limiter.check(&ip) {
                RateLimitStatus::Exceeded { retry_after } => {
                    log::warn!("Rate limit exceeded for {} on {}", ip, req.path());

                    let retry_secs = retry_after.as_secs().max(1);
                    let response = HttpResponse::TooManyRequests()
                        .insert_header((RETRY_AFTER, retry_secs.to_string()))
                        .insert_header((LIMIT_HEADER, limit.to_string()))
                        .insert_header((REMAINING_HEADER, "0"))
                        .insert_header((RESET_HEADER, retry_secs.to_string()))
                        .json(OtpResponse::error(RATE_LIMIT_MESSAGE));

                    Ok(req.into_response(response).map_into_right_body())
                }
                RateLimitStatus::Ok {
                    remaining,
                    reset_after,
                } => {
                    let mut response = service.call(req).await?;
                    let headers = response.headers_mut();
                    headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(limit));
                    headers.insert(
                        HeaderName::from_static(REMAINING_HEADER),
                        HeaderValue::from(remaining),
                    );
                    headers.insert(
                        HeaderName::from_static(RESET_HEADER),
                        HeaderValue::from(reset_after.as_secs()),
                    );
                    Ok(response.map_into_left_body())
                }
            }
        })
    }
}

/// Get the client IP used as the rate-limit key
///
/// Forwarding headers are only honored when the socket peer is a trusted proxy.
fn get_client_ip(req: &ServiceRequest, trusted_proxies: &[String]) -> String {
    let Some(peer_ip) = req.peer_addr().map(|addr| addr.ip().to_string()) else {
        return "unknown".to_string();
    };

    if !trusted_proxies.iter().any(|trusted| *trusted == peer_ip) {
        return peer_ip;
    }

    // Take the first IP from the comma-separated X-Forwarded-For list
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        req.headers()
            .get("X-Real-IP")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(str::to_string)
        .unwrap_or(peer_ip)
}
