//! Fixed-window limiter for login attempts, keyed by caller address.
//!
//! The key is the socket peer unless `trust_forwarded_for` is set, in which
//! case a well-formed first `X-Forwarded-For` hop takes precedence.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use configs::RateLimitConfig;
use dashmap::DashMap;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    attempts: u32,
}

#[derive(Debug)]
pub struct LoginLimiter {
    max_attempts: u32,
    window: Duration,
    trust_forwarded_for: bool,
    windows: DashMap<String, Window>,
}

impl LoginLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self { max_attempts, window, trust_forwarded_for: false, windows: DashMap::new() }
    }

    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub fn from_config(cfg: &RateLimitConfig) -> Self {
        Self::new(cfg.login_max_attempts, Duration::from_secs(cfg.login_window_secs))
            .trusting_forwarded_for(cfg.trust_forwarded_for)
    }

    pub fn key_for(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        client_key(headers, peer, self.trust_forwarded_for)
    }

    /// Count one attempt; `Err` carries the time left until the window resets.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut slot = self
            .windows
            .entry(key.to_string())
            .or_insert(Window { started: now, attempts: 0 });
        if now.duration_since(slot.started) >= self.window {
            *slot = Window { started: now, attempts: 0 };
        }
        if slot.attempts >= self.max_attempts {
            return Err(self.window.saturating_sub(now.duration_since(slot.started)));
        }
        slot.attempts += 1;
        Ok(())
    }

    /// Drop windows that have fully elapsed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| now.duration_since(w.started) < self.window);
    }
}

fn normalized_forwarded_for(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    if first.is_empty() || first.len() > 64 {
        return None;
    }
    if first.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b':' || b == b'-') {
        Some(first.to_string())
    } else {
        None
    }
}

/// Peer address, or the first `X-Forwarded-For` hop when the proxy is trusted.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded_for: bool) -> String {
    let forwarded = if trust_forwarded_for { normalized_forwarded_for(headers) } else { None };
    match (forwarded, peer) {
        (Some(ip), _) => ip,
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

pub async fn limit_login(State(state): State<ServerState>, req: Request, next: Next) -> Response {
    let peer = req.extensions().get::<ConnectInfo<SocketAddr>>().map(|c| c.0);
    let key = state.login_limiter.key_for(req.headers(), peer);
    match state.login_limiter.check(&key) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            warn!(client = %key, retry_after_secs = retry_after.as_secs(), "login rate limit exceeded");
            let mut resp = JsonApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                "too many login attempts, try again later",
                None,
            )
            .into_response();
            if let Ok(v) = HeaderValue::from_str(&retry_after.as_secs().max(1).to_string()) {
                resp.headers_mut().insert(header::RETRY_AFTER, v);
            }
            resp
        }
    }
}
