//! Retrying HTTP client.
//!
//! Wraps one transport attempt with a bounded retry loop. Success is judged
//! purely by status-code range: 2xx succeeds; everything else, including a
//! well-formed non-2xx response, fails and may be retried.

use std::time::{Duration, Instant};

use crate::http::TransportError;
use crate::http::parser::decode_response;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport;
use crate::http::url::Target;
use crate::http::writer::encode_request;

/// Result of one request attempt, or of a whole retrying call.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success {
        response: Response,
        latency: Duration,
    },
    Failure {
        error: TransportError,
        latency: Duration,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Latency observed for the attempt this outcome describes.
    pub fn latency(&self) -> Duration {
        match self {
            Outcome::Success { latency, .. } | Outcome::Failure { latency, .. } => *latency,
        }
    }
}

/// Synchronous HTTP client with bounded retries.
///
/// Each attempt opens a brand-new connection; nothing is cached or reused
/// across attempts or across calls. The client never returns an `Err` and
/// never panics; every failure mode is folded into the [`Outcome`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClient;

impl HttpClient {
    pub fn new() -> Self {
        Self
    }

    /// Perform `request` up to `retries + 1` times, stopping on the first
    /// attempt that yields a 2xx response.
    ///
    /// When every attempt fails, the outcome of the *last* attempt is
    /// returned; its latency covers that one attempt, not the cumulative
    /// time across attempts. Retries launch back-to-back with no backoff.
    pub fn perform(&self, request: &Request, timeout: Duration, retries: u32) -> Outcome {
        let attempts = retries.saturating_add(1);
        let mut last = None;

        for attempt in 1..=attempts {
            let outcome = self.perform_once(request, timeout);
            match &outcome {
                Outcome::Success { response, latency } => {
                    tracing::debug!(
                        url = %request.url,
                        status = response.status,
                        attempt,
                        latency_ms = latency.as_millis() as u64,
                        "request succeeded"
                    );
                    return outcome;
                }
                Outcome::Failure { error, .. } => {
                    tracing::warn!(
                        url = %request.url,
                        error = %error,
                        attempt,
                        attempts,
                        "request attempt failed"
                    );
                }
            }
            last = Some(outcome);
        }

        last.unwrap_or_else(|| Outcome::Failure {
            error: TransportError::ConnectionFailed(request.url.clone()),
            latency: Duration::ZERO,
        })
    }

    /// One full connect/send/receive cycle.
    ///
    /// The latency clock starts after resolution and covers connect, send
    /// and receive; failures before the clock starts report zero latency.
    pub fn perform_once(&self, request: &Request, timeout: Duration) -> Outcome {
        let target = match Target::parse(&request.url) {
            Ok(target) => target,
            Err(error) => return failure(error, Duration::ZERO),
        };

        let addrs = match transport::resolve(&target) {
            Ok(addrs) => addrs,
            Err(error) => return failure(error, Duration::ZERO),
        };

        let start = Instant::now();

        let mut stream = match transport::connect_any(&target, &addrs, timeout) {
            Ok(stream) => stream,
            Err(error) => return failure(error, Duration::ZERO),
        };

        let wire_request = encode_request(request, &target);
        if let Err(error) = transport::send_all(&mut stream, &wire_request) {
            return failure(error, Duration::ZERO);
        }

        let (raw, timed_out) = transport::receive_until_closed(&mut stream);
        drop(stream);
        let latency = start.elapsed();

        if timed_out && raw.is_empty() {
            return failure(TransportError::ReceiveTimeout, latency);
        }

        let response = match decode_response(&raw) {
            Ok(response) => response,
            Err(error) => return failure(error, latency),
        };

        if response.is_success() {
            Outcome::Success { response, latency }
        } else {
            failure(TransportError::NonSuccessStatus(response.status), latency)
        }
    }
}

fn failure(error: TransportError, latency: Duration) -> Outcome {
    Outcome::Failure { error, latency }
}
