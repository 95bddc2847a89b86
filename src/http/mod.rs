//! Synchronous HTTP transport for talking to local model services.
//!
//! This module implements a minimal HTTP/1.1 client over plain blocking TCP
//! sockets. Every request is a fresh connection that is closed after one
//! response; there is no pooling, no TLS and no chunked-transfer decoding.
//!
//! # Architecture
//!
//! The transport layer is organized into several submodules:
//!
//! - **`url`**: Decomposes a plain-text URL into host, port and path
//! - **`request`**: HTTP request representation with builder pattern
//! - **`response`**: Decoded HTTP response representation
//! - **`writer`**: Serializes a request into its wire form
//! - **`parser`**: Splits received bytes into status, headers and body
//! - **`transport`**: Resolves, connects and exchanges bytes with timeouts
//! - **`client`**: The bounded retry loop that drives one whole call
//!
//! # Request lifecycle
//!
//! ```text
//! Target::parse → resolve → connect_any → send_all → receive_until_closed
//!                                                           │
//!                       Outcome ← status check ← decode_response
//! ```
//!
//! Each attempt walks the whole chain on a brand-new connection; the client
//! retries failed attempts back-to-back up to the caller-supplied bound and
//! reports the last attempt's outcome.

pub mod client;
pub mod parser;
pub mod request;
pub mod response;
pub mod transport;
pub mod url;
pub mod writer;

use thiserror::Error;

/// Failures that can occur during a single request attempt.
///
/// All variants are non-fatal: the client surfaces them inside a failed
/// [`client::Outcome`] rather than propagating them as errors, and nothing
/// in the transport layer panics or aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The URL was not plain `http://` or could not be decomposed.
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),
    /// Host resolution produced no usable addresses.
    #[error("DNS lookup failed for {0}")]
    DnsFailure(String),
    /// Every resolved address refused or timed out during connect.
    #[error("connection failed to {0}")]
    ConnectionFailed(String),
    /// Writing the request onto the socket failed.
    #[error("send failed: {0}")]
    SendFailed(String),
    /// The read timeout fired before any response bytes arrived.
    #[error("receive timed out")]
    ReceiveTimeout,
    /// The received bytes contain no header/body delimiter.
    #[error("malformed HTTP response")]
    MalformedResponse,
    /// A well-formed response carried a non-2xx status code.
    #[error("HTTP status {0}")]
    NonSuccessStatus(u16),
}
