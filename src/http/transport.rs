//! Blocking socket plumbing: resolve, connect, send, receive.
//!
//! Everything here operates on one socket for one attempt. The caller owns
//! the stream; dropping it closes the connection on every exit path.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;

use crate::http::TransportError;
use crate::http::url::Target;

/// Receive buffer chunk size
const BUFFER_SIZE: usize = 4096;

/// Resolve the target to candidate addresses, protocol-family-agnostic.
pub fn resolve(target: &Target) -> Result<Vec<SocketAddr>, TransportError> {
    let addrs: Vec<SocketAddr> = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|_| TransportError::DnsFailure(target.host.clone()))?
        .collect();

    if addrs.is_empty() {
        return Err(TransportError::DnsFailure(target.host.clone()));
    }

    Ok(addrs)
}

/// Connect to the first candidate that accepts within `timeout`.
///
/// Candidates are tried in resolver order; losing sockets are dropped. The
/// winning stream has the per-attempt timeout applied to both the read and
/// write directions before any traffic flows.
pub fn connect_any(
    target: &Target,
    addrs: &[SocketAddr],
    timeout: Duration,
) -> Result<TcpStream, TransportError> {
    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => {
                let configured = stream
                    .set_read_timeout(Some(timeout))
                    .and_then(|_| stream.set_write_timeout(Some(timeout)));
                if configured.is_err() {
                    continue;
                }
                tracing::trace!(%addr, "connected");
                return Ok(stream);
            }
            Err(err) => {
                tracing::trace!(%addr, error = %err, "connect attempt failed");
            }
        }
    }

    Err(TransportError::ConnectionFailed(format!(
        "{}:{}",
        target.host, target.port
    )))
}

/// Write the whole request onto the socket.
pub fn send_all(stream: &mut TcpStream, bytes: &[u8]) -> Result<(), TransportError> {
    stream
        .write_all(bytes)
        .and_then(|_| stream.flush())
        .map_err(|err| TransportError::SendFailed(err.to_string()))
}

/// Read until the peer closes the connection or the read timeout fires.
///
/// Returns the bytes received and whether the read timed out. A timeout
/// does not discard partial data; the caller decides whether what arrived
/// is decodable.
pub fn receive_until_closed(stream: &mut TcpStream) -> (Vec<u8>, bool) {
    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);
    let mut chunk = [0u8; BUFFER_SIZE];
    let mut timed_out = false;

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            Err(err) => {
                if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) {
                    timed_out = true;
                }
                break;
            }
        }
    }

    (buffer.to_vec(), timed_out)
}
