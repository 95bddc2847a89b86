use crate::http::request::Request;
use crate::http::url::Target;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serialize a request into its HTTP/1.1 wire form.
///
/// Every request carries `Connection: close`; the peer ends the response
/// by closing the connection, which is what the receive loop relies on.
/// Content-Length is computed from the body's byte length.
pub fn encode_request(request: &Request, target: &Target) -> Vec<u8> {
    let mut buf = Vec::new();

    // Request line
    let request_line = format!(
        "{} {} {}\r\n",
        request.method.as_str(),
        target.path,
        HTTP_VERSION
    );
    buf.extend_from_slice(request_line.as_bytes());

    // Headers
    buf.extend_from_slice(format!("Host: {}\r\n", target.host).as_bytes());
    buf.extend_from_slice(format!("Content-Type: {}\r\n", request.content_type).as_bytes());
    buf.extend_from_slice(b"Accept: application/json\r\n");
    buf.extend_from_slice(b"Connection: close\r\n");
    buf.extend_from_slice(format!("Content-Length: {}\r\n", request.body.len()).as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&request.body);

    buf
}
