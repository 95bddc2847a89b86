use crate::http::TransportError;
use crate::http::response::Response;

pub fn decode_response(raw: &[u8]) -> Result<Response, TransportError> {
    // Look for header/body separator
    let headers_end = find_headers_end(raw).ok_or(TransportError::MalformedResponse)?;
    let header_bytes = &raw[..headers_end];
    let body = raw[headers_end + 4..].to_vec();

    let headers = String::from_utf8_lossy(header_bytes).into_owned();

    // Status line: second whitespace-separated field is the code
    let status_line = headers.split("\r\n").next().unwrap_or_default();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|field| field.parse::<u16>().ok())
        .unwrap_or(0);

    Ok(Response {
        status,
        body,
        headers,
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
