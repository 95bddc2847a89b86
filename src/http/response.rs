/// A decoded HTTP response from one request attempt.
///
/// Only the status line and the header/body boundary are interpreted; the
/// header block is preserved verbatim for callers that want to inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code from the status line (0 when unparseable)
    pub status: u16,
    /// Response body bytes, verbatim
    pub body: Vec<u8>,
    /// Raw header block, not parsed beyond the status line
    pub headers: String,
}

impl Response {
    /// Whether the status code is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
