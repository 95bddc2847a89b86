use crate::http::TransportError;

/// Connection target extracted from a plain-text URL.
///
/// Only the unencrypted `http` scheme is accepted. The parser does not
/// validate host syntax and does not percent-decode the path; callers must
/// not rely on it for untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Hostname or address literal, without the port.
    pub host: String,
    /// Port, defaulting to 80 when the URL names none.
    pub port: u16,
    /// Request path including any query string, defaulting to "/".
    pub path: String,
}

impl Target {
    /// Decompose `raw` into host, port and path.
    ///
    /// Any non-`http` scheme, a missing scheme, or a URL without a host
    /// fails with [`TransportError::UnsupportedUrl`] before any socket is
    /// opened.
    pub fn parse(raw: &str) -> Result<Self, TransportError> {
        let url = url::Url::parse(raw)
            .map_err(|_| TransportError::UnsupportedUrl(raw.to_string()))?;

        if url.scheme() != "http" {
            return Err(TransportError::UnsupportedUrl(raw.to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| TransportError::UnsupportedUrl(raw.to_string()))?
            .to_string();
        let port = url.port().unwrap_or(80);

        let mut path = url.path().to_string();
        if path.is_empty() {
            path = "/".to_string();
        }
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self { host, port, path })
    }
}
