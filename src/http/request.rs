/// HTTP request methods understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
}

impl Method {
    /// Wire representation of the method for the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

/// An outbound HTTP request.
///
/// Immutable once constructed; the retry loop may issue the same request
/// multiple times, each time over a fresh connection.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, ...)
    pub method: Method,
    /// Full target URL (e.g. "http://127.0.0.1:3333/jsonrpc")
    pub url: String,
    /// Raw request body bytes
    pub body: Vec<u8>,
    /// Value sent as the Content-Type header
    pub content_type: String,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    url: String,
    body: Vec<u8>,
    content_type: String,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: Vec::new(),
            content_type: "application/json".to_string(),
        }
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            body: self.body,
            content_type: self.content_type,
        }
    }
}

impl Request {
    /// Creates a JSON POST request for the given URL and body.
    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        RequestBuilder::new(Method::POST, url).body(body).build()
    }
}
