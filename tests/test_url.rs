use autodidact::http::TransportError;
use autodidact::http::url::Target;

#[test]
fn test_parse_host_port_path() {
    let target = Target::parse("http://127.0.0.1:3333/jsonrpc").unwrap();

    assert_eq!(target.host, "127.0.0.1");
    assert_eq!(target.port, 3333);
    assert_eq!(target.path, "/jsonrpc");
}

#[test]
fn test_parse_default_port() {
    let target = Target::parse("http://example.com/status").unwrap();

    assert_eq!(target.host, "example.com");
    assert_eq!(target.port, 80);
}

#[test]
fn test_parse_default_path() {
    let target = Target::parse("http://example.com").unwrap();

    assert_eq!(target.path, "/");
}

#[test]
fn test_parse_empty_port_defaults_to_80() {
    let target = Target::parse("http://example.com:/health").unwrap();

    assert_eq!(target.port, 80);
    assert_eq!(target.path, "/health");
}

#[test]
fn test_parse_preserves_query_string() {
    let target = Target::parse("http://localhost:8080/search?q=rust").unwrap();

    assert_eq!(target.path, "/search?q=rust");
}

#[test]
fn test_rejects_https_scheme() {
    let result = Target::parse("https://host/path");

    assert!(matches!(result, Err(TransportError::UnsupportedUrl(_))));
}

#[test]
fn test_rejects_missing_scheme() {
    assert!(matches!(
        Target::parse("example.com/path"),
        Err(TransportError::UnsupportedUrl(_))
    ));
    assert!(matches!(
        Target::parse("localhost:8080/path"),
        Err(TransportError::UnsupportedUrl(_))
    ));
}

#[test]
fn test_rejects_empty_host() {
    let result = Target::parse("http:///path");

    assert!(matches!(result, Err(TransportError::UnsupportedUrl(_))));
}
