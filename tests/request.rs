use http::{HeaderMap, HeaderValue, Method};
use mock_middleware::{OutboundRequest, RequestMethod, StubRequest};
use serde::Deserialize;
use url::Url;

struct TestRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl TestRequest {
    fn get(url: &str) -> Self {
        Self {
            method: Method::GET,
            url: url.parse().unwrap(),
            headers: HeaderMap::new(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers
            .append(name, HeaderValue::from_str(value).unwrap());
        self
    }
}

impl OutboundRequest for TestRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[test]
fn multi_value_query_parameters_are_preserved_in_order() {
    // Arrange
    let request = TestRequest::get("http://example.com/path?x=1&x=2&y=single");

    // Act
    let record = StubRequest::new(&request, b"");

    // Assert
    assert_eq!(record.query_parameter("x").unwrap().values(), vec!["1", "2"]);
    assert_eq!(
        record.query_parameter("y").unwrap().values(),
        vec!["single"]
    );
    assert!(record.query_parameter("nope").is_none());
}

#[test]
fn query_values_are_url_decoded() {
    let request = TestRequest::get("http://example.com/search?q=a%20b&empty=");

    let record = StubRequest::new(&request, b"");

    assert_eq!(record.query_parameter("q").unwrap().values(), vec!["a b"]);
    assert_eq!(record.query_parameter("empty").unwrap().values(), vec![""]);
}

#[test]
fn url_without_query_yields_no_parameters() {
    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, b"");

    assert!(record.query_parameter("x").is_none());
    assert_eq!(record.relative_url(), "/path");
}

#[test]
fn relative_url_keeps_the_raw_query() {
    let request = TestRequest::get("http://example.com/path/name?x=1&y=2");

    let record = StubRequest::new(&request, b"");

    assert_eq!(record.relative_url(), "/path/name?x=1&y=2");
    assert_eq!(record.absolute_url(), "http://example.com/path/name?x=1&y=2");
}

#[test]
fn header_lookup_returns_first_value_only() {
    // Arrange
    let request = TestRequest::get("http://example.com/path")
        .with_header("h", "a")
        .with_header("h", "b")
        .with_header("c", "c");

    // Act
    let record = StubRequest::new(&request, b"");

    // Assert
    assert!(record.contains_header("h"));
    assert!(record.header_keys().contains(&"h".to_string()));
    assert_eq!(record.header_value("h"), "a");
    assert_eq!(record.header("h").values(), vec!["a"]);

    // The full header sequence still carries every value.
    let all = record.headers();
    let h = all.iter().find(|header| header.key() == "h").unwrap();
    assert_eq!(h.values(), vec!["a", "b"]);
}

#[test]
fn missing_headers_degrade_to_empty_values() {
    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, b"");

    assert!(!record.contains_header("x-foo"));
    assert_eq!(record.header_value("x-foo"), "");
    let header = record.header("x-foo");
    assert!(header.values().is_empty());
    assert!(!header.is_present());
    assert!(record.header_keys().is_empty());
    assert!(record.headers().is_empty());
}

#[test]
fn content_type_reports_absent_and_present() {
    let bare = TestRequest::get("http://example.com/path");
    let json = TestRequest::get("http://example.com/path").with_header(
        "content-type",
        "application/json",
    );

    let bare_record = StubRequest::new(&bare, b"");
    let json_record = StubRequest::new(&json, b"");

    assert_eq!(bare_record.content_type(), None);
    assert!(json_record
        .content_type()
        .unwrap()
        .contains("application/json"));
}

#[test]
fn multipart_post_request_is_projected_faithfully() {
    // Arrange
    let mut request = TestRequest::get("https://example.com:443/path/name?x=1&y=2")
        .with_header("content-type", "multipart/form-data; boundary=abc");
    request.method = Method::POST;

    // Act
    let record = StubRequest::new(&request, b"body");

    // Assert
    assert_eq!(record.method(), RequestMethod::Post);
    assert_eq!(record.scheme(), "https");
    assert_eq!(record.host(), "example.com");
    assert_eq!(record.port(), Some(443));
    assert_eq!(record.relative_url(), "/path/name?x=1&y=2");
    assert!(record.is_multipart());
    assert_eq!(record.body_as_string(), "body");
    assert_eq!(record.body_as_base64(), "Ym9keQ==");
}

#[test]
fn non_multipart_content_types_are_not_multipart() {
    let request = TestRequest::get("http://example.com/path")
        .with_header("content-type", "application/json");

    let record = StubRequest::new(&request, b"");

    assert!(!record.is_multipart());
}

#[test]
fn ports_default_from_the_scheme() {
    let http = TestRequest::get("http://example.com/path");
    let https = TestRequest::get("https://example.com/path");
    let explicit = TestRequest::get("http://example.com:8080/path");
    let unknown = TestRequest::get("foo://example.com/path");

    assert_eq!(StubRequest::new(&http, b"").port(), Some(80));
    assert_eq!(StubRequest::new(&https, b"").port(), Some(443));
    assert_eq!(StubRequest::new(&explicit, b"").port(), Some(8080));
    assert_eq!(StubRequest::new(&unknown, b"").port(), None);
}

#[test]
fn body_views_agree_with_the_input_bytes() {
    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, b"abc");

    assert_eq!(record.body(), &b"abc"[..]);
    assert_eq!(record.body_as_string(), "abc");
    assert_eq!(record.body_as_base64(), "YWJj");
}

#[test]
fn empty_body_views_are_empty() {
    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, b"");

    assert!(record.body().is_empty());
    assert_eq!(record.body_as_string(), "");
    assert_eq!(record.body_as_base64(), "");
}

#[test]
fn body_json_deserializes_the_body() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        name: String,
        count: u32,
    }

    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, br#"{"name":"stub","count":2}"#);

    assert_eq!(
        record.body_json::<Payload>().unwrap(),
        Payload {
            name: "stub".to_string(),
            count: 2,
        }
    );
    assert!(StubRequest::new(&request, b"not json")
        .body_json::<Payload>()
        .is_err());
}

#[test]
fn extension_methods_map_to_the_wildcard() {
    let mut request = TestRequest::get("http://example.com/path");
    request.method = Method::from_bytes(b"PROPFIND").unwrap();

    let record = StubRequest::new(&request, b"");

    assert_eq!(record.method(), RequestMethod::Any);
    assert_eq!(record.method().as_str(), "ANY");
}

#[test]
fn fixed_literals_and_absent_facets() {
    let request = TestRequest::get("http://example.com/path");

    let record = StubRequest::new(&request, b"");

    // The protocol tag is a matching convention: `https` even for plain http.
    assert_eq!(record.protocol(), "https");
    assert_eq!(record.client_ip(), "0.0.0.0");
    assert!(record.parts().is_empty());
    assert!(record.part("p").is_none());
    assert!(record.cookies().is_empty());
    assert!(!record.is_browser_proxy_request());
    assert!(record.original_request().is_none());
    assert!(record.form_parameter("a").is_none());
    assert!(record.form_parameters().is_none());
}

#[test]
fn records_built_from_the_same_request_project_identically() {
    // Arrange
    let request = TestRequest::get("https://example.com/path?x=1&x=2")
        .with_header("content-type", "text/plain")
        .with_header("h", "v");

    // Act
    let first = StubRequest::new(&request, b"payload");
    let second = StubRequest::new(&request, b"payload");

    // Assert
    assert_eq!(first.method(), second.method());
    assert_eq!(first.absolute_url(), second.absolute_url());
    assert_eq!(first.relative_url(), second.relative_url());
    assert_eq!(first.scheme(), second.scheme());
    assert_eq!(first.host(), second.host());
    assert_eq!(first.port(), second.port());
    assert_eq!(first.headers(), second.headers());
    assert_eq!(first.content_type(), second.content_type());
    assert_eq!(first.query_parameter("x"), second.query_parameter("x"));
    assert_eq!(first.body(), second.body());
    assert_eq!(first.body_as_base64(), second.body_as_base64());
}
