use std::collections::HashMap;
use std::fmt;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::OutboundRequest;

/// Request methods understood by the stub matcher.
///
/// [`Any`] is the matcher's wildcard; outbound requests using an extension
/// method outside this set are reported as [`Any`].
///
/// [`Any`]: RequestMethod::Any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
    Any,
}

impl RequestMethod {
    pub(crate) fn from_method(method: &Method) -> Self {
        match method.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            _ => Self::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Any => "ANY",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single header as the matcher sees it: a name plus every value carried
/// under that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHeader {
    key: String,
    values: Vec<String>,
}

impl HttpHeader {
    pub fn new<K: Into<String>>(key: K, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// `false` for the empty record returned when a header is missing.
    pub fn is_present(&self) -> bool {
        !self.values.is_empty()
    }
}

/// A query parameter with every value it was given in the query string,
/// decoded per URL rules and in query-string order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    key: String,
    values: Vec<String>,
}

impl QueryParameter {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// A decoded form parameter.
///
/// Outbound request bodies are never decomposed into form parameters here;
/// the type exists because the matcher's request schema names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParameter {
    key: String,
    values: Vec<String>,
}

impl FormParameter {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A request cookie as the matcher sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    values: Vec<String>,
}

impl Cookie {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// One part of a `multipart/form-data` body.
///
/// Multipart bodies are passed through to the matcher as raw bytes and never
/// split into parts; see [`StubRequest::parts`].
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    headers: Vec<HttpHeader>,
    body: Bytes,
}

impl Part {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[HttpHeader] {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// The protocol-neutral view of one outbound request, consumed by the stub
/// matcher.
///
/// The record borrows the client's request and body: nothing is copied except
/// the query-parameter map, which is parsed exactly once at construction.
/// Every other projection reads through to the underlying request on demand,
/// so constructing two records from the same request yields equivalent views.
///
/// Lookups degrade instead of failing: a missing header is an empty string, a
/// malformed query contributes no parameters, and facets that do not exist on
/// an outbound client request (cookies, multipart parts, form parameters)
/// come back empty or absent.
///
/// ### Example:
/// ```rust
/// use http::{HeaderMap, Method};
/// use mock_middleware::{OutboundRequest, StubRequest};
/// use url::Url;
///
/// struct Outbound {
///     method: Method,
///     url: Url,
///     headers: HeaderMap,
/// }
///
/// impl OutboundRequest for Outbound {
///     fn method(&self) -> &Method {
///         &self.method
///     }
///     fn url(&self) -> &Url {
///         &self.url
///     }
///     fn headers(&self) -> &HeaderMap {
///         &self.headers
///     }
/// }
///
/// let outbound = Outbound {
///     method: Method::GET,
///     url: "http://example.com/search?q=mock".parse().unwrap(),
///     headers: HeaderMap::new(),
/// };
/// let record = StubRequest::new(&outbound, b"");
///
/// assert_eq!(record.relative_url(), "/search?q=mock");
/// assert_eq!(record.port(), Some(80));
/// assert_eq!(record.query_parameter("q").unwrap().values(), vec!["mock"]);
/// ```
pub struct StubRequest<'a> {
    request: &'a dyn OutboundRequest,
    body: &'a [u8],
    query_parameters: HashMap<String, QueryParameter>,
}

impl<'a> StubRequest<'a> {
    pub fn new(request: &'a dyn OutboundRequest, body: &'a [u8]) -> Self {
        let query_parameters = parse_query(request.url());
        Self {
            request,
            body,
            query_parameters,
        }
    }

    pub fn method(&self) -> RequestMethod {
        RequestMethod::from_method(self.request.method())
    }

    /// The absolute URL of the request.
    pub fn absolute_url(&self) -> String {
        self.request.url().to_string()
    }

    /// The path, followed by `?` and the raw query string when one is
    /// present.
    pub fn relative_url(&self) -> String {
        let url = self.request.url();
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        self.request.url().scheme()
    }

    /// The host, or the empty string for host-less URLs.
    pub fn host(&self) -> &str {
        self.request.url().host_str().unwrap_or("")
    }

    /// The explicit port of the URL if it carries one, else the scheme
    /// default: 80 for `http`, 443 for `https`. `None` for other schemes
    /// without an explicit port.
    pub fn port(&self) -> Option<u16> {
        let url = self.request.url();
        url.port().or_else(|| match url.scheme() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        })
    }

    /// Client address placeholder. The originating socket is not observable
    /// on an outbound client request.
    pub fn client_ip(&self) -> &str {
        "0.0.0.0"
    }

    /// Protocol tag reported to the matcher.
    ///
    /// The literal is `https` for every request, including plain-http ones.
    /// This is a matching convention the engine expects, not a transport
    /// claim; stub criteria written against the protocol field depend on it
    /// staying fixed.
    pub fn protocol(&self) -> &str {
        "https"
    }

    /// The first value of `name`, or the empty string when the header is
    /// missing.
    pub fn header_value(&self, name: &str) -> String {
        self.request
            .headers()
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_default()
    }

    /// A header record for `name` holding just the first value, or an empty
    /// record when the header is missing.
    pub fn header(&self, name: &str) -> HttpHeader {
        let first = self.header_value(name);
        if first.is_empty() {
            HttpHeader::new(name, Vec::new())
        } else {
            HttpHeader::new(name, vec![first])
        }
    }

    pub fn contains_header(&self, name: &str) -> bool {
        self.request.headers().contains_key(name)
    }

    /// The distinct header names of the request.
    pub fn header_keys(&self) -> Vec<String> {
        self.request
            .headers()
            .keys()
            .map(|key| key.as_str().to_string())
            .collect()
    }

    /// Every header as an ordered sequence of (name, values) records.
    pub fn headers(&self) -> Vec<HttpHeader> {
        let header_map = self.request.headers();
        header_map
            .keys()
            .map(|key| {
                let values = header_map
                    .get_all(key)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect();
                HttpHeader::new(key.as_str(), values)
            })
            .collect()
    }

    /// The content-type header value, parameters included, or `None` when
    /// the request carries none.
    pub fn content_type(&self) -> Option<String> {
        let value = self.header_value(http::header::CONTENT_TYPE.as_str());
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// The values recorded for one query parameter, multi-value preserved.
    pub fn query_parameter(&self, name: &str) -> Option<&QueryParameter> {
        self.query_parameters.get(name)
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        self.body
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_as_string(&self) -> String {
        String::from_utf8_lossy(self.body).into_owned()
    }

    /// The body as standard base64 with padding.
    pub fn body_as_base64(&self) -> String {
        BASE64_STANDARD.encode(self.body)
    }

    /// Deserialize the body as JSON.
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.body)
    }

    /// `true` iff the content-type value starts with `multipart/form-data`.
    pub fn is_multipart(&self) -> bool {
        self.content_type()
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    }

    /// Multipart parts. Bodies are never decomposed; always empty.
    pub fn parts(&self) -> Vec<Part> {
        Vec::new()
    }

    pub fn part(&self, _name: &str) -> Option<Part> {
        None
    }

    /// Request cookies. Not surfaced for outbound requests; always empty.
    pub fn cookies(&self) -> HashMap<String, Cookie> {
        HashMap::new()
    }

    pub fn is_browser_proxy_request(&self) -> bool {
        false
    }

    /// The request this one was derived from. Outbound requests are never
    /// rewritten before matching, so there is none.
    pub fn original_request(&self) -> Option<StubRequest<'a>> {
        None
    }

    pub fn form_parameter(&self, _name: &str) -> Option<FormParameter> {
        None
    }

    /// Decoded form parameters. Absent: the body is handed to the matcher
    /// as raw bytes instead.
    pub fn form_parameters(&self) -> Option<HashMap<String, FormParameter>> {
        None
    }
}

impl fmt::Debug for StubRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubRequest")
            .field("method", &self.method())
            .field("url", &self.absolute_url())
            .field("body_bytes", &self.body.len())
            .finish_non_exhaustive()
    }
}

fn parse_query(url: &Url) -> HashMap<String, QueryParameter> {
    let mut parameters: HashMap<String, QueryParameter> = HashMap::new();
    for (key, value) in url.query_pairs() {
        let key = key.into_owned();
        parameters
            .entry(key.clone())
            .or_insert_with(|| QueryParameter {
                key,
                values: Vec::new(),
            })
            .values
            .push(value.into_owned());
    }
    parameters
}
