use std::convert::TryInto;
use std::io::{self, Cursor, Read};

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::client::ClientResponse;
use crate::matcher::StubResponse;

/// A stub match wrapped up as the response the host client expects.
///
/// Headers are copied out of the matcher response once, at construction,
/// into an owned collection that preserves duplicates; the body is captured
/// once, with an absent body becoming an empty buffer. The status code and
/// reason phrase keep reading through to the matcher response.
///
/// After construction the only sanctioned mutation is the single
/// [`set_header`] call the interceptor performs to add the mock-origin
/// marker before the response is surfaced.
///
/// [`set_header`]: MockResponse::set_header
#[derive(Debug, Clone)]
pub struct MockResponse {
    stub: StubResponse,
    headers: HeaderMap,
    body: Bytes,
}

impl MockResponse {
    pub fn new(stub: StubResponse) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(stub_headers) = stub.headers() {
            for (key, value) in stub_headers {
                headers.append(key.clone(), value.clone());
            }
        }
        let body = stub.body().cloned().unwrap_or_default();
        Self {
            stub,
            headers,
            body,
        }
    }

    /// Replace every value recorded under `key` with the single `value`.
    pub fn set_header<K, V>(&mut self, key: K, value: V)
    where
        K: TryInto<HeaderName>,
        <K as TryInto<HeaderName>>::Error: std::fmt::Debug,
        V: TryInto<HeaderValue>,
        <V as TryInto<HeaderValue>>::Error: std::fmt::Debug,
    {
        let key = key.try_into().expect("Failed to convert into header name.");
        let value = value
            .try_into()
            .expect("Failed to convert into header value.");
        self.headers.insert(key, value);
    }
}

impl ClientResponse for MockResponse {
    fn status_code(&self) -> StatusCode {
        self.stub.status_code()
    }

    fn status_text(&self) -> String {
        self.stub.status_message().unwrap_or_default().to_string()
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Every call returns a fresh reader over the same captured bytes; the
    /// buffer itself is shared, not copied.
    fn body(&mut self) -> io::Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(Cursor::new(self.body.clone())))
    }

    fn close(&mut self) {
        // The body is fully buffered; nothing to release.
    }
}
