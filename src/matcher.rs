//! The boundary toward the stub-matching engine.
//!
//! The engine is an external collaborator: this crate never inspects stubs
//! itself. It hands a [`StubRequest`] to the engine's in-process handle and
//! gets back a [`StubResponse`] whose [`was_configured`] flag tells a stub
//! match apart from the engine's default "no match" answer.
//!
//! [`StubRequest`]: crate::StubRequest
//! [`was_configured`]: StubResponse::was_configured

use std::convert::TryInto;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::error::BoxError;
use crate::request::StubRequest;

/// In-process handle onto the stub-matching engine.
///
/// The handle is shared across all interceptor invocations and must be safe
/// for concurrent use; the engine provides that guarantee. Matching is
/// synchronous; any suspension happens inside the engine.
pub trait StubMatcher: Send + Sync {
    /// Match one request against the configured stubs.
    ///
    /// A failing matcher is a misconfigured engine; the error is propagated
    /// to the interceptor's caller without falling back to the real
    /// transport.
    fn match_request(&self, request: &StubRequest<'_>) -> Result<StubResponse, BoxError>;
}

/// A response produced by the stub matcher.
///
/// Engines build these with the builder methods below; absent headers and an
/// absent body are both tolerated and treated as empty by the response
/// adapter.
///
/// ### Example:
/// ```rust
/// use mock_middleware::StubResponse;
///
/// let hit = StubResponse::new(200)
///     .set_status_message("OK")
///     .append_header("Content-Type", "text/plain")
///     .set_body("hello");
/// assert!(hit.was_configured());
///
/// let miss = StubResponse::no_match();
/// assert!(!miss.was_configured());
/// assert_eq!(miss.status_code(), 404);
/// ```
// Like the builders of the engines this crate fronts, conversions accept the
// widest possible input and panic when the fallible conversion fails: these
// values are assembled in test setups, not on production error paths.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status_code: StatusCode,
    status_message: Option<String>,
    headers: Option<HeaderMap>,
    body: Option<Bytes>,
    configured: bool,
}

impl StubResponse {
    /// Start building a stub-originated response with the given status code.
    pub fn new<S>(status: S) -> Self
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
    {
        let status_code = status
            .try_into()
            .expect("Failed to convert into status code.");
        Self {
            status_code,
            status_message: None,
            headers: None,
            body: None,
            configured: true,
        }
    }

    /// The engine's default answer when no stub matches: a bare 404 that is
    /// not marked as configured.
    pub fn no_match() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            status_message: None,
            headers: None,
            body: None,
            configured: false,
        }
    }

    /// Set the reason phrase reported alongside the status code.
    pub fn set_status_message<T: Into<String>>(mut self, message: T) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Append a header `value` under `key`, keeping any values already
    /// present for that name.
    pub fn append_header<K, V>(mut self, key: K, value: V) -> Self
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
        self.headers.get_or_insert_with(HeaderMap::new).append(key, value);
        self
    }

    /// Set the response body.
    pub fn set_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Headers carried by the response, if the engine attached any.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    /// Body bytes, if the engine attached any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// `true` iff this response originated from a configured stub rather
    /// than the engine's default "no match" answer.
    pub fn was_configured(&self) -> bool {
        self.configured
    }
}
