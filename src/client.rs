//! The boundary toward the host HTTP client.
//!
//! The interceptor is not written against one specific client library.
//! Instead, these traits capture the capability set it actually needs: a
//! readable view of the outbound request, the response surface the client
//! expects back, and the continuation that performs the real network call.
//! Host applications adapt their client's native types once and plug the
//! interceptor into the client's middleware chain.

use std::io::{self, Read};

use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// A minimal read-only view of one outbound client request.
///
/// Only the method, the absolute URL and the headers are consulted; the body
/// travels alongside the request as a plain byte slice.
pub trait OutboundRequest {
    fn method(&self) -> &Method;
    fn url(&self) -> &Url;
    fn headers(&self) -> &HeaderMap;
}

/// The response surface expected by the host client.
///
/// Both mock responses and real-transport responses are returned to the
/// caller through this trait, so a successful match is indistinguishable from
/// a real response apart from the optional mock-origin header.
pub trait ClientResponse: Send {
    fn status_code(&self) -> StatusCode;

    /// The reason phrase, or the empty string when the response carries none.
    fn status_text(&self) -> String;

    fn headers(&self) -> &HeaderMap;

    /// Open a reader over the response body.
    ///
    /// The body is consumed exactly once by the client library. Whether a
    /// second call yields a fresh reader is up to the implementation; fully
    /// buffered implementations usually do.
    fn body(&mut self) -> io::Result<Box<dyn Read + Send + '_>>;

    /// Release any resources held by the response. Buffered implementations
    /// have nothing to release.
    fn close(&mut self) {}
}

/// The continuation representing the real transport.
///
/// [`MockInterceptor::intercept`] invokes it exactly once when no stub
/// matches, and not at all otherwise. Errors are propagated to the caller
/// verbatim.
///
/// Closures with the matching signature implement `Transport` out of the box:
///
/// ```rust
/// use mock_middleware::{ClientResponse, OutboundRequest, Transport};
///
/// let refused = |_: &dyn OutboundRequest, _: &[u8]| -> std::io::Result<Box<dyn ClientResponse>> {
///     Err(std::io::Error::new(
///         std::io::ErrorKind::ConnectionRefused,
///         "no network here",
///     ))
/// };
/// # fn is_transport<T: Transport>(_: &T) {}
/// # is_transport(&refused);
/// ```
///
/// [`MockInterceptor::intercept`]: crate::MockInterceptor::intercept
pub trait Transport {
    fn execute(
        &self,
        request: &dyn OutboundRequest,
        body: &[u8],
    ) -> io::Result<Box<dyn ClientResponse>>;
}

/// Implement the `Transport` trait for all closures, out of the box,
/// if their signature is compatible.
impl<F> Transport for F
where
    F: Fn(&dyn OutboundRequest, &[u8]) -> io::Result<Box<dyn ClientResponse>>,
{
    fn execute(
        &self,
        request: &dyn OutboundRequest,
        body: &[u8],
    ) -> io::Result<Box<dyn ClientResponse>> {
        // Just call the closure itself!
        self(request, body)
    }
}
