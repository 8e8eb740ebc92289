use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::client::{ClientResponse, OutboundRequest, Transport};
use crate::engine::{self, EngineFactory};
use crate::error::Error;
use crate::matcher::StubMatcher;
use crate::request::StubRequest;
use crate::response::MockResponse;
use crate::settings::{InterceptorSettings, DEFAULT_MOCK_RESPONSE_HEADER_VALUE};

/// Diverts outbound requests to the in-process stub matcher.
///
/// Every intercepted request is normalised into a [`StubRequest`] and handed
/// to the matcher. A configured stub answers the call without touching the
/// network; anything else is forwarded to the real transport and returned
/// unchanged.
///
/// The interceptor is callable concurrently from any number of
/// request-issuing threads and spawns none of its own; all work happens on
/// the caller's thread.
pub struct MockInterceptor {
    matcher: Arc<dyn StubMatcher>,
    settings: InterceptorSettings,
}

impl MockInterceptor {
    /// Bootstrap a stub engine through `factory` and build the interceptor
    /// around its in-process matcher handle.
    pub fn new<F: EngineFactory>(
        factory: &F,
        settings: InterceptorSettings,
    ) -> Result<Self, Error> {
        let matcher = engine::bootstrap(factory, &settings)?;
        Ok(Self::with_matcher(matcher, settings))
    }

    /// Build the interceptor around an existing matcher handle.
    ///
    /// This is the construction seam for tests and for hosts that manage the
    /// engine lifecycle themselves: hand in any [`StubMatcher`] and no engine
    /// is bootstrapped.
    pub fn with_matcher(matcher: Arc<dyn StubMatcher>, settings: InterceptorSettings) -> Self {
        Self { matcher, settings }
    }

    /// The settings the interceptor was built with.
    pub fn settings(&self) -> &InterceptorSettings {
        &self.settings
    }

    /// Intercept one outbound request.
    ///
    /// The request and body are normalised into a [`StubRequest`] and matched
    /// against the configured stubs. On a match the stub's response is
    /// wrapped for the client, with the mock-origin header added when
    /// [`mock_response_header`] is set. Otherwise `next` is invoked exactly
    /// once with the original request and body, and its result is returned
    /// unchanged: no retry, no rewriting.
    ///
    /// Matcher and transport failures propagate; in particular a failing
    /// matcher does not fall back to the real transport.
    ///
    /// [`mock_response_header`]: InterceptorSettings::mock_response_header
    pub fn intercept<T: Transport>(
        &self,
        request: &dyn OutboundRequest,
        body: &[u8],
        next: T,
    ) -> Result<Box<dyn ClientResponse>, Error> {
        trace!("entered intercept");
        let stub_request = StubRequest::new(request, body);
        let stub_response = self
            .matcher
            .match_request(&stub_request)
            .map_err(Error::Matcher)?;

        if stub_response.was_configured() {
            trace!("returning mock response");
            let mut response = MockResponse::new(stub_response);
            if let Some(name) = &self.settings.mock_response_header {
                let value = self
                    .settings
                    .mock_response_header_value
                    .as_deref()
                    .unwrap_or(DEFAULT_MOCK_RESPONSE_HEADER_VALUE);
                trace!("adding mock header {}={}", name, value);
                response.set_header(name.as_str(), value);
            }
            return Ok(Box::new(response));
        }

        trace!("returning real response");
        Ok(next.execute(request, body)?)
    }
}

impl fmt::Debug for MockInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockInterceptor")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
