#![allow(clippy::needless_doctest_main)]
//! `mock-middleware` transparently diverts the outbound HTTP requests of an
//! application to an in-process stub matcher, so integration tests and
//! development environments can substitute remote dependencies with
//! deterministic fakes without altering application code paths.
//!
//! Requests that match a preconfigured stub are answered with the stub's
//! canned response; everything else is forwarded to the real network and
//! returned unchanged.
//!
//! # Table of Contents
//! 1. [Getting started](#getting-started)
//! 2. [The stub engine](#the-stub-engine)
//! 3. [Plugging into a client](#plugging-into-a-client)
//! 4. [Marking mock responses](#marking-mock-responses)
//! 5. [Concurrency](#concurrency)
//!
//! ## Getting started
//! ```rust
//! use std::io::Read;
//! use std::sync::Arc;
//!
//! use http::{HeaderMap, Method};
//! use mock_middleware::{
//!     BoxError, ClientResponse, InterceptorSettings, MockInterceptor, OutboundRequest,
//!     StubMatcher, StubRequest, StubResponse,
//! };
//! use url::Url;
//!
//! // The host client's request type, adapted to the interceptor's view of it.
//! struct Outbound {
//!     method: Method,
//!     url: Url,
//!     headers: HeaderMap,
//! }
//!
//! impl OutboundRequest for Outbound {
//!     fn method(&self) -> &Method {
//!         &self.method
//!     }
//!     fn url(&self) -> &Url {
//!         &self.url
//!     }
//!     fn headers(&self) -> &HeaderMap {
//!         &self.headers
//!     }
//! }
//!
//! // Stands in for the in-process matcher handle of a real stub engine.
//! struct Hello;
//!
//! impl StubMatcher for Hello {
//!     fn match_request(&self, request: &StubRequest<'_>) -> Result<StubResponse, BoxError> {
//!         if request.relative_url() == "/hello" {
//!             Ok(StubResponse::new(200).set_body("world"))
//!         } else {
//!             Ok(StubResponse::no_match())
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interceptor =
//!         MockInterceptor::with_matcher(Arc::new(Hello), InterceptorSettings::default());
//!
//!     let request = Outbound {
//!         method: Method::GET,
//!         url: "http://localhost/hello".parse()?,
//!         headers: HeaderMap::new(),
//!     };
//!     let next = |_: &dyn OutboundRequest, _: &[u8]| -> std::io::Result<Box<dyn ClientResponse>> {
//!         Err(std::io::Error::new(
//!             std::io::ErrorKind::ConnectionRefused,
//!             "no network in this example",
//!         ))
//!     };
//!
//!     // The stub answers; the continuation is never invoked.
//!     let mut response = interceptor.intercept(&request, b"", next)?;
//!     assert_eq!(response.status_code(), 200);
//!
//!     let mut body = String::new();
//!     response.body()?.read_to_string(&mut body)?;
//!     assert_eq!(body, "world");
//!     Ok(())
//! }
//! ```
//!
//! ## The stub engine
//!
//! The stub-matching engine is an external collaborator: this crate neither
//! stores nor evaluates stubs. At startup [`activate`] (or [`install`], for
//! process-wide state) maps [`InterceptorSettings`] onto [`EngineOptions`],
//! asks an [`EngineFactory`] to build the engine, starts it, and keeps only
//! the engine's in-process [`StubMatcher`] handle. The handle is consulted
//! synchronously on every intercepted request; its [`StubResponse`] tells a
//! stub match apart from the engine's default "no match" answer.
//!
//! For tests, [`MockInterceptor::with_matcher`] skips the engine entirely
//! and accepts any [`StubMatcher`] implementation.
//!
//! ## Plugging into a client
//!
//! The interceptor is written against capability traits rather than one
//! client library: adapt your client's request type to [`OutboundRequest`],
//! its response type to [`ClientResponse`], and wrap the rest of the
//! middleware chain as a [`Transport`] (closures with the right signature
//! qualify). [`MockInterceptor::intercept`] then slots into any client that
//! lets an interceptor observe `(request, body)` and produce the response.
//!
//! ## Marking mock responses
//!
//! With [`mock_response_header`] set, every stub-originated response carries
//! that header so callers can tell mocks from real traffic; the value
//! defaults to `"mock-middleware"`. Forwarded responses are never touched.
//!
//! ## Concurrency
//!
//! One interceptor serves any number of request-issuing threads. It spawns
//! no threads and takes no locks; the matcher handle is shared and the
//! engine guarantees its thread safety. Per-request values are never shared
//! across invocations.
//!
//! [`mock_response_header`]: InterceptorSettings::mock_response_header
mod activation;
mod client;
mod engine;
mod error;
mod interceptor;
mod matcher;
mod request;
mod response;
mod settings;

pub use activation::{activate, install, installed};
pub use client::{ClientResponse, OutboundRequest, Transport};
pub use engine::{bootstrap, EngineFactory, EngineOptions, StubEngine, RANDOM_EXTENSION};
pub use error::{BoxError, Error};
pub use interceptor::MockInterceptor;
pub use matcher::{StubMatcher, StubResponse};
pub use request::{
    Cookie, FormParameter, HttpHeader, Part, QueryParameter, RequestMethod, StubRequest,
};
pub use response::MockResponse;
pub use settings::{InterceptorSettings, DEFAULT_MOCK_RESPONSE_HEADER_VALUE};
