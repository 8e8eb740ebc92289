use std::io;

/// Boxed error type used at the collaborator boundaries of the crate.
///
/// Both the engine factory and the matcher handle are external components:
/// whatever error type they carry internally crosses into this crate as a
/// `BoxError` and is wrapped into the matching [`Error`] variant.
///
/// [`Error`]: crate::Error
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by interceptor construction and interception.
///
/// There is no recovery policy baked in: callers observe either a response or
/// one of these errors, originating from the engine, the matcher or the real
/// transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stub engine could not be built or started. Fatal at startup.
    #[error("failed to bootstrap the stub engine: {0}")]
    Engine(#[source] BoxError),
    /// The matcher failed while evaluating a request. There is no fallback to
    /// the real transport: a failing engine indicates misconfiguration and
    /// must stay visible.
    #[error("stub matching failed: {0}")]
    Matcher(#[source] BoxError),
    /// The real transport failed while executing a forwarded request.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
    /// A process-wide interceptor has already been installed.
    #[error("a mock interceptor is already installed in this process")]
    AlreadyInstalled,
}
