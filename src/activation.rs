//! Conditional construction of the interceptor subsystem.
//!
//! Nothing here runs per request. At startup the host either calls
//! [`activate`] and keeps the interceptor wherever its middleware chain
//! lives, or calls [`install`] to hold it as process-wide state retrievable
//! through [`installed`], the rendering of a singleton wired up once by the
//! application container. Teardown is tied to process exit.

use log::trace;
use once_cell::sync::OnceCell;

use crate::engine::EngineFactory;
use crate::error::Error;
use crate::interceptor::MockInterceptor;
use crate::settings::InterceptorSettings;

static INSTALLED: OnceCell<MockInterceptor> = OnceCell::new();

/// Build the interceptor iff `settings.enabled` is set.
///
/// With `enabled` false the whole subsystem stays unconstructed: the factory
/// is not consulted, no engine exists in the process, and the real client
/// transport runs unconditionally.
///
/// ```rust
/// use std::sync::Arc;
///
/// use mock_middleware::{
///     activate, BoxError, EngineFactory, EngineOptions, InterceptorSettings, StubEngine,
///     StubMatcher,
/// };
///
/// struct UnusedEngine;
///
/// impl StubEngine for UnusedEngine {
///     fn start(&self) -> Result<(), BoxError> {
///         Ok(())
///     }
///     fn matcher(&self) -> Arc<dyn StubMatcher> {
///         unreachable!()
///     }
/// }
///
/// struct Factory;
///
/// impl EngineFactory for Factory {
///     type Engine = UnusedEngine;
///     fn build(&self, _options: EngineOptions) -> Result<UnusedEngine, BoxError> {
///         panic!("the factory must not be consulted while disabled");
///     }
/// }
///
/// // `enabled` defaults to false: no engine, no interceptor.
/// let interceptor = activate(&Factory, InterceptorSettings::default()).unwrap();
/// assert!(interceptor.is_none());
/// ```
pub fn activate<F: EngineFactory>(
    factory: &F,
    settings: InterceptorSettings,
) -> Result<Option<MockInterceptor>, Error> {
    if !settings.enabled {
        trace!("mock middleware disabled, interceptor not constructed");
        return Ok(None);
    }
    MockInterceptor::new(factory, settings).map(Some)
}

/// [`activate`], then keep the interceptor as process-wide state.
///
/// Returns the installed interceptor, or `None` when `settings.enabled` is
/// false (in which case nothing is stored and a later `install` may still
/// succeed). Installing twice fails with [`Error::AlreadyInstalled`].
pub fn install<F: EngineFactory>(
    factory: &F,
    settings: InterceptorSettings,
) -> Result<Option<&'static MockInterceptor>, Error> {
    match activate(factory, settings)? {
        Some(interceptor) => {
            if INSTALLED.set(interceptor).is_err() {
                return Err(Error::AlreadyInstalled);
            }
            Ok(INSTALLED.get())
        }
        None => Ok(None),
    }
}

/// The process-wide interceptor, if [`install`] has stored one.
pub fn installed() -> Option<&'static MockInterceptor> {
    INSTALLED.get()
}
