//! Bootstrapping of the stub-matching engine.
//!
//! The engine is an external component. This module maps the interceptor's
//! settings onto the engine's option record, asks an [`EngineFactory`] to
//! build the engine, drives it through its start lifecycle, and extracts the
//! in-process matcher handle that the interceptor holds for the rest of the
//! process lifetime.

use std::path::PathBuf;
use std::sync::Arc;

use log::trace;

use crate::error::{BoxError, Error};
use crate::matcher::StubMatcher;
use crate::settings::InterceptorSettings;

/// Extension identifier registered on every engine this crate bootstraps.
pub const RANDOM_EXTENSION: &str = "org.wiremock.RandomExtension";

/// The option record handed to the engine factory.
///
/// Fields left at `None` were absent from the settings; the engine keeps its
/// own default for them. [`EngineOptions::from_settings`] is the only mapping
/// used by this crate, but the fields are public so engine implementations
/// can read them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub container_threads: Option<usize>,
    pub asynchronous_response_enabled: Option<bool>,
    pub asynchronous_response_threads: Option<usize>,
    /// Filesystem root for stub files.
    pub root_directory: Option<PathBuf>,
    /// Packaged-resource root for stub files.
    pub mappings_resource_path: Option<String>,
    pub journal_disabled: bool,
    pub max_request_journal_entries: Option<usize>,
    pub gzip_disabled: Option<bool>,
    pub disable_optimize_xml_factories: Option<bool>,
    pub stub_cors_enabled: Option<bool>,
    pub stub_request_logging_disabled: Option<bool>,
    pub templating_enabled: bool,
    pub global_templating: Option<bool>,
    pub max_template_cache_entries: Option<u64>,
    pub proxy_pass_through: bool,
    /// Extension identifiers the engine must load.
    pub extensions: Vec<String>,
    pub trust_all_proxy_targets: bool,
    /// The engine must serve matches through a direct in-process handle
    /// rather than a listening socket.
    pub in_process: bool,
}

impl EngineOptions {
    /// Map interceptor settings onto engine options.
    ///
    /// Only options present in the settings are carried over. Independent of
    /// the settings, the mapping always registers [`RANDOM_EXTENSION`],
    /// trusts all proxy targets and requests an in-process engine.
    pub fn from_settings(settings: &InterceptorSettings) -> Self {
        trace!("registering engine extension {}", RANDOM_EXTENSION);
        EngineOptions {
            container_threads: settings.container_threads,
            asynchronous_response_enabled: settings.asynchronous_response_enabled,
            asynchronous_response_threads: settings.asynchronous_response_threads,
            root_directory: settings.root_directory.clone(),
            mappings_resource_path: settings.mappings_resource_path.clone(),
            journal_disabled: settings.journal_disabled == Some(true),
            max_request_journal_entries: settings.max_request_journal_entries,
            gzip_disabled: settings.gzip_disabled,
            disable_optimize_xml_factories: settings.disable_optimize_xml_factories,
            stub_cors_enabled: settings.stub_cors_enabled,
            stub_request_logging_disabled: settings.stub_request_logging_disabled,
            templating_enabled: settings.templating_enabled,
            global_templating: settings.global_templating,
            max_template_cache_entries: settings.max_template_cache_entries,
            proxy_pass_through: settings.proxy_pass_through,
            extensions: vec![RANDOM_EXTENSION.to_string()],
            trust_all_proxy_targets: true,
            in_process: true,
        }
    }
}

/// A constructed stub-matching engine.
pub trait StubEngine {
    /// Drive the engine through its start lifecycle.
    ///
    /// In-process engines have nothing to bind and treat this as a no-op,
    /// but the call is still made once during bootstrap.
    fn start(&self) -> Result<(), BoxError>;

    /// The in-process matcher handle.
    ///
    /// The handle outlives the engine value handed back by the factory; it
    /// stays valid until process exit.
    fn matcher(&self) -> Arc<dyn StubMatcher>;
}

/// Builds a [`StubEngine`] from an option record.
///
/// This is the seam between the interceptor and whichever engine the host
/// application embeds.
pub trait EngineFactory {
    type Engine: StubEngine;

    fn build(&self, options: EngineOptions) -> Result<Self::Engine, BoxError>;
}

/// Build and start the engine, then extract its in-process matcher handle.
///
/// Failure here is fatal at startup; once the handle is extracted the
/// bootstrapper has no further responsibility.
pub fn bootstrap<F: EngineFactory>(
    factory: &F,
    settings: &InterceptorSettings,
) -> Result<Arc<dyn StubMatcher>, Error> {
    let options = EngineOptions::from_settings(settings);
    let engine = factory.build(options).map_err(Error::Engine)?;
    engine.start().map_err(Error::Engine)?;
    Ok(engine.matcher())
}
