use std::path::PathBuf;

use serde::Deserialize;

/// Value written into the mock-origin header when
/// [`mock_response_header_value`] is left unset.
///
/// [`mock_response_header_value`]: InterceptorSettings::mock_response_header_value
pub const DEFAULT_MOCK_RESPONSE_HEADER_VALUE: &str = "mock-middleware";

/// Options controlling the stub engine and the interceptor.
///
/// A plain data aggregate: no behaviour beyond typed field access, immutable
/// once handed to [`activate`] or [`MockInterceptor`]. Host applications
/// usually bind it from their configuration source under a `mock-middleware`
/// key prefix: the record deserializes from kebab-case keys, so
/// `mock-middleware.container-threads = 4` maps onto [`container_threads`].
///
/// `Option` fields are three-valued: `None` means "do not override the engine
/// default" and the corresponding engine option is left untouched during
/// bootstrap.
///
/// [`activate`]: crate::activate
/// [`MockInterceptor`]: crate::MockInterceptor
/// [`container_threads`]: InterceptorSettings::container_threads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterceptorSettings {
    /// Gates whether the interceptor subsystem is constructed at all.
    pub enabled: bool,
    /// Parallelism hint forwarded to the engine.
    pub container_threads: Option<usize>,
    /// Async-dispatch hint forwarded to the engine.
    pub asynchronous_response_enabled: Option<bool>,
    /// Async-dispatch thread count forwarded to the engine.
    pub asynchronous_response_threads: Option<usize>,
    /// Filesystem root under which the engine loads stub files.
    pub root_directory: Option<PathBuf>,
    /// Alternative stub-load root expressed as a packaged-resource path.
    pub mappings_resource_path: Option<String>,
    /// Disables the engine's request journal when `Some(true)`.
    pub journal_disabled: Option<bool>,
    /// Upper bound on journal entries kept by the engine.
    pub max_request_journal_entries: Option<usize>,
    pub gzip_disabled: Option<bool>,
    pub disable_optimize_xml_factories: Option<bool>,
    pub stub_cors_enabled: Option<bool>,
    pub stub_request_logging_disabled: Option<bool>,
    /// Enables response templating in the engine.
    pub templating_enabled: bool,
    pub global_templating: Option<bool>,
    pub max_template_cache_entries: Option<u64>,
    /// Forwarded to the engine verbatim. The interceptor's own fallback path
    /// (forwarding unmatched requests to the real transport) stays
    /// authoritative regardless of this flag.
    pub proxy_pass_through: bool,
    /// Name of the header injected on mock responses to mark their origin.
    /// With `None`, no marker header is added.
    pub mock_response_header: Option<String>,
    /// Value for the marker header; falls back to
    /// [`DEFAULT_MOCK_RESPONSE_HEADER_VALUE`] when unset.
    pub mock_response_header_value: Option<String>,
}

impl Default for InterceptorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            container_threads: Some(1),
            asynchronous_response_enabled: None,
            asynchronous_response_threads: None,
            root_directory: None,
            mappings_resource_path: None,
            journal_disabled: None,
            max_request_journal_entries: None,
            gzip_disabled: None,
            disable_optimize_xml_factories: None,
            stub_cors_enabled: None,
            stub_request_logging_disabled: None,
            templating_enabled: false,
            global_templating: None,
            max_template_cache_entries: None,
            proxy_pass_through: false,
            mock_response_header: None,
            mock_response_header_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_the_interceptor_off() {
        let settings = InterceptorSettings::default();

        assert!(!settings.enabled);
        assert_eq!(settings.container_threads, Some(1));
        assert_eq!(settings.asynchronous_response_enabled, None);
        assert_eq!(settings.root_directory, None);
        assert!(!settings.templating_enabled);
        assert!(!settings.proxy_pass_through);
        assert_eq!(settings.mock_response_header, None);
        assert_eq!(settings.mock_response_header_value, None);
    }

    #[test]
    fn deserializes_from_kebab_case_keys() {
        let settings: InterceptorSettings = serde_json::from_str(
            r#"{
                "enabled": true,
                "container-threads": 4,
                "journal-disabled": true,
                "root-directory": "stubs",
                "mock-response-header": "X-MOCK",
                "mock-response-header-value": "from-config"
            }"#,
        )
        .unwrap();

        assert!(settings.enabled);
        assert_eq!(settings.container_threads, Some(4));
        assert_eq!(settings.journal_disabled, Some(true));
        assert_eq!(settings.root_directory, Some(PathBuf::from("stubs")));
        assert_eq!(settings.mock_response_header.as_deref(), Some("X-MOCK"));
        assert_eq!(
            settings.mock_response_header_value.as_deref(),
            Some("from-config")
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: InterceptorSettings = serde_json::from_str(r#"{"enabled": true}"#).unwrap();

        assert!(settings.enabled);
        assert_eq!(settings.container_threads, Some(1));
        assert_eq!(settings.mock_response_header, None);
    }
}
