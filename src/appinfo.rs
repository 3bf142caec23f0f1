//! The boundary to the platform's application-metadata service. The nozzle
//! only ever asks one question -- "what org / space / app does this guid name?"
//! -- and it never treats a failed answer as an error, so the boundary is a
//! single infallible lookup.

/// The resolved identity of an application guid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    /// The application's name. Empty means the guid is unknown; the label
    /// maker folds an empty name into "no application path".
    pub app_name: String,
    /// The name of the org the application runs in.
    pub org_name: String,
    /// The name of the space the application runs in.
    pub space_name: String,
}

/// A source of `AppInfo`, typically a caching client of the platform API.
///
/// Implementations must not fail: an unknown guid or an upstream error
/// resolves to an all-empty record. Implementations are expected to be safe
/// for concurrent lookup; the nozzle itself holds no state across calls.
pub trait AppInfoResolver {
    /// Resolve an application guid. Returns an all-empty record on any miss.
    fn lookup(&self, guid: &str) -> AppInfo;
}

/// A resolver that knows no applications. Useful for wiring a nozzle against
/// a platform without API credentials, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

impl AppInfoResolver for NullResolver {
    fn lookup(&self, _guid: &str) -> AppInfo {
        AppInfo::default()
    }
}
