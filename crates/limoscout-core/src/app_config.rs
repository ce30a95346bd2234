use std::path::PathBuf;

/// Runtime settings read from the environment.
///
/// The Places API key is not part of this struct; the CLI takes it from
/// `--api-key` / `GOOGLE_PLACES_API_KEY`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_max_attempts: u32,
    pub details_max_attempts: u32,
    /// Custom region definition used instead of the built-ins.
    pub regions_path: Option<PathBuf>,
}
