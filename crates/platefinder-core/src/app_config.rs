#[derive(Clone)]
pub struct AppConfig {
    /// Credential for the upstream places API. Opaque to the pipeline.
    pub places_api_key: String,
    /// Search radius around the origin, in meters.
    pub search_radius_m: u32,
    /// Cap on the number of places returned by one query.
    pub max_results: usize,
    pub request_timeout_secs: u64,
    /// Wait between successive search pages. The upstream continuation token
    /// is not valid immediately after issuance.
    pub page_delay_ms: u64,
    /// Fan-out bound for concurrent detail lookups.
    pub max_concurrent_lookups: usize,
    /// `maxwidth` parameter used when expanding photo references into URLs.
    pub photo_max_width: u32,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("search_radius_m", &self.search_radius_m)
            .field("max_results", &self.max_results)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .field("photo_max_width", &self.photo_max_width)
            .field("log_level", &self.log_level)
            .finish()
    }
}
