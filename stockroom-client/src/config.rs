//! Client configuration

/// Product service base URL baked in at build time
///
/// Set `STOCKROOM_API_URL` when compiling to change it; defaults to the
/// local development backend.
pub const DEFAULT_BASE_URL: &str = match option_env!("STOCKROOM_API_URL") {
    Some(url) => url,
    None => "http://localhost:9090",
};

/// Client configuration for connecting to the product service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:9090")
    pub base_url: String,

    /// Request timeout in seconds, `None` waits indefinitely
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
