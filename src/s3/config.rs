use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build a client, captured once at startup.
#[derive(Debug, Clone)]
pub struct EndpointConfiguration {
    pub region: String,
    /// Overrides the AWS regional endpoint, e.g. `http://localhost:8202`
    pub endpoint_url: Option<String>,
    pub access_key: String,
    pub secret_key: SecretString,
    /// Upper bound for connecting and for a whole request
    pub timeout: Duration,
}

impl EndpointConfiguration {
    #[must_use]
    pub fn new(region: &str, access_key: &str, secret_key: &str) -> Self {
        Self {
            region: region.to_string(),
            endpoint_url: None,
            access_key: access_key.to_string(),
            secret_key: SecretString::new(secret_key.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint_url: &str) -> Self {
        self.endpoint_url = Some(endpoint_url.to_string());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
