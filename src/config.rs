use std::time::Duration;

pub const DEFAULT_API_ROOT: &str = "https://api.wmata.com";
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_root: String,
    pub api_key: String,
    // Applies to every single upstream call, including connect time.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            api_key: String::new(),
            timeout: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
        }
    }
}

impl UpstreamConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root.trim_end_matches('/'), path)
    }
}
