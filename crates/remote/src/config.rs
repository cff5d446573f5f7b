/// Remote store configuration loaded from environment variables.
///
/// Defaults target a local development backend. In production, override
/// via environment variables (a `.env` file is honored if present).
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted backend (default: `http://localhost:54321`).
    pub base_url: String,
    /// Project API key sent with every request (default: empty).
    pub api_key: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                  |
    /// |-----------------------|--------------------------|
    /// | `REMOTE_BASE_URL`     | `http://localhost:54321` |
    /// | `REMOTE_API_KEY`      | (empty)                  |
    /// | `REMOTE_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let base_url =
            get("REMOTE_BASE_URL").unwrap_or_else(|| "http://localhost:54321".into());

        let api_key = get("REMOTE_API_KEY").unwrap_or_default();

        let timeout_secs: u64 = get("REMOTE_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REMOTE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }
}
