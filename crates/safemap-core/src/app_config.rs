use std::net::SocketAddr;
use std::path::PathBuf;

/// Deployment environment, from `SAFEMAP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    #[must_use]
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by the server and the CLI client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding `index.html`, `legado.html` and `data/`.
    pub static_root: PathBuf,
    /// Base URL the client resolves dataset endpoints against.
    pub api_base_url: String,
    pub cache_dir: PathBuf,
    pub cache_ttl_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_per_minute: usize,
}
