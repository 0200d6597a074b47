use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Bloodlens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted upload size for report PDFs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "bloodlens=info,tower_http=info"
}

/// Generative backend settings, read from the environment.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("GROQ_API_URL").unwrap_or_else(|_| {
                "https://api.groq.com/openai/v1/chat/completions".to_string()
            }),
            api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            timeout_secs: std::env::var("GROQ_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend: BackendConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BLOODLENS_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000)));

        Self {
            bind_addr,
            backend: BackendConfig::from_env(),
        }
    }
}
