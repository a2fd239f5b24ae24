use crate::auth::jwt::JwtConfig;
use crate::auth::oauth::OAuthConfig;
use crate::storage::StorageConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// External integrations (OAuth providers, object storage, resize service,
/// admin mailbox) are `None` when their variables are absent.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub oauth: OAuthConfig,
    pub storage: Option<StorageConfig>,
    /// Full URL of the resize service's `/invoke` endpoint.
    pub resize_service_url: Option<String>,
    /// Recipient of contact form submissions.
    pub admin_email: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `RESIZE_SERVICE_URL`   | unset (resize skipped)     |
    /// | `ADMIN_EMAIL`          | unset (contact not mailed) |
    ///
    /// JWT, OAuth and storage variables are documented on their own
    /// config types.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            oauth: OAuthConfig::from_env(),
            storage: StorageConfig::from_env(),
            resize_service_url: non_empty_var("RESIZE_SERVICE_URL"),
            admin_email: non_empty_var("ADMIN_EMAIL"),
        }
    }
}

/// Read an env var, treating an empty value as unset.
pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
