//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
///
/// Secrets live here for the life of the process; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL. Unset means an in-memory store.
    pub database_url: Option<String>,
    /// Session signing secret (required).
    pub session_secret: String,
    /// Session token lifetime in hours.
    pub session_ttl_hours: u64,
    /// OAuth provider client ID.
    pub oauth_client_id: Option<String>,
    /// OAuth provider client secret.
    pub oauth_client_secret: Option<String>,
    /// OAuth provider authorization endpoint.
    pub oauth_authorize_url: Option<String>,
    /// Redirect URL registered with the OAuth provider.
    pub oauth_redirect_url: Option<String>,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = env::var("QUICKNOTES_SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("QUICKNOTES_SESSION_SECRET is required"))?;

        Ok(Self {
            host: env::var("QUICKNOTES_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("QUICKNOTES_SERVER_PORT")
                .unwrap_or_else(|_| "8374".to_string())
                .parse()
                .unwrap_or(8374),
            database_url: env::var("DATABASE_URL").ok(),
            session_secret,
            session_ttl_hours: env::var("QUICKNOTES_SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            oauth_client_id: env::var("QUICKNOTES_OAUTH_CLIENT_ID").ok(),
            oauth_client_secret: env::var("QUICKNOTES_OAUTH_CLIENT_SECRET").ok(),
            oauth_authorize_url: env::var("QUICKNOTES_OAUTH_AUTHORIZE_URL").ok(),
            oauth_redirect_url: env::var("QUICKNOTES_OAUTH_REDIRECT_URL").ok(),
            log_level: env::var("QUICKNOTES_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if the OAuth provider is configured.
    pub fn oauth_configured(&self) -> bool {
        self.oauth_client_id.is_some()
            && self.oauth_client_secret.is_some()
            && self.oauth_authorize_url.is_some()
            && self.oauth_redirect_url.is_some()
    }
}
