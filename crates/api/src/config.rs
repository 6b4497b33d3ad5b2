use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables. Missing or unreadable key files are
/// fatal at startup, never at request time.
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
    /// JWT token configuration (key file paths, expiry durations).
    pub jwt: JwtConfig,
    /// Request body integrity configuration (shared HMAC secret).
    pub integrity: IntegrityConfig,
}

/// Shared secret for the request body integrity check.
///
/// Deliberately a separate key from the JWT signing pair: clients hold this
/// secret, they must never hold anything that verifies or mints tokens.
#[derive(Debug, Clone)]
pub struct IntegrityConfig {
    /// Raw secret bytes, loaded once at startup.
    pub secret: Vec<u8>,
}

/// Default path of the integrity secret file.
const DEFAULT_INTEGRITY_SECRET_FILE: &str = "cert/hmac.key";

impl IntegrityConfig {
    /// Load the shared secret from the file named by `INTEGRITY_SECRET_FILE`
    /// (default: `cert/hmac.key`).
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read or is empty.
    pub fn from_env() -> Self {
        let path = std::env::var("INTEGRITY_SECRET_FILE")
            .unwrap_or_else(|_| DEFAULT_INTEGRITY_SECRET_FILE.into());

        let secret = std::fs::read(&path)
            .unwrap_or_else(|e| panic!("Failed to read integrity secret file '{path}': {e}"));
        assert!(!secret.is_empty(), "Integrity secret must not be empty");

        Self { secret }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `JWT_PRIVATE_KEY_FILE`    | `cert/id_rsa.pri`       |
    /// | `JWT_PUBLIC_KEY_FILE`     | `cert/id_rsa.pub`       |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `5`                     |
    /// | `JWT_REFRESH_EXPIRY_HOURS`| `24`                    |
    /// | `INTEGRITY_SECRET_FILE`   | `cert/hmac.key`         |
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

        let jwt = JwtConfig::from_env();
        let integrity = IntegrityConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            integrity,
        }
    }
}
