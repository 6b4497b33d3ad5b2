//! RS256 token generation and validation.
//!
//! Both refresh and access tokens are RS256-signed JWTs carrying a
//! [`Claims`] payload; the two differ only in lifetime. The signing key
//! pair is loaded once at startup into a [`TokenSigner`] and shared
//! read-only across requests.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use libris_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub user_id: DbId,
    /// Unique token identifier (UUID v4) for revocation / audit trails.
    pub jti: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Path of the PEM-encoded RSA private key used to sign tokens.
    pub private_key_file: String,
    /// Path of the PEM-encoded RSA public key used to verify tokens.
    pub public_key_file: String,
    /// Access token lifetime in minutes (default: 5).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in hours (default: 24).
    pub refresh_token_expiry_hours: i64,
}

/// Default path of the RSA private key file.
const DEFAULT_PRIVATE_KEY_FILE: &str = "cert/id_rsa.pri";
/// Default path of the RSA public key file.
const DEFAULT_PUBLIC_KEY_FILE: &str = "cert/id_rsa.pub";
/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 5;
/// Default refresh token expiry in hours.
const DEFAULT_REFRESH_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                     | Default             |
    /// |-----------------------------|---------------------|
    /// | `JWT_PRIVATE_KEY_FILE`      | `cert/id_rsa.pri`   |
    /// | `JWT_PUBLIC_KEY_FILE`       | `cert/id_rsa.pub`   |
    /// | `JWT_ACCESS_EXPIRY_MINS`    | `5`                 |
    /// | `JWT_REFRESH_EXPIRY_HOURS`  | `24`                |
    ///
    /// # Panics
    ///
    /// Panics if an expiry value is present but not a valid i64.
    pub fn from_env() -> Self {
        let private_key_file = std::env::var("JWT_PRIVATE_KEY_FILE")
            .unwrap_or_else(|_| DEFAULT_PRIVATE_KEY_FILE.into());
        let public_key_file =
            std::env::var("JWT_PUBLIC_KEY_FILE").unwrap_or_else(|_| DEFAULT_PUBLIC_KEY_FILE.into());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_hours: i64 = std::env::var("JWT_REFRESH_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_HOURS must be a valid i64");

        Self {
            private_key_file,
            public_key_file,
            access_token_expiry_mins,
            refresh_token_expiry_hours,
        }
    }
}

/// Errors produced when building a signer or validating a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// A configured key file could not be read.
    #[error("cannot read key file {path}: {source}")]
    KeyFile {
        path: String,
        source: std::io::Error,
    },

    /// The embedded expiry is at or before the current time.
    #[error("token is expired")]
    Expired,

    /// Signature, header, or claims failed verification; or a key failed
    /// to parse.
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// RS256 signer/validator holding the parsed key pair.
///
/// Constructed once at startup and handed to the components that need it;
/// there is no ambient global key state.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl TokenSigner {
    /// Build a signer by reading the PEM key pair from the configured paths.
    ///
    /// Errors here (missing file, malformed PEM) are startup-fatal for the
    /// caller; tokens are never signed with a lazily-loaded key.
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        let private_pem =
            std::fs::read(&config.private_key_file).map_err(|e| TokenError::KeyFile {
                path: config.private_key_file.clone(),
                source: e,
            })?;
        let public_pem =
            std::fs::read(&config.public_key_file).map_err(|e| TokenError::KeyFile {
                path: config.public_key_file.clone(),
                source: e,
            })?;

        Self::from_pems(
            &private_pem,
            &public_pem,
            config.access_token_expiry_mins,
            config.refresh_token_expiry_hours,
        )
    }

    /// Build a signer from in-memory PEM key material.
    pub fn from_pems(
        private_pem: &[u8],
        public_pem: &[u8],
        access_expiry_mins: i64,
        refresh_expiry_hours: i64,
    ) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)?;

        // Pinning RS256 here rejects any token whose header declares a
        // different algorithm, including HS256 tokens forged with the
        // public key as an HMAC secret.
        let validation = Validation::new(Algorithm::RS256);

        Ok(TokenSigner {
            encoding_key,
            decoding_key,
            validation,
            access_token_ttl: Duration::minutes(access_expiry_mins),
            refresh_token_ttl: Duration::hours(refresh_expiry_hours),
        })
    }

    /// Sign a token for `user_id` valid for `ttl` starting at `issued_at`.
    ///
    /// Each token gets a fresh `jti` so two tokens minted in the same
    /// instant are still distinct.
    pub fn create_token(
        &self,
        user_id: DbId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_id,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )
    }

    /// Verify a token's signature and return the embedded [`Claims`].
    ///
    /// After signature verification the expiry is compared against the
    /// current time once more; the claim itself is the contract, not
    /// whatever leeway the library applies.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        let claims = token_data.claims;
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Access token lifetime.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Refresh token lifetime.
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }
}
