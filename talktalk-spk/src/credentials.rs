//! Google Cloud credentials
//!
//! Two forms are supported: a service-account key file (the file named by
//! `GOOGLE_APPLICATION_CREDENTIALS`) exchanged for OAuth2 access tokens, or a
//! plain API key sent as a query parameter.

use crate::error::SpeechError;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const API_KEY_ENV: &str = "GOOGLE_CLOUD_API_KEY";

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Tokens are refreshed this long before the provider says they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// How requests to the provider are authenticated
pub enum Credentials {
    ApiKey(String),
    ServiceAccount(ServiceAccount),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("Credentials::ApiKey(<redacted>)"),
            Credentials::ServiceAccount(account) => f
                .debug_tuple("Credentials::ServiceAccount")
                .field(&account.client_email())
                .finish(),
        }
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    ///
    /// A service-account file wins over an API key. `configured_key` is checked
    /// before `GOOGLE_CLOUD_API_KEY`.
    pub fn from_env(configured_key: Option<&str>) -> Result<Self, SpeechError> {
        let file = std::env::var_os(CREDENTIALS_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let key = configured_key
            .map(str::to_string)
            .or_else(|| std::env::var(API_KEY_ENV).ok());
        Self::resolve(file.as_deref(), key)
    }

    /// Resolution without touching the environment
    pub fn resolve(credentials_file: Option<&Path>, api_key: Option<String>) -> Result<Self, SpeechError> {
        if let Some(path) = credentials_file {
            let account = ServiceAccount::from_file(path)?;
            info!("Using service account {} for Google Cloud TTS", account.client_email());
            return Ok(Credentials::ServiceAccount(account));
        }

        match api_key {
            Some(key) if !key.trim().is_empty() => {
                info!("Using API key for Google Cloud TTS");
                Ok(Credentials::ApiKey(key))
            }
            _ => Err(SpeechError::Config(format!(
                "No Google Cloud credentials: set {} to a service account key file, or provide an API key ({} or provider.api_key)",
                CREDENTIALS_ENV, API_KEY_ENV
            ))),
        }
    }
}

/// The fields of a service-account key file that token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Service account that mints OAuth2 access tokens
pub struct ServiceAccount {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> Result<Self, SpeechError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SpeechError::Config(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&contents).map_err(|e| {
            SpeechError::Config(format!(
                "Invalid credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_key(key)
    }

    pub fn from_key(key: ServiceAccountKey) -> Result<Self, SpeechError> {
        if key.client_email.is_empty() {
            return Err(SpeechError::Config(
                "Service account client_email cannot be empty".to_string(),
            ));
        }
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SpeechError::Config(format!("Invalid service account private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn token_uri(&self) -> &str {
        &self.key.token_uri
    }

    /// Signed JWT assertion for the token endpoint
    fn assertion(&self) -> Result<String, SpeechError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to sign token assertion: {}", e)))
    }

    /// Current access token, exchanging a fresh assertion when needed
    pub async fn access_token(&self, client: &reqwest::Client) -> Result<String, SpeechError> {
        let fresh = self
            .cached
            .lock()
            .as_ref()
            .filter(|cached| Instant::now() < cached.refresh_at)
            .map(|cached| cached.token.clone());
        if let Some(token) = fresh {
            return Ok(token);
        }

        debug!("Exchanging service account assertion at {}", self.key.token_uri);
        let assertion = self.assertion()?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to parse token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
        *self.cached.lock() = Some(CachedToken {
            token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        });

        Ok(token.access_token)
    }
}
