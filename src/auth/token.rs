//! OAuth2 access tokens for a service account.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::ServiceAccountKey;
use crate::config::{DATASTORE_SCOPE, JWT_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS};
use crate::error_handling::AuthError;

/// OAuth2 token with expiration
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// True once the token is within the refresh margin of its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Mints and caches access tokens for one service account.
#[derive(Debug)]
pub struct TokenProvider {
    key: ServiceAccountKey,
    client: Arc<reqwest::Client>,
    token_cache: RwLock<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, client: Arc<reqwest::Client>) -> Self {
        Self {
            key,
            client,
            token_cache: RwLock::new(None),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.key.project_id
    }

    /// Returns a valid access token, exchanging a new assertion when the cached
    /// one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        {
            let cache = self.token_cache.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cache = self.token_cache.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(ref token) = *cache {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_token().await?;
        let token_string = new_token.token.clone();
        *cache = Some(new_token);
        Ok(token_string)
    }

    fn sign_assertion(&self) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.key.token_uri,
            exp: now + JWT_LIFETIME_SECS,
            iat: now,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&header, &claims, &encoding_key)?)
    }

    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        debug!("Requesting access token for {}", self.key.client_email);
        let assertion = self.sign_assertion()?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenRejected {
                status: status.as_u16(),
                body,
            });
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(AccessToken {
            token: token_response.access_token,
            expires_at: Utc::now() + Duration::seconds(token_response.expires_in),
        })
    }
}
