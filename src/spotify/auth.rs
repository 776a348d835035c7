//! Access-token cache for the Spotify Web API.
//!
//! Tokens come from the refresh-token grant. The cached token sits behind a
//! `tokio::sync::Mutex`; whoever holds the lock while the token is missing
//! or about to expire performs the refresh, and everyone queued behind it
//! reuses the result.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use super::error::ServiceError;
use super::models::TokenResponse;
use crate::config::{SpotifyConfig, TOKEN_EXPIRY_MARGIN_SECONDS};

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_fresh(&self) -> bool {
        Utc::now() + TimeDelta::seconds(TOKEN_EXPIRY_MARGIN_SECONDS) < self.expires_at
    }
}

/// Absolute expiry for a token issued at `now` that lives `expires_in` seconds.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, ServiceError> {
    TimeDelta::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| ServiceError::Auth(format!("Token lifetime out of range: {}s", expires_in)))
}

struct TokenState {
    token: Option<AccessToken>,
    refresh_token: String,
}

pub struct TokenCache {
    http: Client,
    token_url: String,
    basic_auth: String,
    state: Mutex<TokenState>,
}

impl TokenCache {
    pub fn new(http: Client, config: &SpotifyConfig) -> Self {
        let credentials = format!("{}:{}", config.client_id, config.client_secret);
        Self {
            http,
            token_url: format!(
                "{}/api/token",
                config.accounts_base_url.trim_end_matches('/')
            ),
            basic_auth: format!("Basic {}", general_purpose::STANDARD.encode(credentials)),
            state: Mutex::new(TokenState {
                token: None,
                refresh_token: config.refresh_token.clone(),
            }),
        }
    }

    /// Returns a valid access token, refreshing it at most once per expiry.
    pub async fn access_token(&self) -> Result<String, ServiceError> {
        let mut state = self.state.lock().await;
        if let Some(token) = state.token.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let response = self.refresh(&state.refresh_token).await?;
        let expires_at = expiry_after(Utc::now(), response.expires_in)?;
        if let Some(rotated) = response.refresh_token {
            state.refresh_token = rotated;
        }
        let token = AccessToken {
            value: response.access_token,
            expires_at,
        };
        log::debug!("Spotify access token refreshed, expires {}", token.expires_at);

        let value = token.value.clone();
        state.token = Some(token);
        Ok(value)
    }

    /// Drops the cached token so the next caller refreshes.
    pub async fn invalidate(&self) {
        self.state.lock().await.token = None;
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ServiceError> {
        if refresh_token.is_empty() {
            return Err(ServiceError::Auth("No refresh token configured".to_string()));
        }

        let resp = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, &self.basic_auth)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Auth(format!("Token request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            log::error!("Spotify token refresh rejected ({}): {}", status, text);
            return Err(ServiceError::Auth(format!(
                "Token refresh rejected. Status: {}. Text: {}",
                status, text
            )));
        }

        resp.json::<TokenResponse>()
            .await
            .map_err(|e| ServiceError::Auth(format!("Failed to parse token response: {}", e)))
    }
}
