use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::auth::TokenCache;
use super::error::ServiceError;
use super::models::{
    AddTracksRequest, CreatePlaylistRequest, PlaylistObject, SearchResponse, SnapshotResponse,
    UserObject,
};
use crate::config::{SpotifyConfig, REQUEST_TIMEOUT_SECONDS};
use crate::models::{CreatedPlaylist, SearchPage};
use crate::providers::{CandidateProvider, PlaylistService, SearchKind};

/// Spotify Web API client backing both the search and the playlist side.
///
/// Constructed explicitly from [`SpotifyConfig`]; share it behind an `Arc`.
pub struct SpotifyClient {
    client: Client,
    api_base_url: String,
    tokens: TokenCache,
    user_id: OnceCell<String>,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .user_agent(format!("playlist-it/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Config(format!("HTTP client setup failed: {}", e)))?;

        let user_id = OnceCell::new();
        if let Some(id) = config.user_id.as_ref().filter(|id| !id.is_empty()) {
            let _ = user_id.set(id.clone());
        }

        Ok(Self {
            tokens: TokenCache::new(client.clone(), config),
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// The account playlists are created under, looked up once if not configured.
    pub async fn user_id(&self) -> Result<&str, ServiceError> {
        let id = self
            .user_id
            .get_or_try_init(|| async {
                let me: UserObject = self
                    .send_json(self.client.get(self.url("/v1/me")), "get_current_user")
                    .await?;
                log::info!("Creating playlists as Spotify user {}", me.id);
                Ok::<_, ServiceError>(me.id)
            })
            .await?;
        Ok(id.as_str())
    }

    async fn send_json<T>(&self, request: RequestBuilder, operation: &str) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{} was unauthorized, dropping cached token", operation);
            self.tokens.invalidate().await;
            return Err(ServiceError::Auth(format!("{} unauthorized: {}", operation, text)));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("Rate limited by Spotify during {}", operation);
        }

        if !status.is_success() {
            log::debug!("{} failed ({}): {}", operation, status, text);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ServiceError::Parse(format!("Failed to parse {} response: {}", operation, e)))
    }
}

#[async_trait]
impl CandidateProvider for SpotifyClient {
    fn id(&self) -> &str {
        "spotify"
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ServiceError> {
        let limit = limit.clamp(1, 50).to_string();
        let offset = offset.to_string();
        let request = self.client.get(self.url("/v1/search")).query(&[
            ("q", query),
            ("type", kind.as_str()),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ]);

        let response: SearchResponse = self.send_json(request, "search").await?;
        Ok(response.into_page())
    }
}

#[async_trait]
impl PlaylistService for SpotifyClient {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist, ServiceError> {
        let user_id = self.user_id().await?;
        let request = self
            .client
            .post(self.url(&format!("/v1/users/{}/playlists", user_id)))
            .json(&CreatePlaylistRequest {
                name,
                description,
                public,
            });

        let playlist: PlaylistObject = self.send_json(request, "create_playlist").await?;
        let id = playlist.id.clone();
        playlist.into_created().ok_or_else(|| {
            ServiceError::Parse(format!("Playlist {} has no external URL", id))
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ServiceError> {
        let request = self
            .client
            .post(self.url(&format!("/v1/playlists/{}/tracks", playlist_id)))
            .json(&AddTracksRequest { uris });

        let snapshot: SnapshotResponse = self.send_json(request, "add_tracks").await?;
        log::debug!(
            "Added {} track(s) to {} (snapshot {})",
            uris.len(),
            playlist_id,
            snapshot.snapshot_id
        );
        Ok(())
    }
}
