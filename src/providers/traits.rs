use crate::models::{CreatedPlaylist, SearchPage};
use crate::providers::types::SearchKind;
use crate::spotify::ServiceError;
use async_trait::async_trait;

/// Ranked search over a track catalog.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Unique identifier (e.g., "spotify")
    fn id(&self) -> &str;

    /// One page of results, best match first. `limit` is at most 50.
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ServiceError>;
}

#[async_trait]
pub trait PlaylistService: Send + Sync {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist, ServiceError>;

    /// Appends `uris` in order to the end of the playlist.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ServiceError>;
}
