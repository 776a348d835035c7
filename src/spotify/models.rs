use serde::{Deserialize, Serialize};

use crate::models::{Candidate, CreatedPlaylist, SearchPage};

/// `POST /api/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    /// Present when Spotify rotates the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<TrackObject>>,
}

impl SearchResponse {
    pub fn into_page(self) -> SearchPage {
        let Some(page) = self.tracks else {
            return SearchPage::default();
        };
        let item_count = page.items.len();
        let candidates = page
            .items
            .into_iter()
            .flatten()
            .filter_map(TrackObject::into_candidate)
            .collect();
        SearchPage {
            candidates,
            item_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    /// Null for local files.
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

impl TrackObject {
    fn into_candidate(self) -> Option<Candidate> {
        let id = self.id?;
        let artist = self
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();
        Some(Candidate {
            id,
            title: self.name,
            artist,
            uri: self.uri,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub external_urls: Option<ExternalUrls>,
}

impl PlaylistObject {
    pub fn into_created(self) -> Option<CreatedPlaylist> {
        let external_url = self.external_urls?.spotify?;
        Some(CreatedPlaylist {
            id: self.id,
            external_url,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest<'a> {
    pub uris: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserObject {
    pub id: String,
}
