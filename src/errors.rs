use thiserror::Error;

use crate::resolver::ResolveError;
use crate::spotify::ServiceError;

/// Fatal failures of the text-to-playlist pipeline.
///
/// Search failures are not listed here: the resolver absorbs them and
/// keeps matching with shorter windows.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Failed to create playlist: {0}")]
    PlaylistCreate(String),

    #[error("Failed to add tracks to playlist {playlist_id}: {message}")]
    TrackAdd {
        playlist_id: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlaylistError {
    /// Maps a failed create call, keeping credential problems distinct.
    pub fn from_create(e: ServiceError) -> Self {
        match e {
            ServiceError::Auth(msg) => PlaylistError::Auth(msg),
            other => PlaylistError::PlaylistCreate(other.to_string()),
        }
    }

    /// Maps a failed append call for the given playlist.
    pub fn from_add(playlist_id: &str, e: ServiceError) -> Self {
        match e {
            ServiceError::Auth(msg) => PlaylistError::Auth(msg),
            other => PlaylistError::TrackAdd {
                playlist_id: playlist_id.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<ResolveError> for PlaylistError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Auth(inner) => PlaylistError::Auth(inner.to_string()),
        }
    }
}
