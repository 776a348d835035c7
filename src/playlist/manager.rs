use std::sync::Arc;

use crate::config::{ResolverConfig, ADD_TRACKS_BATCH_SIZE};
use crate::errors::PlaylistError;
use crate::models::CreatedPlaylist;
use crate::providers::{CandidateProvider, PlaylistService};
use crate::resolver::Resolver;

/// Builds a playlist on the service from free text.
///
/// Order of work: create the playlist, resolve the text, append the tracks.
/// Nothing is undone on failure; a playlist created before a later step
/// failed stays on the service.
pub struct PlaylistManager {
    resolver: Resolver,
    service: Arc<dyn PlaylistService>,
}

impl PlaylistManager {
    pub fn new(
        provider: Arc<dyn CandidateProvider>,
        service: Arc<dyn PlaylistService>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            resolver: Resolver::new(provider, config),
            service,
        }
    }

    pub async fn make_playlist_from_text(
        &self,
        text: &str,
        name: &str,
    ) -> Result<CreatedPlaylist, PlaylistError> {
        let description = format!("\"{}\"", text);
        let playlist = self
            .service
            .create_playlist(name, &description, true)
            .await
            .map_err(|e| {
                log::error!("Error creating playlist '{}': {}", name, e);
                PlaylistError::from_create(e)
            })?;
        log::info!("Created playlist '{}' ({})", name, playlist.id);

        let resolved = self.resolver.resolve(text).await.map_err(|e| {
            log::error!("Error resolving tracks for playlist {}: {}", playlist.id, e);
            PlaylistError::from(e)
        })?;

        let uris = resolved.uris();
        for batch in uris.chunks(ADD_TRACKS_BATCH_SIZE) {
            self.service
                .add_tracks(&playlist.id, batch)
                .await
                .map_err(|e| {
                    log::error!("Error adding songs to playlist {}: {}", playlist.id, e);
                    PlaylistError::from_add(&playlist.id, e)
                })?;
        }

        log::info!(
            "Playlist {} ready with {} track(s): {}",
            playlist.id,
            uris.len(),
            playlist.external_url
        );
        Ok(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::{track, InMemoryCatalog, RecordingPlaylistService};

    fn manager(
        catalog: Arc<InMemoryCatalog>,
        service: Arc<RecordingPlaylistService>,
    ) -> PlaylistManager {
        PlaylistManager::new(catalog, service, ResolverConfig::default())
    }

    #[tokio::test]
    async fn test_creates_then_appends_in_order() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![
            track("lib", "Let It Be", "The Beatles"),
            track("help", "Help!", "The Beatles"),
        ]));
        let service = Arc::new(RecordingPlaylistService::default());

        let playlist = manager(catalog, service.clone())
            .make_playlist_from_text("Let it be. Help!", "Playlist for tester")
            .await
            .unwrap();

        assert_eq!(playlist.external_url, "https://open.spotify.com/playlist/pl1");
        let created = service.created.lock().unwrap().clone();
        assert_eq!(
            created,
            vec![(
                "Playlist for tester".to_string(),
                "\"Let it be. Help!\"".to_string(),
                true
            )]
        );
        assert_eq!(
            service.added_uris(),
            vec!["spotify:track:lib", "spotify:track:help"]
        );
    }

    #[tokio::test]
    async fn test_create_failure_skips_resolution() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![track("lib", "Let It Be", "X")]));
        let service = Arc::new(RecordingPlaylistService {
            fail_create: true,
            ..Default::default()
        });

        let result = manager(catalog.clone(), service.clone())
            .make_playlist_from_text("Let it be", "t")
            .await;

        assert!(matches!(result, Err(PlaylistError::PlaylistCreate(_))));
        assert_eq!(catalog.call_count(), 0);
        assert!(service.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_failure_reports_error() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![track("lib", "Let It Be", "X")]));
        let service = Arc::new(RecordingPlaylistService {
            fail_add: true,
            ..Default::default()
        });

        let result = manager(catalog, service.clone())
            .make_playlist_from_text("Let it be", "t")
            .await;

        assert!(matches!(result, Err(PlaylistError::TrackAdd { .. })));
        // the playlist was created and is left in place
        assert_eq!(service.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_tracks_still_succeeds() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![]));
        let service = Arc::new(RecordingPlaylistService::default());

        let result = manager(catalog, service.clone())
            .make_playlist_from_text("zzzqx flubber", "t")
            .await;

        assert!(result.is_ok());
        assert!(service.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_large_lists_are_batched() {
        let tracks = (0..250)
            .map(|i| track(&i.to_string(), &format!("w{}", i), "X"))
            .collect();
        let text = (0..250).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(". ");
        let catalog = Arc::new(InMemoryCatalog::new(tracks));
        let service = Arc::new(RecordingPlaylistService::default());

        manager(catalog, service.clone())
            .make_playlist_from_text(&text, "t")
            .await
            .unwrap();

        let batches: Vec<usize> = service.added.lock().unwrap().iter().map(Vec::len).collect();
        assert_eq!(batches, vec![100, 100, 50]);
        assert_eq!(service.added_uris()[249], "spotify:track:249");
    }

    #[tokio::test]
    async fn test_search_auth_failure_surfaces_as_auth() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![]).with_broken_auth());
        let service = Arc::new(RecordingPlaylistService::default());

        let result = manager(catalog, service)
            .make_playlist_from_text("hello", "t")
            .await;

        assert!(matches!(result, Err(PlaylistError::Auth(_))));
    }
}
