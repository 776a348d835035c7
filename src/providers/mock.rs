//! In-memory fakes of the provider traits for unit tests.

use crate::models::{Candidate, CreatedPlaylist, SearchPage};
use crate::providers::traits::{CandidateProvider, PlaylistService};
use crate::providers::types::SearchKind;
use crate::resolver::normalize;
use crate::spotify::ServiceError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

pub fn track(id: &str, title: &str, artist: &str) -> Candidate {
    Candidate::new(id, title, artist, format!("spotify:track:{}", id))
}

/// Returns every catalog track with a title word that contains, or is
/// contained in, a query word. Catalog order, sliced by `offset`/`limit`.
///
/// `unplayable` entries sit ahead of the matches: they count towards a page's
/// item total but never surface as candidates, like local files do.
#[derive(Default)]
pub struct InMemoryCatalog {
    tracks: Vec<Candidate>,
    failing_queries: HashSet<String>,
    failing_pages: HashSet<(String, u32)>,
    unplayable: usize,
    auth_broken: bool,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl InMemoryCatalog {
    pub fn new(tracks: Vec<Candidate>) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    /// Fails only the page of `query` starting at `offset`.
    pub fn failing_at(mut self, query: &str, offset: u32) -> Self {
        self.failing_pages.insert((query.to_string(), offset));
        self
    }

    pub fn with_unplayable(mut self, count: usize) -> Self {
        self.unplayable = count;
        self
    }

    pub fn with_broken_auth(mut self) -> Self {
        self.auth_broken = true;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CandidateProvider for InMemoryCatalog {
    fn id(&self) -> &str {
        "memory"
    }

    async fn search(
        &self,
        query: &str,
        _kind: SearchKind,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ServiceError> {
        self.calls.lock().unwrap().push((query.to_string(), offset));

        if self.auth_broken {
            return Err(ServiceError::Auth("refresh token revoked".into()));
        }
        if self.failing_queries.contains(query)
            || self.failing_pages.contains(&(query.to_string(), offset))
        {
            return Err(ServiceError::Network("connection reset".into()));
        }

        let wanted: Vec<&str> = query.split_whitespace().collect();
        let matching: Vec<&Candidate> = self
            .tracks
            .iter()
            .filter(|t| {
                normalize::normalize(&t.title).split_whitespace().any(|w| {
                    wanted.iter().any(|q| w.contains(q) || q.contains(w))
                })
            })
            .collect();

        let start = offset as usize;
        let end = (start + limit as usize).min(self.unplayable + matching.len());
        if start >= end {
            return Ok(SearchPage::default());
        }
        let candidates = (start.max(self.unplayable)..end)
            .map(|position| matching[position - self.unplayable].clone())
            .collect();
        Ok(SearchPage {
            candidates,
            item_count: end - start,
        })
    }
}

/// Records create/add calls; either call can be made to fail.
#[derive(Default)]
pub struct RecordingPlaylistService {
    pub fail_create: bool,
    pub fail_add: bool,
    pub created: Mutex<Vec<(String, String, bool)>>,
    pub added: Mutex<Vec<Vec<String>>>,
}

impl RecordingPlaylistService {
    pub fn added_uris(&self) -> Vec<String> {
        self.added.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl PlaylistService for RecordingPlaylistService {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist, ServiceError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), description.to_string(), public));
        if self.fail_create {
            return Err(ServiceError::Api {
                status: 403,
                message: "Insufficient client scope".into(),
            });
        }
        Ok(CreatedPlaylist {
            id: "pl1".into(),
            external_url: "https://open.spotify.com/playlist/pl1".into(),
        })
    }

    async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<(), ServiceError> {
        if self.fail_add {
            return Err(ServiceError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        self.added.lock().unwrap().push(uris.to_vec());
        Ok(())
    }
}
