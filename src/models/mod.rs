use serde::{Deserialize, Serialize};

/// A track returned by a search, not yet confirmed as a textual match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    pub uri: String,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            uri: uri.into(),
        }
    }
}

/// A playlist that exists on the service side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub external_url: String,
}

/// One page of search results.
///
/// `item_count` is what the service returned before unusable entries (null
/// items, local files) were dropped, so paging can tell an exhausted result
/// set apart from a page with nothing playable on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub candidates: Vec<Candidate>,
    pub item_count: usize,
}

impl SearchPage {
    pub fn is_exhausted(&self) -> bool {
        self.item_count == 0
    }
}

impl From<Vec<Candidate>> for SearchPage {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self {
            item_count: candidates.len(),
            candidates,
        }
    }
}
