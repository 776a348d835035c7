//! Head-anchored window matcher.
//!
//! For a queue `w0 w1 w2 ...` the matcher searches `w0..wL`, then
//! `w0..wL-1`, down to `w0` alone, and takes the first window whose text is
//! exactly the normalized title of some search result. Only the queue head
//! is ever considered as a window start.

use std::sync::Arc;

use crate::config::{ResolverConfig, SEARCH_PAGE_SIZE};
use crate::models::Candidate;
use crate::providers::{CandidateProvider, SearchKind};
use crate::resolver::fuzzy::fuzzy_match;
use crate::resolver::normalize::{normalize, WordQueue};
use crate::resolver::ResolveError;

/// Outcome of one matcher step. `consumed` is always at least one and never
/// more than the queue held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub track: Option<Candidate>,
    pub consumed: usize,
}

impl Match {
    /// `available` is the length of the queue the match was taken from.
    pub fn found(track: Candidate, consumed: usize, available: usize) -> Self {
        Self {
            track: Some(track),
            consumed: consumed.clamp(1, available.max(1)),
        }
    }

    /// Nothing matched; the leading word is dropped.
    pub fn skip() -> Self {
        Self {
            track: None,
            consumed: 1,
        }
    }
}

/// Candidates fetched for one window, plus the exact hit if paging found one.
struct WindowSearch {
    candidates: Vec<Candidate>,
    exact: Option<Candidate>,
}

pub struct WindowMatcher {
    provider: Arc<dyn CandidateProvider>,
    config: ResolverConfig,
}

impl WindowMatcher {
    pub fn new(provider: Arc<dyn CandidateProvider>, config: ResolverConfig) -> Self {
        Self { provider, config }
    }

    /// Resolves the head of `queue`. The queue itself is not modified.
    pub async fn match_prefix(&self, queue: &WordQueue) -> Result<Match, ResolveError> {
        if queue.is_empty() {
            return Ok(Match::skip());
        }

        let longest = self.config.lookahead.max(1).min(queue.len());
        let mut single_word_candidates = Vec::new();

        for width in (1..=longest).rev() {
            let query = queue.window(width);
            log::debug!("Trying window of {} word(s): '{}'", width, query);

            let search = self.search_window(&query).await?;
            if let Some(track) = search.exact {
                return Ok(Match::found(track, width, queue.len()));
            }
            if width == 1 {
                single_word_candidates = search.candidates;
            }
        }

        let word = queue.window(1);
        match fuzzy_match(&word, &single_word_candidates, self.config.fuzzy_cutoff) {
            Some(track) => Ok(Match::found(track.clone(), 1, queue.len())),
            None => {
                log::debug!("No match for '{}', dropping it", word);
                Ok(Match::skip())
            }
        }
    }

    /// Pages through results for `query`, stopping at the first exact title hit,
    /// an empty page, or the page cap.
    ///
    /// A failed search call counts as an empty result for this window.
    /// Authentication failures are fatal and propagate.
    async fn search_window(&self, query: &str) -> Result<WindowSearch, ResolveError> {
        let mut candidates = Vec::new();

        for page in 0..self.config.page_cap.max(1) {
            let offset = SEARCH_PAGE_SIZE * page as u32;
            let page_result = match self
                .provider
                .search(query, SearchKind::Track, SEARCH_PAGE_SIZE, offset)
                .await
            {
                Ok(page_result) => page_result,
                Err(e) if e.is_auth() => return Err(ResolveError::Auth(e)),
                Err(e) => {
                    log::warn!(
                        "Search for '{}' on {} failed (offset {}): {}",
                        query,
                        self.provider.id(),
                        offset,
                        e
                    );
                    return Ok(WindowSearch {
                        candidates: Vec::new(),
                        exact: None,
                    });
                }
            };

            if page_result.is_exhausted() {
                break;
            }

            let items = page_result.candidates;
            if let Some(hit) = items.iter().find(|c| normalize(&c.title) == query) {
                return Ok(WindowSearch {
                    exact: Some(hit.clone()),
                    candidates,
                });
            }
            candidates.extend(items);
        }

        Ok(WindowSearch {
            candidates,
            exact: None,
        })
    }
}
