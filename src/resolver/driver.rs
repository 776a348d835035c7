use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::models::Candidate;
use crate::providers::CandidateProvider;
use crate::resolver::matcher::WindowMatcher;
use crate::resolver::normalize::{split_sentences, WordQueue};
use crate::resolver::ResolveError;

/// Tracks resolved from one input text, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTrackList {
    pub tracks: Vec<Candidate>,
}

impl ResolvedTrackList {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.uri.clone()).collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.id.as_str()).collect()
    }

    fn extend(&mut self, other: ResolvedTrackList) {
        self.tracks.extend(other.tracks);
    }
}

/// Turns text into an ordered track list, one sentence at a time.
pub struct Resolver {
    matcher: WindowMatcher,
}

impl Resolver {
    pub fn new(provider: Arc<dyn CandidateProvider>, config: ResolverConfig) -> Self {
        Self {
            matcher: WindowMatcher::new(provider, config),
        }
    }

    pub async fn resolve(&self, text: &str) -> Result<ResolvedTrackList, ResolveError> {
        let mut resolved = ResolvedTrackList::default();
        for sentence in split_sentences(text) {
            resolved.extend(self.resolve_sentence(&sentence).await?);
        }
        log::info!("Resolved {} track(s) from input", resolved.len());
        Ok(resolved)
    }

    pub async fn resolve_sentence(&self, sentence: &str) -> Result<ResolvedTrackList, ResolveError> {
        let mut queue = WordQueue::from_text(sentence);
        let mut resolved = ResolvedTrackList::default();

        while !queue.is_empty() {
            let before = queue.len();
            let step = self.matcher.match_prefix(&queue).await?;

            if let Some(track) = step.track {
                log::info!("{} by {}", track.title, track.artist);
                resolved.tracks.push(track);
            }
            queue.consume(step.consumed);
            debug_assert!(queue.len() < before);
        }

        Ok(resolved)
    }
}
