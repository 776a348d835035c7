//! Sentence-to-track resolution.
//!
//! Text is split into sentences, each sentence into a queue of normalized
//! words. The [`Resolver`] repeatedly asks the [`WindowMatcher`] for the
//! longest run of leading words that is exactly a song title, falling back
//! to fuzzy matching for single words, and always consumes at least one
//! word per step.

pub mod driver;
pub mod fuzzy;
pub mod matcher;
pub mod normalize;

pub use driver::{ResolvedTrackList, Resolver};
pub use fuzzy::fuzzy_match;
pub use matcher::{Match, WindowMatcher};
pub use normalize::{normalize, split_sentences, words, WordQueue};

use thiserror::Error;

use crate::spotify::ServiceError;

/// Errors that abort a resolution pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Search authorization failed: {0}")]
    Auth(ServiceError),
}
