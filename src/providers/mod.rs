pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use traits::{CandidateProvider, PlaylistService};
pub use types::SearchKind;
