//! Turns free-form text into a playlist whose song titles spell it out.
//!
//! The [`resolver`] walks each sentence word by word, asking a
//! [`providers::CandidateProvider`] for songs whose title is exactly the next
//! few words. [`playlist::PlaylistManager`] creates the playlist and appends
//! whatever was found; [`spotify::SpotifyClient`] is the production backend
//! for both sides.

pub mod config;
pub mod errors;
pub mod models;
pub mod playlist;
pub mod providers;
pub mod reply;
pub mod resolver;
pub mod spotify;

pub use config::{AppConfig, ResolverConfig, SpotifyConfig};
pub use errors::PlaylistError;
pub use models::{Candidate, CreatedPlaylist, SearchPage};
pub use playlist::PlaylistManager;
pub use resolver::{ResolvedTrackList, Resolver};
pub use spotify::SpotifyClient;
