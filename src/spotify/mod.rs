pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::TokenCache;
pub use client::SpotifyClient;
pub use error::ServiceError;
