use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::PlaylistError;

pub const DEFAULT_LOOKAHEAD: usize = 5;
pub const DEFAULT_PAGE_CAP: usize = 5;
pub const SEARCH_PAGE_SIZE: u32 = 50;
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;
pub const ADD_TRACKS_BATCH_SIZE: usize = 100;
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// Tokens are refreshed this long before Spotify says they expire.
pub const TOKEN_EXPIRY_MARGIN_SECONDS: i64 = 60;

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com";
pub const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_BOT_HANDLE: &str = "playlist_it";

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playlist-it")
}

pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join("config.json")
}

/// Tuning knobs for the window matcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Longest run of words tried as one title.
    pub lookahead: usize,
    /// Search pages fetched per query.
    pub page_cap: usize,
    pub fuzzy_cutoff: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            page_cap: DEFAULT_PAGE_CAP,
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Looked up through `/v1/me` when empty.
    pub user_id: Option<String>,
    pub api_base_url: String,
    pub accounts_base_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            user_id: None,
            api_base_url: SPOTIFY_API_URL.to_string(),
            accounts_base_url: SPOTIFY_ACCOUNTS_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub spotify: SpotifyConfig,
    pub resolver: ResolverConfig,
    /// Mentions from this account are ignored by the reply handler.
    pub bot_handle: Option<String>,
}

impl AppConfig {
    /// Reads the config file if there is one, then applies environment overrides.
    pub fn load() -> Result<Self, PlaylistError> {
        let path = get_config_file_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, PlaylistError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PlaylistError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            PlaylistError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Overrides values from a key lookup, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SPOTIPY_CLIENT_ID") {
            self.spotify.client_id = v;
        }
        if let Some(v) = lookup("SPOTIPY_CLIENT_SECRET") {
            self.spotify.client_secret = v;
        }
        if let Some(v) = lookup("SPOTIFY_REFRESH_TOKEN") {
            self.spotify.refresh_token = v;
        }
        if let Some(v) = lookup("SPOTIFY_USER_ID") {
            self.spotify.user_id = Some(v);
        }
        if let Some(v) = lookup("PLAYLIST_IT_BOT_HANDLE") {
            self.bot_handle = Some(v);
        }
        if let Some(n) = lookup("PLAYLIST_IT_LOOKAHEAD").and_then(|v| v.parse().ok()) {
            self.resolver.lookahead = n;
        }
        if let Some(n) = lookup("PLAYLIST_IT_PAGE_CAP").and_then(|v| v.parse().ok()) {
            self.resolver.page_cap = n;
        }
    }

    pub fn validate(&self) -> Result<(), PlaylistError> {
        let missing: Vec<&str> = [
            ("client_id", &self.spotify.client_id),
            ("client_secret", &self.spotify.client_secret),
            ("refresh_token", &self.spotify.refresh_token),
        ]
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| *k)
        .collect();

        if !missing.is_empty() {
            return Err(PlaylistError::Config(format!(
                "Missing Spotify credentials: {}",
                missing.join(", ")
            )));
        }
        if self.resolver.lookahead == 0 || self.resolver.page_cap == 0 {
            return Err(PlaylistError::Config(
                "lookahead and page_cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bot_handle(&self) -> &str {
        self.bot_handle.as_deref().unwrap_or(DEFAULT_BOT_HANDLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.resolver.lookahead, 5);
        assert_eq!(config.resolver.page_cap, 5);
        assert_eq!(config.spotify.api_base_url, SPOTIFY_API_URL);
        assert_eq!(config.bot_handle(), "playlist_it");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"spotify": {"client_id": "abc"}, "resolver": {"lookahead": 3}}"#)
                .unwrap();
        assert_eq!(config.spotify.client_id, "abc");
        assert_eq!(config.spotify.accounts_base_url, SPOTIFY_ACCOUNTS_URL);
        assert_eq!(config.resolver.lookahead, 3);
        assert_eq!(config.resolver.page_cap, DEFAULT_PAGE_CAP);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SPOTIPY_CLIENT_ID", "id"),
            ("SPOTIPY_CLIENT_SECRET", "secret"),
            ("SPOTIFY_REFRESH_TOKEN", "refresh"),
            ("PLAYLIST_IT_LOOKAHEAD", "7"),
            ("PLAYLIST_IT_PAGE_CAP", "not a number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.spotify.client_id, "id");
        assert_eq!(config.resolver.lookahead, 7);
        assert_eq!(config.resolver.page_cap, DEFAULT_PAGE_CAP);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_lists_missing_credentials() {
        let mut config = AppConfig::default();
        config.spotify.client_id = "id".into();
        match config.validate() {
            Err(PlaylistError::Config(msg)) => {
                assert!(msg.contains("client_secret"));
                assert!(msg.contains("refresh_token"));
                assert!(!msg.contains("client_id"));
            }
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
