//! Episode Directory
//!
//! Immutable in-memory list of podcast episodes, loaded once at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::defaults::default_episodes;
use crate::error::ContentError;

// == Episode ==
/// A single podcast episode as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Canonical id, e.g. "ep001"
    pub id: String,
    /// Unique, positive episode number
    pub number: u32,
    pub title: String,
    pub description: String,
    /// Play length, e.g. "25:30"
    pub duration: String,
    pub publish_date: String,
    pub artwork_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_alt: Option<String>,
    pub audio_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// == Episode Directory ==
/// Read-only collection of episodes.
#[derive(Debug, Clone, Default)]
pub struct EpisodeDirectory {
    episodes: Vec<Episode>,
}

impl EpisodeDirectory {
    // == Constructors ==
    /// Creates a directory from an explicit list of episodes.
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    /// Loads episodes from a JSON array at `path`.
    ///
    /// Any failure is logged and replaced by the built-in default episodes,
    /// so this always yields a usable directory.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(directory) => {
                info!("Loaded {} episodes", directory.len());
                directory
            }
            Err(e) => {
                warn!("{}; using built-in episodes", e);
                Self::new(default_episodes())
            }
        }
    }

    /// Loads episodes from a JSON array at `path`, reporting why it failed.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let episodes = serde_json::from_str(&data).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(episodes))
    }

    // == List ==
    /// Returns every episode, highest number first.
    pub fn list(&self) -> Vec<Episode> {
        let mut episodes = self.episodes.clone();
        episodes.sort_by(|a, b| b.number.cmp(&a.number));
        episodes
    }

    // == Get By Id ==
    /// Looks up an episode by exact id.
    pub fn get_by_id(&self, id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id == id)
    }

    // == Featured ==
    /// Returns the newest episode (highest number), None when empty.
    pub fn featured(&self) -> Option<&Episode> {
        self.episodes.iter().max_by_key(|episode| episode.number)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Maps a path parameter to a canonical episode id.
///
/// Purely numeric values are episode numbers and become `ep` plus the number
/// zero-padded to three digits; anything else is used as-is.
pub fn normalize_episode_id(raw: &str) -> String {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = raw.parse::<u64>() {
            return format!("ep{:03}", number);
        }
    }
    raw.to_string()
}
