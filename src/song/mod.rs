//! Song records and random selection from the lyric pool.

pub mod pool;

use serde::Deserialize;

pub use pool::{SongPool, pick_song};

/// One entry of the lyric pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Song {
    /// Song title, used only for logging.
    #[serde(default)]
    pub song: Option<String>,
    pub lyrics: String,
    pub artist: String,
    pub yt_link: String,
}

impl Song {
    pub fn new(
        lyrics: impl Into<String>,
        artist: impl Into<String>,
        yt_link: impl Into<String>,
    ) -> Self {
        Self {
            song: None,
            lyrics: lyrics.into(),
            artist: artist.into(),
            yt_link: yt_link.into(),
        }
    }
}
