//! The bundled lyric pool.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::error::SongError;

use super::Song;

/// Lyric pool shipped with the binary.
pub const BUNDLED_POOL: &str = include_str!("../../assets/lyrics_pool.json");

/// On-disk shape of the pool document.
#[derive(Debug, Deserialize)]
struct PoolDocument {
    pool: Vec<Song>,
}

/// A non-empty, ordered pool of songs.
#[derive(Debug, Clone)]
pub struct SongPool {
    songs: Vec<Song>,
}

impl SongPool {
    /// Create a pool, rejecting an empty list.
    pub fn new(songs: Vec<Song>) -> Result<Self, SongError> {
        if songs.is_empty() {
            return Err(SongError::EmptyPool);
        }
        Ok(Self { songs })
    }

    /// Parse a pool from a JSON document with a top-level `pool` array.
    pub fn from_json(json: &str) -> Result<Self, SongError> {
        let document: PoolDocument = serde_json::from_str(json).map_err(SongError::InvalidPool)?;
        Self::new(document.pool)
    }

    /// The pool bundled with lint-along.
    pub fn bundled() -> Result<Self, SongError> {
        Self::from_json(BUNDLED_POOL)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Always false; an empty pool cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Pick one song uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Song {
        let index = rng.random_range(0..self.songs.len());
        let song = &self.songs[index];
        debug!(
            "Picked song #{index}: {} by {}",
            song.song.as_deref().unwrap_or("(untitled)"),
            song.artist
        );
        song
    }
}

/// Pick an owned song from `pool` using `rng`.
pub fn pick_song<R: Rng + ?Sized>(pool: &SongPool, rng: &mut R) -> Song {
    pool.pick(rng).clone()
}
