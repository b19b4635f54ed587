//! Lyric commit messages.

pub mod message;

pub use message::{MUSICAL_NOTE, lyric_message};
