//! Commit message composition from a song.

use crate::song::Song;

/// Marker rendered as a musical note by GitHub and GitLab.
pub const MUSICAL_NOTE: &str = ":musical_note:";

/// Format the commit message for a song.
///
/// Produces:
/// ```text
/// :musical_note: <lyrics>
///
/// By <artist> [<yt_link>]
/// ```
/// with `\r\n` line endings.
pub fn lyric_message(song: &Song) -> String {
    format!(
        "{MUSICAL_NOTE} {}\r\n\r\nBy {} [{}]",
        song.lyrics, song.artist, song.yt_link
    )
}
