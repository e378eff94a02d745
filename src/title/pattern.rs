//! Deterministic title parsing.
//!
//! Tries, in order:
//! - `Artist - Song`
//! - `Artist "Song"`
//! - `Artist: Song`
//!
//! Trailing `(...)` and then `[...]` groups (e.g. "(Official Video) [HD]") are
//! left out of both captures.

use super::SongIdentity;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"^(.+?)\s*-\s*(.+?)(?:\s*\(.*?\))*(?:\s*\[.*?\])*\s*$"#,
        r#"^(.+?)\s*"\s*(.+?)\s*"(?:\s*\(.*?\))*(?:\s*\[.*?\])*\s*$"#,
        r#"^(.+?)\s*:\s*(.+?)(?:\s*\(.*?\))*(?:\s*\[.*?\])*\s*$"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("title pattern compiles"))
    .collect()
});

/// Split a video title into artist and song. `None` when nothing matches.
pub fn parse(title: &str) -> Option<SongIdentity> {
    PATTERNS.iter().find_map(|re| {
        let caps = re.captures(title)?;
        SongIdentity::new(caps.get(1)?.as_str(), caps.get(2)?.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(title: &str) -> Option<(String, String)> {
        parse(title).map(|s| (s.artist, s.song))
    }

    fn some(artist: &str, song: &str) -> Option<(String, String)> {
        Some((artist.to_string(), song.to_string()))
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(PATTERNS.len(), 3);
    }

    #[test]
    fn test_hyphen_with_qualifier() {
        assert_eq!(
            pair("Daft Punk - One More Time (Official Video)"),
            some("Daft Punk", "One More Time")
        );
    }

    #[test]
    fn test_hyphen_with_several_qualifiers() {
        assert_eq!(
            pair("  Queen  -  Bohemian Rhapsody (Remastered 2011) (Official Video) [HD] [4K] "),
            some("Queen", "Bohemian Rhapsody")
        );
        assert_eq!(pair("Adele - Hello"), some("Adele", "Hello"));
    }

    #[test]
    fn test_hyphen_splits_at_first_separator() {
        assert_eq!(
            pair("Jay-Z - Empire State of Mind"),
            some("Jay", "Z - Empire State of Mind")
        );
    }

    #[test]
    fn test_quoted_song() {
        assert_eq!(
            pair(r#"Nirvana "Smells Like Teen Spirit" (Live) [Remastered]"#),
            some("Nirvana", "Smells Like Teen Spirit")
        );
    }

    #[test]
    fn test_colon_separator() {
        assert_eq!(
            pair("Radiohead: Creep [Official Music Video]"),
            some("Radiohead", "Creep")
        );
    }

    #[test]
    fn test_no_separator() {
        assert_eq!(pair("Some Random Text With No Separator"), None);
        assert_eq!(pair(""), None);
        assert_eq!(pair("Just a title (Official Video)"), None);
    }

    #[test]
    fn test_blank_capture_falls_through() {
        // Artist side of the hyphen is blank, the colon pattern still applies.
        assert_eq!(pair(" - Intro: Outro"), some("- Intro", "Outro"));
        assert_eq!(pair("   -   "), None);
        assert_eq!(pair(r#""Song Only""#), None);
    }
}
