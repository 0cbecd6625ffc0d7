/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A single playable catalog entry
///
/// Field names on the wire follow the catalog JSON format
/// (`duration`, `cover`, `audio`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Display duration, e.g. `"3:45"`
    #[serde(rename = "duration")]
    pub duration_label: String,

    /// Opaque locator of the cover image
    #[serde(rename = "cover")]
    pub cover_ref: String,

    /// Opaque locator of the audio asset
    #[serde(rename = "audio")]
    pub audio_ref: String,

    /// Genre
    pub genre: String,
}

impl Track {
    /// Create a track with the given id, title and audio locator
    ///
    /// Remaining metadata is left empty.
    pub fn new(id: u32, title: impl Into<String>, audio_ref: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            duration_label: String::new(),
            cover_ref: String::new(),
            audio_ref: audio_ref.into(),
            genre: String::new(),
        }
    }

    /// Builder-style artist setter
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Builder-style album setter
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Builder-style duration label setter
    #[must_use]
    pub fn with_duration_label(mut self, label: impl Into<String>) -> Self {
        self.duration_label = label.into();
        self
    }

    /// Builder-style genre setter
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Expected duration in seconds parsed from the display label
    ///
    /// Accepts `M:SS` and `H:MM:SS`. Returns `None` for anything else.
    pub fn duration_hint(&self) -> Option<u64> {
        parse_duration_label(&self.duration_label)
    }
}

/// Parse a `M:SS` or `H:MM:SS` label into whole seconds
pub fn parse_duration_label(label: &str) -> Option<u64> {
    let parts: Vec<&str> = label.trim().split(':').collect();
    let numbers = parts
        .iter()
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    match numbers.as_slice() {
        [m, s] if *s < 60 => Some(m * 60 + s),
        [h, m, s] if *m < 60 && *s < 60 => Some(h * 3600 + m * 60 + s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_labels() {
        assert_eq!(parse_duration_label("3:45"), Some(225));
        assert_eq!(parse_duration_label("0:07"), Some(7));
        assert_eq!(parse_duration_label(" 12:00 "), Some(720));
    }

    #[test]
    fn parses_hour_labels() {
        assert_eq!(parse_duration_label("1:02:03"), Some(3723));
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(parse_duration_label(""), None);
        assert_eq!(parse_duration_label("3"), None);
        assert_eq!(parse_duration_label("3:75"), None);
        assert_eq!(parse_duration_label("a:bc"), None);
        assert_eq!(parse_duration_label("-1:30"), None);
    }

    #[test]
    fn deserializes_catalog_field_names() {
        let json = r#"{
            "id": 1,
            "title": "Midnight Dreams",
            "artist": "Luna Eclipse",
            "album": "Nocturnal",
            "duration": "3:45",
            "cover": "covers/1.jpg",
            "audio": "audio/1.mp3",
            "genre": "Electronic"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, TrackId::new(1));
        assert_eq!(track.duration_label, "3:45");
        assert_eq!(track.cover_ref, "covers/1.jpg");
        assert_eq!(track.audio_ref, "audio/1.mp3");
        assert_eq!(track.duration_hint(), Some(225));

        let built = Track::new(1, "Midnight Dreams", "audio/1.mp3")
            .with_artist("Luna Eclipse")
            .with_album("Nocturnal")
            .with_duration_label("3:45")
            .with_genre("Electronic");
        assert_eq!(
            track,
            Track {
                cover_ref: "covers/1.jpg".to_string(),
                ..built
            }
        );
    }
}
