//! Catalog loading tests
//!
//! Catalogs are written to real files in a temp dir and loaded back,
//! matching how applications read `songs.json` at startup.

use std::fs;

use tempfile::TempDir;
use tempo_core::{Catalog, CoreError, Section, TrackId, View};

const SONGS_JSON: &str = r#"[
  { "id": 1, "title": "Midnight Dreams", "artist": "Luna Eclipse", "album": "Nocturnal",
    "duration": "3:45", "cover": "covers/1.jpg", "audio": "audio/1.mp3", "genre": "Electronic" },
  { "id": 2, "title": "Solar Flare", "artist": "Sun Runners", "album": "Daybreak",
    "duration": "4:12", "cover": "covers/2.jpg", "audio": "audio/2.mp3", "genre": "Rock" },
  { "id": 3, "title": "Ocean Drive", "artist": "Coastline", "album": "Tides",
    "duration": "2:58", "cover": "covers/3.jpg", "audio": "audio/3.mp3", "genre": "Pop" }
]"#;

fn write_catalog(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("songs.json");
    fs::write(&path, contents).expect("Failed to write catalog file");
    path
}

#[test]
fn loads_catalog_from_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_catalog(&dir, SONGS_JSON);

    let catalog = Catalog::load(&path).expect("Failed to load catalog");

    assert_eq!(catalog.len(), 3);
    let track = catalog.find(TrackId::new(2)).expect("track 2 present");
    assert_eq!(track.title, "Solar Flare");
    assert_eq!(track.audio_ref, "audio/2.mp3");
    assert_eq!(track.duration_hint(), Some(252));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = Catalog::load(dir.path().join("nope.json"));

    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn malformed_json_is_serialization_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_catalog(&dir, "[{ \"id\": 1, \"title\": ");

    assert!(matches!(
        Catalog::load(&path),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn duplicate_ids_in_file_are_rejected() {
    let json = r#"[
      { "id": 5, "title": "A", "artist": "", "album": "", "duration": "1:00", "cover": "", "audio": "a", "genre": "" },
      { "id": 5, "title": "B", "artist": "", "album": "", "duration": "1:00", "cover": "", "audio": "b", "genre": "" }
    ]"#;

    assert!(matches!(
        Catalog::from_json_str(json),
        Err(CoreError::DuplicateTrack(id)) if id == TrackId::new(5)
    ));
}

#[test]
fn small_catalog_sections_never_panic() {
    let catalog = Catalog::from_json_str(SONGS_JSON).unwrap();

    for view in View::ALL {
        for section in view.sections() {
            let tracks = catalog.section(*section);
            assert!(tracks.len() <= catalog.len());
        }
    }

    assert!(catalog.section(Section::NewReleases).is_empty());
    assert_eq!(catalog.section(Section::Recommended).len(), 2);
}
