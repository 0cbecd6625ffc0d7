//! Ordered, read-only track catalog
//!
//! The catalog is fixed for the lifetime of a session. Order matters:
//! sequential next/previous navigation and the curated sections are
//! both defined over catalog positions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};

/// Ordered collection of all available tracks
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
}

impl Catalog {
    /// Build a catalog from tracks in display order
    ///
    /// Fails if two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tracks.len());
        for (position, track) in tracks.iter().enumerate() {
            if index.insert(track.id, position).is_some() {
                return Err(CoreError::DuplicateTrack(track.id));
            }
        }

        Ok(Self { tracks, index })
    }

    /// Parse a catalog from a JSON array of track records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        debug!("Parsed {} catalog entries", tracks.len());
        Self::new(tracks)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        info!("Loaded {} tracks from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at a catalog position
    pub fn get(&self, position: usize) -> Option<&Track> {
        self.tracks.get(position)
    }

    /// First track in catalog order
    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    /// Look up a track by id
    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.index_of(id).map(|position| &self.tracks[position])
    }

    /// Look up a track by id, failing with `TrackNotFound`
    pub fn require(&self, id: TrackId) -> Result<&Track> {
        self.find(id).ok_or(CoreError::TrackNotFound(id))
    }

    /// Catalog position of a track id
    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether the id belongs to this catalog
    pub fn contains(&self, id: TrackId) -> bool {
        self.index.contains_key(&id)
    }

    /// Tracks in a window of catalog positions, clamped to the catalog size
    pub fn window(&self, start: usize, end: usize) -> &[Track] {
        let end = end.min(self.tracks.len());
        let start = start.min(end);
        &self.tracks[start..end]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: u32) -> Track {
        Track::new(id, format!("Track {}", id), format!("audio/{}.mp3", id))
    }

    fn create_catalog(count: u32) -> Catalog {
        Catalog::new((1..=count).map(create_test_track).collect()).unwrap()
    }

    #[test]
    fn preserves_order_and_indexes_ids() {
        let catalog = create_catalog(3);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.index_of(TrackId::new(1)), Some(0));
        assert_eq!(catalog.index_of(TrackId::new(3)), Some(2));
        assert_eq!(catalog.get(1).map(|t| t.id), Some(TrackId::new(2)));
        assert_eq!(catalog.first().map(|t| t.id), Some(TrackId::new(1)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![create_test_track(1), create_test_track(1)]);
        assert!(matches!(result, Err(CoreError::DuplicateTrack(id)) if id == TrackId::new(1)));
    }

    #[test]
    fn unknown_ids_are_absent() {
        let catalog = create_catalog(2);

        assert!(!catalog.contains(TrackId::new(99)));
        assert!(catalog.find(TrackId::new(99)).is_none());
        assert!(matches!(
            catalog.require(TrackId::new(99)),
            Err(CoreError::TrackNotFound(_))
        ));
    }

    #[test]
    fn window_clamps_to_catalog_size() {
        let catalog = create_catalog(4);

        assert_eq!(catalog.window(1, 3).len(), 2);
        assert_eq!(catalog.window(2, 8).len(), 2);
        assert!(catalog.window(6, 9).is_empty());
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
        assert!(catalog.window(0, 6).is_empty());
    }
}
