/// ID types for Tempo Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Catalog ids are small integers assigned by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u32);

impl TrackId {
    /// Create a new track ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TrackId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let id = TrackId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: TrackId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, TrackId::new(42));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(TrackId::from(3).to_string(), "3");
    }
}
