//! Curated browsing sections
//!
//! Each top-level view shows a few fixed windows over catalog order.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::Track;

/// Top-level browsing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Landing page
    Home,
    /// New and popular music
    Discover,
    /// The listener's own collection
    Library,
    /// Full catalog for searching
    Search,
}

impl View {
    /// All views in navigation order
    pub const ALL: [View; 4] = [View::Home, View::Discover, View::Library, View::Search];

    /// Sections rendered by this view, top to bottom
    pub fn sections(self) -> &'static [Section] {
        match self {
            View::Home => &[Section::Featured, Section::Trending, Section::Recommended],
            View::Discover => &[Section::NewReleases, Section::PopularThisWeek],
            View::Library => &[Section::Favorites, Section::RecentlyPlayed],
            View::Search => &[Section::AllTracks],
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Discover => "Discover",
            View::Library => "Library",
            View::Search => "Search",
        }
    }
}

/// A curated window over the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Home: featured playlists
    Featured,
    /// Home: trending now
    Trending,
    /// Home: recommendations
    Recommended,
    /// Discover: new releases
    NewReleases,
    /// Discover: popular this week
    PopularThisWeek,
    /// Library: favorites
    Favorites,
    /// Library: recently played
    RecentlyPlayed,
    /// Search: every track
    AllTracks,
}

impl Section {
    /// Heading shown above the section
    pub fn title(self) -> &'static str {
        match self {
            Section::Featured => "Featured Playlists",
            Section::Trending => "Trending Now",
            Section::Recommended => "Recommended for You",
            Section::NewReleases => "New Releases",
            Section::PopularThisWeek => "Popular This Week",
            Section::Favorites => "Your Favorites",
            Section::RecentlyPlayed => "Recently Played",
            Section::AllTracks => "All Songs",
        }
    }

    /// Half-open range of catalog positions, `None` for the whole catalog
    fn bounds(self) -> Option<(usize, usize)> {
        match self {
            Section::Featured => Some((0, 6)),
            Section::Trending => Some((2, 8)),
            Section::Recommended => Some((1, 7)),
            Section::NewReleases => Some((3, 8)),
            Section::PopularThisWeek => Some((0, 5)),
            Section::Favorites => Some((1, 6)),
            Section::RecentlyPlayed => Some((2, 7)),
            Section::AllTracks => None,
        }
    }
}

impl Catalog {
    /// Tracks shown in a curated section
    pub fn section(&self, section: Section) -> &[Track] {
        match section.bounds() {
            Some((start, end)) => self.window(start, end),
            None => self.tracks(),
        }
    }
}
