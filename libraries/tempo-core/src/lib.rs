//! Tempo Player Core
//!
//! Catalog and track types shared by the playback core and applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Catalog**: the ordered, read-only track list and its curated sections
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Catalog, Section, Track, TrackId};
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(1, "Midnight Dreams", "audio/1.mp3").with_artist("Luna Eclipse"),
//!     Track::new(2, "Solar Flare", "audio/2.mp3").with_artist("Sun Runners"),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.index_of(TrackId::new(2)), Some(1));
//! assert_eq!(catalog.section(Section::Featured).len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod sections;
pub mod types;

pub use catalog::Catalog;
pub use error::{CoreError, Result};
pub use sections::{Section, View};
pub use types::{parse_duration_label, Track, TrackId};
