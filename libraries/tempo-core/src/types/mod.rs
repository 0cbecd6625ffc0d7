mod ids;
mod track;

pub use ids::TrackId;
pub use track::{parse_duration_label, Track};
