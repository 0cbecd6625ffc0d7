//! Terminal rendering of transport state

use tempo_core::{Catalog, Section, Track, TrackId, View};
use tempo_playback::{PlaybackEvent, PlaybackSnapshot, RepeatMode, TransportStatus};

/// Width of the text progress bar
const BAR_WIDTH: usize = 24;

/// One-line transport bar
///
/// `▶ Night Drive - Aurora  1:12 [#####.......] 4:10  vol 80%  shuffle repeat:all ♥`
pub fn transport_line(snapshot: &PlaybackSnapshot, track: Option<&Track>) -> String {
    let state = &snapshot.state;
    let Some(track) = track else {
        return "nothing selected".to_string();
    };

    let icon = match state.status {
        TransportStatus::Loading => "…",
        TransportStatus::Failed => "✗",
        _ if state.is_playing => "▶",
        _ => "⏸",
    };

    let filled = ((snapshot.progress_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled.min(BAR_WIDTH)),
        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );

    let volume = if state.volume.is_muted() {
        "muted".to_string()
    } else if state.volume.is_silent() {
        "silent".to_string()
    } else {
        format!("vol {:.0}%", state.volume.percent())
    };

    let mut line = format!(
        "{} {}  {} [{}] {}  {}",
        icon,
        title_line(track),
        snapshot.position_label,
        bar,
        snapshot.duration_label,
        volume
    );

    if state.shuffle_enabled {
        line.push_str("  shuffle");
    }
    match state.repeat_mode {
        RepeatMode::Off => {}
        RepeatMode::All => line.push_str("  repeat:all"),
        RepeatMode::One => line.push_str("  repeat:one"),
    }
    if state.is_liked {
        line.push_str("  ♥");
    }
    if let Some(error) = &snapshot.last_error {
        line.push_str(&format!("  ({})", error));
    }

    line
}

/// Message for a non-progress event, `None` for events the transport line covers
pub fn event_line(event: &PlaybackEvent, catalog: &Catalog) -> Option<String> {
    let title = |id: TrackId| {
        catalog
            .find(id)
            .map(title_line)
            .unwrap_or_else(|| format!("track {}", id))
    };

    match event {
        PlaybackEvent::TrackChanged { track_id, .. } => Some(format!("now: {}", title(*track_id))),
        PlaybackEvent::TrackFinished { track_id } => Some(format!("finished: {}", title(*track_id))),
        PlaybackEvent::Error { message } => Some(format!("error: {}", message)),
        _ => None,
    }
}

/// Numbered catalog listing, marking the current track
pub fn catalog_listing(catalog: &Catalog, current: Option<TrackId>) -> String {
    catalog
        .tracks()
        .iter()
        .map(|track| {
            let marker = if Some(track.id) == current { '>' } else { ' ' };
            format!(
                "{} {:>3}  {:<32} {:>6}  {}",
                marker,
                track.id.get(),
                title_line(track),
                track.duration_label,
                track.genre
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Curated sections of every view
pub fn sections_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for view in View::ALL {
        out.push_str(&format!("[{}]\n", view.label()));
        for section in view.sections() {
            out.push_str(&section_block(catalog, *section));
        }
    }
    out
}

fn section_block(catalog: &Catalog, section: Section) -> String {
    let mut out = format!("  {}\n", section.title());
    for track in catalog.section(section) {
        out.push_str(&format!("    {:>3}  {}\n", track.id.get(), title_line(track)));
    }
    out
}

fn title_line(track: &Track) -> String {
    if track.artist.is_empty() {
        track.title.clone()
    } else {
        format!("{} - {}", track.title, track.artist)
    }
}
