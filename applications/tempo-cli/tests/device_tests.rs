//! Controller driven by the simulated output device thread

use std::sync::Arc;
use std::time::{Duration, Instant};
use tempo_cli::config::OutputSettings;
use tempo_cli::SimulatedDevice;
use tempo_core::{Catalog, Track, TrackId};
use tempo_playback::{PlaybackConfig, PlaybackEvent, TransportController, TransportStatus};

const TIMEOUT: Duration = Duration::from_secs(5);

fn create_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Track::new(1, "First", "audio/first.mp3").with_duration_label("0:02"),
            Track::new(2, "Second", "audio/second.mp3").with_duration_label("0:02"),
            Track::new(3, "Broken", "audio/broken.mp3").with_duration_label("n/a"),
        ])
        .unwrap(),
    )
}

fn fast_settings() -> OutputSettings {
    OutputSettings {
        tick_ms: 5,
        load_delay_ms: 10,
        speed: 20.0,
    }
}

/// Pump device events into the controller until `done` holds
fn pump_until(
    controller: &mut TransportController<SimulatedDevice>,
    events: &crossbeam_channel::Receiver<tempo_playback::OutputEvent>,
    mut done: impl FnMut(&TransportController<SimulatedDevice>, &[PlaybackEvent]) -> bool,
) -> Vec<PlaybackEvent> {
    let deadline = Instant::now() + TIMEOUT;
    let mut seen = Vec::new();

    while Instant::now() < deadline {
        if let Ok(event) = events.recv_timeout(Duration::from_millis(50)) {
            controller.handle_output_event(event);
        }
        seen.extend(controller.drain_events());
        if done(controller, &seen) {
            return seen;
        }
    }

    panic!("condition not reached, events: {:?}", seen);
}

#[test]
fn plays_through_to_next_track() {
    let catalog = create_catalog();
    let (device, events) = SimulatedDevice::spawn(&catalog, &fast_settings()).unwrap();
    let mut controller = TransportController::new(catalog, device, PlaybackConfig::default());

    controller.select_track_by_id(TrackId::new(1));

    let seen = pump_until(&mut controller, &events, |c, _| {
        c.state().current_track_id == Some(TrackId::new(2))
    });

    assert!(seen.contains(&PlaybackEvent::TrackFinished {
        track_id: TrackId::new(1)
    }));
    assert!(seen
        .iter()
        .any(|e| matches!(e, PlaybackEvent::PositionUpdate { position_secs, .. } if *position_secs > 0.0)));
}

#[test]
fn undecodable_track_fails_and_stays_selected() {
    let catalog = create_catalog();
    let (device, events) = SimulatedDevice::spawn(&catalog, &fast_settings()).unwrap();
    let mut controller = TransportController::new(catalog, device, PlaybackConfig::default());

    controller.select_track_by_id(TrackId::new(3));

    pump_until(&mut controller, &events, |c, _| {
        c.status() == TransportStatus::Failed
    });

    assert_eq!(controller.state().current_track_id, Some(TrackId::new(3)));
    assert!(!controller.state().is_playing);
    assert!(controller
        .snapshot()
        .last_error
        .unwrap()
        .contains("audio/broken.mp3"));
}

#[test]
fn quick_switch_ignores_first_session() {
    let catalog = create_catalog();
    let (device, events) = SimulatedDevice::spawn(&catalog, &fast_settings()).unwrap();
    let mut controller = TransportController::new(catalog, device, PlaybackConfig::default());

    controller.select_track_by_id(TrackId::new(1));
    controller.select_track_by_id(TrackId::new(2));
    let second = controller.session().unwrap();

    pump_until(&mut controller, &events, |c, _| {
        c.status() == TransportStatus::Playing
    });

    assert_eq!(controller.session(), Some(second));
    assert_eq!(controller.state().current_track_id, Some(TrackId::new(2)));
}
