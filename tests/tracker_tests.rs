// Tracking policy and subscription lifecycle against a recording
// geolocation capability.
mod common;

use cicerone_core::{
    GuideError, GuideSession, Position, PositionTracker, SessionConfig, TrackerStatus,
    TrackingMode, DRIVING_POLL_INTERVAL,
};
use common::{Audio, RecordingGeo};
use std::time::Duration;

#[test]
fn mode_policies() {
    let walking = TrackingMode::Walking.policy();
    assert!(walking.options.high_accuracy);
    assert_eq!(walking.options.maximum_age, Duration::from_millis(5000));
    assert_eq!(walking.options.timeout, Duration::from_millis(10000));
    assert_eq!(walking.poll_interval, None);

    let driving = TrackingMode::Driving.policy();
    assert_eq!(driving.options.maximum_age, Duration::from_millis(1000));
    assert_eq!(driving.options.timeout, Duration::from_millis(2000));
    assert_eq!(driving.poll_interval, Some(Duration::from_secs(2)));
}

#[test]
fn mode_names_parse() {
    assert_eq!("walking".parse::<TrackingMode>(), Ok(TrackingMode::Walking));
    assert_eq!(" Auto ".parse::<TrackingMode>(), Ok(TrackingMode::Driving));
    assert_eq!("driving".parse::<TrackingMode>(), Ok(TrackingMode::Driving));
    assert!("bike".parse::<TrackingMode>().is_err());
}

#[test]
fn walking_opens_a_single_watch() {
    let mut geo = RecordingGeo::default();
    let mut tracker = PositionTracker::new(TrackingMode::Walking);
    let session = tracker.start(TrackingMode::Walking, &mut geo).unwrap();
    assert_eq!(geo.watches.len(), 1);
    assert_eq!(geo.watches[0].0, session);
    assert!(geo.polls.is_empty());
    assert_eq!(tracker.current_session(), Some(session));
}

#[test]
fn switching_to_driving_replaces_the_subscription() {
    let mut geo = RecordingGeo::default();
    let mut session = GuideSession::new(SessionConfig::default());
    session.start_tracking(&mut geo).unwrap();

    session.set_mode(TrackingMode::Driving, &mut geo).unwrap();
    assert_eq!(geo.cleared.len(), 1);
    assert_eq!(geo.watches.len(), 2);
    assert_eq!(geo.polls.len(), 1);
    assert_eq!(geo.polls[0].1, DRIVING_POLL_INTERVAL);
    assert_eq!(geo.live_watches.len(), 1);
    assert_eq!(geo.live_polls.len(), 1);
    assert_eq!(session.mode(), TrackingMode::Driving);

    // same mode again is a no-op
    session.set_mode(TrackingMode::Driving, &mut geo).unwrap();
    assert_eq!(geo.watches.len(), 2);

    session.set_mode(TrackingMode::Walking, &mut geo).unwrap();
    assert_eq!(geo.stopped.len(), 1);
    assert!(geo.live_polls.is_empty());
    assert_eq!(geo.live_watches.len(), 1);

    session.stop_tracking(&mut geo);
    assert!(geo.live_watches.is_empty());
    assert!(!session.tracker().is_running());
}

#[test]
fn samples_from_a_torn_down_session_are_dropped() {
    let mut geo = RecordingGeo::default();
    let mut tracker = PositionTracker::new(TrackingMode::Walking);
    let old = tracker.start(TrackingMode::Walking, &mut geo).unwrap();
    let current = tracker.start(TrackingMode::Driving, &mut geo).unwrap();
    assert_ne!(old, current);

    assert_eq!(tracker.on_sample(old, Position::new(45.0, 7.0)), None);
    assert_eq!(*tracker.status(), TrackerStatus::Idle);
    assert!(!tracker.on_error(old, "timeout"));

    let p = Position::new(45.1, 7.1);
    assert_eq!(tracker.on_sample(current, p), Some(p));
}

#[test]
fn identical_consecutive_samples_are_absorbed() {
    let mut geo = RecordingGeo::default();
    let mut tracker = PositionTracker::new(TrackingMode::Driving);
    let s = tracker.start(TrackingMode::Driving, &mut geo).unwrap();
    let p = Position::new(45.0, 7.0);
    assert_eq!(tracker.on_sample(s, p), Some(p));
    assert_eq!(tracker.on_sample(s, p), None);
    let q = Position::new(45.0001, 7.0);
    assert_eq!(tracker.on_sample(s, q), Some(q));
}

#[test]
fn error_then_recovery() {
    let mut geo = RecordingGeo::default();
    let mut tracker = PositionTracker::new(TrackingMode::Walking);
    let s = tracker.start(TrackingMode::Walking, &mut geo).unwrap();
    let p = Position::new(45.0, 7.0);
    tracker.on_sample(s, p);

    assert!(tracker.on_error(s, "position unavailable"));
    assert_eq!(tracker.status().to_string(), "Errore nella geolocalizzazione");
    assert!(tracker.is_running());

    // the same fix after an error counts as fresh again
    assert_eq!(tracker.on_sample(s, p), Some(p));
    assert_eq!(
        tracker.status().to_string(),
        "Posizione aggiornata (🚶) 45.00000, 7.00000"
    );
}

#[test]
fn missing_capability_is_reported() {
    let mut geo = RecordingGeo::unavailable();
    let mut tracker = PositionTracker::new(TrackingMode::Walking);
    assert!(matches!(
        tracker.start(TrackingMode::Walking, &mut geo),
        Err(GuideError::GeolocationUnavailable(_))
    ));
    assert_eq!(tracker.status().to_string(), "Geolocalizzazione non supportata");
    assert!(!tracker.is_running());
    assert!(geo.watches.is_empty());
}

#[test]
fn failed_poll_releases_the_watch() {
    let mut geo = RecordingGeo::failing_poll();
    let mut tracker = PositionTracker::new(TrackingMode::Driving);
    assert!(tracker.start(TrackingMode::Driving, &mut geo).is_err());
    assert_eq!(geo.watches.len(), 1);
    assert!(geo.live_watches.is_empty());
    assert!(!tracker.is_running());
}

#[test]
fn driving_watch_and_poll_deliver_one_narration() {
    use cicerone_core::FilterCriteria;

    let mut geo = RecordingGeo::default();
    let mut audio = Audio::default();
    let mut session = GuideSession::new(SessionConfig {
        mode: TrackingMode::Driving,
        criteria: FilterCriteria::unrestricted(),
        ..SessionConfig::default()
    });
    let s = session.start_tracking(&mut geo).unwrap();
    session
        .on_interaction(cicerone_core::Interaction::PointerDown, &mut audio.out())
        .unwrap();
    let ticket = session.begin_catalog_load();
    let _ = session
        .complete_catalog_load(
            ticket,
            Ok(vec![common::poi(1, "Rocca", "Monumento", 45.0, 7.0)]),
            &mut audio.out(),
        )
        .unwrap();

    let fix = Position::new(45.0, 7.0);
    let from_watch = session.on_position(s, fix, &mut audio.out());
    let from_poll = session.on_position(s, fix, &mut audio.out());
    assert!(from_watch.speak_after_delay.is_some());
    assert_eq!(from_poll, Default::default());
}

#[test]
fn restart_reports_the_new_mode() {
    let mut geo = RecordingGeo::default();
    let mut audio = Audio::default();
    let mut session = GuideSession::new(SessionConfig::default());
    let s = session.start_tracking(&mut geo).unwrap();
    let _ = session.on_position(s, Position::new(45.0, 7.0), &mut audio.out());

    session.set_mode(TrackingMode::Driving, &mut geo).unwrap();
    assert_eq!(session.status(), "Posizione aggiornata (🚗) 45.00000, 7.00000");
}

#[test]
fn restart_after_an_error_waits_for_a_fix() {
    let mut geo = RecordingGeo::default();
    let mut tracker = PositionTracker::new(TrackingMode::Walking);
    let s = tracker.start(TrackingMode::Walking, &mut geo).unwrap();
    tracker.on_error(s, "timeout");
    tracker.start(TrackingMode::Driving, &mut geo).unwrap();
    assert_eq!(*tracker.status(), TrackerStatus::Idle);
}
