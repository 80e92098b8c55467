use std::time::Duration;

// Shared tuning constants used by the engine and both front-ends.

// Geometry
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const PROXIMITY_THRESHOLD_KM: f64 = 0.1; // auto-narration radius (100 m)

// Filtering
pub const ALL_CATEGORIES: &str = "All"; // category sentinel, always first
pub const DEFAULT_RADIUS_KM: f64 = 50.0;
pub const RADIUS_OPTIONS_KM: [f64; 7] = [0.0, 0.1, 1.0, 5.0, 10.0, 20.0, 50.0]; // 0 = unrestricted

// Tracking policy
pub const WALKING_MAX_AGE: Duration = Duration::from_millis(5000);
pub const WALKING_TIMEOUT: Duration = Duration::from_millis(10000);
pub const DRIVING_MAX_AGE: Duration = Duration::from_millis(1000);
pub const DRIVING_TIMEOUT: Duration = Duration::from_millis(2000);
// watch fallback at vehicle speeds
pub const DRIVING_POLL_INTERVAL: Duration = Duration::from_millis(2000);

// Narration
pub const NARRATION_DELAY: Duration = Duration::from_millis(250); // lets the alert tone finish
pub const SPEECH_LANG: &str = "it-IT";
pub const SPEECH_RATE: f32 = 1.0;
pub const UNLOCK_CONFIRMATION: &str = "Audio attivato";

// Alert tone
pub const TONE_FREQUENCY_HZ: f32 = 880.0;
pub const TONE_GAIN: f32 = 0.1;
pub const TONE_DURATION_SEC: f64 = 0.2;
