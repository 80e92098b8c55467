use crate::capabilities::{Geolocation, PollHandle, WatchHandle};
use crate::constants::{
    DRIVING_MAX_AGE, DRIVING_POLL_INTERVAL, DRIVING_TIMEOUT, WALKING_MAX_AGE, WALKING_TIMEOUT,
};
use crate::error::{GuideError, Result};
use crate::geo::Position;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    #[default]
    Walking,
    #[serde(alias = "auto")]
    Driving,
}

impl TrackingMode {
    pub fn policy(self) -> TrackingPolicy {
        match self {
            TrackingMode::Walking => TrackingPolicy {
                options: WatchOptions {
                    high_accuracy: true,
                    maximum_age: WALKING_MAX_AGE,
                    timeout: WALKING_TIMEOUT,
                },
                poll_interval: None,
            },
            TrackingMode::Driving => TrackingPolicy {
                options: WatchOptions {
                    high_accuracy: true,
                    maximum_age: DRIVING_MAX_AGE,
                    timeout: DRIVING_TIMEOUT,
                },
                poll_interval: Some(DRIVING_POLL_INTERVAL),
            },
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TrackingMode::Walking => "🚶",
            TrackingMode::Driving => "🚗",
        }
    }
}

impl FromStr for TrackingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => Ok(TrackingMode::Walking),
            "driving" | "auto" => Ok(TrackingMode::Driving),
            other => Err(format!("unknown tracking mode '{other}'")),
        }
    }
}

/// Options handed to the platform watch/poll primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub maximum_age: Duration,
    pub timeout: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingPolicy {
    pub options: WatchOptions,
    /// Explicit poll on top of the watch, if any.
    pub poll_interval: Option<Duration>,
}

/// One start of the tracker. Callbacks carry it so that samples from a
/// torn-down subscription can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerStatus {
    Idle,
    Tracking { mode: TrackingMode, position: Position },
    Unavailable(String),
}

impl fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerStatus::Idle => write!(f, "In attesa della posizione..."),
            TrackerStatus::Tracking { mode, position } => write!(
                f,
                "Posizione aggiornata ({}) {:.5}, {:.5}",
                mode.icon(),
                position.lat,
                position.lon
            ),
            TrackerStatus::Unavailable(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Subscription {
    session: SessionId,
    watch: WatchHandle,
    poll: Option<PollHandle>,
}

/// Owns the platform subscriptions and turns their callbacks into a single
/// stream of fresh positions.
#[derive(Debug)]
pub struct PositionTracker {
    mode: TrackingMode,
    active: Option<Subscription>,
    next_session: u64,
    last: Option<Position>,
    status: TrackerStatus,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(TrackingMode::default())
    }
}

impl PositionTracker {
    pub fn new(mode: TrackingMode) -> Self {
        Self {
            mode,
            active: None,
            next_session: 0,
            last: None,
            status: TrackerStatus::Idle,
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn status(&self) -> &TrackerStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.active.map(|s| s.session)
    }

    /// Tear down whatever is running, then subscribe with `mode`'s policy.
    pub fn start(&mut self, mode: TrackingMode, geo: &mut dyn Geolocation) -> Result<SessionId> {
        self.stop(geo);
        self.mode = mode;
        if !geo.is_available() {
            self.status = TrackerStatus::Unavailable("Geolocalizzazione non supportata".into());
            return Err(GuideError::GeolocationUnavailable(
                "no geolocation capability".into(),
            ));
        }

        self.next_session += 1;
        let session = SessionId(self.next_session);
        let policy = mode.policy();

        let watch = geo.watch(session, &policy.options).inspect_err(|e| {
            self.status = TrackerStatus::Unavailable("Errore nella geolocalizzazione".into());
            log::warn!("[tracker] watch failed: {}", e);
        })?;
        let poll = match policy.poll_interval {
            Some(interval) => match geo.start_polling(session, interval, &policy.options) {
                Ok(h) => Some(h),
                Err(e) => {
                    geo.clear_watch(watch);
                    self.status =
                        TrackerStatus::Unavailable("Errore nella geolocalizzazione".into());
                    log::warn!("[tracker] poll failed: {}", e);
                    return Err(e);
                }
            },
            None => None,
        };

        self.active = Some(Subscription {
            session,
            watch,
            poll,
        });
        self.status = match self.status {
            TrackerStatus::Tracking { position, .. } => {
                TrackerStatus::Tracking { mode, position }
            }
            _ => TrackerStatus::Idle,
        };
        log::info!(
            "[tracker] session {} started mode={:?} poll={:?}",
            session.0,
            mode,
            policy.poll_interval
        );
        Ok(session)
    }

    pub fn stop(&mut self, geo: &mut dyn Geolocation) {
        if let Some(sub) = self.active.take() {
            geo.clear_watch(sub.watch);
            if let Some(poll) = sub.poll {
                geo.stop_polling(poll);
            }
            log::info!("[tracker] session {} stopped", sub.session.0);
        }
    }

    fn is_current(&self, session: SessionId) -> bool {
        self.current_session() == Some(session)
    }

    /// Accept a sample. Returns the position when it is fresh, `None` when it
    /// came from a stale session or repeats the previous fix exactly.
    pub fn on_sample(&mut self, session: SessionId, position: Position) -> Option<Position> {
        if !self.is_current(session) {
            log::debug!("[tracker] dropping sample from stale session {}", session.0);
            return None;
        }
        let repeat = self.last == Some(position)
            && matches!(self.status, TrackerStatus::Tracking { .. });
        self.status = TrackerStatus::Tracking {
            mode: self.mode,
            position,
        };
        self.last = Some(position);
        (!repeat).then_some(position)
    }

    /// Record a platform error. The subscription stays in place so a later
    /// sample resumes tracking. Returns false for stale sessions.
    pub fn on_error(&mut self, session: SessionId, message: &str) -> bool {
        if !self.is_current(session) {
            return false;
        }
        log::warn!("[tracker] geolocation error: {}", message);
        self.status = TrackerStatus::Unavailable("Errore nella geolocalizzazione".into());
        true
    }
}
