use crate::constants::PROXIMITY_THRESHOLD_KM;
use crate::geo::{distance_km, Position};
use crate::poi::{Poi, PoiId};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NarrationState {
    #[default]
    Idle,
    /// Already narrated during the current dwell.
    Narrating(PoiId),
}

/// Which POI wins when several are within the threshold at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// First in catalog order.
    #[default]
    FirstMatch,
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarrationTrigger {
    Proximity,
    Manual,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NarrationEvent {
    pub poi_id: PoiId,
    pub text: String,
    pub trigger: NarrationTrigger,
}

impl NarrationEvent {
    fn new(poi: &Poi, trigger: NarrationTrigger) -> Self {
        Self {
            poi_id: poi.id,
            text: narration_text(poi),
            trigger,
        }
    }
}

/// Spoken description: name, category, optional elevation, description.
pub fn narration_text(poi: &Poi) -> String {
    let mut text = format!("{}, categoria {}. ", poi.name, poi.category);
    if let Some(elevation) = poi.elevation {
        text.push_str(&format!("Altitudine {} metri. ", elevation));
    }
    text.push_str(&poi.description);
    text
}

/// Detects dwell entry/exit against the catalog and decides when a POI
/// should be narrated automatically.
#[derive(Clone, Debug)]
pub struct ProximityNarrator {
    state: NarrationState,
    policy: SelectionPolicy,
    threshold_km: f64,
}

impl Default for ProximityNarrator {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

impl ProximityNarrator {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            state: NarrationState::Idle,
            policy,
            threshold_km: PROXIMITY_THRESHOLD_KM,
        }
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn last_narrated(&self) -> Option<PoiId> {
        match self.state {
            NarrationState::Idle => None,
            NarrationState::Narrating(id) => Some(id),
        }
    }

    /// Evaluate one position sample.
    ///
    /// With `audio_unlocked == false` the transition still happens but the
    /// event is dropped, so the dwell is consumed silently.
    pub fn observe(
        &mut self,
        position: Position,
        pois: &[Poi],
        audio_unlocked: bool,
    ) -> Option<NarrationEvent> {
        if pois.is_empty() {
            return None;
        }
        let Some(poi) = self.select(position, pois) else {
            if let NarrationState::Narrating(id) = self.state {
                log::debug!("[narration] left proximity of poi {}", id);
            }
            self.state = NarrationState::Idle;
            return None;
        };
        if self.state == NarrationState::Narrating(poi.id) {
            return None;
        }
        self.state = NarrationState::Narrating(poi.id);
        if !audio_unlocked {
            log::info!("[narration] audio locked; skipping '{}'", poi.name);
            return None;
        }
        log::info!("[narration] entered proximity of '{}'", poi.name);
        Some(NarrationEvent::new(poi, NarrationTrigger::Proximity))
    }

    /// Narrate a user-selected POI. Leaves the dwell state alone.
    pub fn manual(poi: &Poi) -> NarrationEvent {
        NarrationEvent::new(poi, NarrationTrigger::Manual)
    }

    fn select<'a>(&self, position: Position, pois: &'a [Poi]) -> Option<&'a Poi> {
        let mut nearby = pois
            .iter()
            .map(|p| (p, distance_km(position, p.coordinates)))
            .filter(|(_, d)| *d <= self.threshold_km);
        match self.policy {
            SelectionPolicy::FirstMatch => nearby.next().map(|(p, _)| p),
            SelectionPolicy::Nearest => nearby.min_by(|a, b| a.1.total_cmp(&b.1)).map(|(p, _)| p),
        }
    }
}
