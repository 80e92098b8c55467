//! Application state of one guide session.
//!
//! `GuideSession` owns every piece of mutable state (mode, position, catalog,
//! criteria, narration) and exposes it through explicit transition
//! functions. Front-ends call one transition per platform callback and apply
//! the returned [`Effects`] after the borrow has ended.

use crate::announcer::Announcer;
use crate::capabilities::{Geolocation, Outputs, SpeechOutput, UtteranceToken};
use crate::catalog::{LoadOutcome, LoadTicket, PoiCatalog};
use crate::error::Result;
use crate::filter::{FilterCriteria, FilterEngine};
use crate::gate::{AudioGate, GateOutcome, Interaction};
use crate::geo::Position;
use crate::poi::{Poi, PoiId};
use crate::proximity::{NarrationEvent, NarrationState, ProximityNarrator, SelectionPolicy};
use crate::tracker::{PositionTracker, SessionId, TrackingMode};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: TrackingMode,
    pub criteria: FilterCriteria,
    /// Recenter the map on every new position.
    pub follow: bool,
    pub selection: SelectionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::Walking,
            criteria: FilterCriteria::default(),
            follow: true,
            selection: SelectionPolicy::FirstMatch,
        }
    }
}

/// What the rendering layer has to do after a transition.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Effects {
    pub visible_changed: bool,
    pub categories_changed: bool,
    pub recenter: Option<Position>,
    /// Release this utterance once the narration delay has elapsed.
    pub speak_after_delay: Option<UtteranceToken>,
}

impl Effects {
    fn merge(&mut self, other: Effects) {
        self.visible_changed |= other.visible_changed;
        self.categories_changed |= other.categories_changed;
        self.recenter = other.recenter.or(self.recenter);
        self.speak_after_delay = other.speak_after_delay.or(self.speak_after_delay);
    }
}

/// Owned, serializable view for the map layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub pois: Vec<Poi>,
    pub position: Option<Position>,
    pub radius_km: f64,
    pub recenter: Option<Position>,
}

#[derive(Debug)]
pub struct GuideSession {
    tracker: PositionTracker,
    catalog: PoiCatalog,
    criteria: FilterCriteria,
    filter: FilterEngine,
    narrator: ProximityNarrator,
    gate: AudioGate,
    announcer: Announcer,
    position: Option<Position>,
    follow: bool,
    status: String,
}

impl Default for GuideSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GuideSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            tracker: PositionTracker::new(config.mode),
            catalog: PoiCatalog::new(),
            criteria: config.criteria,
            filter: FilterEngine::default(),
            narrator: ProximityNarrator::new(config.selection),
            gate: AudioGate::default(),
            announcer: Announcer::new(),
            position: None,
            follow: config.follow,
            status: "Caricamento...".to_string(),
        }
    }

    // ---------------- Accessors ----------------

    pub fn mode(&self) -> TrackingMode {
        self.tracker.mode()
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn catalog(&self) -> &PoiCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[String] {
        self.catalog.categories()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> &[Poi] {
        self.filter.visible()
    }

    pub fn narration_state(&self) -> NarrationState {
        self.narrator.state()
    }

    pub fn audio_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    pub fn is_narrating(&self) -> bool {
        self.announcer.is_narrating()
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn snapshot(&self, recenter: Option<Position>) -> MapSnapshot {
        MapSnapshot {
            pois: self.filter.visible().to_vec(),
            position: self.position,
            radius_km: self.criteria.radius_km,
            recenter,
        }
    }

    // ---------------- Tracking ----------------

    pub fn start_tracking(&mut self, geo: &mut dyn Geolocation) -> Result<SessionId> {
        let mode = self.tracker.mode();
        let started = self.tracker.start(mode, geo);
        self.status = self.tracker.status().to_string();
        started
    }

    /// Switch tracking mode. A no-op when the mode is unchanged and the
    /// tracker is already running.
    pub fn set_mode(&mut self, mode: TrackingMode, geo: &mut dyn Geolocation) -> Result<()> {
        if mode == self.tracker.mode() && self.tracker.is_running() {
            return Ok(());
        }
        let started = self.tracker.start(mode, geo);
        self.status = self.tracker.status().to_string();
        started.map(|_| ())
    }

    pub fn stop_tracking(&mut self, geo: &mut dyn Geolocation) {
        self.tracker.stop(geo);
    }

    pub fn on_position(
        &mut self,
        session: SessionId,
        position: Position,
        out: &mut Outputs<'_>,
    ) -> Effects {
        let mut effects = Effects::default();
        let Some(fresh) = self.tracker.on_sample(session, position) else {
            if self.tracker.current_session() == Some(session) {
                self.status = self.tracker.status().to_string();
            }
            return effects;
        };
        self.status = self.tracker.status().to_string();
        self.position = Some(fresh);
        if self.follow {
            effects.recenter = Some(fresh);
        }
        effects.visible_changed = self.refilter();
        effects.merge(self.evaluate_proximity(out));
        effects
    }

    pub fn on_position_error(&mut self, session: SessionId, message: &str) -> Effects {
        if self.tracker.on_error(session, message) {
            self.status = self.tracker.status().to_string();
        }
        Effects::default()
    }

    // ---------------- Catalog ----------------

    pub fn begin_catalog_load(&mut self) -> LoadTicket {
        self.status = "Caricamento...".to_string();
        self.catalog.begin_load()
    }

    pub fn complete_catalog_load(
        &mut self,
        ticket: LoadTicket,
        reply: Result<Vec<Poi>>,
        out: &mut Outputs<'_>,
    ) -> Result<Effects> {
        let outcome = self.catalog.complete_load(ticket, reply).inspect_err(|e| {
            self.status = format!("Errore caricamento POI: {}", e);
        })?;
        let mut effects = Effects::default();
        let LoadOutcome::Replaced { count } = outcome else {
            return Ok(effects);
        };
        self.status = format!("✅ Caricati {} punti", count);
        effects.categories_changed = true;
        effects.visible_changed = self.filter.show_all(self.catalog.pois());
        effects.visible_changed |= self.refilter();
        effects.merge(self.evaluate_proximity(out));
        Ok(effects)
    }

    // ---------------- Filters ----------------

    /// Replace the criteria. A radius change always counts as a visible
    /// change since the map draws the radius circle.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Effects {
        let radius_changed = criteria.radius_km != self.criteria.radius_km;
        self.criteria = criteria;
        let refiltered = self.refilter();
        Effects {
            visible_changed: refiltered || radius_changed,
            ..Effects::default()
        }
    }

    pub fn set_category(&mut self, category: &str) -> Effects {
        let criteria = FilterCriteria {
            category: category.to_string(),
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn set_search(&mut self, search_text: &str) -> Effects {
        let criteria = FilterCriteria {
            search_text: search_text.to_string(),
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn set_radius(&mut self, radius_km: f64) -> Effects {
        let criteria = FilterCriteria {
            radius_km,
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn set_follow(&mut self, follow: bool) {
        self.follow = follow;
    }

    fn refilter(&mut self) -> bool {
        self.filter
            .refresh(self.catalog.pois(), &self.criteria, self.position)
    }

    // ---------------- Narration ----------------

    fn evaluate_proximity(&mut self, out: &mut Outputs<'_>) -> Effects {
        let Some(position) = self.position else {
            return Effects::default();
        };
        let unlocked = self.gate.is_unlocked();
        match self.narrator.observe(position, self.catalog.pois(), unlocked) {
            Some(event) => self.emit(event, out).unwrap_or_else(|e| {
                log::debug!("[narration] automatic narration skipped: {}", e);
                Effects::default()
            }),
            None => Effects::default(),
        }
    }

    fn emit(&mut self, event: NarrationEvent, out: &mut Outputs<'_>) -> Result<Effects> {
        let token = self.announcer.announce(event.text, out)?;
        log::info!(
            "[narration] poi {} via {:?} (utterance {})",
            event.poi_id,
            event.trigger,
            token.get()
        );
        Ok(Effects {
            speak_after_delay: Some(token),
            ..Effects::default()
        })
    }

    /// Narrate a POI the user picked. Bypasses the dwell state; reports
    /// missing speech so the front-end can tell the user.
    pub fn select_poi(&mut self, id: PoiId, out: &mut Outputs<'_>) -> Result<Effects> {
        let Some(poi) = self.catalog.find(id) else {
            log::warn!("[narration] unknown poi {}", id);
            return Ok(Effects::default());
        };
        let event = ProximityNarrator::manual(poi);
        self.emit(event, out)
    }

    pub fn release_utterance(
        &mut self,
        token: UtteranceToken,
        speech: &mut dyn SpeechOutput,
    ) -> Result<bool> {
        self.announcer.release(token, speech)
    }

    pub fn utterance_finished(&mut self, token: UtteranceToken) {
        self.announcer.finished(token);
    }

    pub fn stop_narration(&mut self, speech: &mut dyn SpeechOutput) {
        self.announcer.stop(speech);
    }

    pub fn on_interaction(
        &mut self,
        interaction: Interaction,
        out: &mut Outputs<'_>,
    ) -> Result<GateOutcome> {
        self.gate.on_interaction(interaction, out)
    }
}

