use crate::audio::WebTone;
use crate::config::GuideConfig;
use crate::constants::SPEECH_UNSUPPORTED_ALERT;
use crate::geolocation::{Fix, WebGeolocation};
use crate::speech::WebSpeech;
use crate::{catalog, overlay, render};
use cicerone_core::{
    Effects, GateOutcome, GuideError, GuideSession, Interaction, Outputs, PoiId,
    SessionId, TrackingMode, UtteranceToken, NARRATION_DELAY,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Everything one page owns: the session plus the platform adapters it drives.
pub struct App {
    pub session: GuideSession,
    pub geo: WebGeolocation,
    pub speech: WebSpeech,
    pub tone: WebTone,
    pub config: GuideConfig,
    pub document: web::Document,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    pub fn new_shared(config: GuideConfig, document: web::Document) -> SharedApp {
        Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let fixes = weak.clone();
            let ends = weak.clone();
            RefCell::new(App {
                session: GuideSession::new(config.session.clone()),
                geo: WebGeolocation::new(Rc::new(move |session, fix| {
                    on_fix(&fixes, session, fix)
                })),
                speech: WebSpeech::new(Rc::new(move |token| on_utterance_end(&ends, token))),
                tone: WebTone::default(),
                config,
                document,
            })
        })
    }

    fn session_and_outputs(&mut self) -> (&mut GuideSession, Outputs<'_>) {
        (
            &mut self.session,
            Outputs::new(&mut self.speech, &mut self.tone),
        )
    }
}

/// Run one transition against the session. Callbacks never overlap on the
/// page's single thread, so a failed borrow means a re-entrant call.
fn with_app<R>(shared: &SharedApp, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    match shared.try_borrow_mut() {
        Ok(mut app) => Some(f(&mut app)),
        Err(_) => {
            log::warn!("[app] re-entrant callback ignored");
            None
        }
    }
}

/// Push session state and effects out to the page.
pub fn sync(shared: &SharedApp, effects: Effects) {
    {
        let app = shared.borrow();
        let doc = &app.document;
        overlay::set_status(doc, app.session.status());
        overlay::set_narrating(doc, app.session.is_narrating());
        overlay::mark_mode(doc, app.session.mode());
        if effects.categories_changed {
            let selected = &app.session.criteria().category;
            overlay::fill_categories(doc, app.session.categories(), selected);
        }
        if effects.visible_changed {
            render::render_list(doc, app.session.visible());
        }
        if effects.visible_changed || effects.recenter.is_some() {
            if let Err(e) = render::dispatch_snapshot(&app.session.snapshot(effects.recenter)) {
                log::error!("[render] snapshot dispatch failed: {:?}", e);
            }
        }
    }
    if let Some(token) = effects.speak_after_delay {
        schedule_release(shared, token);
    }
}

fn schedule_release(shared: &SharedApp, token: UtteranceToken) {
    let weak = Rc::downgrade(shared);
    let release = Closure::once_into_js(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let released = with_app(&shared, |app| {
            app.session.release_utterance(token, &mut app.speech)
        });
        if let Some(Err(e)) = released {
            log::warn!("[narration] utterance {} failed: {}", token.get(), e);
        }
        sync(&shared, Effects::default());
    });
    let Some(window) = web::window() else {
        return;
    };
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        release.unchecked_ref(),
        NARRATION_DELAY.as_millis() as i32,
    ) {
        log::error!("[narration] setTimeout error: {:?}", e);
    }
}

fn on_fix(weak: &Weak<RefCell<App>>, session: SessionId, fix: Fix) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let effects = with_app(&shared, |app| match fix {
        Fix::Sample(position) => {
            app.geo.prune_retired(session);
            let (s, mut out) = app.session_and_outputs();
            s.on_position(session, position, &mut out)
        }
        Fix::Error(message) => app.session.on_position_error(session, &message),
    });
    if let Some(effects) = effects {
        sync(&shared, effects);
    }
}

fn on_utterance_end(weak: &Weak<RefCell<App>>, token: UtteranceToken) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    if with_app(&shared, |app| app.session.utterance_finished(token)).is_some() {
        sync(&shared, Effects::default());
    }
}

pub fn start_tracking(shared: &SharedApp) {
    let started = with_app(shared, |app| app.session.start_tracking(&mut app.geo));
    if let Some(Err(e)) = started {
        log::warn!("[tracker] {}", e);
    }
    sync(shared, Effects::default());
}

pub fn set_mode(shared: &SharedApp, mode: TrackingMode) {
    let switched = with_app(shared, |app| app.session.set_mode(mode, &mut app.geo));
    if let Some(Err(e)) = switched {
        log::warn!("[tracker] mode switch to {:?}: {}", mode, e);
    }
    sync(shared, Effects::default());
}

/// Issue a catalog load. Replies are applied in whatever order they land;
/// stale ones are discarded by the session.
pub fn reload_catalog(shared: &SharedApp) {
    let Some((ticket, config)) = with_app(shared, |app| {
        (app.session.begin_catalog_load(), app.config.catalog.clone())
    }) else {
        return;
    };
    sync(shared, Effects::default());

    let shared = shared.clone();
    spawn_local(async move {
        let reply = catalog::fetch_pois(&config).await;
        let applied = with_app(&shared, |app| {
            let (s, mut out) = app.session_and_outputs();
            s.complete_catalog_load(ticket, reply, &mut out)
        });
        match applied {
            Some(Ok(effects)) => sync(&shared, effects),
            Some(Err(e)) => {
                log::error!("[catalog] {}", e);
                sync(&shared, Effects::default());
            }
            None => {}
        }
    });
}

pub fn update_criteria(shared: &SharedApp, f: impl FnOnce(&mut GuideSession) -> Effects) {
    if let Some(effects) = with_app(shared, |app| f(&mut app.session)) {
        sync(shared, effects);
    }
}

pub fn set_follow(shared: &SharedApp, follow: bool) {
    with_app(shared, |app| app.session.set_follow(follow));
}

pub fn select_poi(shared: &SharedApp, id: PoiId) {
    let selected = with_app(shared, |app| {
        let (s, mut out) = app.session_and_outputs();
        s.select_poi(id, &mut out)
    });
    match selected {
        Some(Ok(effects)) => sync(shared, effects),
        Some(Err(GuideError::SpeechUnsupported)) => overlay::alert(SPEECH_UNSUPPORTED_ALERT),
        Some(Err(e)) => log::warn!("[narration] manual narration failed: {}", e),
        None => {}
    }
}

pub fn stop_narration(shared: &SharedApp) {
    with_app(shared, |app| app.session.stop_narration(&mut app.speech));
    sync(shared, Effects::default());
}

/// Gesture hook; must run synchronously inside the DOM event handler.
pub fn on_gesture(shared: &SharedApp, interaction: Interaction) {
    let outcome = with_app(shared, |app| {
        let (s, mut out) = app.session_and_outputs();
        s.on_interaction(interaction, &mut out)
    });
    match outcome {
        Some(Ok(GateOutcome::UnlockedWithoutSpeech)) => {
            log::warn!("[gate] unlocked without speech synthesis")
        }
        Some(Err(e)) => log::error!("[gate] {}; will retry on next gesture", e),
        _ => {}
    }
}
