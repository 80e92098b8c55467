use crate::app::{self, SharedApp};
use crate::constants::{
    CATEGORY_ID, FOLLOW_ID, LISTEN_ATTR, MODE_DRIVING_ID, MODE_WALKING_ID, POI_LIST_ID, RADIUS_ID,
    RELOAD_ID, SEARCH_ID, STOP_ID,
};
use crate::dom;
use cicerone_core::{PoiId, TrackingMode};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_controls(shared: &SharedApp, document: &web::Document) {
    wire_mode_buttons(shared, document);
    wire_filters(shared, document);
    wire_buttons(shared, document);
    wire_listen(shared, document);
}

fn wire_mode_buttons(shared: &SharedApp, document: &web::Document) {
    for (id, mode) in [
        (MODE_WALKING_ID, TrackingMode::Walking),
        (MODE_DRIVING_ID, TrackingMode::Driving),
    ] {
        let shared = shared.clone();
        dom::add_click_listener(document, id, move || {
            log::info!("[click] mode {:?}", mode);
            app::set_mode(&shared, mode);
        });
    }
}

fn wire_filters(shared: &SharedApp, document: &web::Document) {
    let s = shared.clone();
    let doc = document.clone();
    dom::add_listener(document, SEARCH_ID, "input", move |_| {
        let text = dom::input_value(&doc, SEARCH_ID).unwrap_or_default();
        app::update_criteria(&s, |session| session.set_search(&text));
    });

    let s = shared.clone();
    let doc = document.clone();
    dom::add_listener(document, CATEGORY_ID, "change", move |_| {
        if let Some(category) = dom::input_value(&doc, CATEGORY_ID) {
            app::update_criteria(&s, |session| session.set_category(&category));
        }
    });

    let s = shared.clone();
    let doc = document.clone();
    dom::add_listener(document, RADIUS_ID, "change", move |_| {
        let raw = dom::input_value(&doc, RADIUS_ID).unwrap_or_default();
        match raw.parse::<f64>() {
            Ok(km) => app::update_criteria(&s, |session| session.set_radius(km)),
            Err(_) => log::warn!("[filter] bad radius '{}'", raw),
        }
    });

    let s = shared.clone();
    let doc = document.clone();
    dom::add_listener(document, FOLLOW_ID, "change", move |_| {
        if let Some(follow) = dom::is_checked(&doc, FOLLOW_ID) {
            app::set_follow(&s, follow);
        }
    });
}

fn wire_buttons(shared: &SharedApp, document: &web::Document) {
    let s = shared.clone();
    dom::add_click_listener(document, RELOAD_ID, move || {
        log::info!("[click] reload catalog");
        app::reload_catalog(&s);
    });

    let s = shared.clone();
    dom::add_click_listener(document, STOP_ID, move || app::stop_narration(&s));
}

// One delegated listener on the list; buttons are rebuilt on every render.
fn wire_listen(shared: &SharedApp, document: &web::Document) {
    let s = shared.clone();
    dom::add_listener(document, POI_LIST_ID, "click", move |ev| {
        let Some(id) = listen_target(&ev) else {
            return;
        };
        log::info!("[click] listen poi {}", id);
        app::select_poi(&s, id);
    });
}

fn listen_target(ev: &web::Event) -> Option<PoiId> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let button = target.closest(&format!("[{}]", LISTEN_ATTR)).ok()??;
    button.get_attribute(LISTEN_ATTR)?.parse().ok()
}
