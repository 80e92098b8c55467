#![cfg(target_arch = "wasm32")]
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod app;
mod audio;
mod catalog;
mod config;
mod constants;
mod dom;
mod events;
mod geolocation;
mod overlay;
mod render;
mod retired;
mod speech;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cicerone-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[init] already started");
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = config::GuideConfig::from_attributes(|name| {
        dom::root_attribute(&document, constants::ROOT_ID, name)
    });
    if config.catalog.endpoint().is_none() {
        log::warn!(
            "[config] #{} has no data-catalog-url; catalog loads will fail",
            constants::ROOT_ID
        );
    }

    overlay::fill_radius_options(&document, config.session.criteria.radius_km);
    overlay::set_narrating(&document, false);
    if let Some(el) = document.get_element_by_id(constants::FOLLOW_ID) {
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.set_checked(config.session.follow);
        }
    }

    let shared = app::App::new_shared(config, document.clone());
    events::wire_gesture_unlock(&shared);
    events::wire_controls(&shared, &document);

    app::start_tracking(&shared);
    app::reload_catalog(&shared);
    Ok(())
}
