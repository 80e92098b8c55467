use crate::app::{self, SharedApp};
use cicerone_core::Interaction;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Any press or touch anywhere on the page may unlock audio. Listeners run in
// the capture phase so the gate sees the gesture before any control does.
pub fn wire_gesture_unlock(shared: &SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    for event_type in ["pointerdown", "touchstart"] {
        let shared = shared.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(interaction) = Interaction::from_event_type(&ev.type_()) {
                app::on_gesture(&shared, interaction);
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback_and_bool(
            event_type,
            closure.as_ref().unchecked_ref(),
            true,
        );
        closure.forget();
    }
}
