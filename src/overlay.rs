use crate::constants::{
    ACTIVE_CLASS, ALL_LABEL, CATEGORY_ID, MODE_DRIVING_ID, MODE_WALKING_ID, NARRATING_TOAST,
    RADIUS_ID, STATUS_ID, TOAST_ID,
};
use crate::dom;
use cicerone_core::{radius_label, TrackingMode, ALL_CATEGORIES, RADIUS_OPTIONS_KM};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, STATUS_ID, text);
}

/// Show or hide the "currently narrating" toast.
pub fn set_narrating(document: &web::Document, narrating: bool) {
    if let Some(el) = document.get_element_by_id(TOAST_ID) {
        el.set_text_content(Some(NARRATING_TOAST));
        let cl = el.class_list();
        if narrating {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        } else {
            _ = cl.add_1("hidden");
            // fallback for environments without CSS class
            _ = el.set_attribute("style", "display:none");
        }
    }
}

pub fn mark_mode(document: &web::Document, mode: TrackingMode) {
    for (id, m) in [
        (MODE_WALKING_ID, TrackingMode::Walking),
        (MODE_DRIVING_ID, TrackingMode::Driving),
    ] {
        if let Some(el) = document.get_element_by_id(id) {
            let cl = el.class_list();
            _ = if m == mode {
                cl.add_1(ACTIVE_CLASS)
            } else {
                cl.remove_1(ACTIVE_CLASS)
            };
        }
    }
}

/// Rebuild the category selector, keeping `selected` chosen.
pub fn fill_categories(document: &web::Document, categories: &[String], selected: &str) {
    let Some(select) = document.get_element_by_id(CATEGORY_ID) else {
        return;
    };
    select.set_inner_html("");
    for cat in categories {
        let label = if cat == ALL_CATEGORIES { ALL_LABEL } else { cat.as_str() };
        append_option(document, &select, cat, label);
    }
    if let Some(s) = select.dyn_ref::<web::HtmlSelectElement>() {
        s.set_value(selected);
    }
}

pub fn fill_radius_options(document: &web::Document, selected_km: f64) {
    let Some(select) = document.get_element_by_id(RADIUS_ID) else {
        return;
    };
    select.set_inner_html("");
    for km in RADIUS_OPTIONS_KM {
        append_option(document, &select, &km.to_string(), &radius_label(km));
    }
    if let Some(s) = select.dyn_ref::<web::HtmlSelectElement>() {
        s.set_value(&selected_km.to_string());
    }
}

fn append_option(document: &web::Document, select: &web::Element, value: &str, label: &str) {
    if let Some(opt) = dom::element(document, "option", Some(label)) {
        _ = opt.set_attribute("value", value);
        _ = select.append_child(&opt);
    }
}

pub fn alert(message: &str) {
    if let Some(w) = web::window() {
        _ = w.alert_with_message(message);
    }
}
