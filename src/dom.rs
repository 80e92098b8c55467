use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    add_listener(document, element_id, "click", move |_| handler());
}

/// Attach `handler` for `event_type` on the element with `element_id`.
/// Missing elements are logged and skipped.
pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event_type: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[dom] missing #{}; {} not wired", element_id, event_type);
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn input_value(document: &web::Document, element_id: &str) -> Option<String> {
    let el = document.get_element_by_id(element_id)?;
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
}

pub fn is_checked(document: &web::Document, element_id: &str) -> Option<bool> {
    document
        .get_element_by_id(element_id)?
        .dyn_ref::<web::HtmlInputElement>()
        .map(|i| i.checked())
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Create `<tag>` with optional text content.
pub fn element(document: &web::Document, tag: &str, text: Option<&str>) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    if text.is_some() {
        el.set_text_content(text);
    }
    Some(el)
}

pub fn root_attribute(document: &web::Document, root_id: &str, name: &str) -> Option<String> {
    document.get_element_by_id(root_id)?.get_attribute(name)
}
