use crate::constants::{icon_for, LISTEN_ATTR, LISTEN_LABEL, POI_LIST_ID, RENDER_EVENT};
use crate::dom;
use cicerone_core::{MapSnapshot, Poi, Position};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Marker description handed to the map layer.
#[derive(Serialize)]
struct MarkerView<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    elevation: Option<f64>,
    image_url: Option<&'a str>,
    lat: f64,
    lon: f64,
    icon_url: &'static str,
}

impl<'a> From<&'a Poi> for MarkerView<'a> {
    fn from(p: &'a Poi) -> Self {
        Self {
            id: p.id,
            name: &p.name,
            description: &p.description,
            category: &p.category,
            elevation: p.elevation,
            image_url: p.image_url.as_deref(),
            lat: p.coordinates.lat,
            lon: p.coordinates.lon,
            icon_url: icon_for(&p.category),
        }
    }
}

#[derive(Serialize)]
struct MapView<'a> {
    markers: Vec<MarkerView<'a>>,
    position: Option<Position>,
    radius_m: f64,
    recenter: Option<Position>,
}

/// Rebuild the POI list. Text goes through `textContent`, never HTML.
pub fn render_list(document: &web::Document, pois: &[Poi]) {
    let Some(list) = document.get_element_by_id(POI_LIST_ID) else {
        return;
    };
    list.set_inner_html("");
    for poi in pois {
        let Some(item) = dom::element(document, "li", None) else {
            continue;
        };
        _ = item.set_attribute("data-poi-id", &poi.id.to_string());

        let mut parts = vec![dom::element(document, "b", Some(&poi.name))];
        if let Some(elevation) = poi.elevation {
            parts.push(dom::element(
                document,
                "span",
                Some(&format!(" 🏔️ Altitudine: {} m", elevation)),
            ));
        }
        parts.push(dom::element(document, "i", Some(&format!(" {}", poi.category))));
        parts.push(dom::element(document, "p", Some(&poi.description)));
        if let Some(button) = dom::element(document, "button", Some(LISTEN_LABEL)) {
            _ = button.set_attribute(LISTEN_ATTR, &poi.id.to_string());
            parts.push(Some(button));
        }
        for part in parts.into_iter().flatten() {
            _ = item.append_child(&part);
        }
        _ = list.append_child(&item);
    }
}

/// Publish the snapshot as a `cicerone:render` CustomEvent on `window`.
pub fn dispatch_snapshot(snapshot: &MapSnapshot) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let view = MapView {
        markers: snapshot.pois.iter().map(MarkerView::from).collect(),
        position: snapshot.position,
        radius_m: snapshot.radius_km * 1000.0,
        recenter: snapshot.recenter,
    };
    let json = serde_json::to_string(&view)?;
    let detail = js_sys::JSON::parse(&json).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let init = web::CustomEventInit::new();
    init.set_detail(&detail);
    let event = web::CustomEvent::new_with_event_init_dict(RENDER_EVENT, &init)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    window
        .dispatch_event(&event)
        .map_err(|e: JsValue| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
