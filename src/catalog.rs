use crate::config::CatalogConfig;
use cicerone_core::{parse_rows, GuideError, GuideResult, Poi};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// One request/reply round trip to the POI backend.
pub async fn fetch_pois(config: &CatalogConfig) -> GuideResult<Vec<Poi>> {
    let body = fetch_body(config)
        .await
        .map_err(|e| GuideError::CatalogLoad(format!("{e:#}")))?;
    parse_rows(&body)
}

async fn fetch_body(config: &CatalogConfig) -> anyhow::Result<String> {
    let url = config
        .endpoint()
        .ok_or_else(|| anyhow::anyhow!("catalog endpoint not configured"))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    let headers = web::Headers::new().map_err(js_err)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_err)?;
    if let Some(key) = &config.api_key {
        headers.set("apikey", key).map_err(js_err)?;
        headers
            .set("Authorization", &format!("Bearer {}", key))
            .map_err(js_err)?;
    }

    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::Cors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str("{}"));
    let request = web::Request::new_with_str_and_init(&url, &init).map_err(js_err)?;

    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("HTTP {} {}", response.status(), response.status_text());
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("catalog reply is not text"))
}
