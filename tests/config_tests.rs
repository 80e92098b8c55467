// Host-side tests for the web front-end's data-attribute config.
// The main crate is wasm-only, so the pure modules are included directly.
#[allow(dead_code)]
mod config {
    include!("../src/config.rs");
}

#[allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use cicerone_core::TrackingMode;
use config::{CatalogConfig, GuideConfig, DEFAULT_CATALOG_FUNCTION};
use std::collections::HashMap;

fn from(pairs: &[(&str, &str)]) -> GuideConfig {
    let attrs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    GuideConfig::from_attributes(|name| attrs.get(name).cloned())
}

#[test]
fn defaults_without_attributes() {
    let cfg = from(&[]);
    assert_eq!(cfg.catalog.base_url, None);
    assert_eq!(cfg.catalog.endpoint(), None);
    assert_eq!(cfg.catalog.function, DEFAULT_CATALOG_FUNCTION);
    assert_eq!(cfg.session.mode, TrackingMode::Walking);
    assert_eq!(cfg.session.criteria.radius_km, 50.0);
    assert!(cfg.session.follow);
}

#[test]
fn endpoint_is_built_from_base_url() {
    let cfg = from(&[
        ("data-catalog-url", "https://example.supabase.co/"),
        ("data-catalog-key", "anon"),
    ]);
    assert_eq!(
        cfg.catalog.endpoint().as_deref(),
        Some("https://example.supabase.co/rest/v1/rpc/get_poi_with_category")
    );
    assert_eq!(cfg.catalog.api_key.as_deref(), Some("anon"));

    let custom = CatalogConfig {
        base_url: Some("http://localhost:54321".into()),
        api_key: None,
        function: "pois_near".into(),
    };
    assert_eq!(
        custom.endpoint().as_deref(),
        Some("http://localhost:54321/rest/v1/rpc/pois_near")
    );
}

#[test]
fn blank_attributes_count_as_missing() {
    let cfg = from(&[("data-catalog-url", "  "), ("data-catalog-rpc", "")]);
    assert_eq!(cfg.catalog.endpoint(), None);
    assert_eq!(cfg.catalog.function, DEFAULT_CATALOG_FUNCTION);
}

#[test]
fn session_attributes() {
    let cfg = from(&[
        ("data-mode", "auto"),
        ("data-radius", "0.1"),
        ("data-follow", "off"),
    ]);
    assert_eq!(cfg.session.mode, TrackingMode::Driving);
    assert_eq!(cfg.session.criteria.radius_km, 0.1);
    assert!(!cfg.session.follow);
}

#[test]
fn bad_values_fall_back() {
    let cfg = from(&[
        ("data-mode", "skateboard"),
        ("data-radius", "-3"),
        ("data-follow", "yes"),
    ]);
    assert_eq!(cfg.session.mode, TrackingMode::Walking);
    assert_eq!(cfg.session.criteria.radius_km, 50.0);
    assert!(cfg.session.follow);
}

#[test]
fn category_icons() {
    assert_eq!(
        constants::icon_for("Lago"),
        "https://cdn-icons-png.flaticon.com/512/727/727790.png"
    );
    assert_eq!(constants::icon_for("Sconosciuta"), constants::DEFAULT_ICON);
}
