use cicerone_core::{SessionConfig, TrackingMode};

pub const DEFAULT_CATALOG_FUNCTION: &str = "get_poi_with_category";

/// Where the POI rows come from (a PostgREST-style RPC endpoint).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub function: String,
}

impl CatalogConfig {
    pub fn endpoint(&self) -> Option<String> {
        let base = self.base_url.as_deref()?.trim().trim_end_matches('/');
        if base.is_empty() {
            return None;
        }
        Some(format!("{}/rest/v1/rpc/{}", base, self.function))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuideConfig {
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
}

impl GuideConfig {
    /// Build the config from `data-*` attributes; `lookup` receives the
    /// attribute name. Unparsable values fall back to defaults.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let catalog = CatalogConfig {
            base_url: non_empty("data-catalog-url"),
            api_key: non_empty("data-catalog-key"),
            function: non_empty("data-catalog-rpc")
                .unwrap_or_else(|| DEFAULT_CATALOG_FUNCTION.to_string()),
        };

        let mut session = SessionConfig::default();
        if let Some(raw) = non_empty("data-mode") {
            match raw.parse::<TrackingMode>() {
                Ok(mode) => session.mode = mode,
                Err(e) => log::warn!("[config] {}", e),
            }
        }
        if let Some(raw) = non_empty("data-radius") {
            match raw.trim().parse::<f64>() {
                Ok(km) if km >= 0.0 => session.criteria.radius_km = km,
                _ => log::warn!("[config] ignoring radius '{}'", raw),
            }
        }
        if let Some(raw) = non_empty("data-follow") {
            session.follow = !matches!(raw.trim(), "false" | "0" | "off");
        }

        Self { catalog, session }
    }
}
