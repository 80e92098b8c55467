use crate::constants::{ALL_CATEGORIES, DEFAULT_RADIUS_KM};
use crate::geo::{distance_km, Position};
use crate::poi::{Poi, PoiId};
use serde::Deserialize;

/// User-selected view criteria.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub category: String,
    pub search_text: String,
    /// 0 means no radius limit.
    pub radius_km: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_text: String::new(),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl FilterCriteria {
    /// Criteria that keep every POI.
    pub fn unrestricted() -> Self {
        Self {
            radius_km: 0.0,
            ..Self::default()
        }
    }

    #[inline]
    fn keeps_category(&self, poi: &Poi) -> bool {
        self.category == ALL_CATEGORIES || poi.category == self.category
    }

    #[inline]
    fn keeps_name(&self, poi: &Poi, needle: &str) -> bool {
        self.search_text.trim().is_empty() || poi.name.to_lowercase().contains(needle)
    }

    #[inline]
    fn keeps_distance(&self, poi: &Poi, position: Position) -> bool {
        self.radius_km == 0.0 || distance_km(position, poi.coordinates) <= self.radius_km
    }
}

/// Filter `pois` by category, then name, then radius around `position`.
/// Catalog order is preserved.
pub fn apply<'a>(pois: &'a [Poi], criteria: &FilterCriteria, position: Position) -> Vec<&'a Poi> {
    let needle = criteria.search_text.to_lowercase();
    pois.iter()
        .filter(|p| criteria.keeps_category(p))
        .filter(|p| criteria.keeps_name(p, &needle))
        .filter(|p| criteria.keeps_distance(p, position))
        .collect()
}

/// Holds the visible POI set between recomputations.
#[derive(Clone, Debug, Default)]
pub struct FilterEngine {
    visible: Vec<Poi>,
}

impl FilterEngine {
    pub fn visible(&self) -> &[Poi] {
        &self.visible
    }

    /// Show a freshly loaded catalog unfiltered. Returns whether the visible
    /// set changed.
    pub fn show_all(&mut self, pois: &[Poi]) -> bool {
        self.set(pois.iter().collect())
    }

    /// Recompute the visible set. While the position is unknown nothing is
    /// evaluated and the previous set stays frozen.
    pub fn refresh(
        &mut self,
        pois: &[Poi],
        criteria: &FilterCriteria,
        position: Option<Position>,
    ) -> bool {
        let Some(position) = position else {
            return false;
        };
        self.set(apply(pois, criteria, position))
    }

    fn set(&mut self, next: Vec<&Poi>) -> bool {
        let unchanged = next.len() == self.visible.len()
            && next.iter().zip(&self.visible).all(|(a, b)| *a == b);
        if unchanged {
            return false;
        }
        self.visible = next.into_iter().cloned().collect();
        log::debug!("[filter] {} visible", self.visible.len());
        true
    }

    pub fn visible_ids(&self) -> Vec<PoiId> {
        self.visible.iter().map(|p| p.id).collect()
    }
}

/// Label shown in the radius selector.
pub fn radius_label(radius_km: f64) -> String {
    if radius_km == 0.0 {
        "Tutti".to_string()
    } else if radius_km < 1.0 {
        format!("{:.0} m", radius_km * 1000.0)
    } else {
        format!("{} km", radius_km)
    }
}
