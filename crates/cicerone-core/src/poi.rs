use crate::error::{GuideError, Result};
use crate::geo::Position;
use serde::{Deserialize, Serialize};

pub type PoiId = i64;

/// A point of interest as held by the catalog. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Poi {
    pub id: PoiId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub elevation: Option<f64>,
    pub image_url: Option<String>,
    pub coordinates: Position,
}

/// Raw row as returned by the `get_poi_with_category` backend function.
#[derive(Clone, Debug, Deserialize)]
pub struct PoiRow {
    pub id: PoiId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub geojson: GeoJsonPoint,
}

/// GeoJSON point: `coordinates` is `[longitude, latitude, ...]`.
#[derive(Clone, Debug, Deserialize)]
pub struct GeoJsonPoint {
    pub coordinates: Vec<f64>,
}

impl TryFrom<PoiRow> for Poi {
    type Error = GuideError;

    fn try_from(row: PoiRow) -> Result<Self> {
        let (lon, lat) = match row.geojson.coordinates.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => (*lon, *lat),
            other => {
                return Err(GuideError::CatalogLoad(format!(
                    "poi {} has invalid coordinates {:?}",
                    row.id, other
                )))
            }
        };
        Ok(Poi {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            category: row.category_name.unwrap_or_default(),
            elevation: row.elevation,
            image_url: row.image_url.filter(|u| !u.is_empty()),
            coordinates: Position::new(lat, lon),
        })
    }
}

/// Decode a backend reply body into catalog POIs.
///
/// A body that is not an array fails the whole load; individual rows that do
/// not decode or carry unusable coordinates are dropped with a warning.
pub fn parse_rows(body: &str) -> Result<Vec<Poi>> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| GuideError::CatalogLoad(format!("malformed catalog reply: {e}")))?;
    let total = rows.len();
    let pois: Vec<Poi> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match decode_row(value) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("[catalog] skipping row {}: {}", i, e);
                None
            }
        })
        .collect();
    if pois.len() != total {
        log::warn!("[catalog] kept {} of {} rows", pois.len(), total);
    }
    Ok(pois)
}

fn decode_row(value: serde_json::Value) -> Result<Poi> {
    let row: PoiRow = serde_json::from_value(value)
        .map_err(|e| GuideError::CatalogLoad(format!("undecodable row: {e}")))?;
    Poi::try_from(row)
}
