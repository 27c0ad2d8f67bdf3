//! GeoJSON export and import of point collections.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::{
    common::write_atomic,
    feature::{record::{header, COLUMNS}, Feature, FeatureId},
    store::{FeatureCollection, LayerStore},
    sync::{import_rows, ImportReport},
};

/// Layer assigned to imported features that do not name one.
const UNNAMED_LAYER: &str = "General";

impl Feature {
    /// GeoJSON Feature with Point geometry `[lon, lat]`; `color` is the owning layer's color.
    /// Properties carry every record column except the coordinates.
    pub fn to_geojson(&self, color: &str) -> Value {
        let record = self.to_record(color);
        let mut properties = Map::new();
        for (key, value) in COLUMNS.iter().zip(record).take(COLUMNS.len() - 2) {
            properties.insert(key.to_string(), Value::String(value));
        }
        properties.insert("impacto".to_string(), json!(self.properties.impact));
        properties.insert("enlace".to_string(), json!(self.properties.evidence_url));

        json!({
            "type": "Feature",
            "id": self.id.as_str(),
            "geometry": {
                "type": "Point",
                "coordinates": [self.lon(), self.lat()],
            },
            "properties": properties,
        })
    }
}

impl FeatureCollection<'_> {
    /// Export as a GeoJSON FeatureCollection, in collection order.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self.iter()
            .map(|entry| entry.feature.to_geojson(entry.color))
            .collect();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

/// Write a collection as a GeoJSON file.
pub fn write_geojson(collection: &FeatureCollection<'_>, path: &Path, force: bool) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(&collection.to_geojson())
        .context("[io::geojson] Failed to serialize GeoJSON")?;
    write_atomic(path, &bytes, force)
        .with_context(|| format!("[io::geojson] Failed to write GeoJSON to {}", path.display()))
}

/// Render a JSON property value as record text.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Convert one GeoJSON Feature into a flat record, or `None` if it is not a usable point.
fn feature_to_record(feature: &Value) -> Option<Vec<String>> {
    let geometry = feature.get("geometry")?;
    if geometry.get("type")?.as_str()? != "Point" {
        return None;
    }
    let coords = geometry.get("coordinates")?.as_array()?;
    let lon = coords.first()?.as_f64()?;
    let lat = coords.get(1)?.as_f64()?;

    let empty = Map::new();
    let properties = feature.get("properties").and_then(Value::as_object).unwrap_or(&empty);

    let mut record: Vec<String> = COLUMNS.iter().map(|key| cell(properties.get(*key))).collect();
    if record[0].trim().is_empty() {
        record[0] = match feature.get("id") {
            Some(id) if !id.is_null() => cell(Some(id)),
            _ => FeatureId::generate().to_string(),
        };
    }
    if record[1].trim().is_empty() {
        record[1] = UNNAMED_LAYER.to_string();
    }
    record[11] = lat.to_string();
    record[12] = lon.to_string();
    Some(record)
}

/// Build a Layer Store from a GeoJSON FeatureCollection.
///
/// Features are grouped into layers by their `layer` property; each layer
/// takes the color of its first feature. Non-point or malformed features are
/// skipped and counted in the report.
pub fn read_geojson_value(value: &Value) -> Result<(LayerStore, ImportReport)> {
    if value.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        bail!("[io::geojson] Expected a FeatureCollection");
    }
    let features = value.get("features")
        .and_then(Value::as_array)
        .context("[io::geojson] FeatureCollection has no features array")?;

    let mut rows = vec![header()];
    let mut skipped = 0;
    for (i, feature) in features.iter().enumerate() {
        match feature_to_record(feature) {
            Some(record) => rows.push(record),
            None => {
                debug!("[io::geojson] skipping feature {i}: not a point feature");
                skipped += 1;
            }
        }
    }

    let (store, mut report) = import_rows(&rows).unwrap_or_default();
    report.skipped += skipped;
    Ok((store, report))
}

/// Read a GeoJSON file into a Layer Store.
pub fn read_geojson(path: &Path) -> Result<(LayerStore, ImportReport)> {
    let file = File::open(path)
        .with_context(|| format!("[io::geojson] Failed to open GeoJSON file: {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::geojson] Failed to parse GeoJSON file: {}", path.display()))?;
    read_geojson_value(&value)
}

#[cfg(test)]
mod tests {
    use crate::feature::CaseProperties;

    use super::*;

    fn ops_store() -> LayerStore {
        let mut store = LayerStore::new();
        store.create_layer("Ops", "17becf", true).unwrap();
        store.append_feature("Ops", -84.08, 9.93, CaseProperties::titled("Test")).unwrap();
        store
    }

    #[test]
    fn point_coordinates_are_lon_lat() {
        let store = ops_store();
        let geojson = store.flatten().to_geojson();
        assert_eq!(geojson["type"], "FeatureCollection");
        let feature = &geojson["features"][0];
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], json!([-84.08, 9.93]));
    }

    #[test]
    fn properties_carry_id_layer_and_color() {
        let store = ops_store();
        let geojson = store.flatten().to_geojson();
        let props = geojson["features"][0]["properties"].as_object().unwrap();
        let id = store.feature("Ops", 0).unwrap().id().to_string();
        assert_eq!(props["id"], json!(id));
        assert_eq!(props["layer"], "Ops");
        assert_eq!(props["color"], "#17becf");
        assert_eq!(props["titulo"], "Test");
        assert_eq!(props["impacto"], Value::Null);
        assert!(!props.contains_key("lat") && !props.contains_key("lon"));
        assert_eq!(props.len(), COLUMNS.len() - 2);
    }

    #[test]
    fn import_restores_store() {
        let store = ops_store();
        let (back, report) = read_geojson_value(&store.flatten().to_geojson()).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(back, store);
    }

    #[test]
    fn import_skips_non_points_and_fills_gaps() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }, "properties": {} },
                { "type": "Feature", "id": 7, "geometry": { "type": "Point", "coordinates": [-84.1, 9.9] }, "properties": { "titulo": "bare" } },
            ]
        });
        let (store, report) = read_geojson_value(&value).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        let f = store.feature(UNNAMED_LAYER, 0).unwrap();
        assert_eq!(f.id().as_str(), "7");
        assert_eq!(f.properties().title, "bare");
    }

    #[test]
    fn rejects_non_collections() {
        assert!(read_geojson_value(&json!({ "type": "Feature" })).is_err());
    }
}
