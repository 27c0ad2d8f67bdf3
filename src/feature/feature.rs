use geo::Point;
use serde::{Deserialize, Serialize};

use super::{CaseProperties, FeatureId, PropertiesPatch};

/// A single reported case: a WGS84 point plus its case metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub(crate) id: FeatureId,
    /// Owning layer name, copied at insertion time.
    pub(crate) layer: String,
    #[serde(with = "lon_lat")]
    pub(crate) coordinates: Point<f64>, // (lon, lat)
    pub(crate) properties: CaseProperties,
}

impl Feature {
    /// Build a feature from coordinates and properties, generating an id when none is given.
    /// Coordinate ranges are not validated; see [`Feature::in_wgs84_bounds`].
    pub fn build(lon: f64, lat: f64, mut properties: CaseProperties, id: Option<FeatureId>) -> Self {
        properties.sanitize();
        Self {
            id: id.unwrap_or_else(FeatureId::generate),
            layer: String::new(),
            coordinates: Point::new(lon, lat),
            properties,
        }
    }

    pub fn id(&self) -> &FeatureId { &self.id }

    pub fn layer(&self) -> &str { &self.layer }

    pub fn coordinates(&self) -> Point<f64> { self.coordinates }

    pub fn lon(&self) -> f64 { self.coordinates.x() }

    pub fn lat(&self) -> f64 { self.coordinates.y() }

    pub fn properties(&self) -> &CaseProperties { &self.properties }

    /// True when lon is within [-180, 180] and lat within [-90, 90].
    pub fn in_wgs84_bounds(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon()) && (-90.0..=90.0).contains(&self.lat())
    }

    pub(crate) fn with_layer(mut self, layer: &str) -> Self {
        self.layer = layer.to_string();
        self
    }

    pub(crate) fn apply_patch(&mut self, patch: PropertiesPatch) {
        self.properties.apply(patch);
    }

    pub(crate) fn set_coordinates(&mut self, lon: f64, lat: f64) {
        self.coordinates = Point::new(lon, lat);
    }
}

/// Serialize a point as `[lon, lat]`.
mod lon_lat {
    use geo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        [point.x(), point.y()].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point<f64>, D::Error> {
        let [lon, lat] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Point::new(lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_generates_id_when_missing() {
        let a = Feature::build(-84.08, 9.93, CaseProperties::titled("A"), None);
        let b = Feature::build(-84.08, 9.93, CaseProperties::titled("B"), None);
        assert_ne!(a.id(), b.id());
        assert_eq!((a.lon(), a.lat()), (-84.08, 9.93));
    }

    #[test]
    fn build_keeps_supplied_id() {
        let f = Feature::build(0.0, 0.0, CaseProperties::default(), Some("abc".into()));
        assert_eq!(f.id().as_str(), "abc");
    }

    #[test]
    fn out_of_range_coordinates_are_kept_but_flagged() {
        let f = Feature::build(200.0, -95.0, CaseProperties::default(), None);
        assert_eq!(f.lon(), 200.0);
        assert!(!f.in_wgs84_bounds());
    }

    #[test]
    fn serializes_coordinates_lon_first() {
        let f = Feature::build(-84.08, 9.93, CaseProperties::titled("T"), Some("x".into()));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["coordinates"], serde_json::json!([-84.08, 9.93]));
        let back: Feature = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }
}
