//! Flat 13-column record form of a feature, shared by CSV export and the external table.

use thiserror::Error;

use super::{non_blank, CaseProperties, Feature, FeatureId, ResponsibleParty};

/// Column order of a flat record. `lat` and `lon` always trail.
pub const COLUMNS: [&str; 13] = [
    "id", "layer", "color", "titulo", "desc", "fecha", "provincia", "canton",
    "responsable", "impacto", "enlace", "lat", "lon",
];

/// Number of columns in a complete record.
pub const NUM_COLUMNS: usize = COLUMNS.len();

/// Why a record could not be turned back into a feature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected 13 columns, found {0}")]
    TooFewColumns(usize),

    #[error("missing feature id")]
    MissingId,

    #[error("missing layer name")]
    MissingLayer,

    #[error("unparseable {column} value '{value}'")]
    BadCoordinate { column: &'static str, value: String },
}

/// The header row, as owned strings.
pub fn header() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// True when `row` is the header row (case and surrounding whitespace ignored).
pub fn is_header(row: &[String]) -> bool {
    row.len() >= NUM_COLUMNS
        && row.iter().zip(COLUMNS).all(|(cell, col)| cell.trim().eq_ignore_ascii_case(col))
}

impl Feature {
    /// Serialize into a flat record; `color` is the owning layer's color.
    pub fn to_record(&self, color: &str) -> Vec<String> {
        let p = &self.properties;
        vec![
            self.id.to_string(),
            self.layer.clone(),
            color.to_string(),
            p.title.clone(),
            p.description.clone(),
            p.date.clone(),
            p.region.clone(),
            p.subregion.clone(),
            p.responsible.label().to_string(),
            p.impact.clone().unwrap_or_default(),
            p.evidence_url.clone().unwrap_or_default(),
            self.lat().to_string(),
            self.lon().to_string(),
        ]
    }

    /// Parse a flat record into a feature (with its `layer` field set) and the stored color.
    /// Extra trailing columns are ignored.
    pub fn from_record(row: &[String]) -> Result<(Feature, String), RecordError> {
        if row.len() < NUM_COLUMNS {
            return Err(RecordError::TooFewColumns(row.len()));
        }

        let id = row[0].trim();
        if id.is_empty() {
            return Err(RecordError::MissingId);
        }
        let layer = row[1].trim();
        if layer.is_empty() {
            return Err(RecordError::MissingLayer);
        }

        let lat = parse_coordinate("lat", &row[11])?;
        let lon = parse_coordinate("lon", &row[12])?;

        let properties = CaseProperties {
            title: row[3].clone(),
            description: row[4].clone(),
            date: row[5].clone(),
            region: row[6].clone(),
            subregion: row[7].clone(),
            responsible: ResponsibleParty::parse_lossy(&row[8]),
            impact: non_blank(Some(row[9].clone())),
            evidence_url: non_blank(Some(row[10].clone())),
        };

        let feature = Feature::build(lon, lat, properties, Some(FeatureId::from(id))).with_layer(layer);
        Ok((feature, row[2].clone()))
    }
}

fn parse_coordinate(column: &'static str, value: &str) -> Result<f64, RecordError> {
    value.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordError::BadCoordinate { column, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Feature {
        let props = CaseProperties {
            title: "Test".into(),
            description: "desc".into(),
            date: "2024-03-01".into(),
            responsible: ResponsibleParty::Municipality,
            region: "San José".into(),
            subregion: "Escazú".into(),
            impact: None,
            evidence_url: Some("https://example.org/x".into()),
        };
        Feature::build(-84.08, 9.93, props, Some("f1".into())).with_layer("Ops")
    }

    #[test]
    fn record_has_lat_lon_trailing() {
        let row = sample().to_record("#17becf");
        assert_eq!(row.len(), NUM_COLUMNS);
        assert_eq!(row[2], "#17becf");
        assert_eq!(row[8], "Municipalidad");
        assert_eq!(row[9], "");
        assert_eq!(&row[11..], &["9.93".to_string(), "-84.08".to_string()]);
    }

    #[test]
    fn record_parses_back() {
        let f = sample();
        let (back, color) = Feature::from_record(&f.to_record("#17becf")).unwrap();
        assert_eq!(back, f);
        assert_eq!(color, "#17becf");
    }

    #[test]
    fn short_and_bad_rows_are_rejected() {
        let short: Vec<String> = vec!["a".into(); 5];
        assert_eq!(Feature::from_record(&short).unwrap_err(), RecordError::TooFewColumns(5));

        let mut row = sample().to_record("#000000");
        row[12] = "west".into();
        assert!(matches!(Feature::from_record(&row), Err(RecordError::BadCoordinate { column: "lon", .. })));

        let mut row = sample().to_record("#000000");
        row[11] = "NaN".into();
        assert!(Feature::from_record(&row).is_err());
    }

    #[test]
    fn header_detection() {
        assert!(is_header(&header()));
        let shouty: Vec<String> = COLUMNS.iter().map(|c| format!(" {} ", c.to_uppercase())).collect();
        assert!(is_header(&shouty));
        assert!(!is_header(&sample().to_record("#000000")));
    }
}
