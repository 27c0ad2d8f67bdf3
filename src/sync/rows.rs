use tracing::debug;

use crate::{
    feature::{record::{header, is_header}, Feature},
    store::LayerStore,
    style::normalize_color,
};

/// What happened to the rows of a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data rows turned into features.
    pub imported: usize,
    /// Data rows dropped as malformed or duplicate.
    pub skipped: usize,
    /// Layers created while grouping rows.
    pub layers: usize,
}

/// Header row followed by one row per feature, in flatten order.
pub fn export_rows(store: &LayerStore) -> Vec<Vec<String>> {
    let collection = store.flatten();
    let mut rows = Vec::with_capacity(collection.len() + 1);
    rows.push(header());
    rows.extend(collection.iter().map(|entry| entry.feature.to_record(entry.color)));
    rows
}

/// Data rows of a table: blank rows (every cell empty) are ignored, and so is
/// the first remaining row when it is the header.
fn data_rows(rows: &[Vec<String>]) -> impl Iterator<Item = (usize, &Vec<String>)> {
    let mut data = rows.iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
        .peekable();
    if data.next_if(|(_, row)| is_header(row)).is_some() {
        debug!("[sync::rows] skipping header row");
    }
    data
}

/// Rebuild a Layer Store from table rows, grouping features by their `layer` column.
///
/// Returns `None` when the rows hold no data (empty, or header only).
/// Malformed rows, and rows repeating an id already seen, are skipped one by one.
/// A layer is created on the first row that names it, visible, with that row's color.
pub fn import_rows(rows: &[Vec<String>]) -> Option<(LayerStore, ImportReport)> {
    let mut data = data_rows(rows).peekable();
    data.peek()?;

    let mut store = LayerStore::new();
    let mut report = ImportReport::default();

    for (line, row) in data {
        let (feature, color) = match Feature::from_record(row) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("[sync::rows] skipping row {line}: {e}");
                report.skipped += 1;
                continue;
            }
        };

        let layer = feature.layer().to_string();
        if !store.contains_layer(&layer) {
            match store.create_layer(&layer, &normalize_color(&color), true) {
                Ok(_) => report.layers += 1,
                Err(e) => {
                    debug!("[sync::rows] skipping row {line}: {e}");
                    report.skipped += 1;
                    continue;
                }
            }
        }

        match store.insert_feature(&layer, feature) {
            Ok(_) => report.imported += 1,
            Err(e) => {
                debug!("[sync::rows] skipping row {line}: {e}");
                report.skipped += 1;
            }
        }
    }

    Some((store, report))
}

#[cfg(test)]
mod tests {
    use crate::feature::CaseProperties;

    use super::*;

    fn sample_store() -> LayerStore {
        let mut store = LayerStore::new();
        store.create_layer("A", "#aa0000", true).unwrap();
        store.create_layer("B", "#00bb00", false).unwrap();
        store.append_feature("A", -84.08, 9.93, CaseProperties::titled("a1")).unwrap();
        store.append_feature("B", -83.9, 9.8, CaseProperties::titled("b1")).unwrap();
        store.append_feature("A", -84.2, 10.0, CaseProperties::titled("a2")).unwrap();
        store
    }

    #[test]
    fn export_starts_with_header() {
        let rows = export_rows(&sample_store());
        assert_eq!(rows.len(), 4);
        assert!(is_header(&rows[0]));
        assert_eq!(rows[1][3], "a1");
        assert_eq!(rows[3][3], "b1");
    }

    #[test]
    fn empty_and_header_only_hold_no_data() {
        assert!(import_rows(&[]).is_none());
        assert!(import_rows(&[header()]).is_none());
        assert!(import_rows(&[header(), vec![String::new(); 13]]).is_none());
    }

    #[test]
    fn round_trip_preserves_features_by_id() {
        let store = sample_store();
        let rows = export_rows(&store);
        let (rebuilt, report) = import_rows(&rows).unwrap();
        assert_eq!(report, ImportReport { imported: 3, skipped: 0, layers: 2 });

        let mut before = store.flatten().to_features();
        let mut after = rebuilt.flatten().to_features();
        before.sort_by(|a, b| a.id().cmp(b.id()));
        after.sort_by(|a, b| a.id().cmp(b.id()));
        assert_eq!(before, after);
        assert_eq!(export_rows(&rebuilt), rows);
    }

    #[test]
    fn imported_layers_are_visible_with_row_color() {
        let (rebuilt, _) = import_rows(&export_rows(&sample_store())).unwrap();
        let b = rebuilt.layer("B").unwrap();
        assert!(b.visible());
        assert_eq!(b.color(), "#00bb00");
    }

    #[test]
    fn malformed_color_falls_back() {
        let mut rows = export_rows(&sample_store());
        rows[1][2] = "not-a-color".into();
        let (rebuilt, _) = import_rows(&rows).unwrap();
        assert_eq!(rebuilt.layer("A").unwrap().color(), "#1f77b4");
    }

    #[test]
    fn bad_rows_and_duplicate_ids_are_skipped() {
        let mut rows = export_rows(&sample_store());
        rows.push(vec!["x".to_string(); 5]);
        rows.push(rows[1].clone());
        let mut bad_coord = rows[2].clone();
        bad_coord[0] = "unique".into();
        bad_coord[11] = "north".into();
        rows.push(bad_coord);

        let (rebuilt, report) = import_rows(&rows).unwrap();
        assert_eq!(rebuilt.feature_count(), 3);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn rows_without_header_are_all_data() {
        let rows = export_rows(&sample_store());
        let (rebuilt, report) = import_rows(&rows[1..]).unwrap();
        assert_eq!(report.imported, 3);
        assert_eq!(rebuilt.feature_count(), 3);
    }

    #[test]
    fn header_after_blank_rows_is_still_skipped() {
        let mut rows = vec![vec![String::new(); 13]];
        rows.extend(export_rows(&sample_store()));
        let (_, report) = import_rows(&rows).unwrap();
        assert_eq!(report, ImportReport { imported: 3, skipped: 0, layers: 2 });
    }
}
