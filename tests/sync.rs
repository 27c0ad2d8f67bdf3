// Integration tests for table synchronization:
//   push_replace, pull_replace, append_one against memory and CSV-file tables

use casemap::{
    feature::record::header,
    sync::{append_one, pull_replace, push_replace, CsvFileTable, ExternalTable, MemoryTable, PullOutcome},
    CaseProperties, LayerStore,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn sample_store() -> LayerStore {
    let mut store = LayerStore::init();
    store.append_feature("Delitos", -84.08, 9.93, CaseProperties::titled("Asalto")).unwrap();
    store.append_feature("Riesgo Social", -84.1, 9.95, CaseProperties::titled("Basura")).unwrap();
    store
}

#[test]
fn header_only_table_leaves_store_unchanged() {
    let mut store = sample_store();
    let before = store.clone();
    let mut table = MemoryTable::from_rows(vec![header()]);

    assert_eq!(pull_replace(&mut store, &mut table).unwrap(), PullOutcome::NoData);
    assert_eq!(store, before);
}

#[test]
fn short_rows_are_skipped_on_pull() {
    let mut table = MemoryTable::from_rows(vec![
        header(),
        row(&["abc", "Ops", "#17becf", "t", "d", "2024-01-05", "SJ", "Centro", "Comunidad", "", "", "9.93", "-84.08"]),
        row(&["def", "Ops", "#17becf", "t", "d"]),
    ]);
    let mut store = sample_store();

    let PullOutcome::Replaced(report) = pull_replace(&mut store, &mut table).unwrap() else {
        panic!("expected the store to be replaced");
    };
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(store.feature_count(), 1);
    assert_eq!(store.layer_names().collect::<Vec<_>>(), vec!["Ops"]);
    let feature = store.feature("Ops", 0).unwrap();
    assert_eq!((feature.lon(), feature.lat()), (-84.08, 9.93));
}

#[test]
fn csv_table_push_then_pull_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    let original = sample_store();

    let pushed = push_replace(&original, &mut CsvFileTable::new(&path)).unwrap();
    assert_eq!(pushed, 2);

    let mut restored = LayerStore::new();
    let outcome = pull_replace(&mut restored, &mut CsvFileTable::new(&path)).unwrap();
    assert!(matches!(outcome, PullOutcome::Replaced(_)));
    assert_eq!(restored.feature_count(), 2);
    for layer in ["Delitos", "Riesgo Social"] {
        let a = original.feature(layer, 0).unwrap();
        let b = restored.feature(layer, 0).unwrap();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.properties(), b.properties());
        assert_eq!(original.layer(layer).unwrap().color(), restored.layer(layer).unwrap().color());
    }
}

#[test]
fn append_to_new_csv_table_writes_header_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = CsvFileTable::new(dir.path().join("casos.csv"));
    let store = sample_store();

    for feature in store.flatten().iter() {
        append_one(&mut table, feature.feature, feature.color).unwrap();
    }

    let rows = table.read_all_rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], header());
    assert_eq!(rows[1][3], "Asalto");
}

#[test]
fn append_after_header_without_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    std::fs::write(&path, header().join(",")).unwrap();
    let mut table = CsvFileTable::new(&path);
    let store = sample_store();
    let entry = store.flatten().iter().next().copied().unwrap();

    append_one(&mut table, entry.feature, entry.color).unwrap();

    let rows = table.read_all_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.len() == 13));

    let mut restored = LayerStore::new();
    assert!(matches!(pull_replace(&mut restored, &mut table).unwrap(), PullOutcome::Replaced(_)));
    assert!(restored.contains_id(entry.feature.id()));
}

#[test]
fn append_after_leading_blank_line_writes_no_second_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    std::fs::write(&path, format!("\n{}\n", header().join(","))).unwrap();
    let mut table = CsvFileTable::new(&path);
    let store = sample_store();
    let entry = store.flatten().iter().next().copied().unwrap();

    append_one(&mut table, entry.feature, entry.color).unwrap();

    let rows = table.read_all_rows().unwrap();
    assert_eq!(rows.iter().filter(|r| **r == header()).count(), 1);
    assert_eq!(rows.len(), 2);
}
