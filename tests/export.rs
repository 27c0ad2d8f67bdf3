// Integration tests for file exports:
//   GeoJSON, CSV, zipped shapefile and project snapshot

use std::fs;

use casemap::{
    io::{
        csv::{read_raw_rows, write_collection_csv},
        geojson::{read_geojson, write_geojson},
        project::ProjectSnapshot,
        shp::write_shapefile_zip,
    },
    CaseProperties, LayerStore,
};

fn sample_store() -> LayerStore {
    let mut store = LayerStore::init();
    let mut props = CaseProperties::titled("Asalto");
    props.region = "San José".to_string();
    props.date = "2024-03-01".to_string();
    store.append_feature("Delitos", -84.08, 9.93, props).unwrap();
    store.append_feature("General", -83.0, 10.0, CaseProperties::titled("Bache")).unwrap();
    store
}

#[test]
fn geojson_export_reimports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.geojson");
    let store = sample_store();

    write_geojson(&store.flatten(), &path, false).unwrap();
    let (restored, report) = read_geojson(&path).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(restored.feature("Delitos", 0).unwrap().properties().region, "San José");
    assert_eq!(restored.layer("Delitos").unwrap().color(), "#ff7f0e");
}

#[test]
fn existing_file_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    let store = sample_store();

    write_collection_csv(&store.flatten(), &path, false).unwrap();
    assert!(write_collection_csv(&store.flatten(), &path, false).is_err());
    write_collection_csv(&store.flatten(), &path, true).unwrap();

    let rows = read_raw_rows(fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "id");
    assert_eq!(rows[1][11], "9.93");
    assert_eq!(rows[1][12], "-84.08");
}

#[test]
fn shapefile_zip_holds_all_parts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casos.zip");

    write_shapefile_zip(&sample_store().flatten(), &path, "casos", false).unwrap();

    let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["casos.cpg", "casos.dbf", "casos.prj", "casos.shp", "casos.shx"]);
}

#[test]
fn project_snapshot_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proyecto.json");
    let snapshot = ProjectSnapshot::from_store("proyecto_mapa", &sample_store());

    snapshot.write_to_file(&path, false).unwrap();
    let restored = ProjectSnapshot::read_from_file(&path).unwrap();
    assert_eq!(restored, snapshot);
    assert_eq!(restored.to_store().feature_count(), 2);
}
