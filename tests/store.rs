// Integration tests for the Layer Store through the public API:
//   create_layer, append_feature, delete_feature, flatten, GeoJSON export

use casemap::{CaseProperties, LayerStore, StoreError};

#[test]
fn created_layer_color_is_normalized() {
    let mut store = LayerStore::new();
    store.create_layer("Ops", "17becf", true).unwrap();
    assert_eq!(store.layer("Ops").unwrap().color(), "#17becf");
}

#[test]
fn appended_case_is_flattened_and_exported() {
    let mut store = LayerStore::new();
    store.create_layer("Ops", "17becf", true).unwrap();
    store.append_feature("Ops", -84.08, 9.93, CaseProperties::titled("Robo")).unwrap();

    let collection = store.flatten();
    assert_eq!(collection.len(), 1);

    let geojson = collection.to_geojson();
    let feature = &geojson["features"][0];
    assert_eq!(feature["geometry"]["coordinates"][0].as_f64(), Some(-84.08));
    assert_eq!(feature["geometry"]["coordinates"][1].as_f64(), Some(9.93));
    assert_eq!(feature["properties"]["color"], "#17becf");
    assert_eq!(feature["properties"]["titulo"], "Robo");
}

#[test]
fn deleting_first_case_shifts_the_second() {
    let mut store = LayerStore::init();
    store.append_feature("Delitos", -84.0, 9.9, CaseProperties::titled("a")).unwrap();
    let second = store.append_feature("Delitos", -84.1, 9.8, CaseProperties::titled("b")).unwrap().id().clone();

    let removed = store.delete_feature("Delitos", 0).unwrap();
    assert_eq!(removed.properties().title, "a");
    assert_eq!(store.feature("Delitos", 0).unwrap().id(), &second);
    assert!(!store.contains_id(removed.id()));
    assert_eq!(store.feature_count(), 1);
}

#[test]
fn out_of_range_index_is_rejected() {
    let mut store = LayerStore::init();
    store.append_feature("Otros", 0.0, 0.0, CaseProperties::default()).unwrap();
    assert!(matches!(
        store.delete_feature("Otros", 1),
        Err(StoreError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
    assert!(matches!(store.delete_feature("Nope", 0), Err(StoreError::LayerNotFound(_))));
    assert_eq!(store.feature_count(), 1);
}

#[test]
fn flatten_ignores_visibility() {
    let mut store = LayerStore::init();
    store.append_feature("Delitos", 1.0, 1.0, CaseProperties::default()).unwrap();
    store.append_feature("General", 2.0, 2.0, CaseProperties::default()).unwrap();
    store.set_layer_style("Delitos", None, Some(false)).unwrap();

    let collection = store.flatten();
    assert_eq!(collection.len(), 2);
    let layers: Vec<_> = collection.features().map(|f| f.layer().to_string()).collect();
    assert_eq!(layers, vec!["Delitos", "General"]);
}
