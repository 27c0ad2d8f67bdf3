use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::{
    config::LayerSpec,
    feature::{CaseProperties, Feature, FeatureId, PropertiesPatch},
    style::normalize_color,
};

use super::{Layer, StoreError};

/// Session-lifetime collection of layers, ordered by creation.
///
/// Every feature id is unique across the whole store. Index-based operations
/// refer to positions inside one layer; deleting a feature shifts the later
/// ones down by one, so callers must not hold indices across mutations.
#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    layers: Vec<Layer>,
    index: AHashMap<String, usize>, // layer name -> position in `layers`
    ids: AHashSet<FeatureId>,
}

impl PartialEq for LayerStore {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl LayerStore {
    /// An empty store with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the built-in default layers.
    pub fn init() -> Self {
        Self::with_layers(&LayerSpec::defaults())
    }

    /// A store holding one empty layer per spec. Blank or repeated names are skipped.
    pub fn with_layers(specs: &[LayerSpec]) -> Self {
        let mut store = Self::new();
        for spec in specs {
            if let Err(e) = store.create_layer(&spec.name, &spec.color, true) {
                debug!("[store] skipping default layer: {e}");
            }
        }
        store
    }

    /// Rebuild a store from already-populated layers, checking names and ids.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for mut layer in layers {
            store.create_layer(&layer.name, &layer.color, layer.visible)?;
            for feature in std::mem::take(&mut layer.features) {
                // Keep the stored layer copy as-is: it may legitimately differ after a rename.
                let stored_layer = feature.layer.clone();
                store.insert_feature(&layer.name, feature)?;
                if let Some(last) = store.layer_mut(&layer.name)?.features.last_mut() {
                    last.layer = stored_layer;
                }
            }
        }
        Ok(store)
    }

    pub fn layers(&self) -> &[Layer] { &self.layers }

    pub fn into_layers(self) -> Vec<Layer> { self.layers }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.index.get(name).map(|&i| &self.layers[i])
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    pub fn contains_layer(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn contains_id(&self, id: &FeatureId) -> bool { self.ids.contains(id) }

    pub fn num_layers(&self) -> usize { self.layers.len() }

    /// Total number of features across all layers.
    pub fn feature_count(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    fn layer_mut(&mut self, name: &str) -> Result<&mut Layer, StoreError> {
        let &i = self.index.get(name).ok_or_else(|| StoreError::LayerNotFound(name.to_string()))?;
        Ok(&mut self.layers[i])
    }

    fn reindex(&mut self) {
        self.index = self.layers.iter()
            .enumerate()
            .map(|(i, layer)| (layer.name.clone(), i))
            .collect();
    }

    /// Insert an empty layer. Fails if `name` is blank or already present.
    pub fn create_layer(&mut self, name: &str, color: &str, visible: bool) -> Result<&Layer, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyLayerName);
        }
        if self.contains_layer(name) {
            return Err(StoreError::LayerExists(name.to_string()));
        }

        self.index.insert(name.to_string(), self.layers.len());
        self.layers.push(Layer::new(name, color, visible));
        Ok(&self.layers[self.layers.len() - 1])
    }

    /// Remove a layer and all of its features.
    pub fn delete_layer(&mut self, name: &str) -> Result<Layer, StoreError> {
        let i = self.index.remove(name).ok_or_else(|| StoreError::LayerNotFound(name.to_string()))?;
        let layer = self.layers.remove(i);
        for feature in &layer.features {
            self.ids.remove(&feature.id);
        }
        self.reindex();
        Ok(layer)
    }

    /// Update only the supplied style fields; colors are normalized.
    pub fn set_layer_style(&mut self, name: &str, color: Option<&str>, visible: Option<bool>) -> Result<(), StoreError> {
        let layer = self.layer_mut(name)?;
        if let Some(color) = color {
            layer.color = normalize_color(color);
        }
        if let Some(visible) = visible {
            layer.visible = visible;
        }
        Ok(())
    }

    /// Change a layer's key, keeping its position.
    /// Features already stored keep the old name in their `layer` field.
    pub fn rename_layer(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(StoreError::EmptyLayerName);
        }
        if !self.contains_layer(old) {
            return Err(StoreError::LayerNotFound(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        if self.contains_layer(new) {
            return Err(StoreError::LayerExists(new.to_string()));
        }

        self.layer_mut(old)?.name = new.to_string();
        self.reindex();
        Ok(())
    }

    /// Build a feature with a fresh id and append it to `layer_name`.
    /// Coordinates must be finite; their range is not checked.
    pub fn append_feature(&mut self, layer_name: &str, lon: f64, lat: f64, properties: CaseProperties) -> Result<&Feature, StoreError> {
        // Fail before drawing an id so a missing layer leaves nothing behind.
        if !self.contains_layer(layer_name) {
            return Err(StoreError::LayerNotFound(layer_name.to_string()));
        }
        check_finite(lon, lat)?;
        let mut feature = Feature::build(lon, lat, properties, None);
        while self.ids.contains(&feature.id) {
            feature.id = FeatureId::generate();
        }
        self.insert_feature(layer_name, feature)
    }

    /// Append an already-built feature, stamping its layer. Fails on a duplicate id.
    pub fn insert_feature(&mut self, layer_name: &str, feature: Feature) -> Result<&Feature, StoreError> {
        if self.ids.contains(&feature.id) {
            return Err(StoreError::DuplicateId(feature.id));
        }
        check_finite(feature.lon(), feature.lat())?;
        let id = feature.id.clone();
        let layer = self.layer_mut(layer_name)?;
        layer.features.push(feature.with_layer(layer_name));
        self.ids.insert(id);
        let layer = self.layer_mut(layer_name)?;
        Ok(&layer.features[layer.features.len() - 1])
    }

    fn check_index(&self, layer_name: &str, index: usize) -> Result<usize, StoreError> {
        let layer = self.layer(layer_name).ok_or_else(|| StoreError::LayerNotFound(layer_name.to_string()))?;
        if index >= layer.features.len() {
            return Err(StoreError::IndexOutOfRange {
                layer: layer_name.to_string(),
                index,
                len: layer.features.len(),
            });
        }
        Ok(index)
    }

    /// Feature at `index` in `layer_name`.
    pub fn feature(&self, layer_name: &str, index: usize) -> Result<&Feature, StoreError> {
        let index = self.check_index(layer_name, index)?;
        let layer = self.layer(layer_name).ok_or_else(|| StoreError::LayerNotFound(layer_name.to_string()))?;
        Ok(&layer.features[index])
    }

    /// Remove the feature at `index`; later features shift down by one.
    pub fn delete_feature(&mut self, layer_name: &str, index: usize) -> Result<Feature, StoreError> {
        let index = self.check_index(layer_name, index)?;
        let feature = self.layer_mut(layer_name)?.features.remove(index);
        self.ids.remove(&feature.id);
        Ok(feature)
    }

    /// Merge `patch` into the feature's properties. Id, layer and coordinates are untouched.
    pub fn update_feature_properties(&mut self, layer_name: &str, index: usize, patch: PropertiesPatch) -> Result<&Feature, StoreError> {
        let index = self.check_index(layer_name, index)?;
        let feature = &mut self.layer_mut(layer_name)?.features[index];
        feature.apply_patch(patch);
        Ok(&*feature)
    }

    /// Replace the feature's coordinates only.
    pub fn move_feature(&mut self, layer_name: &str, index: usize, lon: f64, lat: f64) -> Result<&Feature, StoreError> {
        let index = self.check_index(layer_name, index)?;
        check_finite(lon, lat)?;
        let feature = &mut self.layer_mut(layer_name)?.features[index];
        feature.set_coordinates(lon, lat);
        Ok(&*feature)
    }

    /// Drop every feature in one layer, keeping the layer.
    pub fn clear_layer(&mut self, layer_name: &str) -> Result<usize, StoreError> {
        let removed = std::mem::take(&mut self.layer_mut(layer_name)?.features);
        for feature in &removed {
            self.ids.remove(&feature.id);
        }
        Ok(removed.len())
    }

    /// Drop every feature in every layer, keeping the layers.
    pub fn clear(&mut self) -> usize {
        let count = self.ids.len();
        self.layers.iter_mut().for_each(|layer| layer.features.clear());
        self.ids.clear();
        count
    }

    /// Find a feature by id, returning its layer name and index.
    pub fn locate(&self, id: &FeatureId) -> Option<(&str, usize)> {
        if !self.ids.contains(id) {
            return None;
        }
        self.layers.iter().find_map(|layer| {
            layer.features.iter()
                .position(|f| &f.id == id)
                .map(|i| (layer.name.as_str(), i))
        })
    }
}

fn check_finite(lon: f64, lat: f64) -> Result<(), StoreError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(StoreError::NonFiniteCoordinate { lon, lat });
    }
    Ok(())
}
