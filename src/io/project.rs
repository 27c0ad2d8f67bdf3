//! Single-layer project snapshot: `{ name, points, color_cfg }`.
//!
//! This is the flat precursor of the layered model: each point names a
//! category, and categories map to colors.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    common::write_atomic,
    feature::{truncate_chars, CaseProperties},
    store::LayerStore,
    style::{default_category_color, normalize_color},
};

/// Category used for points saved without one.
pub const UNCATEGORIZED: &str = "Sin categoría";

/// Maximum label length, in characters.
pub const LABEL_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPoint {
    pub lat: f64,
    pub lon: f64,
    pub categoria: String,
    pub etiqueta: String,
}

impl ProjectPoint {
    /// Point with a trimmed category (or [`UNCATEGORIZED`]) and a bounded label.
    pub fn new(lat: f64, lon: f64, categoria: &str, etiqueta: &str) -> Self {
        let categoria = match categoria.trim() {
            "" => UNCATEGORIZED.to_string(),
            c => c.to_string(),
        };
        Self { lat, lon, categoria, etiqueta: truncate_chars(etiqueta.trim(), LABEL_MAX_CHARS) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Empty when the file does not carry one.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: Vec<ProjectPoint>,
    #[serde(default)]
    pub color_cfg: BTreeMap<String, String>,
}

impl ProjectSnapshot {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), points: Vec::new(), color_cfg: BTreeMap::new() }
    }

    /// Add a point, assigning its category a default color the first time it is seen.
    pub fn add_point(&mut self, point: ProjectPoint) {
        self.color_cfg
            .entry(point.categoria.clone())
            .or_insert_with(|| default_category_color(&point.categoria).to_string());
        self.points.push(point);
    }

    /// The project name, or `fallback` when the file left it blank.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.trim() {
            "" => fallback,
            name => name,
        }
    }

    /// Color of a category, falling back to its keyword default.
    pub fn category_color(&self, category: &str) -> String {
        match self.color_cfg.get(category) {
            Some(color) => normalize_color(color),
            None => default_category_color(category).to_string(),
        }
    }

    /// Expand into a Layer Store with one layer per category, in first-seen order.
    /// Labels become feature titles.
    pub fn to_store(&self) -> LayerStore {
        let mut store = LayerStore::new();
        for point in &self.points {
            let category = match point.categoria.trim() {
                "" => UNCATEGORIZED,
                c => c,
            };
            if !store.contains_layer(category) {
                if let Err(e) = store.create_layer(category, &self.category_color(category), true) {
                    debug!("[io::project] skipping point in category {category:?}: {e}");
                    continue;
                }
            }
            let properties = CaseProperties::titled(point.etiqueta.as_str());
            if let Err(e) = store.append_feature(category, point.lon, point.lat, properties) {
                debug!("[io::project] skipping point ({}, {}): {e}", point.lon, point.lat);
            }
        }
        store
    }

    /// Collapse a Layer Store into a snapshot: layers become categories, titles become labels.
    pub fn from_store(name: &str, store: &LayerStore) -> Self {
        let mut snapshot = Self::new(name);
        for layer in store.layers() {
            snapshot.color_cfg.insert(layer.name().to_string(), layer.color().to_string());
            for feature in layer.features() {
                snapshot.points.push(ProjectPoint::new(
                    feature.lat(),
                    feature.lon(),
                    layer.name(),
                    &feature.properties().title,
                ));
            }
        }
        snapshot
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("[io::project] Failed to serialize project snapshot")
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("[io::project] Failed to parse project snapshot")
    }

    pub fn write_to_file(&self, path: &Path, force: bool) -> Result<()> {
        write_atomic(path, &self.to_json_bytes()?, force)
            .with_context(|| format!("[io::project] Failed to write project snapshot to {}", path.display()))
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[io::project] Failed to open project snapshot: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[io::project] Failed to parse project snapshot: {}", path.display()))
    }
}
