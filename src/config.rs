//! Session configuration, loadable from a JSON file.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name and color of a layer created when a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub color: String,
}

impl LayerSpec {
    pub fn new(name: &str, color: &str) -> Self {
        Self { name: name.to_string(), color: color.to_string() }
    }

    /// The four layers every fresh session starts with.
    pub fn defaults() -> Vec<LayerSpec> {
        vec![
            LayerSpec::new("Riesgo Social", "#d62728"),
            LayerSpec::new("Delitos", "#ff7f0e"),
            LayerSpec::new("Otros", "#2ca02c"),
            LayerSpec::new("General", "#1f77b4"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub project_name: String,
    pub default_layers: Vec<LayerSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            project_name: "proyecto_mapa".to_string(),
            default_layers: LayerSpec::defaults(),
        }
    }
}

impl SessionConfig {
    /// Read a config file; missing keys take their default values.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[config] Failed to open config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[config] Failed to parse config file: {}", path.display()))
    }
}
