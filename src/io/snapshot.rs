//! Session snapshot: the full layered store plus the project name, as JSON.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{common::write_atomic, store::{Layer, LayerStore}};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub layers: Vec<Layer>,
}

impl SessionSnapshot {
    pub fn new(name: &str, store: &LayerStore) -> Self {
        Self { name: name.to_string(), layers: store.layers().to_vec() }
    }

    /// Rebuild the store, rejecting duplicate layer names or feature ids.
    pub fn into_store(self) -> Result<(String, LayerStore)> {
        let store = LayerStore::from_layers(self.layers)
            .context("[io::snapshot] Session snapshot is inconsistent")?;
        Ok((self.name, store))
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)
            .context("[io::snapshot] Failed to serialize session")?;
        write_atomic(path, &bytes, true)
            .with_context(|| format!("[io::snapshot] Failed to write session to {}", path.display()))
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[io::snapshot] Failed to open session file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[io::snapshot] Failed to parse session file: {}", path.display()))
    }
}
