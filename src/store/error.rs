use thiserror::Error;

use crate::feature::FeatureId;

/// Reasons a Layer Store mutation is rejected. The store is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("layer name must not be empty")]
    EmptyLayerName,

    #[error("layer '{0}' already exists")]
    LayerExists(String),

    #[error("layer '{0}' does not exist")]
    LayerNotFound(String),

    #[error("{}", index_message(layer, *index, *len))]
    IndexOutOfRange { layer: String, index: usize, len: usize },

    #[error("coordinates ({lon}, {lat}) are not finite numbers")]
    NonFiniteCoordinate { lon: f64, lat: f64 },

    #[error("feature id '{0}' is already in use")]
    DuplicateId(FeatureId),
}

fn index_message(layer: &str, index: usize, len: usize) -> String {
    if len == 0 {
        format!("index {index} out of range for layer '{layer}' (layer is empty)")
    } else {
        format!("index {index} out of range for layer '{layer}' (valid range 0..={})", len - 1)
    }
}
