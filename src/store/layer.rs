use serde::{Deserialize, Serialize};

use crate::{feature::Feature, style::normalize_color};

/// A named grouping of features sharing a display color and visibility flag.
/// Visibility affects rendering only; exports and the dashboard ignore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) visible: bool,
    #[serde(default)]
    pub(crate) features: Vec<Feature>,
}

impl Layer {
    pub fn new(name: &str, color: &str, visible: bool) -> Self {
        Self {
            name: name.to_string(),
            color: normalize_color(color),
            visible,
            features: Vec::new(),
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn color(&self) -> &str { &self.color }

    pub fn visible(&self) -> bool { self.visible }

    pub fn features(&self) -> &[Feature] { &self.features }

    pub fn len(&self) -> usize { self.features.len() }

    pub fn is_empty(&self) -> bool { self.features.is_empty() }
}
