use crate::feature::Feature;

use super::LayerStore;

/// One flattened feature together with the display color of the layer holding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatFeature<'a> {
    pub feature: &'a Feature,
    pub color: &'a str,
}

/// Every feature of a [`LayerStore`] as one ordered sequence:
/// layers in creation order, features in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection<'a> {
    entries: Vec<FlatFeature<'a>>,
}

impl<'a> FeatureCollection<'a> {
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &FlatFeature<'a>> { self.entries.iter() }

    pub fn get(&self, i: usize) -> Option<&FlatFeature<'a>> { self.entries.get(i) }

    /// The bare features, in collection order.
    pub fn features(&self) -> impl Iterator<Item = &'a Feature> + '_ {
        self.entries.iter().map(|entry| entry.feature)
    }

    /// Owned copies of the features.
    pub fn to_features(&self) -> Vec<Feature> {
        self.features().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection<'a> {
    type Item = &'a FlatFeature<'a>;
    type IntoIter = std::slice::Iter<'a, FlatFeature<'a>>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// Project the store into one flat collection. Visibility is ignored.
pub fn flatten(store: &LayerStore) -> FeatureCollection<'_> {
    let entries = store.layers().iter()
        .flat_map(|layer| {
            layer.features().iter().map(move |feature| FlatFeature { feature, color: layer.color() })
        })
        .collect();
    FeatureCollection { entries }
}

impl LayerStore {
    /// Shorthand for [`flatten`].
    pub fn flatten(&self) -> FeatureCollection<'_> {
        flatten(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::feature::CaseProperties;

    use super::*;

    #[test]
    fn length_is_sum_of_layer_lengths() {
        let mut store = LayerStore::init();
        let names: Vec<String> = store.layer_names().map(str::to_string).collect();
        for (i, name) in names.iter().enumerate() {
            for _ in 0..=i {
                store.append_feature(name, 0.0, 0.0, CaseProperties::default()).unwrap();
            }
        }
        let expected: usize = store.layers().iter().map(|l| l.len()).sum();
        assert_eq!(flatten(&store).len(), expected);
        assert_eq!(expected, 1 + 2 + 3 + 4);
    }

    #[test]
    fn ignores_visibility_and_keeps_order() {
        let mut store = LayerStore::new();
        store.create_layer("A", "#aa0000", false).unwrap();
        store.create_layer("B", "#00bb00", true).unwrap();
        store.append_feature("B", 1.0, 1.0, CaseProperties::titled("b1")).unwrap();
        store.append_feature("A", 2.0, 2.0, CaseProperties::titled("a1")).unwrap();
        store.append_feature("A", 3.0, 3.0, CaseProperties::titled("a2")).unwrap();

        let flat = store.flatten();
        let titles: Vec<&str> = flat.features().map(|f| f.properties().title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
        assert_eq!(flat.get(0).unwrap().color, "#aa0000");
        assert_eq!(flat.get(2).unwrap().color, "#00bb00");
    }

    #[test]
    fn flatten_is_idempotent() {
        let mut store = LayerStore::init();
        store.append_feature("General", 0.5, 0.5, CaseProperties::default()).unwrap();
        assert_eq!(store.flatten().to_features(), store.flatten().to_features());
    }
}
