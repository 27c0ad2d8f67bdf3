mod collection;
mod error;
mod layer;
mod store;

pub use collection::{flatten, FeatureCollection, FlatFeature};
pub use error::StoreError;
pub use layer::Layer;
pub use store::LayerStore;
