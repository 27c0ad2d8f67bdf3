#![doc = "casemap public API"]
mod common;
pub mod config;
pub mod dashboard;
pub mod feature;
pub mod io;
pub mod session;
pub mod store;
pub mod style;
pub mod sync;

#[doc(inline)]
pub use config::{LayerSpec, SessionConfig};

#[doc(inline)]
pub use feature::{CaseProperties, Feature, FeatureId, PropertiesPatch, ResponsibleParty};

#[doc(inline)]
pub use store::{flatten, FeatureCollection, Layer, LayerStore, StoreError};

#[doc(inline)]
pub use session::{Notice, Session};

#[doc(inline)]
pub use style::normalize_color;
