mod feature;
mod id;
mod properties;
pub mod record;

pub use feature::Feature;
pub use id::FeatureId;
pub use properties::{CaseProperties, PropertiesPatch, ResponsibleParty, DESCRIPTION_MAX_CHARS};
pub(crate) use properties::{non_blank, truncate_chars};
