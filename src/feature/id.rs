use std::{fmt, sync::Arc};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of random bytes behind a generated id (96 bits).
const ID_BYTES: usize = 12;

/// Stable, store-wide unique identifier of a feature.
/// Assigned once at creation and never reassigned.
/// Serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(Arc<str>);

impl FeatureId {
    /// Draw a fresh id from the thread-local RNG, hex-encoded (24 chars).
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    pub fn generate_with(rng: &mut impl Rng) -> Self {
        let mut bytes = [0u8; ID_BYTES];
        rng.fill(&mut bytes);
        Self(Arc::from(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self { Self(Arc::from(value)) }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self { Self(Arc::from(value)) }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for FeatureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::FeatureId;

    #[test]
    fn generated_ids_are_hex_and_fixed_length() {
        let id = FeatureId::generate();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let ids: HashSet<FeatureId> = (0..20_000).map(|_| FeatureId::generate()).collect();
        assert_eq!(ids.len(), 20_000);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = FeatureId::from("a1b2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a1b2\"");
        let back: FeatureId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
