use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 240;

/// Party responsible for following up on a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResponsibleParty {
    #[default]
    Unassigned,
    PublicForce,
    Municipality,
    Community,
    Institution,
    Other,
}

impl ResponsibleParty {
    pub fn label(&self) -> &'static str {
        match self {
            ResponsibleParty::Unassigned => "Sin asignar",
            ResponsibleParty::PublicForce => "Fuerza Pública",
            ResponsibleParty::Municipality => "Municipalidad",
            ResponsibleParty::Community => "Comunidad",
            ResponsibleParty::Institution => "Institución",
            ResponsibleParty::Other => "Otro",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            ResponsibleParty::Unassigned => "unassigned",
            ResponsibleParty::PublicForce => "publicforce",
            ResponsibleParty::Municipality => "municipality",
            ResponsibleParty::Community => "community",
            ResponsibleParty::Institution => "institution",
            ResponsibleParty::Other => "other",
        }
    }

    pub fn all() -> [ResponsibleParty; 6] {
        [
            ResponsibleParty::Unassigned,
            ResponsibleParty::PublicForce,
            ResponsibleParty::Municipality,
            ResponsibleParty::Community,
            ResponsibleParty::Institution,
            ResponsibleParty::Other,
        ]
    }

    /// Parse a label or variant name, case-insensitively.
    /// Unknown or empty text degrades to `Unassigned`.
    pub fn parse_lossy(text: &str) -> Self {
        let needle = text.trim().to_lowercase();
        let squashed: String = needle.chars().filter(|c| !c.is_whitespace() && *c != '_' && *c != '-').collect();
        Self::all()
            .into_iter()
            .find(|party| party.label().to_lowercase() == needle || party.variant_name() == squashed)
            .unwrap_or_default()
    }
}

impl fmt::Display for ResponsibleParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ResponsibleParty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ResponsibleParty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&text))
    }
}

/// Case metadata attached to every feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseProperties {
    pub title: String,
    pub description: String,
    /// Free-form date text, usually `YYYY-MM-DD`.
    pub date: String,
    pub responsible: ResponsibleParty,
    pub region: String,
    pub subregion: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub evidence_url: Option<String>,
}

impl CaseProperties {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Enforce field bounds: description length, blank optionals become `None`.
    pub(crate) fn sanitize(&mut self) {
        self.description = truncate_chars(&self.description, DESCRIPTION_MAX_CHARS);
        self.impact = non_blank(self.impact.take());
        self.evidence_url = non_blank(self.evidence_url.take());
    }

    /// Merge the fields set in `patch` into this record.
    pub fn apply(&mut self, patch: PropertiesPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.date {
            self.date = v;
        }
        if let Some(v) = patch.responsible {
            self.responsible = v;
        }
        if let Some(v) = patch.region {
            self.region = v;
        }
        if let Some(v) = patch.subregion {
            self.subregion = v;
        }
        if let Some(v) = patch.impact {
            self.impact = v;
        }
        if let Some(v) = patch.evidence_url {
            self.evidence_url = v;
        }
        self.sanitize();
    }
}

/// Partial update for [`CaseProperties`]; `None` leaves a field untouched.
/// For the optional fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub responsible: Option<ResponsibleParty>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub impact: Option<Option<String>>,
    pub evidence_url: Option<Option<String>>,
}

impl PropertiesPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Truncate to at most `max` characters (not bytes).
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
