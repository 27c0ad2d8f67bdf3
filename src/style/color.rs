//! Color normalization for layer and category styling.

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Color used whenever a candidate token is not a valid `#RRGGBB` value.
pub const FALLBACK_COLOR: &str = "#1f77b4";

static HEX6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{6}$").expect("static hex color pattern")
});

/// Coerce a color token into canonical `#RRGGBB` form.
/// Invalid input silently degrades to [`FALLBACK_COLOR`]; digit case is preserved.
pub fn normalize_color(candidate: &str) -> String {
    let token = candidate.trim();
    let digits = token.strip_prefix('#').unwrap_or(token);
    if HEX6.is_match(digits) {
        format!("#{digits}")
    } else {
        FALLBACK_COLOR.to_string()
    }
}

/// Whether `candidate` is already in canonical `#RRGGBB` form.
pub fn is_canonical_color(candidate: &str) -> bool {
    candidate.strip_prefix('#').is_some_and(|digits| HEX6.is_match(digits))
}

/// Default color for a category that has not been styled yet.
/// Keyword checks run in order and the last match wins.
pub fn default_category_color(category: &str) -> &'static str {
    let lower = category.to_lowercase();
    let mut color = FALLBACK_COLOR;
    if lower.contains("riesgo") {
        color = "#d62728";
    }
    if lower.contains("delito") {
        color = "#ff7f0e";
    }
    if lower.contains("otro") {
        color = "#2ca02c";
    }
    color
}

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Decode a color token, falling back to [`FALLBACK_COLOR`] channels.
    pub fn parse(candidate: &str) -> Self {
        let canonical = normalize_color(candidate);
        // normalize_color always yields six hex digits after '#'
        match hex::decode(&canonical[1..]) {
            Ok(bytes) if bytes.len() == 3 => Self { r: bytes[0], g: bytes[1], b: bytes[2] },
            _ => Self { r: 31, g: 119, b: 180 },
        }
    }

    /// Channels plus alpha, in the order map renderers expect.
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl fmt::Display for Rgb {
    /// Format as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
    }
}

/// RGBA quadruple for a color token, used for marker fills.
pub fn hex_to_rgba(candidate: &str, alpha: u8) -> [u8; 4] {
    Rgb::parse(candidate).with_alpha(alpha)
}
