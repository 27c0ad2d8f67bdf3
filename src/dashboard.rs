//! Aggregate counts over the flattened collection.

use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::store::FeatureCollection;

/// Bucket for features with an empty region.
pub const NO_REGION: &str = "Sin provincia";
/// Bucket for features whose date does not start with `YYYY-MM`.
pub const NO_DATE: &str = "Sin fecha";

static YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})[-/](\d{1,2})\b").expect("static year-month pattern")
});

/// `YYYY-MM` key for a date string such as `2024-03-15` or `2024/3/15`.
pub fn month_key(date: &str) -> Option<String> {
    let caps = YEAR_MONTH.captures(date)?;
    let month: u32 = caps[2].parse().ok()?;
    (1..=12).contains(&month).then(|| format!("{}-{month:02}", &caps[1]))
}

/// Counts of cases by layer, region, responsible party and month.
/// Every map sums to `total`. Visibility is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total: usize,
    pub by_layer: BTreeMap<String, usize>,
    pub by_region: BTreeMap<String, usize>,
    pub by_responsible: BTreeMap<String, usize>,
    pub by_month: BTreeMap<String, usize>,
}

impl Dashboard {
    pub fn compute(collection: &FeatureCollection<'_>) -> Self {
        let mut dashboard = Self::default();
        for feature in collection.features() {
            let props = feature.properties();
            dashboard.total += 1;
            *dashboard.by_layer.entry(feature.layer().to_string()).or_default() += 1;

            let region = match props.region.trim() {
                "" => NO_REGION.to_string(),
                r => r.to_string(),
            };
            *dashboard.by_region.entry(region).or_default() += 1;
            *dashboard.by_responsible.entry(props.responsible.label().to_string()).or_default() += 1;

            let month = month_key(&props.date).unwrap_or_else(|| NO_DATE.to_string());
            *dashboard.by_month.entry(month).or_default() += 1;
        }
        dashboard
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {}", self.total)?;
        let sections = [
            ("By layer", &self.by_layer),
            ("By region", &self.by_region),
            ("By responsible", &self.by_responsible),
            ("By month", &self.by_month),
        ];
        for (title, counts) in sections {
            writeln!(f, "{title}:")?;
            for (key, count) in counts {
                writeln!(f, "  - {key}: {count}")?;
            }
        }
        Ok(())
    }
}
