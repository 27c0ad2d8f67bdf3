//! IO module for format-specific reading and writing operations.
//!
//! Each format module handles reading and/or writing for one file format.
//!
//! # Format Modules
//!
//! - `csv` - CSV export of a feature collection, plus raw row reading/writing
//! - `geojson` - GeoJSON FeatureCollection export and import
//! - `shp` - zipped ESRI shapefile bundle export
//! - `project` - single-layer project snapshot (points + category colors)
//! - `snapshot` - full session snapshot used to persist a session between runs

pub mod csv;
pub mod geojson;
pub mod project;
pub mod shp;
pub mod snapshot;
