//! Caller-supplied merge data.
//!
//! A binding set carries the four mappings a merge consumes: scalar texts,
//! table grids, raw image payloads, and chart grids, each keyed by the
//! logical name the template exposes. The set is supplied once per merge
//! operation and read-only to the binders; the only transformation applied
//! is scalar-key normalization at ingestion (wrapping each key in the
//! `<` `>` delimiter pair used by the placeholder markers).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rectangular grid of string cells bound to a table or chart
pub type Grid = Vec<Vec<String>>;

/// The merge data for one operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bindings {
    /// Scalar field name → replacement text
    #[serde(default)]
    pub texts: HashMap<String, String>,
    /// Table name → grid of cell values
    #[serde(default)]
    pub tables: HashMap<String, Grid>,
    /// Drawing frame name → raw image bytes
    #[serde(default)]
    pub images: HashMap<String, Vec<u8>>,
    /// Drawing frame name → grid for the chart's local table
    #[serde(default)]
    pub charts: HashMap<String, Grid>,
}

impl Bindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fills_missing_categories() {
        let bindings: Bindings =
            serde_json::from_str(r#"{"texts": {"name": "John"}}"#).unwrap();

        assert_eq!(bindings.texts.get("name").map(String::as_str), Some("John"));
        assert!(bindings.tables.is_empty());
        assert!(bindings.images.is_empty());
        assert!(bindings.charts.is_empty());
    }
}
