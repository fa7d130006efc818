//! Canonical marketplace model types.
//!
//! A [`Marketplace`] is built once per load by the normalizer and never
//! mutated afterwards: the query engine performs read-only projections over
//! it, so snapshots can be shared and queried without synchronization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One installable plugin entry in a marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    /// Unique plugin name / slug — the primary key within a marketplace.
    pub name: String,

    /// Facet used for category filtering; `None` means uncategorized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Short human-readable description. Passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Semantic version string (e.g. `1.2.0`). Passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Author name or handle. Passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Declared search hints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Unknown manifest fields, preserved verbatim and never interpreted.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Lowercase token/field cache used for query matching.
    ///
    /// Derived once at normalization time from name, description, category,
    /// and keywords. A cache, never a source of truth.
    #[serde(skip)]
    pub search_terms: Vec<String>,
}

/// A normalized plugin marketplace.
#[derive(Debug, Clone, Serialize)]
pub struct Marketplace {
    /// Plugins in source-document order.
    pub plugins: Vec<Plugin>,

    /// Distinct non-empty category values, first-seen order, deduplicated.
    /// Always derivable purely from `plugins`.
    pub categories: Vec<String>,

    /// Unknown top-level manifest fields (marketplace name, owner, ...),
    /// preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Marketplace {
    /// Look up a plugin by its exact name.
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Counts and facets for display after a successful load.
    pub fn summary(&self) -> MarketplaceSummary {
        MarketplaceSummary {
            plugin_count: self.plugins.len(),
            categories: self.categories.clone(),
        }
    }
}

/// Summary information about a loaded marketplace.
#[derive(Debug, Clone, Serialize)]
pub struct MarketplaceSummary {
    /// Number of plugins in the inventory.
    pub plugin_count: usize,

    /// The derived category facets.
    pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Marketplace {
        Marketplace {
            plugins: vec![
                Plugin {
                    name: "pdf-reader".into(),
                    category: Some("vision".into()),
                    description: Some("Reads PDF files".into()),
                    version: None,
                    author: None,
                    keywords: Vec::new(),
                    extra: Map::new(),
                    search_terms: Vec::new(),
                },
                Plugin {
                    name: "voice-sync".into(),
                    category: Some("audio".into()),
                    description: None,
                    version: None,
                    author: None,
                    keywords: Vec::new(),
                    extra: Map::new(),
                    search_terms: Vec::new(),
                },
            ],
            categories: vec!["vision".into(), "audio".into()],
            extra: Map::new(),
        }
    }

    #[test]
    fn get_by_exact_name() {
        let marketplace = sample();
        assert!(marketplace.get("pdf-reader").is_some());
        assert!(marketplace.get("PDF-Reader").is_none());
        assert!(marketplace.get("missing").is_none());
    }

    #[test]
    fn summary_counts_and_facets() {
        let summary = sample().summary();
        assert_eq!(summary.plugin_count, 2);
        assert_eq!(summary.categories, vec!["vision", "audio"]);
    }
}
