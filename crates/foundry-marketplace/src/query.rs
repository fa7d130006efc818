//! Read-only filtering over a normalized marketplace.
//!
//! Filtering is a pure predicate scan: case-insensitive substring match
//! against the precomputed search-term cache, combined with exact category
//! equality. No ranking, no pagination — plugins come back in document
//! order, and an empty result is a valid outcome, never an error.

use crate::types::{Marketplace, Plugin};

/// Filter the plugin inventory by free text and an optional category facet.
///
/// A plugin is included iff it matches both rules:
/// - text: the lowercased query is a substring of any of the plugin's
///   `search_terms`; the empty query matches everything.
/// - category: exact, case-sensitive equality with the plugin's category;
///   `None` means no filter.
///
/// The result is a subsequence of `marketplace.plugins` in original order.
pub fn filter<'a>(
    marketplace: &'a Marketplace,
    text: &str,
    category: Option<&str>,
) -> Vec<&'a Plugin> {
    let needle = text.to_lowercase();

    marketplace
        .plugins
        .iter()
        .filter(|plugin| matches_text(plugin, &needle) && matches_category(plugin, category))
        .collect()
}

fn matches_text(plugin: &Plugin, needle: &str) -> bool {
    needle.is_empty() || plugin.search_terms.iter().any(|term| term.contains(needle))
}

fn matches_category(plugin: &Plugin, category: Option<&str>) -> bool {
    match category {
        Some(wanted) => plugin.category.as_deref() == Some(wanted),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
