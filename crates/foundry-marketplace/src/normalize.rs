//! Manifest normalization — raw document to canonical [`Marketplace`].
//!
//! Derived data (search terms, category facets) is computed exactly once
//! here, so query-time operations are pure lookups with no recomputation and
//! no unordered-map iteration leaking into displayed order. Identical input
//! always yields a model with identical field contents and ordering.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::NormalizationError;
use crate::types::{Marketplace, Plugin};

/// Raw manifest shape as it appears on the wire.
#[derive(Debug, Deserialize)]
struct RawManifest {
    plugins: Vec<Plugin>,

    /// Everything else at the top level rides along untouched.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Convert a validated raw document into the canonical model.
///
/// Duplicate names are re-checked here even though the schema validator
/// reports them too: a caller that skipped validation must still never end
/// up with a silently merged or overwritten entry.
pub fn normalize(doc: &Value) -> std::result::Result<Marketplace, NormalizationError> {
    let raw: RawManifest = serde_json::from_value(doc.clone())?;

    {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, plugin) in raw.plugins.iter().enumerate() {
            if let Some(&first) = seen.get(plugin.name.as_str()) {
                return Err(NormalizationError::DuplicateName {
                    name: plugin.name.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(plugin.name.as_str(), index);
        }
    }

    let mut plugins = raw.plugins;
    for plugin in &mut plugins {
        plugin.search_terms = search_terms(plugin);
    }

    let categories = derive_categories(&plugins);

    Ok(Marketplace {
        plugins,
        categories,
        extra: raw.extra,
    })
}

/// Build the lowercase token/field cache for one plugin.
///
/// The cache holds the untokenized lowercase `name` and `category` (so
/// substring queries can span delimiters) plus every
/// whitespace/punctuation-delimited token of name, description, category,
/// and keywords. Deduplicated, first-seen order.
fn search_terms(plugin: &Plugin) -> Vec<String> {
    let mut terms = Vec::new();
    let mut seen = HashSet::new();

    push_term(plugin.name.to_lowercase(), &mut seen, &mut terms);
    if let Some(category) = &plugin.category {
        push_term(category.to_lowercase(), &mut seen, &mut terms);
    }

    let mut corpus: Vec<&str> = vec![plugin.name.as_str()];
    if let Some(description) = &plugin.description {
        corpus.push(description);
    }
    if let Some(category) = &plugin.category {
        corpus.push(category);
    }
    corpus.extend(plugin.keywords.iter().map(String::as_str));

    for text in corpus {
        for token in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if !token.is_empty() {
                push_term(token.to_owned(), &mut seen, &mut terms);
            }
        }
    }

    terms
}

fn push_term(term: String, seen: &mut HashSet<String>, terms: &mut Vec<String>) {
    if !term.is_empty() && seen.insert(term.clone()) {
        terms.push(term);
    }
}

/// Distinct non-empty categories, first occurrence order.
fn derive_categories(plugins: &[Plugin]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for plugin in plugins {
        let Some(category) = plugin.category.as_deref() else {
            continue;
        };
        if !category.is_empty() && seen.insert(category.to_owned()) {
            categories.push(category.to_owned());
        }
    }

    categories
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn categories_first_seen_order_deduplicated() {
        let doc = json!({"plugins": [
            {"name": "a", "category": "vision"},
            {"name": "b", "category": "audio"},
            {"name": "c", "category": "vision"},
            {"name": "d"},
            {"name": "e", "category": ""}
        ]});
        let marketplace = normalize(&doc).unwrap();
        assert_eq!(marketplace.categories, vec!["vision", "audio"]);
    }

    #[test]
    fn search_terms_contain_lowercase_name() {
        let doc = json!({"plugins": [{"name": "PDF-Reader"}]});
        let marketplace = normalize(&doc).unwrap();
        let terms = &marketplace.plugins[0].search_terms;
        assert!(terms.contains(&"pdf-reader".to_owned()));
        assert!(terms.contains(&"pdf".to_owned()));
        assert!(terms.contains(&"reader".to_owned()));
    }

    #[test]
    fn search_terms_cover_description_category_keywords() {
        let doc = json!({"plugins": [{
            "name": "voice-sync",
            "category": "Audio Tools",
            "description": "Synchronizes voice tracks.",
            "keywords": ["tts", "speech"]
        }]});
        let marketplace = normalize(&doc).unwrap();
        let terms = &marketplace.plugins[0].search_terms;

        // Untokenized category supports substring matches across the space.
        assert!(terms.contains(&"audio tools".to_owned()));
        assert!(terms.contains(&"synchronizes".to_owned()));
        assert!(terms.contains(&"voice".to_owned()));
        assert!(terms.contains(&"tts".to_owned()));
        assert!(terms.contains(&"speech".to_owned()));
        // Punctuation never survives tokenization.
        assert!(!terms.iter().any(|t| t.contains('.')));
    }

    #[test]
    fn search_terms_deduplicated_deterministically() {
        let doc = json!({"plugins": [{
            "name": "echo",
            "description": "echo echo ECHO",
            "keywords": ["echo"]
        }]});
        let first = normalize(&doc).unwrap();
        let second = normalize(&doc).unwrap();
        assert_eq!(
            first.plugins[0].search_terms,
            second.plugins[0].search_terms
        );
        assert_eq!(
            first.plugins[0]
                .search_terms
                .iter()
                .filter(|t| t.as_str() == "echo")
                .count(),
            1
        );
    }

    #[test]
    fn duplicate_name_reports_both_positions() {
        let doc = json!({"plugins": [
            {"name": "pdf-reader"},
            {"name": "voice-sync"},
            {"name": "pdf-reader"}
        ]});
        let err = normalize(&doc).unwrap_err();
        match err {
            NormalizationError::DuplicateName {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "pdf-reader");
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fields_survive_verbatim() {
        let doc = json!({
            "owner": {"name": "Agentic Insights"},
            "plugins": [{"name": "x", "source": "./plugins/x", "strict": true}]
        });
        let marketplace = normalize(&doc).unwrap();
        assert_eq!(
            marketplace.extra.get("owner"),
            Some(&json!({"name": "Agentic Insights"}))
        );
        assert_eq!(
            marketplace.plugins[0].extra.get("source"),
            Some(&json!("./plugins/x"))
        );
        assert_eq!(marketplace.plugins[0].extra.get("strict"), Some(&json!(true)));
    }

    #[test]
    fn non_manifest_shape_fails_without_panicking() {
        let doc = json!({"plugins": "nope"});
        let err = normalize(&doc).unwrap_err();
        assert!(matches!(err, NormalizationError::Shape(_)));
    }

    #[test]
    fn plugin_order_is_document_order() {
        let doc = json!({"plugins": [
            {"name": "c"}, {"name": "a"}, {"name": "b"}
        ]});
        let marketplace = normalize(&doc).unwrap();
        let names: Vec<&str> = marketplace.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
