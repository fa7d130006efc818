//! The load pipeline — fetch, parse, validate, normalize.
//!
//! A load is a single awaited unit: the caller receives either a complete
//! [`Marketplace`] or the first failing phase's diagnostics, never a partial
//! model. Loads have no side effects, so "cancellation" is just discarding
//! the in-flight result and starting a new load.

use serde_json::Value;

use crate::error::{MarketplaceError, Result};
use crate::normalize::normalize;
use crate::schema::validate;
use crate::source::ManifestSource;
use crate::types::Marketplace;

/// Load a marketplace from a source.
pub async fn load(source: &ManifestSource) -> Result<Marketplace> {
    let text = source.read().await.map_err(MarketplaceError::Source)?;
    tracing::debug!(
        source = %source.describe(),
        bytes = text.len(),
        "manifest read"
    );

    let marketplace = load_from_str(&text)?;
    tracing::info!(
        source = %source.describe(),
        plugins = marketplace.plugins.len(),
        categories = marketplace.categories.len(),
        "marketplace loaded"
    );

    Ok(marketplace)
}

/// Run the in-memory pipeline over raw manifest text.
///
/// Halts at the first failing phase — later phases never run, so the caller
/// sees one layer's diagnostics, not cascading noise.
pub fn load_from_str(text: &str) -> Result<Marketplace> {
    let doc: Value = serde_json::from_str(text).map_err(MarketplaceError::Parse)?;

    validate(&doc).map_err(MarketplaceError::Schema)?;

    Ok(normalize(&doc)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadPhase;

    #[test]
    fn well_formed_manifest_loads() {
        let marketplace =
            load_from_str(r#"{"plugins":[{"name":"pdf-reader","category":"vision"}]}"#).unwrap();
        assert_eq!(marketplace.plugins.len(), 1);
        assert_eq!(marketplace.categories, vec!["vision"]);
    }

    #[test]
    fn truncated_text_fails_in_the_parse_phase() {
        let err = load_from_str(r#"{"plugins":[{"name":"#).unwrap_err();
        assert!(matches!(err, MarketplaceError::Parse(_)));
        assert_eq!(err.phase(), LoadPhase::Parse);
    }

    #[test]
    fn schema_violations_fail_in_the_schema_phase() {
        let err = load_from_str(r#"{"name":"no plugins here"}"#).unwrap_err();
        match &err {
            MarketplaceError::Schema(violations) => assert_eq!(violations.len(), 1),
            other => panic!("expected Schema, got {other:?}"),
        }
        assert_eq!(err.phase(), LoadPhase::Schema);
    }

    #[test]
    fn parse_failure_is_distinct_from_schema_failure() {
        let parse = load_from_str("not json at all").unwrap_err();
        let schema = load_from_str("{}").unwrap_err();
        assert!(matches!(parse, MarketplaceError::Parse(_)));
        assert!(matches!(schema, MarketplaceError::Schema(_)));
    }
}
