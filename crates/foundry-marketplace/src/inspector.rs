//! Inspector sessions — run arbitrary manifest input through the pipeline
//! and report every failure layer distinctly.
//!
//! The Inspector is a thin orchestration shell over the schema validator and
//! the normalizer. Its one job beyond theirs is presentation of failure:
//! a syntax error, a schema error, and an invariant error are different
//! problems with different fixes, and they are never collapsed into one
//! generic "invalid" message.

use serde_json::Value;

use crate::error::{NormalizationError, SourceError};
use crate::normalize::normalize;
use crate::schema::{validate, Violation};
use crate::source::ManifestSource;
use crate::types::{Marketplace, MarketplaceSummary};

/// Outcome of inspecting one manifest document.
#[derive(Debug)]
pub enum Inspection {
    /// The input is not well-formed JSON.
    Syntax { error: serde_json::Error },

    /// Well-formed, but the document does not conform to the marketplace
    /// schema. All violations are reported in one batch.
    Schema { violations: Vec<Violation> },

    /// Passed the schema but violates a cross-field invariant.
    Invariant { error: NormalizationError },

    /// A valid marketplace, ready for drill-down.
    Valid {
        summary: MarketplaceSummary,
        marketplace: Marketplace,
    },
}

impl Inspection {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Inspect raw manifest text.
pub fn inspect(text: &str) -> Inspection {
    let doc: Value = match serde_json::from_str(text) {
        Ok(doc) => doc,
        Err(error) => return Inspection::Syntax { error },
    };

    if let Err(violations) = validate(&doc) {
        return Inspection::Schema { violations };
    }

    match normalize(&doc) {
        Ok(marketplace) => Inspection::Valid {
            summary: marketplace.summary(),
            marketplace,
        },
        Err(error) => Inspection::Invariant { error },
    }
}

/// Inspect a manifest read from a source.
///
/// Source failures are the caller's to report; they are not an inspection
/// outcome — there was no document to inspect.
pub async fn inspect_source(
    source: &ManifestSource,
) -> std::result::Result<Inspection, SourceError> {
    let text = source.read().await?;
    Ok(inspect(&text))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ViolationKind;

    #[test]
    fn valid_manifest_yields_summary_and_model() {
        let inspection = inspect(
            r#"{"plugins":[
                {"name":"pdf-reader","category":"vision"},
                {"name":"voice-sync","category":"audio"}
            ]}"#,
        );
        assert!(inspection.is_valid());
        match inspection {
            Inspection::Valid {
                summary,
                marketplace,
            } => {
                assert_eq!(summary.plugin_count, 2);
                assert_eq!(summary.categories, vec!["vision", "audio"]);
                assert!(marketplace.get("voice-sync").is_some());
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_syntax_outcome() {
        let inspection = inspect("{\"plugins\": [");
        assert!(matches!(inspection, Inspection::Syntax { .. }));
    }

    #[test]
    fn schema_failures_are_batched() {
        let inspection = inspect(r#"{"plugins":[{"name":1},{"version":2}]}"#);
        match inspection {
            Inspection::Schema { violations } => {
                assert_eq!(violations.len(), 3);
                assert_eq!(violations[0].kind, ViolationKind::WrongType);
                assert_eq!(violations[1].kind, ViolationKind::MissingRequiredField);
            }
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_never_reach_the_valid_outcome() {
        let inspection =
            inspect(r#"{"plugins":[{"name":"pdf-reader"},{"name":"pdf-reader"}]}"#);
        match inspection {
            Inspection::Schema { violations } => {
                assert!(violations
                    .iter()
                    .any(|v| v.kind == ViolationKind::DuplicateName));
            }
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inline_source_inspects_like_text() {
        let source = ManifestSource::Inline(r#"{"plugins":[{"name":"x"}]}"#.into());
        let inspection = inspect_source(&source).await.unwrap();
        assert!(inspection.is_valid());
    }
}
