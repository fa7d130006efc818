//! Error types for the marketplace engine.
//!
//! The load pipeline distinguishes four failure layers: the source could not
//! be read, the text is not well-formed JSON, the document does not conform
//! to the marketplace schema, or the document violates a cross-field
//! invariant. Callers receive exactly one layer's diagnostics — the pipeline
//! halts at the first failing phase.

use crate::schema::Violation;

/// Phase of the load pipeline in which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Reading the manifest from its source.
    Fetch,
    /// Parsing the raw text as JSON.
    Parse,
    /// Checking the document against the marketplace schema.
    Schema,
    /// Building the canonical model.
    Normalize,
}

impl LoadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Parse => "parse",
            Self::Schema => "schema",
            Self::Normalize => "normalize",
        }
    }
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while reading a manifest from its source.
///
/// Opaque to the rest of the pipeline: the engine never interprets transport
/// details, it only reports that the source was unavailable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("fetch failed: HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Cross-field invariant failures detected during normalization.
#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    /// Two plugin entries share a name. Entries are never silently merged or
    /// overwritten; the positions of both offenders are reported.
    #[error("duplicate plugin name `{name}` (entries {first} and {second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    /// The document does not deserialize into the manifest shape. Only
    /// reachable when the schema validator was bypassed.
    #[error("manifest does not match the marketplace shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Errors returned by the load pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("manifest source unavailable: {0}")]
    Source(#[from] SourceError),

    #[error("manifest is not well-formed JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("manifest failed schema validation with {} violation(s)", .0.len())]
    Schema(Vec<Violation>),

    #[error("manifest violates a marketplace invariant: {0}")]
    Normalization(#[from] NormalizationError),
}

impl MarketplaceError {
    /// The pipeline phase this error belongs to.
    pub fn phase(&self) -> LoadPhase {
        match self {
            Self::Source(_) => LoadPhase::Fetch,
            Self::Parse(_) => LoadPhase::Parse,
            Self::Schema(_) => LoadPhase::Schema,
            Self::Normalization(_) => LoadPhase::Normalize,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MarketplaceError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
