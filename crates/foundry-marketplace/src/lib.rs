//! Marketplace indexing & query engine for Foundry plugin manifests.
//!
//! This crate provides:
//!
//! - **Schema validator** — checks a raw manifest document against the
//!   marketplace shape and reports every violation in one batch.
//!
//! - **Normalizer** — builds the canonical immutable [`Marketplace`] model,
//!   including the per-plugin search-term cache and the category facet list.
//!
//! - **Query engine** — deterministic free-text + category filtering over a
//!   normalized marketplace; pure, synchronous, never errors.
//!
//! - **Loader** — fetches a manifest by path, URL, or inline text and runs
//!   parse → validate → normalize as one awaited unit.
//!
//! - **Inspector** — feeds arbitrary input through the pipeline and reports
//!   syntax, schema, and invariant failures as distinct outcomes.
//!
//! # Example
//!
//! ```rust
//! use foundry_marketplace::{load_from_str, query};
//!
//! let manifest = r#"{"plugins":[
//!     {"name":"pdf-reader","category":"vision","description":"Reads PDF files"},
//!     {"name":"voice-sync","category":"audio"}
//! ]}"#;
//!
//! let marketplace = load_from_str(manifest).unwrap();
//! assert_eq!(marketplace.categories, vec!["vision", "audio"]);
//!
//! let hits = query::filter(&marketplace, "pdf", None);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "pdf-reader");
//! ```

pub mod error;
pub mod inspector;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod schema;
pub mod source;
pub mod types;

pub use error::{LoadPhase, MarketplaceError, NormalizationError, Result, SourceError};
pub use inspector::{inspect, inspect_source, Inspection};
pub use loader::{load, load_from_str};
pub use normalize::normalize;
pub use query::filter;
pub use schema::{validate, Violation, ViolationKind};
pub use source::{default_manifest_path, ManifestSource};
pub use types::{Marketplace, MarketplaceSummary, Plugin};
