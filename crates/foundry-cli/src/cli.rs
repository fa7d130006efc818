//! CLI argument definitions for Foundry.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Parser, Subcommand};

/// Foundry — browse and validate plugin marketplaces.
#[derive(Parser)]
#[command(
    name = "foundry",
    version,
    about = "Browse, search, and validate plugin marketplaces",
    long_about = "A read-only browser for plugin marketplace manifests: list and search the \
                  plugin inventory, and inspect arbitrary manifests for conformance with the \
                  packaging specification."
)]
pub struct Cli {
    /// Manifest to load: a file path or an http(s) URL. Defaults to
    /// `$FOUNDRY_MARKETPLACE`, then `.claude-plugin/marketplace.json`.
    #[arg(long, short, global = true)]
    pub manifest: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the plugin inventory.
    List {
        /// Only show plugins in this category (exact match).
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Search plugins by free text.
    Search {
        /// Search query.
        query: String,

        /// Restrict matches to this category (exact match).
        #[arg(long, short)]
        category: Option<String>,
    },

    /// List the category facets derived from the manifest.
    Categories,

    /// Show full details for one plugin.
    Show {
        /// The plugin name.
        name: String,
    },

    /// Validate an arbitrary manifest and report every violation.
    Inspect {
        /// Manifest source: a file path, an http(s) URL, or `-` for stdin.
        source: String,
    },
}
