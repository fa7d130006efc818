//! CLI entry point for Foundry.
//!
//! This binary provides the `foundry` command with subcommands for browsing
//! a plugin marketplace and inspecting arbitrary manifests. All UI state
//! (chosen source, query, category) lives here; the engine is called as a
//! pure function per invocation and holds nothing across calls.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use foundry_marketplace::{
    default_manifest_path, query, Inspection, ManifestSource, Marketplace, Plugin,
};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn");

    let cli = Cli::parse();
    let manifest = cli.manifest.as_deref();

    match cli.command {
        Commands::List { category } => cmd_list(manifest, category.as_deref()).await,
        Commands::Search { query, category } => {
            cmd_search(manifest, &query, category.as_deref()).await
        }
        Commands::Categories => cmd_categories(manifest).await,
        Commands::Show { name } => cmd_show(manifest, &name).await,
        Commands::Inspect { source } => cmd_inspect(&source).await,
    }
}

/// Resolve and load the marketplace the browse commands operate on.
async fn load_marketplace(manifest: Option<&str>) -> Result<Marketplace> {
    let source = match manifest {
        Some(spec) => ManifestSource::parse(spec),
        None => ManifestSource::Path(default_manifest_path()),
    };

    foundry_marketplace::load(&source)
        .await
        .with_context(|| format!("failed to load marketplace from {}", source.describe()))
}

// ---------------------------------------------------------------------------
// Subcommands: list / search / categories / show
// ---------------------------------------------------------------------------

async fn cmd_list(manifest: Option<&str>, category: Option<&str>) -> Result<()> {
    let marketplace = load_marketplace(manifest).await?;
    let plugins = query::filter(&marketplace, "", category);
    print_plugins(&plugins);
    Ok(())
}

async fn cmd_search(manifest: Option<&str>, text: &str, category: Option<&str>) -> Result<()> {
    let marketplace = load_marketplace(manifest).await?;
    let plugins = query::filter(&marketplace, text, category);
    print_plugins(&plugins);
    Ok(())
}

async fn cmd_categories(manifest: Option<&str>) -> Result<()> {
    let marketplace = load_marketplace(manifest).await?;

    println!();
    if marketplace.categories.is_empty() {
        println!("  No categories declared");
    } else {
        for category in &marketplace.categories {
            let count = query::filter(&marketplace, "", Some(category)).len();
            println!("  {:<20} {count} plugin(s)", category);
        }
    }
    println!();

    Ok(())
}

async fn cmd_show(manifest: Option<&str>, name: &str) -> Result<()> {
    let marketplace = load_marketplace(manifest).await?;

    let Some(plugin) = marketplace.get(name) else {
        println!();
        println!("  Plugin `{name}` not found");
        println!();
        std::process::exit(1);
    };

    println!();
    println!("  {}", plugin.name);
    if let Some(description) = &plugin.description {
        println!("  {description}");
    }
    println!();
    println!("    Category:  {}", plugin.category.as_deref().unwrap_or("-"));
    println!("    Version:   {}", plugin.version.as_deref().unwrap_or("-"));
    println!("    Author:    {}", plugin.author.as_deref().unwrap_or("-"));
    if !plugin.keywords.is_empty() {
        println!("    Keywords:  {}", plugin.keywords.join(", "));
    }
    for (key, value) in &plugin.extra {
        let rendered = match value.as_str() {
            Some(s) => s.to_owned(),
            None => serde_json::to_string(value).unwrap_or_default(),
        };
        println!("    {key}: {rendered}");
    }
    println!();

    Ok(())
}

fn print_plugins(plugins: &[&Plugin]) {
    println!();
    if plugins.is_empty() {
        println!("  No plugins found");
        println!("  Try adjusting your search or filter");
        println!();
        return;
    }

    for plugin in plugins {
        println!(
            "  {:<24} {:<12} {}",
            plugin.name,
            plugin.category.as_deref().unwrap_or("-"),
            plugin.description.as_deref().unwrap_or(""),
        );
    }
    println!();
    println!("  {} available", plugins.len());
    println!();
}

// ---------------------------------------------------------------------------
// Subcommand: inspect
// ---------------------------------------------------------------------------

async fn cmd_inspect(source: &str) -> Result<()> {
    let inspection = if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read manifest from stdin")?;
        foundry_marketplace::inspect(&text)
    } else {
        let source = ManifestSource::parse(source);
        foundry_marketplace::inspect_source(&source)
            .await
            .with_context(|| format!("could not read manifest from {}", source.describe()))?
    };

    println!();
    match inspection {
        Inspection::Syntax { error } => {
            println!("  Syntax error — manifest is not well-formed JSON");
            println!("    {error}");
            println!();
            std::process::exit(1);
        }
        Inspection::Schema { violations } => {
            println!("  Schema validation failed: {} violation(s)", violations.len());
            println!();
            for violation in &violations {
                println!("    {:<24} [{}]", violation.path, violation.kind);
                println!("      {}", violation.message);
            }
            println!();
            std::process::exit(1);
        }
        Inspection::Invariant { error } => {
            println!("  Invariant violation");
            println!("    {error}");
            println!();
            std::process::exit(1);
        }
        Inspection::Valid {
            summary,
            marketplace,
        } => {
            println!("  Manifest OK");
            println!();
            println!("    Plugins:    {}", summary.plugin_count);
            if summary.categories.is_empty() {
                println!("    Categories: -");
            } else {
                println!("    Categories: {}", summary.categories.join(", "));
            }
            println!();
            for plugin in &marketplace.plugins {
                println!(
                    "    - {} {}",
                    plugin.name,
                    plugin.version.as_deref().unwrap_or(""),
                );
            }
            println!();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
