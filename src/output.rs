//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what a page *is* (hub or city name, positional index)
//! and shows slugs and URLs as indented context lines. This keeps the output
//! readable as an inventory of the service-area section.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Hubs
//! 001 Chambersburg, PA (35 cities, noindex)
//!     Slug: chambersburg-pa
//!     Image: 000
//! 002 Washington, DC (39 cities, noindex)
//!     Slug: washington-dc
//!     Image: 001
//!
//! Images
//!     26 in pool, 5 overrides
//!
//! Slugs
//!     all match name and state
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Pages
//!
//! ```text
//! Index → /service-areas
//! 001 Chambersburg, PA → /service-areas/chambersburg-pa
//!     35 city pages (noindex)
//!
//! Generated 1 index, 5 hub pages, 191 city pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::geo::Registry;
use crate::images::ImagePool;
use crate::pages::{PageKind, PageManifest, city_robots};
use crate::sitemap::SitemapSummary;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn index_label(indexed: bool) -> &'static str {
    if indexed { "indexed" } else { "noindex" }
}

// ============================================================================
// Check
// ============================================================================

/// Format the registry and pool inventory shown by `check`.
pub fn format_check_output(registry: &Registry, pool: &ImagePool, site_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Hubs".to_string()];

    for (i, hub) in registry.hubs().iter().enumerate() {
        let cities = registry.cities_by_hub(&hub.slug).len();
        lines.push(format!(
            "{} {} ({}, {})",
            format_index(i + 1),
            hub.label(),
            plural(cities, "city", "cities"),
            index_label(city_robots(hub).index)
        ));
        lines.push(format!("{}Slug: {}", indent(1), hub.slug));
        lines.push(format!(
            "{}Image: {}",
            indent(1),
            format_index(pool.index_for(&hub.slug))
        ));
    }

    lines.push(String::new());
    lines.push("Images".to_string());
    lines.push(format!(
        "{}{} in pool, {}",
        indent(1),
        pool.len(),
        plural(pool.overrides().len(), "override", "overrides")
    ));

    let nonstandard = registry.nonstandard_slugs();
    lines.push(String::new());
    lines.push("Slugs".to_string());
    if nonstandard.is_empty() {
        lines.push(format!("{}all match name and state", indent(1)));
    }
    for slug in &nonstandard {
        lines.push(format!("{}nonstandard: {}", indent(1), slug));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    for name in [
        crate::config::CONFIG_FILENAME,
        crate::geo::REGISTRY_FILENAME,
        crate::images::POOL_FILENAME,
    ] {
        if site_dir.join(name).exists() {
            lines.push(format!("{}{}", indent(1), name));
        }
    }
    if lines.last().is_some_and(|l| l == "Config") {
        lines.push(format!("{}(built-in defaults)", indent(1)));
    }

    lines
}

pub fn print_check_output(registry: &Registry, pool: &ImagePool, site_dir: &Path) {
    for line in format_check_output(registry, pool, site_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Format the page manifest summary: index, hubs with city counts, totals.
pub fn format_pages_output(manifest: &PageManifest) -> Vec<String> {
    let mut lines = Vec::new();

    for page in manifest.pages.iter().filter(|p| p.kind == PageKind::Index) {
        lines.push(format!("Index → {}", page.path));
    }

    let hubs = manifest.pages.iter().filter(|p| p.kind == PageKind::Hub);
    for (i, page) in hubs.enumerate() {
        let Some(hub) = &page.hub else { continue };
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            hub.label(),
            page.path
        ));
        let cities: Vec<_> = manifest
            .pages
            .iter()
            .filter(|p| p.kind == PageKind::City)
            .filter(|p| p.hub.as_ref().is_some_and(|h| h.slug == hub.slug))
            .collect();
        if !cities.is_empty() {
            lines.push(format!(
                "{}{} ({})",
                indent(1),
                plural(cities.len(), "city page", "city pages"),
                index_label(cities[0].robots.index)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(manifest.count(PageKind::Index), "index", "indexes"),
        plural(manifest.count(PageKind::Hub), "hub page", "hub pages"),
        plural(manifest.count(PageKind::City), "city page", "city pages"),
    ));
    lines
}

pub fn print_pages_output(manifest: &PageManifest) {
    for line in format_pages_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Sitemap
// ============================================================================

pub fn format_sitemap_output(summary: &SitemapSummary) -> Vec<String> {
    vec![
        format!("Sitemap: {}", plural(summary.total(), "URL", "URLs")),
        format!("{}Static: {}", indent(1), summary.static_pages),
        format!("{}Index: 1", indent(1)),
        format!("{}Hubs: {}", indent(1), summary.hubs),
        format!("{}Cities: {}", indent(1), summary.cities),
    ]
}

pub fn print_sitemap_output(summary: &SitemapSummary) {
    for line in format_sitemap_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

/// One block per slug: pool index, whether an override applied, and the src.
pub fn format_resolve_output(pool: &ImagePool, slugs: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for slug in slugs {
        let index = pool.index_for(slug);
        let source = if pool.overrides().contains_key(slug.as_str()) {
            "override"
        } else {
            "hash"
        };
        lines.push(format!("{} {} ({})", format_index(index), slug, source));
        lines.push(format!("{}{}", indent(1), pool.resolve(slug).src));
    }
    lines
}

pub fn print_resolve_output(pool: &ImagePool, slugs: &[String]) {
    for line in format_resolve_output(pool, slugs) {
        println!("{}", line);
    }
}
