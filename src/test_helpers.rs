//! Shared test utilities for the service-areas test suite.
//!
//! Provides small hand-built registries and pools plus lookup helpers that
//! panic with the available keys on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let registry = sample_registry();
//! let pool = sample_pool();
//! let manifest = build_manifest(&SiteConfig::default(), &registry, &pool).unwrap();
//! let page = find_page(&manifest, "/service-areas/sample-hub");
//! ```

use std::collections::BTreeMap;

use crate::geo::{City, Hub, Registry};
use crate::images::{ImageEntry, ImagePool};
use crate::pages::{LocationPage, PageManifest};
use crate::sitemap::SitemapEntry;

// =========================================================================
// Fixture builders
// =========================================================================

/// A hub in PA with the given display name.
pub fn hub_named(name: &str, slug: &str, index_city_pages: bool) -> Hub {
    Hub {
        name: name.to_string(),
        state: "PA".to_string(),
        slug: slug.to_string(),
        latitude: 40.0,
        longitude: -77.0,
        intro_copy: format!("Serving {name} and nearby towns."),
        index_city_pages,
        notes: None,
    }
}

/// A hub whose display name is its slug.
pub fn hub(slug: &str, index_city_pages: bool) -> Hub {
    hub_named(slug, slug, index_city_pages)
}

pub fn city(name: &str, slug: &str) -> City {
    City {
        name: name.to_string(),
        state: "PA".to_string(),
        slug: slug.to_string(),
    }
}

/// Registry from parts. Panics on invalid data.
pub fn registry_from(hubs: Vec<Hub>, cities: BTreeMap<String, Vec<City>>) -> Registry {
    Registry::new(hubs, cities).unwrap_or_else(|e| panic!("invalid test registry: {e}"))
}

/// City lists for [`sample_registry`].
pub fn sample_cities() -> BTreeMap<String, Vec<City>> {
    let mut cities = BTreeMap::new();
    cities.insert(
        "sample-hub".to_string(),
        vec![
            city("A Town", "a-town"),
            city("B Town", "b-town"),
            city("C Town", "c-town"),
        ],
    );
    cities.insert("other-hub".to_string(), vec![city("Other Town", "other-town")]);
    cities
}

/// Two hubs:
/// - `sample-hub` ("Sample"), city pages not indexed, cities a/b/c-town
/// - `other-hub` ("Other"), city pages indexed, city other-town
pub fn sample_registry() -> Registry {
    registry_from(
        vec![
            hub_named("Sample", "sample-hub", false),
            hub_named("Other", "other-hub", true),
        ],
        sample_cities(),
    )
}

/// Just `sample-hub` and its three cities.
pub fn single_hub_registry() -> Registry {
    let mut cities = sample_cities();
    cities.remove("other-hub");
    registry_from(vec![hub_named("Sample", "sample-hub", false)], cities)
}

/// `n` entries: `/images/photo-{i}.avif`, alt `Photo {i}`.
pub fn sample_images(n: usize) -> Vec<ImageEntry> {
    (0..n)
        .map(|i| ImageEntry {
            src: format!("/images/photo-{i}.avif"),
            alt_base: format!("Photo {i}"),
        })
        .collect()
}

/// Five images with `sample-hub` pinned to index 2.
pub fn sample_pool() -> ImagePool {
    let mut overrides = BTreeMap::new();
    overrides.insert("sample-hub".to_string(), 2);
    ImagePool::new(sample_images(5), overrides).unwrap()
}

// =========================================================================
// Lookups: panic with the available keys on a miss
// =========================================================================

/// Find a manifest page by path. Panics if not found.
pub fn find_page<'a>(manifest: &'a PageManifest, path: &str) -> &'a LocationPage {
    manifest
        .pages
        .iter()
        .find(|p| p.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = manifest.pages.iter().map(|p| p.path.as_str()).collect();
            panic!("page '{path}' not found. Available: {paths:?}")
        })
}

/// All sitemap `loc` values in order.
pub fn sitemap_locs(entries: &[SitemapEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.loc.as_str()).collect()
}
