//! Stable photo assignment for location pages.
//!
//! Every location page shows one photo from a fixed pool. The photo is a pure
//! function of the page's slug, so a hub page and that hub's card on the
//! service-area index always agree, and rebuilding the site never reshuffles
//! photos.
//!
//! ## Resolution
//!
//! 1. Slugs in the override table get a hand-picked pool index, taken modulo
//!    the pool length so a shrunk pool can never index out of bounds.
//! 2. Every other slug is hashed with [`slug_hash`](crate::hash::slug_hash).
//!
//! Overrides exist so the handful of hub pages can be curated, while the
//! hundreds of city pages are spread across the pool by hash. Collisions
//! between unrelated slugs are expected.
//!
//! ## Slug conventions
//!
//! | Page | Slug passed to [`ImagePool::resolve`] |
//! |------|----------------------------------------|
//! | Service-area index | `service-areas` |
//! | Hub | `{hub}` |
//! | City | `{hub}/{city}` |

use crate::hash::slug_index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of a site-provided image pool.
pub const POOL_FILENAME: &str = "images.toml";

/// Slug used for the service-area index page.
pub const INDEX_SLUG: &str = "service-areas";

const BUILTIN_POOL: &str = include_str!("../data/images.toml");

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("image pool is empty")]
    Empty,
}

/// A candidate photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    pub src: String,
    /// Alt text without location, e.g. `DJ booth with sound system`.
    pub alt_base: String,
}

impl ImageEntry {
    /// Alt text for a page about `place`, e.g. `DJ mixing at event in Towson, MD`.
    pub fn alt_for(&self, place: &str) -> String {
        format!("{} in {}", self.alt_base, place)
    }

    /// Absolute URL for the photo; pool entries may be site-relative paths.
    pub fn absolute_src(&self, base_url: &str) -> String {
        if self.src.starts_with("http://") || self.src.starts_with("https://") {
            self.src.clone()
        } else {
            format!("{}{}", base_url.trim_end_matches('/'), self.src)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PoolFile {
    images: Vec<ImageEntry>,
    #[serde(default)]
    overrides: BTreeMap<String, usize>,
}

/// Non-empty image pool plus its override table.
#[derive(Debug, Clone)]
pub struct ImagePool {
    entries: Vec<ImageEntry>,
    overrides: BTreeMap<String, usize>,
}

impl ImagePool {
    /// Build a pool. An empty pool is a configuration error.
    pub fn new(
        entries: Vec<ImageEntry>,
        overrides: BTreeMap<String, usize>,
    ) -> Result<Self, PoolError> {
        if entries.is_empty() {
            return Err(PoolError::Empty);
        }
        Ok(Self { entries, overrides })
    }

    pub fn from_toml(content: &str) -> Result<Self, PoolError> {
        let file: PoolFile = toml::from_str(content)?;
        Self::new(file.images, file.overrides)
    }

    /// The pool compiled into the binary.
    pub fn builtin() -> Result<Self, PoolError> {
        Self::from_toml(BUILTIN_POOL)
    }

    /// Load `images.toml` from a site directory, falling back to the built-in
    /// pool when the file does not exist.
    pub fn load(site_dir: &Path) -> Result<Self, PoolError> {
        let path = site_dir.join(POOL_FILENAME);
        if !path.exists() {
            return Self::builtin();
        }
        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn overrides(&self) -> &BTreeMap<String, usize> {
        &self.overrides
    }

    /// Pool index assigned to `slug`.
    pub fn index_for(&self, slug: &str) -> usize {
        match self.overrides.get(slug) {
            Some(&index) => index % self.entries.len(),
            None => slug_index(slug, self.entries.len()),
        }
    }

    /// The photo assigned to `slug`. Defined for every string.
    pub fn resolve(&self, slug: &str) -> &ImageEntry {
        &self.entries[self.index_for(slug)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::slug_hash;
    use crate::test_helpers::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn builtin_pool_has_26_images_and_hub_overrides() {
        let pool = ImagePool::builtin().unwrap();
        assert_eq!(pool.len(), 26);
        assert_eq!(pool.overrides().get("chambersburg-pa"), Some(&0));
        assert_eq!(pool.overrides().get("pittsburgh-pa"), Some(&4));
    }

    #[test]
    fn override_wins_over_hash() {
        let pool = ImagePool::builtin().unwrap();
        // Hash alone would give 18.
        assert_eq!(slug_hash("chambersburg-pa") as usize % 26, 18);
        for _ in 0..1000 {
            assert_eq!(pool.index_for("chambersburg-pa"), 0);
            assert_eq!(pool.resolve("chambersburg-pa"), &pool.entries()[0]);
        }
    }

    #[test]
    fn every_override_resolves_to_its_index() {
        let pool = ImagePool::builtin().unwrap();
        for (slug, &index) in pool.overrides() {
            assert_eq!(pool.resolve(slug), &pool.entries()[index % pool.len()]);
        }
    }

    #[test]
    fn override_index_wraps_when_pool_shrinks() {
        let mut overrides = BTreeMap::new();
        overrides.insert("big-hub".to_string(), 7);
        let pool = ImagePool::new(sample_images(3), overrides).unwrap();
        assert_eq!(pool.index_for("big-hub"), 1);
    }

    #[test]
    fn non_override_slug_uses_hash() {
        let pool = ImagePool::builtin().unwrap();
        assert_eq!(pool.index_for("service-areas"), 25);
        assert_eq!(pool.index_for("chambersburg-pa/waynesboro-pa"), 16);
    }

    #[test]
    fn resolve_is_deterministic_across_instances() {
        let a = ImagePool::builtin().unwrap();
        let b = ImagePool::builtin().unwrap();
        let slugs = ["baltimore-md/towson-md", "service-areas", "x", "", "pittsburgh-pa"];
        let forward: Vec<_> = slugs.iter().map(|s| a.resolve(s).clone()).collect();
        let backward: Vec<_> = slugs.iter().rev().map(|s| b.resolve(s).clone()).collect();
        let backward: Vec<_> = backward.into_iter().rev().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn resolve_is_total() {
        let pool = ImagePool::builtin().unwrap();
        for slug in ["", " ", "🎧🎧", "ñandú/über", "<script>", "a/b/c/d", "\u{0}"] {
            assert!(pool.index_for(slug) < pool.len());
            let _ = pool.resolve(slug);
        }
    }

    #[test]
    fn hash_spreads_city_pages_across_pool() {
        let pool = ImagePool::builtin().unwrap();
        let registry = crate::geo::Registry::builtin().unwrap();
        let mut seen = HashSet::new();
        let mut sampled = 0;
        for hub in registry.hubs() {
            for city in registry.cities_by_hub(&hub.slug) {
                let slug = format!("{}/{}", hub.slug, city.slug);
                assert!(!pool.overrides().contains_key(&slug));
                seen.insert(pool.index_for(&slug));
                sampled += 1;
            }
        }
        assert!(sampled >= 100);
        assert!(seen.len() > 1);
    }

    #[test]
    fn empty_pool_rejected() {
        let result = ImagePool::new(vec![], BTreeMap::new());
        assert!(matches!(result, Err(PoolError::Empty)));
        assert!(matches!(
            ImagePool::from_toml("images = []"),
            Err(PoolError::Empty)
        ));
    }

    #[test]
    fn alt_and_absolute_src() {
        let entry = ImageEntry {
            src: "/images/booth.avif".to_string(),
            alt_base: "DJ booth".to_string(),
        };
        assert_eq!(entry.alt_for("Towson, MD"), "DJ booth in Towson, MD");
        assert_eq!(
            entry.absolute_src("https://example.com/"),
            "https://example.com/images/booth.avif"
        );

        let remote = ImageEntry {
            src: "https://cdn.example.com/a.avif".to_string(),
            alt_base: "x".to_string(),
        };
        assert_eq!(
            remote.absolute_src("https://example.com"),
            "https://cdn.example.com/a.avif"
        );
    }

    #[test]
    fn load_reads_site_pool() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(POOL_FILENAME),
            r#"
[[images]]
src = "/one.avif"
alt_base = "One"

[overrides]
sample-hub = 0
"#,
        )
        .unwrap();
        let pool = ImagePool::load(tmp.path()).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.resolve("anything").src, "/one.avif");
    }

    #[test]
    fn load_falls_back_to_builtin() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(ImagePool::load(tmp.path()).unwrap().len(), 26);
    }
}
