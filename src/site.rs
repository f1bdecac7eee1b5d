//! Site loading and build output.
//!
//! A site directory holds up to three optional files. Any that are missing
//! fall back to the built-in data compiled into the binary:
//!
//! ```text
//! site/
//! ├── config.toml          # SiteConfig overrides (merged onto defaults)
//! ├── service-areas.toml   # Hub and city registry (replaces built-in)
//! └── images.toml          # Photo pool and overrides (replaces built-in)
//! ```
//!
//! A build writes three artifacts to the output directory:
//!
//! ```text
//! dist/
//! ├── pages.json     # PageManifest for the renderer
//! ├── sitemap.xml
//! └── robots.txt
//! ```

use crate::config::{self, ConfigError, SiteConfig};
use crate::geo::{GeoError, Registry};
use crate::images::{ImagePool, PoolError};
use crate::pages::{self, PageError, PageManifest};
use crate::sitemap::{self, SitemapSummary};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PAGES_FILENAME: &str = "pages.json";
pub const SITEMAP_FILENAME: &str = "sitemap.xml";
pub const ROBOTS_FILENAME: &str = "robots.txt";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Registry error: {0}")]
    Geo(#[from] GeoError),
    #[error("Image pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

/// Everything loaded from a site directory.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub registry: Registry,
    pub pool: ImagePool,
}

impl Site {
    pub fn load(site_dir: &Path) -> Result<Self, BuildError> {
        Ok(Site {
            config: config::load_config(site_dir)?,
            registry: Registry::load(site_dir)?,
            pool: ImagePool::load(site_dir)?,
        })
    }

    pub fn manifest(&self) -> Result<PageManifest, PageError> {
        pages::build_manifest(&self.config, &self.registry, &self.pool)
    }

    pub fn sitemap_xml(&self) -> String {
        sitemap::render_sitemap(&sitemap::sitemap_entries(&self.config, &self.registry))
    }

    pub fn sitemap_summary(&self) -> SitemapSummary {
        sitemap::summarize(&self.config, &self.registry)
    }

    pub fn robots_txt(&self) -> String {
        sitemap::render_robots(&self.config)
    }
}

/// Write `pages.json`. Returns the written path.
pub fn write_pages(manifest: &PageManifest, output_dir: &Path) -> Result<PathBuf, BuildError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(PAGES_FILENAME);
    fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
    Ok(path)
}

/// Write `sitemap.xml` and `robots.txt`.
pub fn write_sitemap(site: &Site, output_dir: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(SITEMAP_FILENAME), site.sitemap_xml())?;
    fs::write(output_dir.join(ROBOTS_FILENAME), site.robots_txt())?;
    Ok(())
}

/// Full build: manifest, sitemap, robots.
pub fn build(site: &Site, output_dir: &Path) -> Result<PageManifest, BuildError> {
    let manifest = site.manifest()?;
    write_pages(&manifest, output_dir)?;
    write_sitemap(site, output_dir)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageKind;
    use tempfile::TempDir;

    #[test]
    fn empty_site_dir_uses_builtin_data() {
        let tmp = TempDir::new().unwrap();
        let site = Site::load(tmp.path()).unwrap();
        assert_eq!(site.registry.hubs().len(), 5);
        assert_eq!(site.registry.city_count(), 191);
        assert_eq!(site.pool.len(), 26);
        assert_eq!(site.config.site_name, "DJ Miles Morales");
    }

    #[test]
    fn invalid_config_fails_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "bogus_key = 1\n").unwrap();
        assert!(matches!(Site::load(tmp.path()), Err(BuildError::Config(_))));
    }

    #[test]
    fn invalid_registry_fails_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("service-areas.toml"), "hubs = []\n").unwrap();
        assert!(matches!(Site::load(tmp.path()), Err(BuildError::Geo(_))));
    }

    #[test]
    fn build_writes_all_artifacts() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let dist = out.path().join("dist");
        let site = Site::load(src.path()).unwrap();

        let manifest = build(&site, &dist).unwrap();
        assert_eq!(manifest.count(PageKind::City), 191);

        let json = fs::read_to_string(dist.join(PAGES_FILENAME)).unwrap();
        let parsed: PageManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pages.len(), 1 + 5 + 191);

        let xml = fs::read_to_string(dist.join(SITEMAP_FILENAME)).unwrap();
        assert_eq!(xml.matches("<url>").count(), site.sitemap_summary().total());

        let robots = fs::read_to_string(dist.join(ROBOTS_FILENAME)).unwrap();
        assert!(robots.contains("Sitemap: https://djmilesmorales.com/sitemap.xml"));
    }
}
