//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the production site; a `config.toml` in the site directory overrides only
//! the keys it names.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml            # Site config (overrides stock defaults)
//! ├── service-areas.toml     # Optional hub/city registry (replaces built-in)
//! └── images.toml            # Optional image pool (replaces built-in)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://djmilesmorales.com"
//! site_name = "DJ Miles Morales"
//! service_radius_miles = 20
//!
//! [sitemap]
//! change_frequency = "monthly"  # Location pages
//! index_priority = 0.8          # /service-areas
//! hub_priority = 0.9
//! city_priority = 0.7
//!
//! [[sitemap.static_pages]]
//! path = "/"
//! change_frequency = "weekly"
//! priority = 1.0
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Setting `sitemap.static_pages` replaces the whole default list.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::ChangeFrequency;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the site config within the site directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the production site. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical origin, e.g. `https://djmilesmorales.com`.
    pub base_url: String,
    /// Brand name appended to page titles.
    pub site_name: String,
    /// Travel radius quoted in page descriptions.
    pub service_radius_miles: u32,
    /// Sitemap priorities and the static (non-location) pages.
    pub sitemap: SitemapConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://djmilesmorales.com".to_string(),
            site_name: "DJ Miles Morales".to_string(),
            service_radius_miles: 20,
            sitemap: SitemapConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation("site_name must not be empty".into()));
        }
        if self.service_radius_miles == 0 {
            return Err(ConfigError::Validation(
                "service_radius_miles must be non-zero".into(),
            ));
        }
        let priorities = [
            ("sitemap.index_priority", self.sitemap.index_priority),
            ("sitemap.hub_priority", self.sitemap.hub_priority),
            ("sitemap.city_priority", self.sitemap.city_priority),
        ];
        for (key, value) in priorities {
            check_priority(key, value)?;
        }
        for page in &self.sitemap.static_pages {
            if !page.path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sitemap.static_pages path {:?} must start with /",
                    page.path
                )));
            }
            check_priority("sitemap.static_pages priority", page.priority)?;
        }
        Ok(())
    }

    /// `base_url` without a trailing slash.
    pub fn site_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for a site path. The root path maps to the bare origin.
    pub fn url_for(&self, path: &str) -> String {
        if path == "/" {
            self.site_url().to_string()
        } else {
            format!("{}{}", self.site_url(), path)
        }
    }
}

fn check_priority(key: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Validation(format!("{key} must be 0.0-1.0")));
    }
    Ok(())
}

/// Sitemap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Change frequency for the service-area index, hub and city pages.
    pub change_frequency: ChangeFrequency,
    pub index_priority: f64,
    pub hub_priority: f64,
    pub city_priority: f64,
    /// Non-location pages listed ahead of the location pages.
    pub static_pages: Vec<StaticPage>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            change_frequency: ChangeFrequency::Monthly,
            index_priority: 0.8,
            hub_priority: 0.9,
            city_priority: 0.7,
            static_pages: default_static_pages(),
        }
    }
}

/// A hand-written page that belongs in the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    pub path: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

fn default_static_pages() -> Vec<StaticPage> {
    let page = |path: &str, change_frequency, priority| StaticPage {
        path: path.to_string(),
        change_frequency,
        priority,
    };
    vec![
        page("/", ChangeFrequency::Weekly, 1.0),
        page("/about", ChangeFrequency::Monthly, 0.7),
        page("/music", ChangeFrequency::Monthly, 0.8),
        page("/epk", ChangeFrequency::Monthly, 0.8),
        page("/pricing", ChangeFrequency::Monthly, 0.9),
        page("/contact", ChangeFrequency::Monthly, 0.7),
    ]
}

/// Worker pool settings for page resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Upper bound on rayon workers. `None` uses every core.
    pub max_processes: Option<usize>,
}

/// Worker count for the rayon pool: the configured limit, kept within
/// `1..=cores`.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    match config.max_processes {
        Some(limit) => limit.clamp(1, cores),
        None => cores,
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parse `config.toml` text layered over the stock defaults, then validate.
///
/// Tables are merged key by key. Any other value, arrays included, replaces
/// the default outright, so a user `[[sitemap.static_pages]]` list stands on
/// its own.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let user: toml::Table = toml::from_str(content)?;
    let mut layered = toml::Value::try_from(SiteConfig::default())?;
    if let toml::Value::Table(defaults) = &mut layered {
        overlay(defaults, user);
    }
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

fn overlay(target: &mut toml::Table, user: toml::Table) {
    for (key, value) in user {
        match value {
            toml::Value::Table(nested) => match target.get_mut(&key) {
                Some(toml::Value::Table(existing)) => overlay(existing, nested),
                _ => {
                    target.insert(key, toml::Value::Table(nested));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Load `config.toml` from the site directory. No file means stock defaults.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(path)?)
}

/// Documented `config.toml` printed by `gen-config`. Every value is a default.
pub fn stock_config_toml() -> &'static str {
    r##"# config.toml for service-areas
#
# Place this file in the site directory (--source, default ./site).
# Every key is optional; a key you leave out keeps the value shown here.
# Misspelled keys are rejected when the site is loaded.

# Canonical origin for every URL in the sitemap, robots.txt and page manifest.
base_url = "https://djmilesmorales.com"

# Brand name appended to page titles ("DJ Services in Towson, MD | ...").
site_name = "DJ Miles Morales"

# Travel radius quoted in hub and city page descriptions.
service_radius_miles = 20

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# Change frequency for the service-area index, hub and city pages.
change_frequency = "monthly"

# Priority of /service-areas.
index_priority = 0.8

# Priority of /service-areas/{hub}.
hub_priority = 0.9

# Priority of /service-areas/{hub}/{city}. City pages are only listed for
# hubs with index_city_pages = true.
city_priority = 0.7

# Hand-written pages listed ahead of the location pages.
# Defining any [[sitemap.static_pages]] replaces this whole list.
[[sitemap.static_pages]]
path = "/"
change_frequency = "weekly"
priority = 1.0

[[sitemap.static_pages]]
path = "/about"
change_frequency = "monthly"
priority = 0.7

[[sitemap.static_pages]]
path = "/music"
change_frequency = "monthly"
priority = 0.8

[[sitemap.static_pages]]
path = "/epk"
change_frequency = "monthly"
priority = 0.8

[[sitemap.static_pages]]
path = "/pricing"
change_frequency = "monthly"
priority = 0.9

[[sitemap.static_pages]]
path = "/contact"
change_frequency = "monthly"
priority = 0.7

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
