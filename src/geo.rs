//! Service area registry: hubs and the cities around them.
//!
//! A **hub** is a primary anchor location (a metro the business is based in or
//! travels to regularly). Each hub owns an ordered list of **cities**, the
//! nearby communities that get their own landing page. Cities belong to
//! exactly one hub by containment; there is no back-reference.
//!
//! The registry is loaded once, validated, and then only read. All lookups
//! return `Option` so callers have to handle the "no such page" case, which
//! the page renderer turns into a 404.
//!
//! ## Data file
//!
//! ```toml
//! [[hubs]]
//! name = "Chambersburg"
//! state = "PA"
//! slug = "chambersburg-pa"
//! latitude = 39.9376
//! longitude = -77.6611
//! intro_copy = "Based in Chambersburg, PA, ..."
//! index_city_pages = false   # optional, default false
//!
//! [hubs.notes]               # optional, presentation only
//! travel = "..."
//!
//! [cities]
//! chambersburg-pa = [
//!     { name = "Waynesboro", state = "PA", slug = "waynesboro-pa" },
//! ]
//! ```
//!
//! The built-in registry is compiled in from `data/service-areas.toml`. A site
//! directory can ship its own `service-areas.toml`, which replaces it.

use crate::slug::{is_valid_slug, location_slug};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of a site-provided registry.
pub const REGISTRY_FILENAME: &str = "service-areas.toml";

const BUILTIN_REGISTRY: &str = include_str!("../data/service-areas.toml");

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("registry has no hubs")]
    NoHubs,
    #[error("invalid slug {0:?}")]
    InvalidSlug(String),
    #[error("duplicate hub slug {0:?}")]
    DuplicateHub(String),
    #[error("duplicate city slug {city:?} in hub {hub:?}")]
    DuplicateCity { hub: String, city: String },
    #[error("cities listed for unknown hub {0:?}")]
    UnknownHub(String),
}

/// A primary service-area anchor location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hub {
    pub name: String,
    /// Two-letter state or district code, e.g. `PA`, `DC`.
    pub state: String,
    pub slug: String,
    pub latitude: f64,
    pub longitude: f64,
    pub intro_copy: String,
    /// Whether this hub's city pages may be indexed by search engines.
    #[serde(default)]
    pub index_city_pages: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<HubNotes>,
}

impl Hub {
    /// Display label, e.g. `Chambersburg, PA`.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}

/// Free-text notes shown on a hub page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
}

/// A community served from a hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct City {
    pub name: String,
    pub state: String,
    pub slug: String,
}

impl City {
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}

/// On-disk shape of the registry file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    hubs: Vec<Hub>,
    #[serde(default)]
    cities: BTreeMap<String, Vec<City>>,
}

/// Validated, read-only hub/city registry.
#[derive(Debug, Clone)]
pub struct Registry {
    hubs: Vec<Hub>,
    cities: BTreeMap<String, Vec<City>>,
}

impl Registry {
    /// Build a registry from hubs (in declaration order) and their city lists.
    ///
    /// Rejects an empty hub list, malformed or duplicate slugs, and city lists
    /// keyed by a hub that does not exist. Hubs without an entry in `cities`
    /// simply have no city pages.
    pub fn new(hubs: Vec<Hub>, cities: BTreeMap<String, Vec<City>>) -> Result<Self, GeoError> {
        if hubs.is_empty() {
            return Err(GeoError::NoHubs);
        }

        let mut hub_slugs = HashSet::new();
        for hub in &hubs {
            if !is_valid_slug(&hub.slug) {
                return Err(GeoError::InvalidSlug(hub.slug.clone()));
            }
            if !hub_slugs.insert(hub.slug.as_str()) {
                return Err(GeoError::DuplicateHub(hub.slug.clone()));
            }
        }

        for (hub_slug, list) in &cities {
            if !hub_slugs.contains(hub_slug.as_str()) {
                return Err(GeoError::UnknownHub(hub_slug.clone()));
            }
            let mut city_slugs = HashSet::new();
            for city in list {
                if !is_valid_slug(&city.slug) {
                    return Err(GeoError::InvalidSlug(city.slug.clone()));
                }
                if !city_slugs.insert(city.slug.as_str()) {
                    return Err(GeoError::DuplicateCity {
                        hub: hub_slug.clone(),
                        city: city.slug.clone(),
                    });
                }
            }
        }

        Ok(Self { hubs, cities })
    }

    /// Parse and validate a registry from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, GeoError> {
        let file: RegistryFile = toml::from_str(content)?;
        Self::new(file.hubs, file.cities)
    }

    /// The registry compiled into the binary.
    pub fn builtin() -> Result<Self, GeoError> {
        Self::from_toml(BUILTIN_REGISTRY)
    }

    /// Load `service-areas.toml` from a site directory, falling back to the
    /// built-in registry when the file does not exist.
    pub fn load(site_dir: &Path) -> Result<Self, GeoError> {
        let path = site_dir.join(REGISTRY_FILENAME);
        if !path.exists() {
            return Self::builtin();
        }
        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// All hubs in declaration order.
    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn hub_by_slug(&self, slug: &str) -> Option<&Hub> {
        self.hubs.iter().find(|hub| hub.slug == slug)
    }

    /// Cities served from `hub_slug`, in declaration order. Empty for unknown hubs.
    pub fn cities_by_hub(&self, hub_slug: &str) -> &[City] {
        self.cities.get(hub_slug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a city within one hub's list only.
    ///
    /// An unknown hub and an unknown city both give `None`.
    pub fn city_by_slug(&self, hub_slug: &str, city_slug: &str) -> Option<&City> {
        self.cities_by_hub(hub_slug)
            .iter()
            .find(|city| city.slug == city_slug)
    }

    pub fn all_hub_slugs(&self) -> Vec<&str> {
        self.hubs.iter().map(|hub| hub.slug.as_str()).collect()
    }

    pub fn all_city_slugs_for_hub(&self, hub_slug: &str) -> Vec<&str> {
        self.cities_by_hub(hub_slug)
            .iter()
            .map(|city| city.slug.as_str())
            .collect()
    }

    /// Total number of city pages across all hubs.
    pub fn city_count(&self) -> usize {
        self.hubs
            .iter()
            .map(|hub| self.cities_by_hub(&hub.slug).len())
            .sum()
    }

    /// Hub and city slugs that differ from [`location_slug`] of their name
    /// and state, as `hub` or `hub/city`.
    pub fn nonstandard_slugs(&self) -> Vec<String> {
        let mut found = Vec::new();
        for hub in &self.hubs {
            if hub.slug != location_slug(&hub.name, &hub.state) {
                found.push(hub.slug.clone());
            }
            for city in self.cities_by_hub(&hub.slug) {
                if city.slug != location_slug(&city.name, &city.state) {
                    found.push(format!("{}/{}", hub.slug, city.slug));
                }
            }
        }
        found
    }
}
