//! Location page enumeration and the page manifest.
//!
//! The service-area section of the site is generated, one page per hub and
//! one per (hub, city) pair:
//!
//! ```text
//! /service-areas                      # index, lists every hub
//! /service-areas/{hub}                # one per hub
//! /service-areas/{hub}/{city}         # one per city in that hub's list
//! ```
//!
//! The enumerators draw straight from the [`Registry`] collections, so every
//! pair they emit resolves through [`Registry::city_by_slug`]. Pairing is
//! per hub: a hub only pairs with its own cities.
//!
//! ## Indexing policy
//!
//! Hub pages are always indexable. A city page is indexable only when its
//! owning hub has `index_city_pages = true`. The flag is read from the hub
//! record on every call, never cached, so the answer always reflects the
//! registry being queried.
//!
//! ## Page manifest
//!
//! [`build_manifest`] resolves every page into a [`LocationPage`]: URL,
//! SEO title and description, robots directive, photo, and the inputs the
//! structured-data and rendering collaborators need. City pages are resolved
//! in parallel with rayon; the manifest keeps enumeration order.

use crate::config::SiteConfig;
use crate::geo::{City, Hub, Registry};
use crate::images::{INDEX_SLUG, ImagePool};
use crate::types::Robots;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root path of the service-area section.
pub const SECTION_PATH: &str = "/service-areas";

/// Titles longer than this fall back to the name without state.
const MAX_TITLE_CHARS: usize = 60;
/// Descriptions longer than this are cut to `MAX_DESCRIPTION_CHARS - 3` plus `...`.
const MAX_DESCRIPTION_CHARS: usize = 155;
/// City names listed as nearby on a city page.
const CITY_NEARBY_LIMIT: usize = 12;
/// City names listed as nearby on a hub page.
const HUB_NEARBY_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("no page for hub {hub:?} city {city:?}")]
    Unresolved { hub: String, city: String },
}

// ============================================================================
// Enumeration
// ============================================================================

/// One hub slug per hub page, in registry order.
pub fn enumerate_hub_pages(registry: &Registry) -> Vec<&str> {
    registry.all_hub_slugs()
}

/// Every `(hub, city)` pair, hub by hub, each hub's cities in list order.
pub fn enumerate_city_pages(registry: &Registry) -> Vec<(&str, &str)> {
    registry
        .hubs()
        .iter()
        .flat_map(|hub| {
            registry
                .cities_by_hub(&hub.slug)
                .iter()
                .map(move |city| (hub.slug.as_str(), city.slug.as_str()))
        })
        .collect()
}

/// Robots directive for a hub page.
pub fn hub_robots(_hub: &Hub) -> Robots {
    Robots::INDEX
}

/// Robots directive for any city page under `hub`.
pub fn city_robots(hub: &Hub) -> Robots {
    if hub.index_city_pages {
        Robots::INDEX
    } else {
        Robots::NOINDEX
    }
}

/// Whether `/service-areas/{hub}/{city}` may be indexed.
///
/// `None` when the pair does not name a page.
pub fn city_page_indexable(registry: &Registry, hub_slug: &str, city_slug: &str) -> Option<bool> {
    let hub = registry.hub_by_slug(hub_slug)?;
    registry.city_by_slug(hub_slug, city_slug)?;
    Some(city_robots(hub).index)
}

pub fn hub_path(hub_slug: &str) -> String {
    format!("{SECTION_PATH}/{hub_slug}")
}

pub fn city_path(hub_slug: &str, city_slug: &str) -> String {
    format!("{SECTION_PATH}/{hub_slug}/{city_slug}")
}

/// Slug used to pick a city page's photo.
pub fn city_image_slug(hub_slug: &str, city_slug: &str) -> String {
    format!("{hub_slug}/{city_slug}")
}

// ============================================================================
// Page manifest
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Index,
    Hub,
    City,
}

/// The photo chosen for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    /// Index into the image pool.
    pub pool_index: usize,
    pub src: String,
    pub alt: String,
}

/// One breadcrumb trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

/// Everything the rendering collaborator needs for one location page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPage {
    pub kind: PageKind,
    pub path: String,
    pub canonical_url: String,
    pub title: String,
    pub description: String,
    pub robots: Robots,
    pub image: PageImage,
    pub breadcrumbs: Vec<Crumb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<Hub>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    /// Nearby place names for `areaServed`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nearby: Vec<String>,
}

/// Output of the pages stage, written as `pages.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    pub site_name: String,
    pub base_url: String,
    pub pages: Vec<LocationPage>,
}

impl PageManifest {
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

/// `DJ Services in {Name}, {ST} | {site}`, or without the state when too long.
fn location_title(name: &str, state: &str, site_name: &str) -> String {
    let title = format!("DJ Services in {name}, {state} | {site_name}");
    if title.chars().count() <= MAX_TITLE_CHARS {
        title
    } else {
        format!("DJ Services in {name} | {site_name}")
    }
}

fn clamp_description(description: String) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description;
    }
    let cut: String = description
        .chars()
        .take(MAX_DESCRIPTION_CHARS - 3)
        .collect();
    format!("{cut}...")
}

fn section_crumbs(config: &SiteConfig) -> Vec<Crumb> {
    vec![
        Crumb {
            name: "Home".to_string(),
            url: config.url_for("/"),
        },
        Crumb {
            name: "Service Areas".to_string(),
            url: config.url_for(SECTION_PATH),
        },
    ]
}

/// The service-area index page.
pub fn index_page(config: &SiteConfig, registry: &Registry, pool: &ImagePool) -> LocationPage {
    let pool_index = pool.index_for(INDEX_SLUG);
    let entry = &pool.entries()[pool_index];
    let hub_names: Vec<&str> = registry.hubs().iter().map(|h| h.name.as_str()).collect();
    LocationPage {
        kind: PageKind::Index,
        path: SECTION_PATH.to_string(),
        canonical_url: config.url_for(SECTION_PATH),
        title: format!("Service Areas | {}", config.site_name),
        description: clamp_description(format!(
            "{} serves weddings, corporate events, and parties in {}, and surrounding areas.",
            config.site_name,
            hub_names.join(", ")
        )),
        robots: Robots::INDEX,
        image: PageImage {
            pool_index,
            src: entry.absolute_src(config.site_url()),
            alt: entry.alt_base.clone(),
        },
        breadcrumbs: section_crumbs(config),
        hub: None,
        city: None,
        nearby: Vec::new(),
    }
}

/// The page for one hub, or `None` if the slug names no hub.
pub fn hub_page(
    config: &SiteConfig,
    registry: &Registry,
    pool: &ImagePool,
    hub_slug: &str,
) -> Option<LocationPage> {
    let hub = registry.hub_by_slug(hub_slug)?;
    let path = hub_path(&hub.slug);
    let canonical_url = config.url_for(&path);
    let pool_index = pool.index_for(&hub.slug);
    let entry = &pool.entries()[pool_index];

    let mut breadcrumbs = section_crumbs(config);
    breadcrumbs.push(Crumb {
        name: hub.label(),
        url: canonical_url.clone(),
    });

    Some(LocationPage {
        kind: PageKind::Hub,
        title: location_title(&hub.name, &hub.state, &config.site_name),
        description: clamp_description(format!(
            "Professional DJ services for weddings, corporate events, and parties in {}, {} and surrounding areas within {} miles.",
            hub.name, hub.state, config.service_radius_miles
        )),
        robots: hub_robots(hub),
        image: PageImage {
            pool_index,
            src: entry.absolute_src(config.site_url()),
            alt: entry.alt_for(&hub.label()),
        },
        breadcrumbs,
        nearby: registry
            .cities_by_hub(&hub.slug)
            .iter()
            .take(HUB_NEARBY_LIMIT)
            .map(|c| c.name.clone())
            .collect(),
        hub: Some(hub.clone()),
        city: None,
        path,
        canonical_url,
    })
}

/// The page for one city, or `None` if the hub or the city is unknown.
pub fn city_page(
    config: &SiteConfig,
    registry: &Registry,
    pool: &ImagePool,
    hub_slug: &str,
    city_slug: &str,
) -> Option<LocationPage> {
    let hub = registry.hub_by_slug(hub_slug)?;
    let city = registry.city_by_slug(hub_slug, city_slug)?;
    let path = city_path(&hub.slug, &city.slug);
    let canonical_url = config.url_for(&path);
    let pool_index = pool.index_for(&city_image_slug(&hub.slug, &city.slug));
    let entry = &pool.entries()[pool_index];

    let mut breadcrumbs = section_crumbs(config);
    breadcrumbs.push(Crumb {
        name: hub.label(),
        url: config.url_for(&hub_path(&hub.slug)),
    });
    breadcrumbs.push(Crumb {
        name: city.label(),
        url: canonical_url.clone(),
    });

    Some(LocationPage {
        kind: PageKind::City,
        title: location_title(&city.name, &city.state, &config.site_name),
        description: clamp_description(format!(
            "Professional DJ services for weddings, corporate events, and parties in {}, {}. Serving within {} miles of {}.",
            city.name, city.state, config.service_radius_miles, hub.name
        )),
        robots: city_robots(hub),
        image: PageImage {
            pool_index,
            src: entry.absolute_src(config.site_url()),
            alt: entry.alt_for(&city.label()),
        },
        breadcrumbs,
        nearby: registry
            .cities_by_hub(&hub.slug)
            .iter()
            .filter(|c| c.slug != city.slug)
            .take(CITY_NEARBY_LIMIT)
            .map(|c| c.name.clone())
            .collect(),
        hub: Some(hub.clone()),
        city: Some(city.clone()),
        path,
        canonical_url,
    })
}

/// Resolve every location page: index, hubs, then cities.
pub fn build_manifest(
    config: &SiteConfig,
    registry: &Registry,
    pool: &ImagePool,
) -> Result<PageManifest, PageError> {
    let mut pages = vec![index_page(config, registry, pool)];

    for hub_slug in enumerate_hub_pages(registry) {
        // Hub slugs come from the registry itself.
        if let Some(page) = hub_page(config, registry, pool, hub_slug) {
            pages.push(page);
        }
    }

    let city_pages: Vec<LocationPage> = enumerate_city_pages(registry)
        .par_iter()
        .map(|&(hub, city)| {
            city_page(config, registry, pool, hub, city).ok_or_else(|| PageError::Unresolved {
                hub: hub.to_string(),
                city: city.to_string(),
            })
        })
        .collect::<Result<_, _>>()?;
    pages.extend(city_pages);

    Ok(PageManifest {
        site_name: config.site_name.clone(),
        base_url: config.site_url().to_string(),
        pages,
    })
}
