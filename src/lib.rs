//! # Service Areas
//!
//! The data and rules behind the service-area section of a mobile DJ website:
//! a registry of hub cities and the towns around them, deterministic photo
//! assignment for every location page, the page list with its indexing
//! policy, and the sitemap that matches it.
//!
//! # Architecture
//!
//! ```text
//! 1. Load    site/ or built-in data  →  Site     (config, registry, image pool)
//! 2. Pages   Site  →  dist/pages.json              (one entry per location page)
//! 3. Sitemap Site  →  dist/sitemap.xml, robots.txt
//! ```
//!
//! Every stage is a pure function of the loaded data. Two builds from the same
//! inputs produce byte-identical output: photo choice depends only on the page
//! slug, and enumeration follows registry declaration order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geo`] | Hub and city registry: lookups and slug listings |
//! | [`hash`] | djb2 slug hash used for photo selection |
//! | [`images`] | Photo pool, manual overrides, slug → photo resolution |
//! | [`pages`] | Page enumeration, indexing policy, page manifest |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` rendering |
//! | [`slug`] | Slug derivation and validation |
//! | [`config`] | `config.toml` loading, merging onto defaults, validation |
//! | [`contact`] | Booking inquiry validation and notification bodies |
//! | [`site`] | Site directory loading and build artifacts |
//! | [`types`] | Small shared types (`ChangeFrequency`, `Robots`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Hub Pages Indexed, City Pages Opt-In
//!
//! Each hub is a real market with its own copy. City pages are generated for
//! every town in a hub's list but stay `noindex` until the hub sets
//! `index_city_pages = true`. The sitemap applies the same flag, so the URL
//! set a crawler sees always matches the robots directives on the pages.
//!
//! ## Hash-Based Photos With Overrides
//!
//! A city page's photo is picked by hashing `{hub}/{city}` into the pool. The
//! result is stable across builds and needs no bookkeeping as towns are added.
//! Hubs are usually pinned to a hand-picked photo in `images.toml`.
//!
//! ## Built-In Data
//!
//! The production registry and pool are compiled in with `include_str!`, so
//! the binary works with no site directory at all. A site directory replaces
//! them file by file.

pub mod config;
pub mod contact;
pub mod geo;
pub mod hash;
pub mod images;
pub mod output;
pub mod pages;
pub mod site;
pub mod sitemap;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
