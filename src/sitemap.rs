//! `sitemap.xml` and `robots.txt` generation.
//!
//! The sitemap lists, in order:
//!
//! 1. the static pages from `[sitemap.static_pages]`,
//! 2. the service-area index,
//! 3. each hub page, immediately followed by its city pages when the hub has
//!    `index_city_pages = true`.
//!
//! City pages of hubs that keep them out of the index are still generated,
//! they just carry `noindex` and are left out of the sitemap, so the URL set
//! matches the indexing policy in [`pages`](crate::pages).
//!
//! XML is rendered with maud, which escapes interpolated text the same way
//! for XML as for HTML.

use crate::config::SiteConfig;
use crate::geo::Registry;
use crate::pages::{SECTION_PATH, city_path, city_robots, hub_path, hub_robots};
use crate::types::ChangeFrequency;
use maud::{Markup, PreEscaped, html};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

/// Counts per section, for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SitemapSummary {
    pub static_pages: usize,
    pub hubs: usize,
    pub cities: usize,
}

impl SitemapSummary {
    pub fn total(&self) -> usize {
        // +1 for the service-area index
        self.static_pages + 1 + self.hubs + self.cities
    }
}

/// Build the sitemap entries for the site.
pub fn sitemap_entries(config: &SiteConfig, registry: &Registry) -> Vec<SitemapEntry> {
    let sitemap = &config.sitemap;
    let mut entries: Vec<SitemapEntry> = sitemap
        .static_pages
        .iter()
        .map(|page| SitemapEntry {
            loc: config.url_for(&page.path),
            change_frequency: page.change_frequency,
            priority: page.priority,
        })
        .collect();

    entries.push(SitemapEntry {
        loc: config.url_for(SECTION_PATH),
        change_frequency: sitemap.change_frequency,
        priority: sitemap.index_priority,
    });

    for hub in registry.hubs() {
        if hub_robots(hub).index {
            entries.push(SitemapEntry {
                loc: config.url_for(&hub_path(&hub.slug)),
                change_frequency: sitemap.change_frequency,
                priority: sitemap.hub_priority,
            });
        }
        if !city_robots(hub).index {
            continue;
        }
        for city in registry.cities_by_hub(&hub.slug) {
            entries.push(SitemapEntry {
                loc: config.url_for(&city_path(&hub.slug, &city.slug)),
                change_frequency: sitemap.change_frequency,
                priority: sitemap.city_priority,
            });
        }
    }

    entries
}

/// Section counts matching [`sitemap_entries`].
pub fn summarize(config: &SiteConfig, registry: &Registry) -> SitemapSummary {
    SitemapSummary {
        static_pages: config.sitemap.static_pages.len(),
        hubs: registry.hubs().iter().filter(|h| hub_robots(h).index).count(),
        cities: registry
            .hubs()
            .iter()
            .filter(|h| city_robots(h).index)
            .map(|h| registry.cities_by_hub(&h.slug).len())
            .sum(),
    }
}

fn format_priority(priority: f64) -> String {
    format!("{priority:.1}")
}

fn render_urlset(entries: &[SitemapEntry]) -> Markup {
    html! {
        urlset xmlns=(SITEMAP_NS) {
            @for entry in entries {
                url {
                    loc { (entry.loc) }
                    changefreq { (entry.change_frequency.as_str()) }
                    priority { (format_priority(entry.priority)) }
                }
            }
        }
    }
}

/// Render `sitemap.xml`.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let doc = html! {
        (PreEscaped(XML_DECLARATION))
        "\n"
        (render_urlset(entries))
        "\n"
    };
    doc.into_string()
}

/// Render `robots.txt`: allow everything and point crawlers at the sitemap.
pub fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\nHost: {}\n",
        config.url_for("/sitemap.xml"),
        config.site_url()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn entries_follow_per_hub_flag() {
        let config = SiteConfig::default();
        let registry = sample_registry();
        let entries = sitemap_entries(&config, &registry);
        let locs = sitemap_locs(&entries);

        let base = "https://djmilesmorales.com";
        let mut expected: Vec<String> = ["", "/about", "/music", "/epk", "/pricing", "/contact"]
            .iter()
            .map(|p| format!("{base}{p}"))
            .collect();
        expected.extend([
            format!("{base}/service-areas"),
            format!("{base}/service-areas/sample-hub"),
            format!("{base}/service-areas/other-hub"),
            format!("{base}/service-areas/other-hub/other-town"),
        ]);
        assert_eq!(locs, expected);
    }

    #[test]
    fn builtin_sitemap_has_no_city_pages() {
        let config = SiteConfig::default();
        let registry = Registry::builtin().unwrap();
        let entries = sitemap_entries(&config, &registry);
        // 6 static + index + 5 hubs
        assert_eq!(entries.len(), 12);
        assert!(entries.iter().all(|e| e.loc.matches('/').count() <= 4));
    }

    #[test]
    fn enabling_a_hub_adds_exactly_its_cities() {
        let config = SiteConfig::default();
        let mut hubs = sample_registry().hubs().to_vec();
        hubs[0].index_city_pages = true;
        let registry = registry_from(hubs, sample_cities());
        let entries = sitemap_entries(&config, &registry);
        let city_locs: Vec<&str> = sitemap_locs(&entries)
            .into_iter()
            .filter(|l| l.contains("/service-areas/sample-hub/"))
            .collect();
        assert_eq!(city_locs.len(), 3);
        assert!(city_locs[0].ends_with("/a-town"));
    }

    #[test]
    fn priorities_and_frequencies_from_config() {
        let config = SiteConfig::default();
        let entries = sitemap_entries(&config, &sample_registry());
        let home = &entries[0];
        assert_eq!(home.change_frequency, ChangeFrequency::Weekly);
        assert_eq!(home.priority, 1.0);

        let hub = entries
            .iter()
            .find(|e| e.loc.ends_with("/service-areas/sample-hub"))
            .unwrap();
        assert_eq!(hub.priority, 0.9);
        assert_eq!(hub.change_frequency, ChangeFrequency::Monthly);

        let city = entries.iter().find(|e| e.loc.ends_with("/other-town")).unwrap();
        assert_eq!(city.priority, 0.7);
    }

    #[test]
    fn summary_matches_entries() {
        let config = SiteConfig::default();
        let registry = sample_registry();
        let summary = summarize(&config, &registry);
        assert_eq!(
            summary,
            SitemapSummary {
                static_pages: 6,
                hubs: 2,
                cities: 1,
            }
        );
        assert_eq!(summary.total(), sitemap_entries(&config, &registry).len());
    }

    #[test]
    fn render_sitemap_document() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/service-areas".to_string(),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.8,
        }];
        let xml = render_sitemap(&entries);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.com/service-areas</loc>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn render_sitemap_formats_whole_priorities() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com".to_string(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        }];
        assert!(render_sitemap(&entries).contains("<priority>1.0</priority>"));
    }

    #[test]
    fn render_sitemap_escapes_loc() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/?a=1&b=2".to_string(),
            change_frequency: ChangeFrequency::Never,
            priority: 0.1,
        }];
        let xml = render_sitemap(&entries);
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let mut config = SiteConfig::default();
        config.base_url = "https://example.com/".to_string();
        assert_eq!(
            render_robots(&config),
            "User-agent: *\nAllow: /\n\nSitemap: https://example.com/sitemap.xml\nHost: https://example.com\n"
        );
    }
}
