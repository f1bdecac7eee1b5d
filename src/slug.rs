//! Slug helpers for hub and city identifiers.
//!
//! Every location page is addressed by slugs: `/service-areas/{hub}/{city}`.
//! Slugs are lowercase ASCII words joined by single hyphens, and location
//! slugs carry the state code as their last word:
//! - `Chambersburg`, `PA` → `chambersburg-pa`
//! - `King of Prussia`, `PA` → `king-of-prussia-pa`
//! - `Havre de Grace`, `MD` → `havre-de-grace-md`

/// Convert display text into a URL slug.
///
/// Lowercases and trims, drops anything that is not an ASCII word character,
/// whitespace, or hyphen, then collapses runs of whitespace, underscores and
/// hyphens into one hyphen. Leading and trailing hyphens are removed.
///
/// - `"Upper St. Clair"` → `"upper-st-clair"`
/// - `"  Bel_Air  "` → `"bel-air"`
/// - `"--Mont  Alto--"` → `"mont-alto"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        }
    }
    slug
}

/// Build the slug for a hub or city from its name and state code.
pub fn location_slug(name: &str, state: &str) -> String {
    format!("{}-{}", slugify(name), state.to_lowercase())
}

/// Whether `s` is a well-formed slug: non-empty, lowercase ASCII letters and
/// digits, words separated by single hyphens.
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
