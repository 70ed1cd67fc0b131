//! Anchor ids derived from display titles.
//!
//! Service panels, carousel slides and before/after pairs are all addressed by
//! fragment (`#service-branding-storytelling`, `#showcase-6`). Ids are built
//! here so every renderer and every link agrees on the spelling.
//!
//! ## Slugs
//!
//! - ASCII letters and digits are kept, lowercased
//! - every other run of characters becomes a single `-`
//! - leading and trailing dashes are dropped
//!
//! `"Branding & Storytelling"` → `branding-storytelling`,
//! `"Campaigns & Partnerships"` → `campaigns-partnerships`.

/// Slug for a display title. Empty when the title has no ASCII alphanumerics.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Fragment id of a service detail panel.
pub fn service_anchor(title: &str) -> String {
    format!("service-{}", slugify(title))
}

/// Fragment id of the carousel slide starting at `index`. The id is the same
/// at every page size.
pub fn slide_anchor(carousel: &str, index: usize) -> String {
    format!("{carousel}-{index}")
}

/// Fragment id of one before/after pair.
pub fn pair_anchor(index: usize) -> String {
    format!("pair-{index}")
}
