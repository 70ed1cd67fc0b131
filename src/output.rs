//! CLI output formatting.
//!
//! Every command's report is built by a pure `format_*` function returning
//! lines, and printed by a thin `print_*` wrapper. Tests assert on the lines.
//!
//! Entities follow the same two-level shape everywhere: a header line with a
//! positional index and a title, then indented context lines.
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Hero (1 image)
//!     Marquee: 7 phrases
//! 003 Services (9 services)
//!     001 Social Media Management → #service-social-media-management
//!     002 Content Creation → #photo-video-examples
//! 004 Showcase (9 items)
//!     ≥768px: 3 per page, 3 pages
//!
//! Config
//!     Base: /
//!     Assets: content/public
//!
//! Missing assets (1)
//!     /portfolio/Vitalik/N1.jpg
//!         Expected: content/public/portfolio/Vitalik/N1.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! index.html
//!     Showcase: 9 slides, 3 layouts
//!     Services: 8 panels, 1 link
//! site.json
//!     64 assets
//! Assets: 3 copied, 61 unchanged (64 total)
//! ```

use crate::assets::BasePrefix;
use crate::content::PortfolioContent;
use crate::generate::{self, SiteSummary};
use crate::pager::Pager;
use crate::publish::{CopyStats, MissingAsset};
use crate::selection::BodyOverflow;
use crate::session::PageSession;
use crate::viewport::BREAKPOINTS;
use std::path::Path;

/// Zero-padded positional index: `1` → `001`.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Four spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

fn section_header(index: usize, title: &str, detail: Option<String>) -> String {
    match detail {
        Some(detail) => format!("{} {} ({})", format_index(index), title, detail),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Inventory of the page content, the effective config and any missing files.
pub fn format_check_output(
    content: &PortfolioContent,
    base: &BasePrefix,
    assets_root: &Path,
    missing: &[MissingAsset],
) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    lines.push(section_header(1, "Hero", Some(plural(1, "image", "images"))));
    lines.push(format!(
        "{}Marquee: {}",
        indent(1),
        plural(
            generate::marquee_phrases(&content.hero.marquee).len(),
            "phrase",
            "phrases"
        )
    ));

    let about = &content.about;
    lines.push(section_header(
        2,
        "About",
        Some(format!(
            "{}, {}",
            plural(about.media.len(), "medium", "media"),
            plural(about.milestones.len(), "milestone", "milestones")
        )),
    ));

    let services = &content.services.entries;
    lines.push(section_header(
        3,
        "Services",
        Some(plural(services.len(), "service", "services")),
    ));
    for (i, service) in services.iter().enumerate() {
        let target = match &service.link {
            Some(link) => link.clone(),
            None => format!("#{}", service.anchor()),
        };
        lines.push(format!(
            "{}{} {} → {}",
            indent(1),
            format_index(i + 1),
            service.title,
            target
        ));
        if !service.examples.is_empty() {
            lines.push(format!(
                "{}{}",
                indent(2),
                plural(service.examples.len(), "example", "examples")
            ));
        }
    }

    let items = content.showcase.items.len();
    lines.push(section_header(
        4,
        "Showcase",
        Some(plural(items, "item", "items")),
    ));
    for bp in BREAKPOINTS {
        let pages = Pager::new(items, bp.page_size).page_count();
        lines.push(format!(
            "{}≥{}px: {} per page, {}",
            indent(1),
            bp.min_width,
            bp.page_size,
            plural(pages, "page", "pages")
        ));
    }

    let gallery = &content.gallery;
    lines.push(section_header(
        5,
        "Gallery",
        Some(format!(
            "{}, {}",
            plural(gallery.images.len(), "image", "images"),
            plural(gallery.logos.len(), "logo", "logos")
        )),
    ));

    let highlights = &content.highlights;
    lines.push(section_header(
        6,
        "Highlights",
        Some(format!(
            "{}, {}",
            plural(highlights.logos.len(), "logo", "logos"),
            plural(highlights.pairs.len(), "pair", "pairs")
        )),
    ));

    lines.push(section_header(7, "Contact", None));
    lines.push(format!("{}Email: {}", indent(1), content.contact.email));
    if let Some(instagram) = &content.contact.instagram {
        lines.push(format!("{}Instagram: {}", indent(1), instagram));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!("{}Base: {}", indent(1), base));
    lines.push(format!("{}Assets: {}", indent(1), assets_root.display()));

    if !missing.is_empty() {
        lines.push(String::new());
        lines.push(format!("Missing assets ({})", missing.len()));
        for asset in missing {
            lines.push(format!("{}{}", indent(1), asset.logical_path));
            lines.push(format!(
                "{}Expected: {}",
                indent(2),
                asset.expected_at.display()
            ));
        }
    }

    lines
}

pub fn print_check_output(
    content: &PortfolioContent,
    base: &BasePrefix,
    assets_root: &Path,
    missing: &[MissingAsset],
) {
    for line in format_check_output(content, base, assets_root, missing) {
        println!("{}", line);
    }
}

/// What a build wrote.
pub fn format_build_output(summary: &SiteSummary, stats: &CopyStats) -> Vec<String> {
    let showcase = &summary.showcase;
    let panels = summary.services.iter().filter(|s| s.opens_panel).count();
    let links = summary.services.len() - panels;

    vec![
        "index.html".to_string(),
        format!(
            "{}Showcase: {}, {}",
            indent(1),
            plural(showcase.slides, "slide", "slides"),
            plural(showcase.layouts.len(), "layout", "layouts")
        ),
        format!(
            "{}Services: {}, {}",
            indent(1),
            plural(panels, "panel", "panels"),
            plural(links, "link", "links")
        ),
        format!(
            "{}Before/After: {}",
            indent(1),
            plural(summary.before_after_pairs, "pair", "pairs")
        ),
        "site.json".to_string(),
        format!(
            "{}{}",
            indent(1),
            plural(summary.assets.len(), "asset", "assets")
        ),
        format!("Assets: {}", stats),
    ]
}

pub fn print_build_output(summary: &SiteSummary, stats: &CopyStats) {
    for line in format_build_output(summary, stats) {
        println!("{}", line);
    }
}

/// Snapshot of a live session after replaying events.
pub fn format_session(session: &PageSession<BodyOverflow>) -> Vec<String> {
    let width = match session.viewport().width() {
        Some(width) => format!("{width}px"),
        None => "unmeasured".to_string(),
    };
    let showcase = session.showcase();
    let window = if showcase.is_empty() {
        "empty".to_string()
    } else {
        let range = showcase.visible_range();
        let page = match showcase.current_page() {
            Some(page) => format!("page {} of {}", page + 1, showcase.page_count()),
            None => "between pages".to_string(),
        };
        format!(
            "index {}, {} (items {}–{})",
            showcase.index(),
            page,
            range.start + 1,
            range.end
        )
    };
    let pairs = session.pairs();
    let pair = if pairs.is_empty() {
        "none".to_string()
    } else {
        format!("pair {} of {}", pairs.index() + 1, pairs.len())
    };
    let menu = if session.menu_open() { "open" } else { "closed" };

    vec![
        format!(
            "Viewport: {} → {} per page",
            width,
            session.page_size()
        ),
        format!("Showcase: {}", window),
        format!("Before/After: {}", pair),
        format!(
            "Service panel: {}",
            session.open_service().unwrap_or("closed")
        ),
        format!(
            "Menu: {} (body overflow: {})",
            menu,
            session.scroll_lock().css_value()
        ),
        format!("Location: {}", session.location().unwrap_or("#top")),
    ]
}

pub fn print_session(session: &PageSession<BodyOverflow>) {
    for line in format_session(session) {
        println!("{}", line);
    }
}
