//! HTML generation.
//!
//! Renders the whole portfolio into one `index.html` plus a `site.json` build
//! summary. Every interactive state is compiled ahead of time into
//! fragment-addressable markup and selected with `:target`; no script is
//! needed to page or open anything.
//!
//! ## Compiled states
//!
//! - **Showcase carousel**: one slide per index, `#showcase-<index>`, the
//!   same at every page size. A slide holds the window for the widest page
//!   size; media queries built from [`viewport::BREAKPOINTS`] hide the items
//!   past the current page size. Each slide carries one set of arrows and page
//!   dots per breakpoint, linking to the index `next`/`prev`/`jump_to` would
//!   produce at that page size, and only the current breakpoint's set shows.
//!   Crossing a breakpoint keeps the targeted slide, so the index survives a
//!   resize exactly as in [`Pager::set_page_size`].
//! - **Before/after slider**: one slide per pair, linked the same way through
//!   [`PairSlider`].
//! - **Service panels**: one `:target` panel per service without a `link`.
//!   Linked services render as plain anchors to their target section.
//! - **Mobile menu**: a `:target` drawer at `#menu`.
//!
//! Because the document has a single target fragment, opening any panel or
//! following any nav link closes whatever was open before, which is the
//! single-choice rule [`Selection`](crate::selection::Selection) enforces in
//! a live session. Close controls point at [`CLOSED_FRAGMENT`], which names no
//! element, so closing never scrolls the page.
//!
//! While the menu is open, `body` scrolling is frozen. Service panels leave
//! the page scrollable.
//!
//! The one script on the page maps Escape to the close fragment while a panel
//! or the menu is open.
//!
//! ## Output
//!
//! ```text
//! dist/
//! ├── index.html     # the page, CSS inlined
//! ├── site.json      # resolved asset URLs, carousel layouts, service targets
//! └── portfolio/…    # assets copied by `publish`
//! ```

use crate::assets::{AssetKind, AssetRef, BasePrefix};
use crate::config::{self, SiteConfig, SiteMeta};
use crate::content::{BeforeAfter, Contact, Link, PortfolioContent, Service};
use crate::naming::{pair_anchor, slide_anchor};
use crate::pager::{PairSlider, Pager, reachable_indices};
use crate::selection::{BodyOverflow, ScrollLock};
use crate::viewport::{self, BREAKPOINTS};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

/// Fragment used by every close control. No element carries this id.
pub const CLOSED_FRAGMENT: &str = "#close";

pub const MENU_ID: &str = "menu";

const SHOWCASE: &str = "showcase";

/// Copies of the phrase list in one half of a marquee track.
const MARQUEE_REPEAT: usize = 4;

/// Build summary written next to `index.html`.
#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub title: String,
    pub base: String,
    pub showcase: CarouselSummary,
    pub before_after_pairs: usize,
    pub services: Vec<ServiceSummary>,
    /// Every referenced asset as it appears in the HTML, deduplicated.
    pub assets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CarouselSummary {
    pub items: usize,
    pub slides: usize,
    pub layouts: Vec<LayoutSummary>,
}

/// Paging at one breakpoint.
#[derive(Debug, Serialize)]
pub struct LayoutSummary {
    pub min_width: u32,
    pub page_size: usize,
    pub pages: usize,
    /// Slides the arrows and dots can reach from the first one at this size.
    pub reachable: usize,
}

#[derive(Debug, Serialize)]
pub struct ServiceSummary {
    pub title: String,
    /// Where the card points: its own panel, or the linked section.
    pub href: String,
    pub opens_panel: bool,
}

/// Render the page and write `index.html` and `site.json` into `output_dir`.
pub fn generate(
    config: &SiteConfig,
    content: &PortfolioContent,
    base: &BasePrefix,
    year: i32,
    output_dir: &Path,
) -> Result<SiteSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let page = render_page(config, content, base, year);
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let summary = summarize(config, content, base);
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(output_dir.join("site.json"), json)?;

    Ok(summary)
}

pub fn summarize(config: &SiteConfig, content: &PortfolioContent, base: &BasePrefix) -> SiteSummary {
    let items = content.showcase.items.len();
    let layouts = BREAKPOINTS
        .iter()
        .map(|bp| LayoutSummary {
            min_width: bp.min_width,
            page_size: bp.page_size,
            pages: Pager::new(items, bp.page_size).page_count(),
            reachable: if items == 0 {
                0
            } else {
                reachable_indices(items, bp.page_size).len()
            },
        })
        .collect();

    let services = content
        .services
        .entries
        .iter()
        .map(|service| ServiceSummary {
            title: service.title.clone(),
            href: service_href(service),
            opens_panel: service.link.is_none(),
        })
        .collect();

    let mut seen = HashSet::new();
    let assets = content
        .asset_paths()
        .into_iter()
        .map(|path| base.url(path))
        .filter(|url| seen.insert(url.clone()))
        .collect();

    SiteSummary {
        title: config.site.title.clone(),
        base: base.to_string(),
        showcase: CarouselSummary {
            items,
            slides: items,
            layouts,
        },
        before_after_pairs: content.highlights.pairs.len(),
        services,
        assets,
    }
}

/// Complete stylesheet: theme variables, static rules, then the rules derived
/// from the breakpoint table and the scroll lock.
pub fn build_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n{}\n{}",
        config::generate_theme_css(config),
        CSS_STATIC,
        carousel_breakpoint_css(),
        scroll_lock_css()
    )
}

/// Widest page size in the breakpoint table; the item count of a slide.
fn max_page_size() -> usize {
    BREAKPOINTS
        .iter()
        .map(|bp| bp.page_size)
        .max()
        .unwrap_or(viewport::DEFAULT_PAGE_SIZE)
}

/// Per breakpoint: the grid width, the items past the page size hidden, and
/// that breakpoint's arrows and dots shown.
pub fn carousel_breakpoint_css() -> String {
    let mut css = String::from(".carousel .controls { display: none; }\n");
    for (index, bp) in BREAKPOINTS.iter().enumerate() {
        let Some((min, max)) = viewport::breakpoint_range(index) else {
            continue;
        };
        let mut conditions = Vec::new();
        if min > 0 {
            conditions.push(format!("(min-width: {min}px)"));
        }
        if let Some(max) = max {
            conditions.push(format!("(max-width: {}px)", max.saturating_sub(1)));
        }
        let size = bp.page_size;
        let rule = format!(
            ".slide-items {{ --per-page: {size}; }} \
             .slide-items > :nth-child(n + {}) {{ display: none; }} \
             .carousel .controls--{size} {{ display: flex; }}",
            size + 1
        );
        if conditions.is_empty() {
            css.push_str(&rule);
        } else {
            css.push_str(&format!("@media {} {{ {rule} }}", conditions.join(" and ")));
        }
        css.push('\n');
    }
    css
}

/// Freeze body scrolling while the menu is targeted, at any width.
fn scroll_lock_css() -> String {
    let mut body = BodyOverflow::default();
    body.acquire();
    format!(
        "body:has(.nav-drawer:target) {{ overflow: {}; }}\n",
        body.css_value()
    )
}

// ============================================================================
// Page
// ============================================================================

pub fn render_page(
    config: &SiteConfig,
    content: &PortfolioContent,
    base: &BasePrefix,
    year: i32,
) -> Markup {
    let body = html! {
        (site_header(content, &content.hero.primary))
        main {
            (render_hero(content, base))
            (render_about(content, base))
            (render_services(content, base))
            (render_showcase(content, base))
            (render_gallery(content, base))
            (render_highlights(content, base))
            (render_contact(&content.contact))
        }
        (render_footer(&config.site, year))
    };
    base_document(&config.site, &build_css(config), body)
}

fn base_document(site: &SiteMeta, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.description);
                title { (site.title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Sticky header with the desktop link row and the mobile drawer.
fn site_header(content: &PortfolioContent, cta: &Link) -> Markup {
    html! {
        header.site-header {
            div.header-inner {
                a.brand href="#top" { (content.brand) }
                nav.desktop-nav {
                    @for link in &content.nav {
                        a href=(link.href) { (link.label) }
                    }
                }
                a.menu-open href={ "#" (MENU_ID) } aria-label="Open menu" {
                    span.bar {}
                    span.bar {}
                    span.bar {}
                }
            }
        }
        (render_drawer(&content.nav, cta))
    }
}

pub fn render_drawer(links: &[Link], cta: &Link) -> Markup {
    html! {
        div.nav-drawer id=(MENU_ID) {
            a.nav-overlay href=(CLOSED_FRAGMENT) aria-label="Close menu" {}
            div.nav-panel {
                div.nav-panel-header {
                    span { "Menu" }
                    a.nav-close href=(CLOSED_FRAGMENT) aria-label="Close menu" { "×" }
                }
                nav.nav-links {
                    @for link in links {
                        a href=(link.href) { (link.label) }
                    }
                }
                div.nav-panel-footer {
                    a.button.button--block href=(cta.href) { (cta.label) }
                }
            }
        }
    }
}

fn section_heading(title: &str, subtitle: Option<&str>) -> Markup {
    html! {
        div.section-heading {
            h2.section-title { (title) }
            @if let Some(subtitle) = subtitle {
                p.section-subtitle { (subtitle) }
            }
        }
    }
}

/// An image, or a video with native controls.
fn render_media(asset: &AssetRef, base: &BasePrefix) -> Markup {
    let src = base.url(&asset.path);
    html! {
        @match asset.kind() {
            AssetKind::Video => {
                video src=(src) aria-label=(asset.alt) preload="metadata" controls playsinline loop {}
            },
            AssetKind::Image => {
                img src=(src) alt=(asset.alt) loading="lazy";
            },
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Phrases of a `" / "`-separated marquee line, blanks dropped.
pub fn marquee_phrases(text: &str) -> Vec<&str> {
    text.split(" / ")
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect()
}

/// Scrolling text band. The track holds the phrase list repeated, twice over,
/// so translating by half its width loops without a seam.
pub fn marquee_band(text: &str) -> Markup {
    let phrases = marquee_phrases(text);
    let half: Vec<&str> = phrases
        .iter()
        .copied()
        .cycle()
        .take(phrases.len() * MARQUEE_REPEAT)
        .collect();
    html! {
        @if !half.is_empty() {
            div.marquee {
                div.marquee__inner {
                    @for phrase in half.iter().chain(half.iter()) {
                        span.marquee__item { (phrase) }
                    }
                }
            }
        }
    }
}

fn render_hero(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let hero = &content.hero;
    html! {
        section.hero id="top" {
            div.hero-intro {
                h1.hero-title {
                    @for (i, line) in hero.heading.iter().enumerate() {
                        @if i > 0 {
                            br.wide-only;
                            " "
                        }
                        (line)
                    }
                }
                div.hero-actions {
                    a.button href=(hero.primary.href) { (hero.primary.label) }
                    a.text-link href=(hero.secondary.href) { (hero.secondary.label) }
                }
            }
            (marquee_band(&hero.marquee))
            div.hero-media { (render_media(&hero.image, base)) }
            (marquee_band(&hero.marquee))
        }
    }
}

fn render_about(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let about = &content.about;
    html! {
        section.section.section--soft id="about" {
            div.container {
                (section_heading(&about.title, None))
                div.about-media {
                    @for item in &about.media {
                        div.card { (render_media(item, base)) }
                    }
                }
                div.milestones {
                    div.section-heading {
                        h2.section-title { (about.milestones_title) }
                        h3.milestones-subtitle { (about.milestones_subtitle) }
                    }
                    div.milestones-grid {
                        div.polaroid { (render_media(&about.milestones_image, base)) }
                        div.stat-list {
                            @for milestone in &about.milestones {
                                div.stat-card {
                                    div.stat-bg style={ "background-image: url('" (base.url(&milestone.background)) "')" } {}
                                    div.stat-value { (milestone.value) }
                                    div.stat-label { (milestone.label) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn service_href(service: &Service) -> String {
    match &service.link {
        Some(link) => link.clone(),
        None => format!("#{}", service.anchor()),
    }
}

fn render_services(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let services = &content.services;
    html! {
        section.section.services id="services" {
            @if let Some(background) = &services.background {
                div.services-bg style={ "background-image: url('" (base.url(background)) "')" } {}
            }
            div.container.services-inner {
                (section_heading(&services.title, None))
                div.service-grid {
                    @for service in &services.entries {
                        a.service-card href=(service_href(service)) {
                            span.service-card__title { (service.title) }
                            @if service.link.is_some() {
                                @if let Some(hint) = &service.link_hint {
                                    span.service-card__hint { (hint) }
                                }
                            }
                        }
                    }
                }
                div.services-closing {
                    h3 { (services.closing) }
                    a.button href=(services.closing_cta.href) { (services.closing_cta.label) }
                }
            }
            @for service in services.entries.iter().filter(|s| s.link.is_none()) {
                (render_service_panel(service, base))
            }
        }
    }
}

fn markdown(text: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(text));
    PreEscaped(out)
}

/// Detail panel for one service, shown while its anchor is the target.
pub fn render_service_panel(service: &Service, base: &BasePrefix) -> Markup {
    let anchor = service.anchor();
    let title_id = format!("{anchor}-title");
    html! {
        div.modal id=(anchor) role="dialog" aria-modal="true" aria-labelledby=(title_id) {
            a.modal-backdrop href=(CLOSED_FRAGMENT) aria-label="Close" {}
            div.modal-panel {
                a.modal-close href=(CLOSED_FRAGMENT) aria-label="Close" { "×" }
                h3.modal-title id=(title_id) { (service.title) }
                @if !service.description.trim().is_empty() {
                    div.modal-description { (markdown(&service.description)) }
                }
                @if !service.bullets.is_empty() {
                    ul.modal-bullets {
                        @for bullet in &service.bullets {
                            li { (bullet) }
                        }
                    }
                }
                @if !service.examples.is_empty() {
                    div.example-grid {
                        @for example in &service.examples {
                            figure.example {
                                img src=(base.url(&example.path)) alt=(example.alt) loading="lazy";
                                @if let Some(caption) = &example.caption {
                                    figcaption { (caption) }
                                }
                            }
                        }
                    }
                }
                div.modal-actions {
                    a.button href=(CLOSED_FRAGMENT) { "Close" }
                }
            }
        }
    }
}

fn render_showcase(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let showcase = &content.showcase;
    html! {
        section.section.showcase id="photo-video-examples" {
            div.container {
                (section_heading(&showcase.title, None))
                (render_carousel(&showcase.items, base))
            }
        }
    }
}

/// The showcase: one slide per start index; nothing when there are no items.
pub fn render_carousel(items: &[AssetRef], base: &BasePrefix) -> Markup {
    html! {
        @if !items.is_empty() {
            div.carousel {
                @for index in 0..items.len() {
                    (render_slide(index, items, base))
                }
            }
        }
    }
}

fn slide_href(index: usize) -> String {
    format!("#{}", slide_anchor(SHOWCASE, index))
}

/// The pager at `index` for every breakpoint, widest first.
fn slide_pagers(total: usize, index: usize) -> Vec<Pager> {
    BREAKPOINTS
        .iter()
        .map(|bp| Pager::at(total, bp.page_size, index))
        .collect()
}

fn render_slide(index: usize, items: &[AssetRef], base: &BasePrefix) -> Markup {
    let pagers = slide_pagers(items.len(), index);
    let window = Pager::at(items.len(), max_page_size(), index);
    html! {
        div.slide.is-default[index == 0] id=(slide_anchor(SHOWCASE, index)) {
            div.slide-row {
                @for pager in &pagers {
                    a class={ "arrow arrow--prev controls controls--" (pager.page_size()) }
                        href=(slide_href(pager.peek_prev())) aria-label="Previous" {}
                }
                div.slide-items {
                    @for item in window.visible_items(items) {
                        div.card { (render_media(item, base)) }
                    }
                }
                @for pager in &pagers {
                    a class={ "arrow arrow--next controls controls--" (pager.page_size()) }
                        href=(slide_href(pager.peek_next())) aria-label="Next" {}
                }
            }
            @for pager in &pagers {
                div class={ "indicators controls controls--" (pager.page_size()) } {
                    @for page in 0..pager.page_count() {
                        a.dot.active[pager.is_page_active(page)]
                            href=(slide_href(pager.peek_jump(page as i64)))
                            aria-label={ "Page " (page + 1) } {}
                    }
                }
            }
        }
    }
}

fn render_gallery(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let gallery = &content.gallery;
    html! {
        section.section.section--soft id="portfolio" {
            div.container {
                (section_heading(&gallery.title, None))
                div.gallery-grid {
                    @for image in &gallery.images {
                        div.card { (render_media(image, base)) }
                    }
                }
                (render_logo_strip(&gallery.logos, base))
            }
        }
    }
}

/// Static logo row; nothing at all when there are no logos.
pub fn render_logo_strip(logos: &[AssetRef], base: &BasePrefix) -> Markup {
    html! {
        @if !logos.is_empty() {
            div.logo-strip {
                @for logo in logos {
                    img src=(base.url(&logo.path)) alt=(logo.alt) loading="lazy";
                }
            }
        }
    }
}

fn render_highlights(content: &PortfolioContent, base: &BasePrefix) -> Markup {
    let highlights = &content.highlights;
    html! {
        section.section.highlights id="client-highlights" {
            div.container {
                (section_heading(&highlights.title, None))
            }
            @if !highlights.logos.is_empty() {
                div.marquee.marquee--logos {
                    div.marquee__inner.marquee__inner--fast {
                        @for logo in highlights.logos.iter().chain(highlights.logos.iter()) {
                            div.marquee__logo {
                                img src=(base.url(&logo.path)) alt=(logo.alt);
                            }
                        }
                    }
                }
            }
            div.container {
                h3.subsection-title { (highlights.before_after_title) }
                (render_pair_slider(&highlights.pairs, base))
            }
        }
    }
}

/// One slide per before/after pair; nothing when there are no pairs.
pub fn render_pair_slider(pairs: &[BeforeAfter], base: &BasePrefix) -> Markup {
    html! {
        @if !pairs.is_empty() {
            div.pair-slider {
                @for index in 0..pairs.len() {
                    (render_pair(&PairSlider::at(pairs.len(), index), pairs, base))
                }
            }
        }
    }
}

fn render_pair(
    slider: &PairSlider,
    pairs: &[BeforeAfter],
    base: &BasePrefix,
) -> Markup {
    let Some(pair) = slider.current(pairs) else {
        return html! {};
    };
    let number = slider.index() + 1;
    html! {
        div.pair-slide.is-default[slider.index() == 0] id=(pair_anchor(slider.index())) {
            div.pair-row {
                a.arrow.arrow--prev href={ "#" (pair_anchor(slider.peek_prev())) } aria-label="Previous pair" {}
                div.pair-images {
                    div.pair-image {
                        img src=(base.url(&pair.before)) alt={ "Before " (number) };
                    }
                    span.pair-arrow aria-hidden="true" { "→" }
                    div.pair-image {
                        img src=(base.url(&pair.after)) alt={ "After " (number) };
                    }
                }
                a.arrow.arrow--next href={ "#" (pair_anchor(slider.peek_next())) } aria-label="Next pair" {}
            }
            div.indicators {
                @for other in 0..slider.len() {
                    a.dot.active[slider.is_active(other)]
                        href={ "#" (pair_anchor(other)) }
                        aria-label={ "Pair " (other + 1) } {}
                }
            }
        }
    }
}

/// `mailto:` link with the subject line percent-encoded.
pub fn mailto_href(email: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) if !subject.is_empty() => format!(
            "mailto:{email}?subject={}",
            utf8_percent_encode(subject, NON_ALPHANUMERIC)
        ),
        _ => format!("mailto:{email}"),
    }
}

fn render_contact(contact: &Contact) -> Markup {
    html! {
        section.section id="contact" {
            div.container.container--narrow {
                (section_heading(&contact.title, Some(contact.subtitle.as_str())))
                div.contact-actions {
                    a.button href=(mailto_href(&contact.email, contact.subject.as_deref())) { (contact.cta) }
                    a.text-link href={ "mailto:" (contact.email) } { (contact.email) }
                    @if let Some(instagram) = &contact.instagram {
                        a.text-link href=(instagram) target="_blank" rel="noreferrer" { "Instagram" }
                    }
                }
            }
        }
    }
}

fn render_footer(site: &SiteMeta, year: i32) -> Markup {
    html! {
        footer.site-footer {
            div.footer-inner {
                div { "© " (year) " " (site.owner) }
                a href="#top" { "Back to top" }
            }
        }
    }
}
