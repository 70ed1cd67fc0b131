//! Page content: copy, links and media lists.
//!
//! The page is fixed in shape (hero, about, services, showcase carousel,
//! gallery, client highlights, contact) and variable in content. Content lives
//! in `content.toml` next to `config.toml`; the stock file
//! (`static/content.toml`, printed by `folio gen-content`) is the base layer
//! and a user file is merged on top of it with [`config::merge_toml`]:
//! tables merge key by key, arrays replace.
//!
//! ## Validation
//!
//! - every asset path is non-empty and starts with exactly one `/`
//! - service titles are non-empty and produce unique anchors
//! - nav links and service links are in-page anchors (`#…`)
//! - the contact email looks like an address
//!
//! Empty media lists are valid: an empty showcase keeps its section heading
//! but renders no carousel, an empty logo strip renders nothing.

use crate::assets::AssetRef;
use crate::config::{self, ConfigError};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub const CONTENT_FILE: &str = "content.toml";

const STOCK_CONTENT: &str = include_str!("../static/content.toml");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ContentError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => ContentError::Io(e),
            ConfigError::Toml(e) => ContentError::Toml(e),
            ConfigError::Validation(msg) => ContentError::Validation(msg),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioContent {
    pub brand: String,
    pub nav: Vec<Link>,
    pub hero: Hero,
    pub about: About,
    pub services: Services,
    pub showcase: Showcase,
    pub gallery: Gallery,
    pub highlights: Highlights,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hero {
    /// Heading lines; joined by a line break on wide screens.
    pub heading: Vec<String>,
    /// `" / "`-separated phrases scrolled in the marquee bands.
    pub marquee: String,
    pub primary: Link,
    pub secondary: Link,
    pub image: AssetRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub title: String,
    /// Side-by-side media; videos play inline with native controls.
    pub media: Vec<AssetRef>,
    pub milestones_title: String,
    pub milestones_subtitle: String,
    pub milestones_image: AssetRef,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    pub value: String,
    pub label: String,
    /// Logical path of the card's background texture.
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Services {
    pub title: String,
    #[serde(default)]
    pub background: Option<String>,
    pub closing: String,
    pub closing_cta: Link,
    pub entries: Vec<Service>,
}

/// A service card. Cards with a `link` jump to that anchor instead of
/// opening a detail panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub title: String,
    /// Markdown shown at the top of the detail panel.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub link: Option<String>,
    /// Small second line on the card, shown for linked services.
    #[serde(default)]
    pub link_hint: Option<String>,
}

impl Service {
    pub fn anchor(&self) -> String {
        naming::service_anchor(&self.title)
    }
}

/// A captioned image in a service detail panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Example {
    pub path: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Example {
    pub fn asset(&self) -> AssetRef {
        AssetRef::image(&self.path, &self.alt)
    }
}

/// The photo & video carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Showcase {
    pub title: String,
    pub items: Vec<AssetRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gallery {
    pub title: String,
    pub images: Vec<AssetRef>,
    #[serde(default)]
    pub logos: Vec<AssetRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highlights {
    pub title: String,
    pub before_after_title: String,
    pub logos: Vec<AssetRef>,
    pub pairs: Vec<BeforeAfter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeforeAfter {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

impl PortfolioContent {
    /// Every logical asset path the page references, in page order, with
    /// duplicates kept.
    pub fn asset_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = vec![self.hero.image.path.as_str()];
        paths.extend(self.about.media.iter().map(|a| a.path.as_str()));
        paths.push(&self.about.milestones_image.path);
        paths.extend(self.about.milestones.iter().map(|m| m.background.as_str()));
        paths.extend(self.services.background.as_deref());
        for service in &self.services.entries {
            paths.extend(service.examples.iter().map(|e| e.path.as_str()));
        }
        paths.extend(self.showcase.items.iter().map(|a| a.path.as_str()));
        paths.extend(self.gallery.images.iter().map(|a| a.path.as_str()));
        paths.extend(self.gallery.logos.iter().map(|a| a.path.as_str()));
        paths.extend(self.highlights.logos.iter().map(|a| a.path.as_str()));
        for pair in &self.highlights.pairs {
            paths.push(&pair.before);
            paths.push(&pair.after);
        }
        paths
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        for path in self.asset_paths() {
            validate_logical_path(path)?;
        }
        for link in &self.nav {
            validate_anchor(&link.href, "nav")?;
        }

        let mut anchors = HashSet::new();
        for service in &self.services.entries {
            if naming::slugify(&service.title).is_empty() {
                return Err(ContentError::Validation(format!(
                    "service title {:?} has no letters or digits to build an anchor from",
                    service.title
                )));
            }
            if !anchors.insert(service.anchor()) {
                return Err(ContentError::Validation(format!(
                    "duplicate service: {:?}",
                    service.title
                )));
            }
            if let Some(link) = &service.link {
                validate_anchor(link, "services.entries.link")?;
            }
        }

        if !self.contact.email.contains('@') {
            return Err(ContentError::Validation(format!(
                "contact.email is not an address: {:?}",
                self.contact.email
            )));
        }
        Ok(())
    }
}

fn validate_logical_path(path: &str) -> Result<(), ContentError> {
    if !path.starts_with('/') || path.starts_with("//") || path.len() < 2 {
        return Err(ContentError::Validation(format!(
            "asset path must start with a single '/': {path:?}"
        )));
    }
    Ok(())
}

fn validate_anchor(href: &str, field: &str) -> Result<(), ContentError> {
    if href.len() < 2 || !href.starts_with('#') {
        return Err(ContentError::Validation(format!(
            "{field} must be an in-page anchor like \"#about\", got {href:?}"
        )));
    }
    Ok(())
}

/// The stock `content.toml`, used by `gen-content` and as the base layer.
pub fn stock_content_toml() -> &'static str {
    STOCK_CONTENT
}

pub fn stock_content_value() -> toml::Value {
    toml::from_str(STOCK_CONTENT).expect("stock content must parse")
}

/// Merge an optional overlay onto the stock content, deserialize and validate.
pub fn resolve_content(overlay: Option<toml::Value>) -> Result<PortfolioContent, ContentError> {
    let base = stock_content_value();
    let merged = match overlay {
        Some(ov) => config::merge_toml(base, ov),
        None => base,
    };
    let content: PortfolioContent = merged.try_into()?;
    content.validate()?;
    Ok(content)
}

/// Load `content.toml` from the source directory on top of the stock content.
pub fn load_content(root: &Path) -> Result<PortfolioContent, ContentError> {
    let overlay = config::load_raw_toml(root, CONTENT_FILE)?;
    resolve_content(overlay)
}
