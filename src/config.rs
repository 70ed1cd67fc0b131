//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the source directory, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base = "/"                # URL prefix the site is served under
//! assets_dir = "public"     # Static files, relative to the source directory
//!
//! [site]
//! title = "Olha Karvatska | Marketing & PR"
//! description = "Marketing & Public Relations for Restaurants, Hotels & F&B Brands"
//! lang = "en"
//! owner = "Olha Karvatska"  # Footer copyright line
//!
//! [colors]
//! brand = "#0B0B0B"         # Buttons, active indicators
//! soft = "#F7F7F7"          # Alternating section background
//! accent = "#C7B299"        # Soft beige accent
//! text = "#18181b"
//! muted = "#71717a"         # Captions, subtitles
//! border = "#e4e4e7"
//!
//! [fonts]
//! sans = "Inter, ui-sans-serif, system-ui"
//! serif = "'Playfair Display', ui-serif, Georgia"
//! heading = "Roboto, ui-sans-serif, system-ui"
//! ```
//!
//! ## Base Prefix
//!
//! The base prefix is resolved once at startup, highest priority first:
//!
//! 1. `--base` on the command line
//! 2. the `FOLIO_BASE` environment variable
//! 3. `base` in `config.toml`
//!
//! A subpath deployment (`https://user.github.io/Portfolio/`) sets
//! `base = "/Portfolio/"`; local previews keep `/`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::BasePrefix;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `base` from `config.toml`.
pub const BASE_ENV: &str = "FOLIO_BASE";

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix the site is served under.
    pub base: String,
    /// Static asset directory, relative to the source directory.
    pub assets_dir: String,
    pub site: SiteMeta,
    pub colors: ColorConfig,
    pub fonts: FontConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            assets_dir: "public".to_string(),
            site: SiteMeta::default(),
            colors: ColorConfig::default(),
            fonts: FontConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base(&self.base)?;
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        for (name, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// A base prefix is either site-absolute (`/`, `/Portfolio/`) or a full URL.
pub fn validate_base(base: &str) -> Result<(), ConfigError> {
    let ok = base.is_empty()
        || base.starts_with('/')
        || base.starts_with("https://")
        || base.starts_with("http://");
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "base must start with '/' or 'http(s)://', got {base:?}"
        )))
    }
}

/// Page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// `<title>` of the page.
    pub title: String,
    /// `<meta name="description">`.
    pub description: String,
    /// `<html lang>`.
    pub lang: String,
    /// Name in the footer copyright line.
    pub owner: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Olha Karvatska | Marketing & PR".to_string(),
            description: "Marketing & Public Relations for Restaurants, Hotels & F&B Brands"
                .to_string(),
            lang: "en".to_string(),
            owner: "Olha Karvatska".to_string(),
        }
    }
}

/// Palette exposed to the stylesheet as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub brand: String,
    pub soft: String,
    pub accent: String,
    pub text: String,
    pub muted: String,
    pub border: String,
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("brand", &self.brand),
            ("soft", &self.soft),
            ("accent", &self.accent),
            ("text", &self.text),
            ("muted", &self.muted),
            ("border", &self.border),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand: "#0B0B0B".to_string(),
            soft: "#F7F7F7".to_string(),
            accent: "#C7B299".to_string(),
            text: "#18181b".to_string(),
            muted: "#71717a".to_string(),
            border: "#e4e4e7".to_string(),
        }
    }
}

/// Font stacks (CSS `font-family` values).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub sans: String,
    pub serif: String,
    pub heading: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            sans: "Inter, ui-sans-serif, system-ui".to_string(),
            serif: "'Playfair Display', ui-serif, Georgia".to_string(),
            heading: "Roboto, ui-sans-serif, system-ui".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `file_name` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_toml(dir: &Path, file_name: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_toml(root, CONFIG_FILE)?;
    resolve_config(base, overlay)
}

/// Pick the base prefix: command line, then environment, then config.
pub fn effective_base(
    config: &SiteConfig,
    from_env: Option<&str>,
    from_cli: Option<&str>,
) -> Result<BasePrefix, ConfigError> {
    let raw = from_cli
        .or(from_env.filter(|v| !v.trim().is_empty()))
        .unwrap_or(config.base.as_str());
    validate_base(raw.trim())?;
    Ok(BasePrefix::new(raw))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# URL prefix the site is served under. Use "/" for local previews and
# "/<repo-name>/" for a project-page deployment. Overridden by the
# FOLIO_BASE environment variable and by --base.
base = "/"

# Static files (images, videos) referenced from content.toml, relative to
# the source directory. Copied verbatim to the output root.
assets_dir = "public"

# ---------------------------------------------------------------------------
# Page metadata
# ---------------------------------------------------------------------------
[site]
title = "Olha Karvatska | Marketing & PR"
description = "Marketing & Public Relations for Restaurants, Hotels & F&B Brands"
lang = "en"
# Name in the footer copyright line.
owner = "Olha Karvatska"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
brand = "#0B0B0B"         # Buttons, active indicators
soft = "#F7F7F7"          # Alternating section background
accent = "#C7B299"        # Soft beige accent
text = "#18181b"
muted = "#71717a"         # Captions, subtitles
border = "#e4e4e7"

# ---------------------------------------------------------------------------
# Fonts (CSS font-family stacks)
# ---------------------------------------------------------------------------
[fonts]
sans = "Inter, ui-sans-serif, system-ui"
serif = "'Playfair Display', ui-serif, Georgia"
heading = "Roboto, ui-sans-serif, system-ui"
"##
}

/// Generate CSS custom properties from color and font config.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let colors = &config.colors;
    let fonts = &config.fonts;
    format!(
        r#":root {{
    --color-brand: {brand};
    --color-soft: {soft};
    --color-accent: {accent};
    --color-text: {text};
    --color-muted: {muted};
    --color-border: {border};
    --font-sans: {sans};
    --font-serif: {serif};
    --font-heading: {heading};
}}"#,
        brand = colors.brand,
        soft = colors.soft,
        accent = colors.accent,
        text = colors.text,
        muted = colors.muted,
        border = colors.border,
        sans = fonts.sans,
        serif = fonts.serif,
        heading = fonts.heading,
    )
}
