//! Asset path resolution.
//!
//! Every image and video on the page is referenced by a *logical path* rooted
//! at the site's static directory (`/portfolio/Vitalik/N1.jpg`). The published
//! URL depends on where the site is served from: `/` when previewing locally,
//! `/<repo-name>/` when deployed under a project subpath. [`resolve`] joins the
//! two without doubling or dropping slashes:
//!
//! ```text
//! resolve("/a/b.jpg", "/base")  → /base/a/b.jpg
//! resolve("/a/b.jpg", "/base/") → /base/a/b.jpg
//! resolve("a/b.jpg",  "/")      → /a/b.jpg
//! resolve("/a/b.jpg", "")       → /a/b.jpg
//! ```
//!
//! ## Encoding
//!
//! Content lists mix raw and pre-encoded names (`Chez Mia-055.jpg` next to
//! `Chez%20Mia-055.jpg`). [`encode_path`] decodes first and then re-encodes each
//! segment, so both spellings produce the same URL. The on-disk lookup in
//! [`AssetRef::source_file`] uses the decoded form.
//!
//! The resolver itself never encodes; it is a pure join. Encoding happens at the
//! HTML boundary in [`BasePrefix::url`].

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Characters left untouched inside a path segment (RFC 3986 unreserved).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// File extensions rendered as `<video>` when a content entry doesn't say.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v"];

/// Join a logical asset path onto a base prefix.
///
/// Total: an empty prefix is treated as `/`. Exactly one leading `/` is
/// stripped from the logical path.
pub fn resolve(logical_path: &str, base_prefix: &str) -> String {
    let mut url = normalize_prefix(base_prefix);
    url.push_str(strip_leading_slash(logical_path));
    url
}

/// Normalize a base prefix so it always ends with `/`.
///
/// Idempotent: normalizing an already normalized prefix returns it unchanged.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        "/".to_string()
    } else if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Percent-decode a logical path. Invalid UTF-8 sequences leave the input as-is.
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Where a logical path lives on disk under the assets directory.
pub fn source_path(assets_root: &Path, logical_path: &str) -> PathBuf {
    assets_root.join(strip_leading_slash(&decode_path(logical_path)))
}

/// Canonical percent-encoding of a logical path, segment by segment.
pub fn encode_path(path: &str) -> String {
    decode_path(path)
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// The URL prefix the site is served under.
///
/// Resolved once at startup (config, `FOLIO_BASE`, or `--base`) and passed
/// by reference to everything that renders a URL. There is no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePrefix(String);

impl BasePrefix {
    pub fn new(raw: &str) -> Self {
        Self(normalize_prefix(raw.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve a logical path against this prefix, without encoding.
    pub fn resolve(&self, logical_path: &str) -> String {
        resolve(logical_path, &self.0)
    }

    /// Resolve and percent-encode a logical path for use in an HTML attribute.
    pub fn url(&self, logical_path: &str) -> String {
        resolve(&encode_path(logical_path), &self.0)
    }
}

impl Default for BasePrefix {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl fmt::Display for BasePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

impl AssetKind {
    /// Infer the kind from the file extension (case-insensitive).
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            AssetKind::Video
        } else {
            AssetKind::Image
        }
    }
}

/// A static media file referenced by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetRef {
    /// Logical path, rooted at the static asset directory.
    pub path: String,
    /// Explicit kind; inferred from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt: String,
}

impl AssetRef {
    pub fn image(path: &str, alt: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: Some(AssetKind::Image),
            alt: alt.to_string(),
        }
    }

    pub fn video(path: &str, alt: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: Some(AssetKind::Video),
            alt: alt.to_string(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind.unwrap_or_else(|| AssetKind::from_path(&self.path))
    }

    /// Where this asset lives under the static directory on disk.
    pub fn source_file(&self, assets_root: &Path) -> PathBuf {
        source_path(assets_root, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_appends_missing_trailing_slash() {
        assert_eq!(resolve("/a/b.jpg", "/base"), "/base/a/b.jpg");
    }

    #[test]
    fn resolve_keeps_existing_trailing_slash() {
        assert_eq!(resolve("/a/b.jpg", "/base/"), "/base/a/b.jpg");
    }

    #[test]
    fn resolve_relative_path_at_root() {
        assert_eq!(resolve("a/b.jpg", "/"), "/a/b.jpg");
    }

    #[test]
    fn resolve_empty_prefix_is_root() {
        assert_eq!(resolve("/a/b.jpg", ""), "/a/b.jpg");
    }

    #[test]
    fn resolve_strips_exactly_one_slash() {
        assert_eq!(resolve("//a.jpg", "/"), "//a.jpg");
    }

    #[test]
    fn resolve_never_doubles_slash_at_join() {
        let prefixes = ["", "/", "/base", "/base/", "/Portfolio/", "https://cdn.test/x"];
        let paths = ["/a.jpg", "a.jpg", "/dir/a b.jpg", "/dir/Chez%20Mia.jpg"];
        for prefix in prefixes {
            let normalized = normalize_prefix(prefix);
            for path in paths {
                let url = resolve(path, prefix);
                assert!(url.starts_with(&normalized), "{url} lacks {normalized}");
                let rest = &url[normalized.len()..];
                assert!(!rest.starts_with('/'), "double slash in {url}");
            }
        }
    }

    #[test]
    fn normalize_prefix_is_idempotent() {
        for prefix in ["", "/", "/base", "/base/"] {
            let once = normalize_prefix(prefix);
            assert_eq!(normalize_prefix(&once), once);
        }
    }

    #[test]
    fn encode_path_normalizes_mixed_spellings() {
        let raw = encode_path("/portfolio/Chez Mia-055.jpg");
        let pre = encode_path("/portfolio/Chez%20Mia-055.jpg");
        assert_eq!(raw, "/portfolio/Chez%20Mia-055.jpg");
        assert_eq!(raw, pre);
    }

    #[test]
    fn encode_path_escapes_reserved_characters() {
        assert_eq!(
            encode_path("/portfolio/Events&Influencers/Cyklar P.JPG"),
            "/portfolio/Events%26Influencers/Cyklar%20P.JPG"
        );
        assert_eq!(encode_path("/a/(1).jpg"), "/a/%281%29.jpg");
    }

    #[test]
    fn base_prefix_url_encodes_only_the_logical_part() {
        let base = BasePrefix::new("https://cdn.test/site");
        assert_eq!(base.url("/a b.jpg"), "https://cdn.test/site/a%20b.jpg");
        assert_eq!(base.resolve("/a b.jpg"), "https://cdn.test/site/a b.jpg");
    }

    #[test]
    fn base_prefix_default_is_root() {
        assert_eq!(BasePrefix::default().as_str(), "/");
        assert_eq!(BasePrefix::new("  ").as_str(), "/");
    }

    #[test]
    fn asset_kind_inferred_from_extension() {
        assert_eq!(AssetKind::from_path("/v/Instagram.MP4"), AssetKind::Video);
        assert_eq!(AssetKind::from_path("/v/clip.webm"), AssetKind::Video);
        assert_eq!(AssetKind::from_path("/p/7.JPG"), AssetKind::Image);
        assert_eq!(AssetKind::from_path("/p/noext"), AssetKind::Image);
    }

    #[test]
    fn explicit_kind_wins_over_extension() {
        let asset = AssetRef {
            path: "/p/poster.mp4".to_string(),
            kind: Some(AssetKind::Image),
            alt: String::new(),
        };
        assert_eq!(asset.kind(), AssetKind::Image);
    }

    #[test]
    fn source_file_decodes_percent_escapes() {
        let asset = AssetRef::image("/portfolio/Chez%20Mia-055.jpg", "Food");
        let file = asset.source_file(Path::new("/srv/public"));
        assert_eq!(file, PathBuf::from("/srv/public/portfolio/Chez Mia-055.jpg"));
    }

    #[test]
    fn asset_ref_parses_from_toml() {
        let asset: AssetRef = toml::from_str(
            r#"
path = "/portfolio/Vitalik/Instagram.MP4"
alt = "Instagram Content"
"#,
        )
        .unwrap();
        assert_eq!(asset.kind(), AssetKind::Video);
        assert_eq!(asset.alt, "Instagram Content");
    }
}
