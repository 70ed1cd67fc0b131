//! Copy the assets directory into the output and audit asset references.
//!
//! Every file under the assets directory (`public/` by default) is copied to
//! the same relative path under the output directory, so a logical path like
//! `/portfolio/Vitalik/N1.jpg` resolves against the deployed site root.
//!
//! Copies are skipped when the destination already holds identical bytes
//! (SHA-256 of both sides), which keeps rebuilds of a large media folder
//! cheap and leaves modification times alone for rsync-style deploys.
//! Hidden files (`.DS_Store`, `.gitkeep`) are not published.
//!
//! [`missing_assets`] lists content references with no file behind them.
//! A missing file is reported, never fatal: the page still renders and the
//! browser shows a broken image, same as the live site would.

use crate::assets;
use crate::content::PortfolioContent;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to walk assets directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a publish run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: u32,
    pub unchanged: u32,
}

impl CopyStats {
    pub fn total(&self) -> u32 {
        self.copied + self.unchanged
    }
}

impl fmt::Display for CopyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} copied, {} unchanged ({} total)",
                self.copied,
                self.unchanged,
                self.total()
            )
        } else {
            write!(f, "{} copied", self.copied)
        }
    }
}

/// SHA-256 of a file's contents as lowercase hex.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Mirror `assets_root` into `output_dir`.
///
/// A missing assets directory publishes nothing.
pub fn copy_assets(assets_root: &Path, output_dir: &Path) -> Result<CopyStats, PublishError> {
    let mut stats = CopyStats::default();
    if !assets_root.is_dir() {
        return Ok(stats);
    }

    let walker = WalkDir::new(assets_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(assets_root)
            .unwrap_or(entry.path());
        let dest = output_dir.join(relative);

        if dest.is_file() && hash_file(&dest)? == hash_file(entry.path())? {
            stats.unchanged += 1;
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        stats.copied += 1;
    }
    Ok(stats)
}

/// A content reference whose file is absent from the assets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAsset {
    pub logical_path: String,
    pub expected_at: PathBuf,
}

/// Every referenced asset with no file on disk, in content order, deduplicated.
pub fn missing_assets(content: &PortfolioContent, assets_root: &Path) -> Vec<MissingAsset> {
    let mut seen = std::collections::HashSet::new();
    content
        .asset_paths()
        .into_iter()
        .filter(|path| seen.insert(*path))
        .filter_map(|path| {
            let expected_at = assets::source_path(assets_root, path);
            (!expected_at.is_file()).then(|| MissingAsset {
                logical_path: path.to_string(),
                expected_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::resolve_content;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, bytes: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn copies_tree_preserving_layout() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "portfolio/Vitalik/N1.jpg", b"jpeg");
        write(src.path(), "portfolio/Chez Mia-055.jpg", b"food");
        write(src.path(), "favicon.ico", b"ico");

        let stats = copy_assets(src.path(), out.path()).unwrap();
        assert_eq!(stats.copied, 3);
        assert_eq!(stats.unchanged, 0);
        assert_eq!(
            fs::read(out.path().join("portfolio/Chez Mia-055.jpg")).unwrap(),
            b"food"
        );
        assert!(out.path().join("portfolio/Vitalik/N1.jpg").is_file());
    }

    #[test]
    fn second_run_skips_identical_files() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "a.jpg", b"one");
        write(src.path(), "b.jpg", b"two");
        copy_assets(src.path(), out.path()).unwrap();

        write(src.path(), "b.jpg", b"changed");
        let stats = copy_assets(src.path(), out.path()).unwrap();
        assert_eq!(stats, CopyStats { copied: 1, unchanged: 1 });
        assert_eq!(fs::read(out.path().join("b.jpg")).unwrap(), b"changed");
    }

    #[test]
    fn hidden_files_are_skipped() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), ".DS_Store", b"junk");
        write(src.path(), ".cache/thumb.jpg", b"junk");
        write(src.path(), "logo.png", b"png");

        let stats = copy_assets(src.path(), out.path()).unwrap();
        assert_eq!(stats.copied, 1);
        assert!(!out.path().join(".DS_Store").exists());
        assert!(!out.path().join(".cache").exists());
    }

    #[test]
    fn missing_assets_dir_publishes_nothing() {
        let out = TempDir::new().unwrap();
        let stats = copy_assets(&out.path().join("nope"), out.path()).unwrap();
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn stats_display() {
        assert_eq!(CopyStats { copied: 4, unchanged: 0 }.to_string(), "4 copied");
        assert_eq!(
            CopyStats { copied: 1, unchanged: 2 }.to_string(),
            "1 copied, 2 unchanged (3 total)"
        );
    }

    #[test]
    fn hash_file_tracks_content() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "x", b"same");
        write(dir.path(), "y", b"same");
        write(dir.path(), "z", b"other");
        let x = hash_file(&dir.path().join("x")).unwrap();
        assert_eq!(x, hash_file(&dir.path().join("y")).unwrap());
        assert_ne!(x, hash_file(&dir.path().join("z")).unwrap());
        assert_eq!(x.len(), 64);
    }

    #[test]
    fn reports_missing_references() {
        let overlay: toml::Value = toml::from_str(
            r#"
[showcase]
items = [
    { path = "/portfolio/here.jpg", alt = "Here" },
    { path = "/portfolio/Not%20Here.jpg", alt = "Gone" },
]
"#,
        )
        .unwrap();
        let content = resolve_content(Some(overlay)).unwrap();
        let root = TempDir::new().unwrap();
        write(root.path(), "portfolio/here.jpg", b"x");

        let missing = missing_assets(&content, root.path());
        assert!(missing.iter().all(|m| m.logical_path != "/portfolio/here.jpg"));
        let gone = missing
            .iter()
            .find(|m| m.logical_path == "/portfolio/Not%20Here.jpg")
            .unwrap();
        assert_eq!(gone.expected_at, root.path().join("portfolio/Not Here.jpg"));
    }

    #[test]
    fn missing_references_are_deduplicated() {
        let content = resolve_content(None).unwrap();
        let root = TempDir::new().unwrap();
        let missing = missing_assets(&content, root.path());
        let mut paths: Vec<_> = missing.iter().map(|m| m.logical_path.as_str()).collect();
        let before = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), before);
        assert!(!missing.is_empty());
    }
}
