//! End-to-end tests driving the `folio` binary on temporary source trees.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SMALL_CONTENT: &str = r#"
[showcase]
items = [
    { path = "/portfolio/a b.jpg", alt = "First" },
    { path = "/portfolio/clip.mp4", alt = "Clip" },
]
"#;

fn folio(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.args(args).env_remove("FOLIO_BASE");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run folio")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn source_with_assets() -> TempDir {
    let source = TempDir::new().unwrap();
    write(source.path(), "content.toml", SMALL_CONTENT.as_bytes());
    write(source.path(), "public/portfolio/a b.jpg", b"jpeg");
    write(source.path(), "public/portfolio/clip.mp4", b"mp4");
    source
}

fn build(source: &Path, output: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "build",
        "--source",
        source.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run(&mut folio(&args))
}

#[test]
fn build_renders_page_and_copies_assets() {
    let source = source_with_assets();
    let dist = TempDir::new().unwrap();

    let out = build(source.path(), dist.path(), &[]);
    assert!(out.status.success(), "build failed: {}", stderr(&out));
    assert!(stdout(&out).contains("==> Build complete"));

    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains(r#"src="/portfolio/a%20b.jpg""#));
    assert!(index.contains("<video"));
    assert!(index.contains(r#"id="showcase-1""#));
    assert!(index.contains("'Escape'"));
    assert_eq!(
        fs::read(dist.path().join("portfolio/a b.jpg")).unwrap(),
        b"jpeg"
    );

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dist.path().join("site.json")).unwrap()).unwrap();
    assert_eq!(summary["showcase"]["items"], 2);
    assert_eq!(summary["base"], "/");
}

#[test]
fn rebuild_skips_unchanged_assets() {
    let source = source_with_assets();
    let dist = TempDir::new().unwrap();
    assert!(build(source.path(), dist.path(), &[]).status.success());

    let out = build(source.path(), dist.path(), &[]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Assets: 0 copied, 2 unchanged (2 total)"));
}

#[test]
fn base_prefix_precedence() {
    let source = source_with_assets();
    write(source.path(), "config.toml", b"base = \"/from-config/\"\n");

    let dist = TempDir::new().unwrap();
    assert!(build(source.path(), dist.path(), &[]).status.success());
    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("/from-config/portfolio/a%20b.jpg"));

    let dist = TempDir::new().unwrap();
    let out = run(folio(&[
        "build",
        "--source",
        source.path().to_str().unwrap(),
        "--output",
        dist.path().to_str().unwrap(),
    ])
    .env("FOLIO_BASE", "/from-env"));
    assert!(out.status.success());
    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("/from-env/portfolio/a%20b.jpg"));

    let dist = TempDir::new().unwrap();
    let out = run(folio(&[
        "build",
        "--source",
        source.path().to_str().unwrap(),
        "--output",
        dist.path().to_str().unwrap(),
        "--base",
        "/from-cli/",
    ])
    .env("FOLIO_BASE", "/from-env"));
    assert!(out.status.success());
    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("/from-cli/portfolio/a%20b.jpg"));
}

#[test]
fn invalid_base_is_rejected() {
    let source = source_with_assets();
    let dist = TempDir::new().unwrap();
    let out = build(source.path(), dist.path(), &["--base", "portfolio"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("base must start with"));
}

#[test]
fn check_reports_missing_assets_without_failing() {
    let source = TempDir::new().unwrap();
    let out = run(&mut folio(&["check", "--source", source.path().to_str().unwrap()]));
    assert!(out.status.success(), "check failed: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("004 Showcase (9 items)"));
    assert!(text.contains("Missing assets ("));
    assert!(text.contains("==> Content is valid"));
}

#[test]
fn check_fails_on_invalid_content() {
    let source = TempDir::new().unwrap();
    write(
        source.path(),
        "content.toml",
        b"[[nav]]\nhref = \"about\"\nlabel = \"About\"\n",
    );
    let out = run(&mut folio(&["check", "--source", source.path().to_str().unwrap()]));
    assert!(!out.status.success());
    assert!(stderr(&out).contains("nav must be an in-page anchor"));
}

#[test]
fn check_fails_on_unknown_config_key() {
    let source = TempDir::new().unwrap();
    write(source.path(), "config.toml", b"[colors]\nbrnad = \"#000\"\n");
    let out = run(&mut folio(&["check", "--source", source.path().to_str().unwrap()]));
    assert!(!out.status.success());
}

#[test]
fn generated_config_is_accepted() {
    let out = run(&mut folio(&["gen-config"]));
    assert!(out.status.success());
    let source = TempDir::new().unwrap();
    write(source.path(), "config.toml", &out.stdout);

    let out = run(&mut folio(&["check", "--source", source.path().to_str().unwrap()]));
    assert!(out.status.success(), "check failed: {}", stderr(&out));
    assert!(stdout(&out).contains("    Base: /"));
}

#[test]
fn generated_content_is_the_stock_page() {
    let out = run(&mut folio(&["gen-content"]));
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[[services.entries]]"));
    assert!(text.contains("Discovery Call Request"));
}

#[test]
fn state_replays_events() {
    let source = TempDir::new().unwrap();
    let out = run(&mut folio(&[
        "state",
        "--source",
        source.path().to_str().unwrap(),
        "--width",
        "700",
        "next",
        "service:Events",
        "menu",
        "goto:#contact",
    ]));
    assert!(out.status.success(), "state failed: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Viewport: 700px → 2 per page"));
    assert!(text.contains("Showcase: index 2, page 2 of 5 (items 3–4)"));
    assert!(text.contains("Service panel: closed"));
    assert!(text.contains("Menu: closed (body overflow: unset)"));
    assert!(text.contains("Location: #contact"));
}

#[test]
fn state_rejects_unknown_events() {
    let out = run(&mut folio(&["state", "teleport"]));
    assert!(!out.status.success());
}
