use chrono::Datelike;
use clap::{Parser, Subcommand};
use folio::assets::BasePrefix;
use folio::config::{self, SiteConfig};
use folio::content::{self, PortfolioContent};
use folio::selection::BodyOverflow;
use folio::session::{PageSession, UiEvent};
use folio::{generate, output, publish};
use std::path::{Path, PathBuf};

/// Release builds report the package version; anything else reports the commit.
fn version_string() -> &'static str {
    if env!("FOLIO_RELEASED") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("FOLIO_COMMIT") {
        "" => "dev@unknown",
        commit => Box::leak(format!("dev@{commit}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static generator for single-page marketing portfolios")]
#[command(long_about = "\
Static generator for single-page marketing portfolios

One content file describes the page; folio renders it to a self-contained
index.html (CSS-driven; one tiny script for the Escape key) and copies the
media it references.

Source structure:

  content/
  ├── config.toml          # Base prefix, site metadata, colors, fonts (optional)
  ├── content.toml         # Page copy and media lists (optional, merged onto stock)
  └── public/              # Static assets → copied to the output root
      └── portfolio/
          └── Vitalik/N1.jpg   # referenced as /portfolio/Vitalik/N1.jpg

The base prefix comes from config.toml, then FOLIO_BASE, then --base.

Run 'folio gen-config' and 'folio gen-content' for documented starting files.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory (config.toml, content.toml, assets)
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// URL prefix the site is served under (overrides config and FOLIO_BASE)
    #[arg(long, global = true)]
    base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy assets and render the page
    Build,
    /// Validate config and content, and list referenced assets missing on disk
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock content.toml
    GenContent,
    /// Replay UI events through the page state and print where it ends up
    ///
    /// Events: resize:<px>, next, prev, jump:<page>, pair-next, pair-prev,
    /// pair:<n>, service:<title>, close, menu, close-menu, goto:#<anchor>,
    /// esc, outside
    State {
        /// Initial viewport width in pixels (unmeasured if omitted)
        #[arg(long)]
        width: Option<u32>,

        /// Events to dispatch, in order
        events: Vec<UiEvent>,
    },
}

/// Everything loaded from the source directory.
struct Site {
    config: SiteConfig,
    content: PortfolioContent,
    base: BasePrefix,
    assets_root: PathBuf,
}

fn load_site(source: &Path, cli_base: Option<&str>) -> Result<Site, Box<dyn std::error::Error>> {
    let config = config::load_config(source)?;
    let env_base = std::env::var(config::BASE_ENV).ok();
    let base = config::effective_base(&config, env_base.as_deref(), cli_base)?;
    let content = content::load_content(source)?;
    let assets_root = source.join(&config.assets_dir);
    Ok(Site {
        config,
        content,
        base,
        assets_root,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = load_site(&cli.source, cli.base.as_deref())?;

            println!("==> Publishing {}", site.assets_root.display());
            let missing = publish::missing_assets(&site.content, &site.assets_root);
            if !missing.is_empty() {
                println!(
                    "{} referenced asset(s) not found; run 'folio check' for the list",
                    missing.len()
                );
            }
            let stats = publish::copy_assets(&site.assets_root, &cli.output)?;

            println!("==> Generating HTML → {}", cli.output.display());
            let year = chrono::Local::now().year();
            let summary =
                generate::generate(&site.config, &site.content, &site.base, year, &cli.output)?;
            output::print_build_output(&summary, &stats);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load_site(&cli.source, cli.base.as_deref())?;
            let missing = publish::missing_assets(&site.content, &site.assets_root);
            output::print_check_output(&site.content, &site.base, &site.assets_root, &missing);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::stock_content_toml());
        }
        Command::State { width, events } => {
            let content = content::load_content(&cli.source)?;
            let mut session = PageSession::mount(&content, BodyOverflow::default(), width);
            session.dispatch_all(events);
            output::print_session(&session);
        }
    }

    Ok(())
}
