//! # Folio
//!
//! A static generator for single-page marketing and PR portfolios. One
//! `content.toml` describes the page (hero, about, services, a photo & video
//! carousel, a gallery, client highlights with a before/after slider, contact);
//! `folio build` turns it into a self-contained `index.html` plus the media it
//! references.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      content/config.toml + content/content.toml  →  SiteConfig, PortfolioContent
//! 2. Publish   content/public/                              →  dist/ (hash-skipped copies)
//! 3. Generate  SiteConfig + PortfolioContent                →  dist/index.html, dist/site.json
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`assets`] | Logical asset paths → URLs under the deployment base prefix |
//! | [`viewport`] | Breakpoint table: viewport width → carousel page size, with change notification |
//! | [`pager`] | Cyclic carousel pager and the one-at-a-time before/after slider |
//! | [`selection`] | Single-choice selection (service panels) and the scroll-locking mobile menu |
//! | [`session`] | All of the above wired to UI events for one mounted page |
//! | [`content`] | Page content model, stock content and validation |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, theme CSS |
//! | [`naming`] | Slugs and fragment ids shared by renderers and links |
//! | [`generate`] | Renders the page with Maud, compiling UI states into `:target` markup |
//! | [`publish`] | Copies the assets directory into the output; reports missing references |
//! | [`output`] | CLI output formatting |
//!
//! # State Machines, Rendered Statically
//!
//! The carousel, pair slider, service panels and mobile menu are plain state
//! machines ([`pager::Pager`], [`pager::PairSlider`], [`selection::Selection`],
//! [`selection::MenuToggle`]) with no DOM attached. [`session::PageSession`]
//! drives them from events the way a live view would. The generator enumerates
//! their reachable states and emits each as fragment-addressable markup, so the
//! published page behaves the same without a script runtime. The only script
//! maps Escape to closing the open panel or menu.
//!
//! # Base Prefix
//!
//! The site may be served from a sub-path (`https://example.github.io/folio/`).
//! The prefix comes from `config.toml`, then `FOLIO_BASE`, then `--base`, and
//! is resolved once into an [`assets::BasePrefix`] that every renderer borrows.

pub mod assets;
pub mod config;
pub mod content;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pager;
pub mod publish;
pub mod selection;
pub mod session;
pub mod viewport;
