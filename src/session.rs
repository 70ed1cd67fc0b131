//! One mounted page: every state machine wired to discrete UI events.
//!
//! [`PageSession`] is what a live view layer would hold while the page is
//! open. Each [`UiEvent`] runs synchronously to completion; there are no timers
//! and nothing spans two events.
//!
//! Wiring:
//!
//! - `Resize` feeds the [`ViewportWatch`]; a breakpoint crossing updates the
//!   showcase pager's page size (the index is left alone).
//! - Showcase and before/after controls drive a [`Pager`] and a [`PairSlider`].
//! - Clicking a service card opens its detail panel, or navigates to the
//!   card's link when it has one.
//! - Anchor navigation, `Escape` and outside clicks close the menu and any open
//!   panel.
//! - Dropping the session drops the [`MenuToggle`], which releases the scroll
//!   lock whatever state the menu was in.
//!
//! `folio state` replays a list of events through a session and prints the
//! resulting state, which is handy for checking a content file's paging.

use crate::content::PortfolioContent;
use crate::pager::{PairSlider, Pager};
use crate::selection::{MenuToggle, ScrollLock, Selection};
use crate::viewport::ViewportWatch;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Resize(u32),
    ShowcaseNext,
    ShowcasePrev,
    ShowcaseJump(i64),
    PairNext,
    PairPrev,
    PairJump(i64),
    /// Click on a service card, by title.
    ServiceClick(String),
    CloseService,
    ToggleMenu,
    CloseMenu,
    /// Follow an in-page anchor (`#contact`).
    Navigate(String),
    Escape,
    OutsideClick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventError(String);

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized event: {:?}", self.0)
    }
}

impl std::error::Error for ParseEventError {}

impl FromStr for UiEvent {
    type Err = ParseEventError;

    /// Parses the `folio state` event syntax:
    /// `resize:700`, `next`, `prev`, `jump:2`, `pair-next`, `pair-prev`,
    /// `pair:1`, `service:Events`, `close`, `menu`, `close-menu`,
    /// `goto:#about`, `esc`, `outside`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEventError(s.to_string());
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let number = |arg: Option<&str>| -> Result<i64, ParseEventError> {
            arg.and_then(|a| a.trim().parse().ok()).ok_or_else(err)
        };
        let event = match (name.trim(), arg) {
            ("resize", Some(_)) => {
                let width = u32::try_from(number(arg)?).map_err(|_| err())?;
                UiEvent::Resize(width)
            }
            ("next", None) => UiEvent::ShowcaseNext,
            ("prev", None) => UiEvent::ShowcasePrev,
            ("jump", Some(_)) => UiEvent::ShowcaseJump(number(arg)?),
            ("pair-next", None) => UiEvent::PairNext,
            ("pair-prev", None) => UiEvent::PairPrev,
            ("pair", Some(_)) => UiEvent::PairJump(number(arg)?),
            ("service", Some(title)) if !title.is_empty() => {
                UiEvent::ServiceClick(title.to_string())
            }
            ("close", None) => UiEvent::CloseService,
            ("menu", None) => UiEvent::ToggleMenu,
            ("close-menu", None) => UiEvent::CloseMenu,
            ("goto", Some(anchor)) if anchor.starts_with('#') => {
                UiEvent::Navigate(anchor.to_string())
            }
            ("esc", None) => UiEvent::Escape,
            ("outside", None) => UiEvent::OutsideClick,
            _ => return Err(err()),
        };
        Ok(event)
    }
}

/// Live UI state for one mounted page.
#[derive(Debug)]
pub struct PageSession<L: ScrollLock> {
    viewport: ViewportWatch,
    showcase: Pager,
    pairs: PairSlider,
    service: Selection<String>,
    menu: MenuToggle<L>,
    location: Option<String>,
    /// Service title → link anchor, for cards that navigate instead of opening.
    service_links: HashMap<String, Option<String>>,
}

impl<L: ScrollLock> PageSession<L> {
    /// Mount a session. `width` is the first viewport measurement, if known.
    pub fn mount(content: &PortfolioContent, lock: L, width: Option<u32>) -> Self {
        let viewport = match width {
            Some(w) => ViewportWatch::with_width(w),
            None => ViewportWatch::new(),
        };
        let showcase = Pager::new(content.showcase.items.len(), viewport.current());
        let service_links = content
            .services
            .entries
            .iter()
            .map(|s| (s.title.clone(), s.link.clone()))
            .collect();
        Self {
            viewport,
            showcase,
            pairs: PairSlider::new(content.highlights.pairs.len()),
            service: Selection::new(),
            menu: MenuToggle::new(lock),
            location: None,
            service_links,
        }
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Resize(width) => {
                if let Some(size) = self.viewport.resize(width) {
                    self.showcase.set_page_size(size);
                }
            }
            UiEvent::ShowcaseNext => self.showcase.next(),
            UiEvent::ShowcasePrev => self.showcase.prev(),
            UiEvent::ShowcaseJump(page) => self.showcase.jump_to(page),
            UiEvent::PairNext => self.pairs.next(),
            UiEvent::PairPrev => self.pairs.prev(),
            UiEvent::PairJump(pair) => self.pairs.jump_to(pair),
            UiEvent::ServiceClick(title) => self.click_service(title),
            UiEvent::CloseService => {
                self.service.close();
            }
            UiEvent::ToggleMenu => {
                self.menu.toggle();
            }
            UiEvent::CloseMenu => {
                self.menu.close();
            }
            UiEvent::Navigate(anchor) => self.navigate(anchor),
            UiEvent::Escape | UiEvent::OutsideClick => self.close_all(),
        }
    }

    /// Dispatch a sequence of events. Consecutive resizes are a burst and
    /// only the width they settle on is applied.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = UiEvent>) {
        let mut widths = Vec::new();
        for event in events {
            match event {
                UiEvent::Resize(width) => widths.push(width),
                other => {
                    self.settle_resizes(&mut widths);
                    self.dispatch(other);
                }
            }
        }
        self.settle_resizes(&mut widths);
    }

    fn settle_resizes(&mut self, widths: &mut Vec<u32>) {
        if let Some(size) = self.viewport.settle(widths.drain(..)) {
            self.showcase.set_page_size(size);
        }
    }

    fn click_service(&mut self, title: String) {
        match self.service_links.get(&title) {
            Some(Some(link)) => {
                let link = link.clone();
                self.navigate(link);
            }
            Some(None) => {
                self.service.select(title);
            }
            None => {}
        }
    }

    fn navigate(&mut self, anchor: String) {
        self.close_all();
        self.location = Some(anchor);
    }

    fn close_all(&mut self) {
        self.service.close();
        self.menu.close();
    }

    pub fn page_size(&self) -> usize {
        self.viewport.current()
    }

    pub fn viewport(&self) -> &ViewportWatch {
        &self.viewport
    }

    pub fn showcase(&self) -> &Pager {
        &self.showcase
    }

    pub fn pairs(&self) -> &PairSlider {
        &self.pairs
    }

    pub fn open_service(&self) -> Option<&str> {
        self.service.active().map(String::as_str)
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn scroll_lock(&self) -> &L {
        self.menu.lock()
    }

    /// Last anchor navigated to.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
