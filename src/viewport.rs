//! Responsive page-size policy.
//!
//! Carousels show a number of items per page that depends on the viewport
//! width. The thresholds are an inclusive lower bound, checked widest first:
//!
//! | width ≥ | items per page |
//! |---------|----------------|
//! | 768     | 3              |
//! | 640     | 2              |
//! | 0       | 1              |
//!
//! Before the first measurement the page size is [`DEFAULT_PAGE_SIZE`] (3),
//! so a desktop visitor never sees a one-item layout flash by.
//!
//! [`ViewportWatch`] is the observable form: a pull accessor
//! ([`ViewportWatch::current`]) plus push notification
//! ([`ViewportWatch::on_change`]). Subscribers are told only when a resize
//! crosses a breakpoint. [`ViewportWatch::settle`] coalesces a burst of resize
//! events into the final width, which is all the page size has to converge to.
//!
//! The same table drives the static output: [`crate::generate`] emits one
//! `@media (min-width: …)` rule per breakpoint.

use std::fmt;

/// One row of the breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub min_width: u32,
    pub page_size: usize,
}

/// Breakpoints ordered from widest to narrowest. The last row must start at 0.
pub const BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint {
        min_width: 768,
        page_size: 3,
    },
    Breakpoint {
        min_width: 640,
        page_size: 2,
    },
    Breakpoint {
        min_width: 0,
        page_size: 1,
    },
];

pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Items per page for a viewport width.
pub fn page_size(viewport_width: u32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|bp| viewport_width >= bp.min_width)
        .map(|bp| bp.page_size)
        .unwrap_or(1)
}

/// The width range `[min, max)` a breakpoint row covers; `None` means unbounded.
pub fn breakpoint_range(index: usize) -> Option<(u32, Option<u32>)> {
    let bp = BREAKPOINTS.get(index)?;
    let upper = index
        .checked_sub(1)
        .and_then(|i| BREAKPOINTS.get(i))
        .map(|wider| wider.min_width);
    Some((bp.min_width, upper))
}

/// Handle returned by [`ViewportWatch::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(usize)>;

/// Observable page size derived from the current viewport width.
pub struct ViewportWatch {
    width: Option<u32>,
    page_size: usize,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl ViewportWatch {
    pub fn new() -> Self {
        Self {
            width: None,
            page_size: DEFAULT_PAGE_SIZE,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Start from a known width (e.g. the first measurement at mount).
    pub fn with_width(width: u32) -> Self {
        let mut watch = Self::new();
        watch.width = Some(width);
        watch.page_size = page_size(width);
        watch
    }

    /// Current page size.
    pub fn current(&self) -> usize {
        self.page_size
    }

    /// Last measured width, if any.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Register a callback invoked with the new page size on every change.
    pub fn on_change(&mut self, listener: impl FnMut(usize) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Record a resize event.
    ///
    /// Returns the new page size when the width crossed a breakpoint, after
    /// notifying subscribers; `None` when the page size is unchanged.
    pub fn resize(&mut self, width: u32) -> Option<usize> {
        self.width = Some(width);
        let size = page_size(width);
        if size == self.page_size {
            return None;
        }
        self.page_size = size;
        for (_, listener) in &mut self.listeners {
            listener(size);
        }
        Some(size)
    }

    /// Apply a burst of resize events, keeping only the settled (last) width.
    ///
    /// Subscribers fire at most once, and only if the settled page size differs
    /// from the one before the burst.
    pub fn settle(&mut self, widths: impl IntoIterator<Item = u32>) -> Option<usize> {
        let last = widths.into_iter().last()?;
        self.resize(last)
    }
}

impl Default for ViewportWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewportWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportWatch")
            .field("width", &self.width)
            .field("page_size", &self.page_size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
