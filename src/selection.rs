//! Single-choice selection state: which service panel is open, whether the
//! mobile menu is showing.
//!
//! ```text
//!            select(k) / toggle(k)
//!   Closed ─────────────────────────▶ Open(k)
//!     ▲                                │  select(j) / toggle(j), j ≠ k
//!     │ close() / toggle(k)            ▼
//!     └─────────────────────────────  Open(j)
//! ```
//!
//! Switching between keys goes straight from `Open(k)` to `Open(j)`; there is
//! no intermediate `Closed`.
//!
//! The mobile menu additionally owns a [`ScrollLock`]: entering `Open` freezes
//! background scrolling, entering `Closed` restores it, and dropping the
//! [`MenuToggle`] restores it no matter what state it was in.

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Switched,
    Closed,
    Unchanged,
}

/// At most one active key at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K> {
    active: Option<K>,
}

impl<K: PartialEq> Selection<K> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.as_ref() == Some(key)
    }

    /// Open `key`, replacing any other open key.
    pub fn select(&mut self, key: K) -> Transition {
        let transition = match &self.active {
            None => Transition::Opened,
            Some(current) if *current == key => Transition::Unchanged,
            Some(_) => Transition::Switched,
        };
        self.active = Some(key);
        transition
    }

    pub fn close(&mut self) -> Transition {
        match self.active.take() {
            Some(_) => Transition::Closed,
            None => Transition::Unchanged,
        }
    }

    /// Like [`select`](Self::select), except that toggling the open key closes it.
    pub fn toggle(&mut self, key: K) -> Transition {
        if self.is_active(&key) {
            self.close()
        } else {
            self.select(key)
        }
    }
}

impl<K: PartialEq> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Suspends and restores scrolling of the host viewport.
///
/// `release` may be called while not acquired and must be a no-op then.
pub trait ScrollLock {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// The page body's `overflow` style, as the menu drives it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyOverflow {
    locked: bool,
}

impl BodyOverflow {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// CSS value for `body { overflow: … }`.
    pub fn css_value(&self) -> &'static str {
        if self.locked { "hidden" } else { "unset" }
    }
}

impl ScrollLock for BodyOverflow {
    fn acquire(&mut self) {
        self.locked = true;
    }

    fn release(&mut self) {
        self.locked = false;
    }
}

/// Mobile navigation menu: an open/closed toggle tied to a scroll lock.
#[derive(Debug)]
pub struct MenuToggle<L: ScrollLock> {
    state: Selection<()>,
    lock: L,
}

impl<L: ScrollLock> MenuToggle<L> {
    pub fn new(lock: L) -> Self {
        Self {
            state: Selection::new(),
            lock,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    pub fn open(&mut self) -> Transition {
        let transition = self.state.select(());
        self.apply(transition)
    }

    pub fn close(&mut self) -> Transition {
        let transition = self.state.close();
        self.apply(transition)
    }

    pub fn toggle(&mut self) -> Transition {
        let transition = self.state.toggle(());
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> Transition {
        match transition {
            Transition::Opened => self.lock.acquire(),
            Transition::Closed => self.lock.release(),
            Transition::Switched | Transition::Unchanged => {}
        }
        transition
    }
}

impl<L: ScrollLock> Drop for MenuToggle<L> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl ScrollLock for Recorder {
        fn acquire(&mut self) {
            self.0.borrow_mut().push("acquire");
        }

        fn release(&mut self) {
            self.0.borrow_mut().push("release");
        }
    }

    #[test]
    fn toggle_opens_then_closes_same_key() {
        let mut sel = Selection::new();
        assert_eq!(sel.toggle("A"), Transition::Opened);
        assert_eq!(sel.active(), Some(&"A"));
        assert_eq!(sel.toggle("A"), Transition::Closed);
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn select_switches_directly() {
        let mut sel = Selection::new();
        sel.select("A");
        assert_eq!(sel.select("B"), Transition::Switched);
        assert_eq!(sel.active(), Some(&"B"));
    }

    #[test]
    fn toggle_other_key_switches() {
        let mut sel = Selection::new();
        sel.toggle("A");
        assert_eq!(sel.toggle("B"), Transition::Switched);
        assert!(sel.is_active(&"B"));
        assert!(!sel.is_active(&"A"));
    }

    #[test]
    fn select_same_key_is_unchanged() {
        let mut sel = Selection::new();
        sel.select("A");
        assert_eq!(sel.select("A"), Transition::Unchanged);
        assert!(sel.is_open());
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut sel: Selection<&str> = Selection::default();
        assert_eq!(sel.close(), Transition::Unchanged);
        assert!(!sel.is_open());
    }

    #[test]
    fn menu_locks_while_open() {
        let mut menu = MenuToggle::new(BodyOverflow::default());
        assert_eq!(menu.lock().css_value(), "unset");
        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.lock().css_value(), "hidden");
        menu.toggle();
        assert!(!menu.is_open());
        assert!(!menu.lock().is_locked());
    }

    #[test]
    fn menu_open_twice_acquires_once() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.0);
        let mut menu = MenuToggle::new(recorder);
        menu.open();
        menu.open();
        menu.close();
        menu.close();
        assert_eq!(*log.borrow(), vec!["acquire", "release"]);
    }

    #[test]
    fn dropping_open_menu_releases_lock() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.0);
        {
            let mut menu = MenuToggle::new(recorder);
            menu.open();
        }
        assert_eq!(*log.borrow(), vec!["acquire", "release"]);
    }

    #[test]
    fn dropping_closed_menu_still_releases() {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.0);
        drop(MenuToggle::new(recorder));
        assert_eq!(*log.borrow(), vec!["release"]);
    }
}
