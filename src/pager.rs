//! Carousel paging.
//!
//! A [`Pager`] tracks a position inside a fixed-length sequence and moves it a
//! page at a time. Index arithmetic wraps around the full sequence length;
//! the displayed window does not:
//!
//! ```text
//! total = 9, page_size = 3
//!
//! next:  0 → 3 → 6 → 0
//! prev:  0 → 6
//!
//! index = 7  →  visible = [7, 8]     (clamped, never [7, 8, 0])
//! ```
//!
//! Changing the page size (viewport resize) keeps the index as-is, so the first
//! visible item stays put even when it no longer sits on a page boundary.
//!
//! All arithmetic that can go below zero uses `rem_euclid`, never `%` on signed
//! values.
//!
//! [`PairSlider`] is the before/after specialization: page size pinned to 1.
//!
//! ## Static compilation
//!
//! [`reachable_indices`] enumerates every index a visitor can reach from index 0
//! with `next`, `prev` and indicator jumps at one page size. The published page
//! renders a slide for every index, since a resize keeps whatever index the
//! previous page size reached; the build summary reports the reachable count
//! per breakpoint.

use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Range;

/// Position within a sequence of `total` items, moving `page_size` at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    total: usize,
    page_size: usize,
    index: usize,
}

impl Pager {
    /// A pager at index 0. A page size of 0 is treated as 1.
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            index: 0,
        }
    }

    /// A pager at an arbitrary index, reduced modulo `total`.
    pub fn at(total: usize, page_size: usize, index: usize) -> Self {
        let mut pager = Self::new(total, page_size);
        if total > 0 {
            pager.index = index % total;
        }
        pager
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn next(&mut self) {
        if self.total == 0 {
            return;
        }
        self.index = (self.index + self.page_size) % self.total;
    }

    pub fn prev(&mut self) {
        if self.total == 0 {
            return;
        }
        self.index = self.offset(-(self.page_size as i64));
    }

    /// Jump to a zero-based page. Out-of-range and negative pages wrap modulo
    /// the page count.
    pub fn jump_to(&mut self, page: i64) {
        if self.total == 0 {
            return;
        }
        let page = page.rem_euclid(self.page_count() as i64) as usize;
        self.index = (page * self.page_size) % self.total;
    }

    /// Replace the page size without moving the index.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Number of indicator dots: `ceil(total / page_size)`.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Whether indicator `page` is lit (the index sits exactly on its boundary).
    pub fn is_page_active(&self, page: usize) -> bool {
        self.total > 0 && self.index == page * self.page_size
    }

    /// The current page, if the index sits on a page boundary.
    pub fn current_page(&self) -> Option<usize> {
        (self.total > 0 && self.index % self.page_size == 0).then(|| self.index / self.page_size)
    }

    /// Index range of the visible window, clamped at the end of the sequence.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.index + self.page_size).min(self.total);
        self.index.min(end)..end
    }

    /// The visible window into `items`, clamped at the end of the slice.
    pub fn visible_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// Index after `next()`, without moving.
    pub fn peek_next(&self) -> usize {
        let mut probe = *self;
        probe.next();
        probe.index
    }

    /// Index after `prev()`, without moving.
    pub fn peek_prev(&self) -> usize {
        let mut probe = *self;
        probe.prev();
        probe.index
    }

    /// Index after `jump_to(page)`, without moving.
    pub fn peek_jump(&self, page: i64) -> usize {
        let mut probe = *self;
        probe.jump_to(page);
        probe.index
    }

    fn offset(&self, delta: i64) -> usize {
        (self.index as i64 + delta).rem_euclid(self.total as i64) as usize
    }
}

/// Every index reachable from 0 through `next`, `prev` and page jumps, sorted.
pub fn reachable_indices(total: usize, page_size: usize) -> Vec<usize> {
    let start = Pager::new(total, page_size);
    if start.is_empty() {
        return vec![0];
    }
    let mut seen = BTreeSet::from([start.index()]);
    let mut queue = vec![start];
    while let Some(pager) = queue.pop() {
        let jumps = (0..pager.page_count() as i64).map(|page| pager.peek_jump(page));
        let neighbours = [pager.peek_next(), pager.peek_prev()].into_iter().chain(jumps);
        for index in neighbours {
            if seen.insert(index) {
                queue.push(Pager::at(total, page_size, index));
            }
        }
    }
    seen.into_iter().collect()
}

/// Before/after slider: one pair visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairSlider {
    pager: Pager,
}

impl PairSlider {
    pub fn new(pairs: usize) -> Self {
        Self {
            pager: Pager::new(pairs, 1),
        }
    }

    pub fn at(pairs: usize, index: usize) -> Self {
        Self {
            pager: Pager::at(pairs, 1, index),
        }
    }

    pub fn index(&self) -> usize {
        self.pager.index()
    }

    pub fn len(&self) -> usize {
        self.pager.total()
    }

    pub fn is_empty(&self) -> bool {
        self.pager.is_empty()
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn prev(&mut self) {
        self.pager.prev();
    }

    pub fn jump_to(&mut self, pair: i64) {
        self.pager.jump_to(pair);
    }

    pub fn is_active(&self, pair: usize) -> bool {
        self.pager.is_page_active(pair)
    }

    pub fn peek_next(&self) -> usize {
        self.pager.peek_next()
    }

    pub fn peek_prev(&self) -> usize {
        self.pager.peek_prev()
    }

    /// The pair currently shown.
    pub fn current<'a, T>(&self, pairs: &'a [T]) -> Option<&'a T> {
        self.pager.visible_items(pairs).first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_around() {
        let mut pager = Pager::new(9, 3);
        pager.next();
        assert_eq!(pager.index(), 3);
        pager.next();
        assert_eq!(pager.index(), 6);
        pager.next();
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn prev_from_start_wraps_to_last_page() {
        let mut pager = Pager::new(9, 3);
        pager.prev();
        assert_eq!(pager.index(), 6);
    }

    #[test]
    fn prev_with_page_larger_than_total_stays_non_negative() {
        let mut pager = Pager::new(2, 3);
        pager.prev();
        assert_eq!(pager.index(), 1);
        pager.prev();
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn next_then_prev_is_identity() {
        for total in 1..12 {
            for size in 1..5 {
                for index in 0..total {
                    let mut pager = Pager::at(total, size, index);
                    pager.next();
                    pager.prev();
                    assert_eq!(pager.index(), index, "total={total} size={size}");
                    pager.prev();
                    pager.next();
                    assert_eq!(pager.index(), index, "total={total} size={size}");
                }
            }
        }
    }

    #[test]
    fn uneven_total_cycles_through_offsets() {
        let mut pager = Pager::new(9, 2);
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push(pager.index());
            pager.next();
        }
        assert_eq!(seen, vec![0, 2, 4, 6, 8, 1, 3, 5, 7]);
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn jump_to_pages() {
        let mut pager = Pager::new(9, 3);
        let landed: Vec<usize> = (0..4)
            .map(|page| {
                pager.jump_to(page);
                pager.index()
            })
            .collect();
        assert_eq!(landed, vec![0, 3, 6, 0]);
    }

    #[test]
    fn jump_to_negative_page_uses_euclidean_modulo() {
        let mut pager = Pager::new(9, 3);
        pager.jump_to(-1);
        assert_eq!(pager.index(), 6);
        pager.jump_to(-4);
        assert_eq!(pager.index(), 6);
    }

    #[test]
    fn jump_to_wraps_modulo_page_count_on_uneven_total() {
        let mut pager = Pager::new(9, 2);
        assert_eq!(pager.page_count(), 5);
        pager.jump_to(5);
        assert_eq!(pager.index(), 0);
        pager.jump_to(4);
        assert_eq!(pager.index(), 8);
    }

    #[test]
    fn visible_window_is_clamped_not_wrapped() {
        let items: Vec<u32> = (0..9).collect();
        let pager = Pager::at(9, 3, 7);
        assert_eq!(pager.visible_items(&items), &[7, 8]);
        assert_eq!(pager.visible_range(), 7..9);
    }

    #[test]
    fn visible_window_full_page() {
        let items = ["a", "b", "c", "d"];
        let pager = Pager::at(4, 3, 1);
        assert_eq!(pager.visible_items(&items), &["b", "c", "d"]);
    }

    #[test]
    fn page_size_change_keeps_index() {
        let items: Vec<u32> = (0..9).collect();
        let mut pager = Pager::new(9, 2);
        pager.next();
        pager.next();
        assert_eq!(pager.index(), 4);

        pager.set_page_size(3);
        assert_eq!(pager.index(), 4);
        assert_eq!(pager.visible_items(&items), &[4, 5, 6]);
        assert_eq!(pager.current_page(), None);
        assert!((0..pager.page_count()).all(|page| !pager.is_page_active(page)));

        pager.next();
        assert_eq!(pager.index(), 7);
        assert_eq!(pager.visible_items(&items).len(), 2);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let mut pager = Pager::new(5, 0);
        assert_eq!(pager.page_size(), 1);
        pager.set_page_size(0);
        pager.next();
        assert_eq!(pager.index(), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Pager::new(9, 3).page_count(), 3);
        assert_eq!(Pager::new(9, 2).page_count(), 5);
        assert_eq!(Pager::new(9, 1).page_count(), 9);
        assert_eq!(Pager::new(0, 3).page_count(), 0);
    }

    #[test]
    fn indicator_active_only_on_boundary() {
        let mut pager = Pager::new(9, 3);
        pager.next();
        assert!(pager.is_page_active(1));
        assert!(!pager.is_page_active(0));
        assert_eq!(pager.current_page(), Some(1));
    }

    #[test]
    fn empty_sequence_is_inert() {
        let mut pager = Pager::new(0, 3);
        pager.next();
        pager.prev();
        pager.jump_to(2);
        pager.jump_to(-7);
        assert_eq!(pager.index(), 0);
        assert!(pager.visible_items::<u8>(&[]).is_empty());
        assert_eq!(pager.current_page(), None);
        assert!(!pager.is_page_active(0));
    }

    #[test]
    fn peek_does_not_move() {
        let pager = Pager::new(9, 3);
        assert_eq!(pager.peek_next(), 3);
        assert_eq!(pager.peek_prev(), 6);
        assert_eq!(pager.peek_jump(2), 6);
        assert_eq!(pager.index(), 0);
    }

    #[test]
    fn reachable_indices_on_aligned_total() {
        assert_eq!(reachable_indices(9, 3), vec![0, 3, 6]);
    }

    #[test]
    fn reachable_indices_on_uneven_total_cover_everything() {
        assert_eq!(reachable_indices(9, 2), (0..9).collect::<Vec<_>>());
        assert_eq!(reachable_indices(4, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn reachable_indices_empty() {
        assert_eq!(reachable_indices(0, 3), vec![0]);
    }

    #[test]
    fn pair_slider_steps_one_pair() {
        let pairs = ["chez-mia", "brute", "bbn"];
        let mut slider = PairSlider::new(pairs.len());
        assert_eq!(slider.current(&pairs), Some(&"chez-mia"));
        slider.prev();
        assert_eq!(slider.current(&pairs), Some(&"bbn"));
        slider.next();
        slider.next();
        assert_eq!(slider.current(&pairs), Some(&"brute"));
        slider.jump_to(2);
        assert!(slider.is_active(2));
        slider.jump_to(-1);
        assert_eq!(slider.index(), 2);
    }

    #[test]
    fn pair_slider_empty() {
        let mut slider = PairSlider::new(0);
        slider.next();
        assert!(slider.is_empty());
        assert_eq!(slider.current::<u8>(&[]), None);
    }
}
