//! Ranked items and the caller-owned collection they live in.
//!
//! A [`RankedItem`] carries a `rank` (the only sort key) and a
//! `capture_order` (a creation-time sequence number that is never consulted
//! when ordering, only when checking whether a sort kept equal ranks in their
//! original relative order).
//!
//! A [`Collection`] owns up to [`Collection::MAX_SIZE`] items, guarantees that
//! capture orders are unique, and keeps a bounded undo history of its own
//! edits. Algorithms only ever see `&Collection` and work on a private copy.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::UndoHistory;

/// Number of edits [`Collection::undo`] can roll back.
const UNDO_DEPTH: usize = 10;

/// Ordering direction for sorts and sortedness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest rank first.
    #[default]
    Ascending,
    /// Largest rank first.
    Descending,
}

impl SortDirection {
    /// Returns true if `left` must move behind `right` in this direction.
    ///
    /// Strict: equal ranks are never out of order.
    #[must_use]
    pub fn out_of_order(self, left: i64, right: i64) -> bool {
        match self {
            Self::Ascending => left > right,
            Self::Descending => left < right,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        };
        write!(f, "{s}")
    }
}

/// An immutable item with a sort key and a stability tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedItem {
    rank: i64,
    capture_order: u64,
    label: String,
}

impl RankedItem {
    /// Creates an item. Uniqueness of `capture_order` is enforced by the
    /// [`Collection`] it is added to, not here.
    #[must_use]
    pub fn new(rank: i64, capture_order: u64, label: impl Into<String>) -> Self {
        Self {
            rank,
            capture_order,
            label: label.into(),
        }
    }

    /// The sort key.
    #[must_use]
    pub fn rank(&self) -> i64 {
        self.rank
    }

    /// Creation-time sequence number (stability observation key).
    #[must_use]
    pub fn capture_order(&self) -> u64 {
        self.capture_order
    }

    /// Display label supplied by the collaborator.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Comparison equality: two items are duplicates if their ranks match.
    #[must_use]
    pub fn same_rank(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl fmt::Display for RankedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.capture_order)
    }
}

/// The caller-owned, bounded, ordered collection of ranked items.
#[derive(Debug, Clone)]
pub struct Collection {
    items: Vec<RankedItem>,
    history: UndoHistory<Vec<RankedItem>>,
    /// `None` once `u64::MAX` has been handed out or supplied.
    next_capture_order: Option<u64>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Maximum number of items a collection may hold.
    pub const MAX_SIZE: usize = 100;

    /// Creates an empty collection. The first capture order handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            history: UndoHistory::new(UNDO_DEPTH),
            next_capture_order: Some(1),
        }
    }

    /// Builds a collection from ranks, labelling each item with its rank and
    /// assigning capture orders `1..=n` in input order.
    pub fn from_ranks(ranks: &[i64]) -> Result<Self> {
        let mut collection = Self::new();
        for &rank in ranks {
            collection.add_new(rank, rank.to_string())?;
        }
        collection.history.clear();
        Ok(collection)
    }

    /// Builds a collection from pre-tagged items.
    ///
    /// # Errors
    ///
    /// Fails if there are more than [`Self::MAX_SIZE`] items or two items
    /// share a capture order.
    pub fn from_items(items: Vec<RankedItem>) -> Result<Self> {
        if items.len() > Self::MAX_SIZE {
            return Err(Error::invalid(format!(
                "collection holds at most {} items, got {}",
                Self::MAX_SIZE,
                items.len()
            )));
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.capture_order) {
                return Err(Error::invalid(format!(
                    "capture order {} appears more than once",
                    item.capture_order
                )));
            }
        }
        let mut collection = Self::new();
        for item in &items {
            collection.reserve_past(item.capture_order);
        }
        collection.items = items;
        Ok(collection)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if no more items can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= Self::MAX_SIZE
    }

    /// Read-only view of the items in order.
    #[must_use]
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    /// Item at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&RankedItem> {
        self.items.get(position)
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedItem> {
        self.items.iter()
    }

    /// Owned copy of the items, as handed to an algorithm run.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RankedItem> {
        self.items.clone()
    }

    /// Ranks in order.
    #[must_use]
    pub fn ranks(&self) -> Vec<i64> {
        self.items.iter().map(RankedItem::rank).collect()
    }

    /// Returns true if every adjacent pair is in order for `direction`.
    #[must_use]
    pub fn is_sorted(&self, direction: SortDirection) -> bool {
        self.first_inversion(direction).is_none()
    }

    /// First position `i` where `items[i]` and `items[i + 1]` are out of
    /// order for `direction`.
    #[must_use]
    pub fn first_inversion(&self, direction: SortDirection) -> Option<usize> {
        first_inversion(&self.items, direction)
    }

    /// Number of distinct ranks.
    #[must_use]
    pub fn count_unique_ranks(&self) -> usize {
        self.items.iter().map(RankedItem::rank).collect::<HashSet<_>>().len()
    }

    /// Number of items whose rank already appeared earlier.
    #[must_use]
    pub fn count_duplicates(&self) -> usize {
        self.items.len() - self.count_unique_ranks()
    }

    /// Share of adjacent pairs already in ascending order, 0–100.
    #[must_use]
    pub fn sortedness_percentage(&self) -> f64 {
        sortedness_percentage(&self.items)
    }

    /// One-line summary, e.g. `"5 elements, 4 unique, 1 duplicates, 50% sorted"`.
    #[must_use]
    pub fn analysis(&self) -> String {
        if self.is_empty() {
            return "Empty list".to_string();
        }
        let mut summary = format!("{} elements, {} unique", self.len(), self.count_unique_ranks());
        let dupes = self.count_duplicates();
        if dupes > 0 {
            summary.push_str(&format!(", {dupes} duplicates"));
        }
        summary.push_str(&format!(", {:.0}% sorted", self.sortedness_percentage()));
        summary
    }

    /// Items rendered as `[label#capture]` separated by spaces.
    #[must_use]
    pub fn display_string(&self) -> String {
        if self.is_empty() {
            return "(empty)".to_string();
        }
        self.items.iter().map(|item| format!("[{item}]")).collect::<Vec<_>>().join(" ")
    }

    // ------------------------------------------------------------------
    // Edits (each one is undoable)
    // ------------------------------------------------------------------

    /// Creates an item with the next free capture order and appends it.
    pub fn add_new(&mut self, rank: i64, label: impl Into<String>) -> Result<&RankedItem> {
        self.ensure_capacity()?;
        let capture_order = self.fresh_capture_order()?;
        let item = RankedItem::new(rank, capture_order, label);
        self.save_state();
        self.reserve_past(capture_order);
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Appends a pre-tagged item.
    ///
    /// # Errors
    ///
    /// Fails if the collection is full or the capture order is already used.
    pub fn append(&mut self, item: RankedItem) -> Result<()> {
        self.ensure_capacity()?;
        if self.items.iter().any(|i| i.capture_order == item.capture_order) {
            return Err(Error::invalid(format!(
                "capture order {} is already in the collection",
                item.capture_order
            )));
        }
        self.save_state();
        self.reserve_past(item.capture_order);
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the item at `position`.
    pub fn remove(&mut self, position: usize) -> Result<RankedItem> {
        self.check_position(position)?;
        self.save_state();
        Ok(self.items.remove(position))
    }

    /// Clones the item at `position` with a fresh capture order and inserts
    /// the copy right after the original.
    pub fn duplicate(&mut self, position: usize) -> Result<&RankedItem> {
        self.check_position(position)?;
        self.ensure_capacity()?;
        let capture_order = self.fresh_capture_order()?;
        let original = &self.items[position];
        let copy = RankedItem::new(original.rank, capture_order, original.label.clone());
        self.save_state();
        self.reserve_past(capture_order);
        self.items.insert(position + 1, copy);
        Ok(&self.items[position + 1])
    }

    /// Exchanges the items at `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_position(i)?;
        self.check_position(j)?;
        self.save_state();
        self.items.swap(i, j);
        Ok(())
    }

    /// Removes every item. Capture orders keep counting upwards.
    pub fn clear(&mut self) {
        self.save_state();
        self.items.clear();
    }

    /// Shuffles deterministically from `seed`.
    pub fn shuffle(&mut self, seed: u64) {
        self.save_state();
        let mut rng = SmallRng::seed_from_u64(seed);
        self.items.shuffle(&mut rng);
    }

    /// Reverses the order of the items.
    pub fn reverse(&mut self) {
        self.save_state();
        self.items.reverse();
    }

    /// Stable-sorts the items by rank.
    pub fn sort(&mut self, direction: SortDirection) {
        self.save_state();
        match direction {
            SortDirection::Ascending => self.items.sort_by_key(RankedItem::rank),
            SortDirection::Descending => self.items.sort_by_key(|i| std::cmp::Reverse(i.rank)),
        }
    }

    /// Restores the state before the most recent edit. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.items = previous;
                true
            }
            None => false,
        }
    }

    /// Number of edits that can currently be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    fn fresh_capture_order(&self) -> Result<u64> {
        self.next_capture_order
            .ok_or_else(|| Error::invalid("no capture orders left after u64::MAX"))
    }

    /// Makes every future capture order greater than `used`.
    fn reserve_past(&mut self, used: u64) {
        self.next_capture_order = match (self.next_capture_order, used.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    fn save_state(&mut self) {
        self.history.push(self.items.clone());
    }

    fn ensure_capacity(&self) -> Result<()> {
        if self.is_full() {
            return Err(Error::invalid(format!(
                "collection is at maximum capacity ({})",
                Self::MAX_SIZE
            )));
        }
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.items.len() {
            return Err(Error::invalid(format!(
                "position {position} is out of range for a collection of {}",
                self.items.len()
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a RankedItem;
    type IntoIter = std::slice::Iter<'a, RankedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// First out-of-order adjacent position in `items` for `direction`.
pub(crate) fn first_inversion(items: &[RankedItem], direction: SortDirection) -> Option<usize> {
    items.windows(2).position(|pair| direction.out_of_order(pair[0].rank, pair[1].rank))
}

/// Share of adjacent pairs in ascending order, 0–100.
pub(crate) fn sortedness_percentage(items: &[RankedItem]) -> f64 {
    if items.len() <= 1 {
        return 100.0;
    }
    let in_order = items.windows(2).filter(|pair| pair[0].rank <= pair[1].rank).count();
    in_order as f64 / (items.len() - 1) as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ranks_assigns_capture_orders() {
        let c = Collection::from_ranks(&[3, 1, 2]).unwrap();
        let orders: Vec<u64> = c.iter().map(RankedItem::capture_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(c.ranks(), vec![3, 1, 2]);
        assert_eq!(c.undo_depth(), 0);
    }

    #[test]
    fn test_from_items_rejects_duplicate_capture_order() {
        let items = vec![RankedItem::new(1, 7, "a"), RankedItem::new(2, 7, "b")];
        assert!(matches!(Collection::from_items(items), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_items_rejects_oversized() {
        let items: Vec<RankedItem> =
            (0..=Collection::MAX_SIZE as u64).map(|i| RankedItem::new(0, i, "x")).collect();
        assert!(Collection::from_items(items).is_err());
    }

    #[test]
    fn test_max_capture_order_is_accepted_but_exhausts_counter() {
        let mut c = Collection::from_items(vec![RankedItem::new(1, u64::MAX, "a")]).unwrap();
        assert_eq!(c.len(), 1);
        assert!(matches!(c.add_new(2, "b"), Err(Error::InvalidInput(_))));
        assert!(matches!(c.duplicate(0), Err(Error::InvalidInput(_))));
        assert_eq!(c.len(), 1);
        assert_eq!(c.undo_depth(), 0);
        c.append(RankedItem::new(3, 5, "c")).unwrap();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_append_max_capture_order() {
        let mut c = Collection::new();
        c.append(RankedItem::new(1, u64::MAX, "a")).unwrap();
        assert!(matches!(c.add_new(2, "b"), Err(Error::InvalidInput(_))));
        assert!(c.append(RankedItem::new(2, u64::MAX, "b")).is_err());
        assert_eq!(c.ranks(), vec![1]);
    }

    #[test]
    fn test_from_items_continues_capture_orders() {
        let mut c = Collection::from_items(vec![RankedItem::new(4, 41, "four")]).unwrap();
        let added = c.add_new(5, "five").unwrap();
        assert_eq!(added.capture_order(), 42);
    }

    #[test]
    fn test_add_new_respects_capacity() {
        let mut c = Collection::new();
        for i in 0..Collection::MAX_SIZE {
            c.add_new(i as i64, "x").unwrap();
        }
        assert!(c.is_full());
        assert!(c.add_new(0, "overflow").is_err());
        assert_eq!(c.len(), Collection::MAX_SIZE);
    }

    #[test]
    fn test_append_rejects_used_capture_order() {
        let mut c = Collection::from_ranks(&[1]).unwrap();
        assert!(c.append(RankedItem::new(9, 1, "clash")).is_err());
        c.append(RankedItem::new(9, 10, "ok")).unwrap();
        assert_eq!(c.add_new(3, "next").unwrap().capture_order(), 11);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut c = Collection::from_ranks(&[1, 2]).unwrap();
        assert!(c.remove(2).is_err());
        let removed = c.remove(0).unwrap();
        assert_eq!(removed.rank(), 1);
        assert_eq!(c.ranks(), vec![2]);
    }

    #[test]
    fn test_duplicate_gets_fresh_capture_order() {
        let mut c = Collection::from_ranks(&[5, 7]).unwrap();
        let dup = c.duplicate(0).unwrap().clone();
        assert_eq!(dup.rank(), 5);
        assert_eq!(dup.label(), "5");
        assert_eq!(dup.capture_order(), 3);
        assert_eq!(c.ranks(), vec![5, 5, 7]);
        assert!(c.items()[0].same_rank(&c.items()[1]));
        assert_ne!(c.items()[0], c.items()[1]);
    }

    #[test]
    fn test_is_sorted_both_directions() {
        let asc = Collection::from_ranks(&[0, 1, 1, 4]).unwrap();
        assert!(asc.is_sorted(SortDirection::Ascending));
        assert!(!asc.is_sorted(SortDirection::Descending));

        let desc = Collection::from_ranks(&[4, 4, 2]).unwrap();
        assert!(desc.is_sorted(SortDirection::Descending));
        assert_eq!(desc.first_inversion(SortDirection::Ascending), Some(1));

        assert!(Collection::new().is_sorted(SortDirection::Ascending));
    }

    #[test]
    fn test_reverse_and_undo() {
        let mut c = Collection::from_ranks(&[1, 2, 3]).unwrap();
        c.reverse();
        assert_eq!(c.ranks(), vec![3, 2, 1]);
        assert!(c.undo());
        assert_eq!(c.ranks(), vec![1, 2, 3]);
        assert!(!c.undo());
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let mut c = Collection::from_ranks(&[1, 2]).unwrap();
        for _ in 0..25 {
            c.reverse();
        }
        assert_eq!(c.undo_depth(), UNDO_DEPTH);
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let ranks: Vec<i64> = (0..20).collect();
        let mut a = Collection::from_ranks(&ranks).unwrap();
        let mut b = Collection::from_ranks(&ranks).unwrap();
        a.shuffle(42);
        b.shuffle(42);
        assert_eq!(a.items(), b.items());

        let mut sorted = a.ranks();
        sorted.sort_unstable();
        assert_eq!(sorted, ranks);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut c = Collection::from_ranks(&[2, 1, 2, 1]).unwrap();
        c.sort(SortDirection::Ascending);
        let orders: Vec<u64> = c.iter().map(RankedItem::capture_order).collect();
        assert_eq!(orders, vec![2, 4, 1, 3]);
        c.sort(SortDirection::Descending);
        assert_eq!(c.ranks(), vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_analysis_summary() {
        let c = Collection::from_ranks(&[1, 2, 2, 0, 3]).unwrap();
        assert_eq!(c.count_unique_ranks(), 4);
        assert_eq!(c.count_duplicates(), 1);
        assert_eq!(c.analysis(), "5 elements, 4 unique, 1 duplicates, 75% sorted");
        assert_eq!(Collection::new().analysis(), "Empty list");
    }

    #[test]
    fn test_display_string() {
        let c = Collection::from_ranks(&[3, 1]).unwrap();
        assert_eq!(c.display_string(), "[3#1] [1#2]");
        assert_eq!(Collection::new().display_string(), "(empty)");
    }

    #[test]
    fn test_swap_checks_bounds() {
        let mut c = Collection::from_ranks(&[1, 2]).unwrap();
        assert!(c.swap(0, 5).is_err());
        c.swap(0, 1).unwrap();
        assert_eq!(c.ranks(), vec![2, 1]);
    }
}
