/*
SPDX-License-Identifier: MIT
*/

//! Generic priority container with deterministic tie-breaking.
//!
//! [`PriorityQueue`] keeps its entries in one total order: greatest
//! priority first, and first-in first-served among entries whose priorities
//! compare equal.  Every entry carries a monotonically increasing insertion
//! stamp; the stamp is what makes ties, duplicate removal and duplication
//! reproducible.
//!
//! | Topic | Choice |
//! |---|---|
//! | Element/priority capabilities | trait bounds: `E: PartialEq`, `P: Ord`, `Clone` only for duplication |
//! | Storage | sorted `Vec`, binary-search insertion |
//! | Orientation | max-first; wrap the priority in [`std::cmp::Reverse`] for min-first |
//! | Traversal | fresh borrowing iterator per call — mutation during iteration is a compile error |
//!
//! Callers who need "smallest first" (the registry orders earliest date
//! first) wrap the priority in `Reverse`, the standard-library idiom.

use thiserror::Error;

// ── Error type ────────────────────────────────────────────────────────────────

/// Lookup failure inside a [`PriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// No stored entry matched the given element (and, for priority
    /// changes, the given old priority).
    #[error("no entry matches the given element")]
    ElementNotFound,
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// One stored entry.  `stamp` is the insertion index: assigned once at
/// insertion, never reused, fresh on relocation.
#[derive(Debug, Clone)]
struct Slot<E, P> {
    element: E,
    priority: P,
    stamp: u64,
}

/// A sequence sorted by priority (greatest first) with insertion-order
/// tie-breaking.
///
/// Duplicate priorities and duplicate elements are both allowed.  Cloning
/// the queue (`E: Clone`, `P: Clone`) produces an independent copy with
/// identical sequence and insertion stamps.
///
/// # Invariant
/// Entries with equal priorities always appear in ascending stamp order:
/// [`insert`](Self::insert) places a new entry after every existing equal,
/// and [`change_priority`](Self::change_priority) re-stamps the entry it
/// relocates.  Sequence position is therefore a total order over
/// `(priority, stamp)`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<E, P> {
    slots: Vec<Slot<E, P>>,
    next_stamp: u64,
}

impl<E, P> PriorityQueue<E, P> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_stamp: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrow the front element — the greatest priority, oldest among
    /// equals.  `None` when the queue is empty.
    pub fn peek_first(&self) -> Option<&E> {
        self.slots.first().map(|slot| &slot.element)
    }

    /// Iterate `(element, priority)` pairs in sequence order.
    ///
    /// Each call returns a fresh iterator; the borrow it holds prevents any
    /// mutation of the queue until the traversal is dropped.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &P)> {
        self.slots.iter().map(|slot| (&slot.element, &slot.priority))
    }
}

impl<E: PartialEq, P: Ord> PriorityQueue<E, P> {
    /// Insert an entry, keeping the sequence sorted.
    ///
    /// The new entry is placed after every existing entry whose priority is
    /// greater than *or equal to* its own, so equal priorities serve
    /// first-in first-out.
    pub fn insert(&mut self, element: E, priority: P) {
        let at = self.slots.partition_point(|slot| slot.priority >= priority);
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.slots.insert(
            at,
            Slot {
                element,
                priority,
                stamp,
            },
        );
    }

    /// Whether any stored entry equals `element`, priorities ignored.
    pub fn contains(&self, element: &E) -> bool {
        self.slots.iter().any(|slot| slot.element == *element)
    }

    /// Remove and return the front entry, or `None` when empty.
    pub fn pop_first(&mut self) -> Option<(E, P)> {
        if self.slots.is_empty() {
            return None;
        }
        let slot = self.slots.remove(0);
        Some((slot.element, slot.priority))
    }

    /// Remove the first entry (in sequence order) whose element equals
    /// `element`, returning the stored element.
    ///
    /// When several entries are tied on both element equality and priority,
    /// the struct invariant (equal-priority runs ascend by stamp) means the
    /// first sequence match is also the oldest such entry — the one with
    /// the smallest insertion stamp is always the one removed.
    pub fn remove_matching(&mut self, element: &E) -> Result<E, QueueError> {
        let at = self
            .slots
            .iter()
            .position(|slot| slot.element == *element)
            .ok_or(QueueError::ElementNotFound)?;
        Ok(self.slots.remove(at).element)
    }

    /// Relocate the first entry matching `element` with priority equal to
    /// `old_priority` so that it sorts under `new_priority`.
    ///
    /// The relocated entry stores the element passed in (callers carrying
    /// richer element state must thread it through the argument) and a
    /// fresh stamp, so it sorts after existing entries already holding
    /// `new_priority`.
    pub fn change_priority(
        &mut self,
        element: E,
        old_priority: &P,
        new_priority: P,
    ) -> Result<(), QueueError> {
        let at = self
            .slots
            .iter()
            .position(|slot| slot.element == element && slot.priority == *old_priority)
            .ok_or(QueueError::ElementNotFound)?;
        self.slots.remove(at);
        self.insert(element, new_priority);
        Ok(())
    }
}

impl<E, P> Default for PriorityQueue<E, P> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
