//! Ordering editor shared by the ticker and carousel lists.
//!
//! An [`OrderedDraft`] is an in-memory copy of a list being edited. Every
//! mutation renumbers the `order` field of every item so that, after any
//! sequence of operations, the orders are exactly `0..len` in list position.
//! Persisting a draft is done by converting it into a submission (see
//! [`OrderedDraft::to_submission`]) and handing that to the replace-all
//! repository call.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Item trait
// ---------------------------------------------------------------------------

/// A list item that can live inside an [`OrderedDraft`].
pub trait DraftItem {
    /// Partial update applied to a single item (one named optional field per
    /// editable column).
    type Patch;
    /// Insert payload produced on save.
    type Submission;

    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
    fn set_active(&mut self, active: bool);
    fn apply(&mut self, patch: Self::Patch);

    /// Build the insert payload for this item.
    ///
    /// The payload carries no identity and no creation timestamp, and is
    /// always active regardless of the draft item's flag.
    fn to_submission(&self) -> Result<Self::Submission, CoreError>;
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// Direction for an adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Result of [`OrderedDraft::move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { from: usize, to: usize },
    /// First item moved up or last item moved down; the list is unchanged.
    AtBoundary,
    /// The index does not address an item; the list is unchanged.
    OutOfRange,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Client-owned copy of an ordered list between fetch and save.
#[derive(Debug, Clone, Serialize)]
pub struct OrderedDraft<T> {
    items: Vec<T>,
    seeded: bool,
    edited: bool,
}

impl<T> Default for OrderedDraft<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seeded: false,
            edited: false,
        }
    }
}

impl<T: DraftItem> OrderedDraft<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the draft from a remote fetch.
    ///
    /// Only the first fetch is applied. A fetch arriving after the draft was
    /// seeded, or after local edits have started, is ignored and `false` is
    /// returned.
    pub fn seed(&mut self, items: Vec<T>) -> bool {
        if self.seeded || self.edited {
            return false;
        }
        self.items = items;
        self.seeded = true;
        self.renumber();
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Append a new item at the end. It becomes active with `order = len`.
    pub fn append(&mut self, mut item: T) {
        item.set_order(self.items.len() as i32);
        item.set_active(true);
        self.items.push(item);
        self.edited = true;
    }

    /// Remove the item at `index` and renumber the rest.
    ///
    /// Returns `None` and leaves the list untouched when `index` is out of
    /// bounds.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.renumber();
        self.edited = true;
        Some(removed)
    }

    /// Swap the item at `index` with its neighbour in `direction`, then
    /// renumber the whole list.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> MoveOutcome {
        let len = self.items.len();
        if index >= len {
            return MoveOutcome::OutOfRange;
        }
        let target = match direction {
            Direction::Up if index == 0 => return MoveOutcome::AtBoundary,
            Direction::Down if index == len - 1 => return MoveOutcome::AtBoundary,
            Direction::Up => index - 1,
            Direction::Down => index + 1,
        };
        self.items.swap(index, target);
        self.renumber();
        self.edited = true;
        MoveOutcome::Moved {
            from: index,
            to: target,
        }
    }

    /// Apply a partial update to the item at `index`.
    ///
    /// Returns `false` when `index` is out of bounds.
    pub fn edit(&mut self, index: usize, patch: T::Patch) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.apply(patch);
                self.edited = true;
                true
            }
            None => false,
        }
    }

    /// Build the replace-all payload for the whole draft.
    ///
    /// Fails on the first item that does not validate; the draft itself is
    /// never modified.
    pub fn to_submission(&self) -> Result<Vec<T::Submission>, CoreError> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.to_submission().map_err(|err| match err {
                    CoreError::Validation(msg) => {
                        CoreError::Validation(format!("Item {index}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.set_order(position as i32);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
