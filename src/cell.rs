//! Shared reactive state cell
//!
//! Every controller keeps its state in a [`StateCell`]. Event handlers hold a
//! clone of the cell, the presentation layer reads it synchronously on every
//! render, and the revision counter tells a renderer whether anything changed
//! since the last frame.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

struct Slot<T> {
    value: Cell<T>,
    revision: Cell<u64>,
}

/// Copy-value cell with a change counter
///
/// Clones share the same slot.
pub struct StateCell<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy + PartialEq> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: Cell::new(value),
                revision: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// Replace the value. Returns true if it changed.
    pub fn set(&self, value: T) -> bool {
        if self.slot.value.get() == value {
            return false;
        }
        self.slot.value.set(value);
        self.slot.revision.set(self.slot.revision.get() + 1);
        true
    }

    /// Apply `f` to a copy of the value and store the result as one update
    ///
    /// However many fields `f` touches, observers see a single revision bump.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Number of value-changing updates applied so far
    pub fn revision(&self) -> u64 {
        self.slot.revision.get()
    }
}

impl<T: Copy> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.slot.value.get())
            .field("revision", &self.slot.revision.get())
            .finish()
    }
}
