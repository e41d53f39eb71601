//! Shared handle to the morphed output object.
//!
//! The morpher keeps the only write path; clones of the handle given to a
//! scene graph or renderer can only read. Identity is stable for as long as any
//! handle is alive.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::MorphError;

pub struct OutputHandle<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> OutputHandle<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    /// Borrow the current state. Drop the guard before the next tick.
    ///
    /// Panics if called while the morpher is writing, which cannot happen on
    /// the single tick thread.
    pub fn read(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Clone the current state out of the handle.
    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }

    /// True when both handles point at the same output object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Run `f` against the stored state; fails without calling `f` if a reader
    /// holds a borrow.
    pub(crate) fn write_with<F: FnOnce(&mut T)>(&self, f: F) -> Result<(), MorphError> {
        let mut slot = self
            .cell
            .try_borrow_mut()
            .map_err(|_| MorphError::OutputBorrowed)?;
        f(&mut *slot);
        Ok(())
    }

    /// Check that a write would succeed right now.
    pub(crate) fn is_writable(&self) -> bool {
        self.cell.try_borrow_mut().is_ok()
    }
}

impl<T> Clone for OutputHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OutputHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(v) => f.debug_tuple("OutputHandle").field(&*v).finish(),
            Err(_) => f.write_str("OutputHandle(<writing>)"),
        }
    }
}
