//! Uniform read/write access to UI state.
//!
//! DESIGN
//! ======
//! Engine code (pollers, controllers, mutation actions) mutates state through
//! [`Store`] so the same logic drives Leptos signals in the browser and plain
//! shared cells in tests.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, WithUntracked};

/// A mutable slot of UI state.
pub trait Store<T> {
    /// Read the current value without subscribing.
    fn peek<U>(&self, f: impl FnOnce(&T) -> U) -> U;

    /// Mutate the value, notifying any subscribers.
    fn modify(&self, f: impl FnOnce(&mut T));
}

impl<T: Send + Sync + 'static> Store<T> for RwSignal<T> {
    fn peek<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        self.with_untracked(f)
    }

    fn modify(&self, f: impl FnOnce(&mut T)) {
        self.update(f);
    }
}

impl<T> Store<T> for Rc<RefCell<T>> {
    fn peek<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.borrow())
    }

    fn modify(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.borrow_mut());
    }
}

/// Shared-cell store, used where no reactive owner exists.
pub fn cell<T>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}
