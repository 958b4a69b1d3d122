//! Observable value cell binding side effects to mutations.
//!
//! # Responsibility
//! - Hold the current snapshot of one collection.
//! - Swap in a new snapshot per mutation and notify subscribers.
//!
//! # Invariants
//! - Readers only ever observe whole snapshots.
//! - Subscribers see the candidate snapshot in subscription order; it is
//!   swapped in only after every subscriber succeeds.
//! - A failing subscriber stops notification, its error is returned and the
//!   previous snapshot stays in place.

use crate::repo::kv_repo::RepoResult;
use std::fmt::{Debug, Formatter};

/// Callback invoked with each new snapshot.
pub type Listener<T> = Box<dyn FnMut(&T) -> RepoResult<()>>;

pub struct Signal<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    /// Returns the current snapshot.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Notifies subscribers with `value`, then replaces the snapshot.
    pub fn set(&mut self, value: T) -> RepoResult<()> {
        for listener in &mut self.listeners {
            listener(&value)?;
        }
        self.value = value;
        Ok(())
    }

    /// Derives the next snapshot from the current one and swaps it in.
    pub fn update(&mut self, next: impl FnOnce(&T) -> T) -> RepoResult<()> {
        let value = next(&self.value);
        self.set(value)
    }

    /// Registers a listener. It is not called for the current snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) -> RepoResult<()> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

}

impl<T: Debug> Debug for Signal<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Signal;
    use crate::db::DbError;
    use crate::repo::kv_repo::RepoError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn update_notifies_in_order_then_swaps_snapshot() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new(vec![1]);

        let first = Rc::clone(&seen);
        signal.subscribe(move |value: &Vec<i32>| {
            first.borrow_mut().push(("first", value.len()));
            Ok(())
        });
        let second = Rc::clone(&seen);
        signal.subscribe(move |value: &Vec<i32>| {
            second.borrow_mut().push(("second", value.len()));
            Ok(())
        });

        signal
            .update(|current| {
                let mut next = current.clone();
                next.push(2);
                next
            })
            .unwrap();

        assert_eq!(signal.get(), &vec![1, 2]);
        assert_eq!(*seen.borrow(), vec![("first", 2), ("second", 2)]);
    }

    #[test]
    fn failing_subscriber_surfaces_error_and_keeps_previous_snapshot() {
        let mut signal = Signal::new(0_u32);
        signal.subscribe(|_| {
            Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
                found: 9,
                supported: 1,
            }))
        });

        assert!(signal.set(5).is_err());
        assert_eq!(*signal.get(), 0);
        assert!(signal.update(|value| value + 1).is_err());
        assert_eq!(*signal.get(), 0);
    }
}
