//! Intrusive ordered timer list
//!
//! Armed timers are kept in a doubly-linked list threaded through their own
//! `prev`/`next` cells, sorted by deadline. Timers with equal deadlines keep
//! insertion order. Insertion walks backwards from the tail since new
//! deadlines are usually the latest.
//!
//! The list performs no locking; the scheduler calls it with its critical
//! region held.

use core::cell::Cell;
use core::ptr;

use super::object::Timer;
use crate::time::Timespec;

pub(super) struct TimerList {
    head: Cell<Option<&'static Timer>>,
    tail: Cell<Option<&'static Timer>>,
    len: Cell<usize>,
}

impl TimerList {
    pub(super) const fn new() -> Self {
        Self {
            head: Cell::new(None),
            tail: Cell::new(None),
            len: Cell::new(0),
        }
    }

    pub(super) fn first(&self) -> Option<&'static Timer> {
        self.head.get()
    }

    pub(super) fn len(&self) -> usize {
        self.len.get()
    }

    /// Link `timer` after every timer whose deadline is not later than its own
    ///
    /// Returns true if `timer` became the head of the list.
    pub(super) fn insert(&self, timer: &'static Timer) -> bool {
        let deadline = timer.deadline.get();

        let mut after = self.tail.get();
        while let Some(node) = after {
            if node.deadline.get() <= deadline {
                break;
            }
            after = node.prev.get();
        }

        let next = match after {
            Some(prev) => prev.next.replace(Some(timer)),
            None => self.head.replace(Some(timer)),
        };
        timer.prev.set(after);
        timer.next.set(next);
        match next {
            Some(next) => next.prev.set(Some(timer)),
            None => self.tail.set(Some(timer)),
        }

        self.len.set(self.len.get() + 1);
        after.is_none()
    }

    /// Unlink `timer`, which must currently be in this list
    ///
    /// Returns true if `timer` was the head of the list.
    pub(super) fn remove(&self, timer: &Timer) -> bool {
        let prev = timer.prev.take();
        let next = timer.next.take();
        debug_assert!(
            prev.is_some() || self.head.get().is_some_and(|head| ptr::eq(head, timer)),
            "removing a timer that is not linked into this list"
        );

        match prev {
            Some(prev) => prev.next.set(next),
            None => self.head.set(next),
        }
        match next {
            Some(next) => next.prev.set(prev),
            None => self.tail.set(prev),
        }

        self.len.set(self.len.get().saturating_sub(1));
        prev.is_none()
    }

    /// Unlink and return the head if its deadline is at or before `now`
    pub(super) fn pop_expired(&self, now: Timespec) -> Option<&'static Timer> {
        let head = self.head.get()?;
        if head.deadline.get() > now {
            return None;
        }
        self.remove(head);
        Some(head)
    }

    #[cfg(test)]
    pub(super) fn iter(&self) -> impl Iterator<Item = &'static Timer> {
        core::iter::successors(self.head.get(), |timer| timer.next.get())
    }
}
