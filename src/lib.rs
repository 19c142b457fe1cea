//! A double-ended queue (deque) stored as a circular doubly-linked
//! ring anchored by a sentinel.
//!
//! Internally, the ring lives in a `Vec` and links slots by index
//! rather than by pointer. The sentinel occupies slot 0, sits between
//! the back and the front of the queue, and links to itself when the
//! deque is empty, so pushes and pops at either end splice the ring
//! without any empty- or single-element special cases.
//!
//! As items are removed from the deque, their slots in the `Vec` are
//! put on an internal free list. This free list is used when items
//! are inserted into the deque before the internal `Vec` is expanded.
//!
//! Observing or removing an end of an empty deque reports
//! [`DequeError::Empty`] rather than exposing the sentinel's slot as
//! if it held data.
//!
//! [`DequeError::Empty`]: enum.DequeError.html

mod deque;
mod error;
mod slot;

pub use crate::deque::CircularDeque;
pub use crate::error::DequeError;
