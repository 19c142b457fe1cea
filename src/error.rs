use std::error;
use std::fmt;

/// Errors that can occur when operating on the deque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// The deque holds no elements, so there is no front or back to
    /// observe or remove.
    Empty,

    /// The vector backing the ring could not grow to hold another
    /// element. The ring is untouched when this is returned.
    AllocationFailed,
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::Empty => f.write_str("deque is empty"),
            DequeError::AllocationFailed => f.write_str("could not allocate space for element"),
        }
    }
}

impl error::Error for DequeError {}
