use crate::error::DequeError;
use crate::slot::Slot;
use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;

/// The sentinel always lives in slot 0.
const SENTINEL: usize = 0;

/// A double-ended queue stored as a circular doubly-linked ring. The
/// ring is anchored by a sentinel that sits between the back and the
/// front, so splicing at either end never has to special-case an
/// empty or single-element ring.
pub struct CircularDeque<T> {
    // Index of the first element on the free list. MAX when the
    // free-list is empty.
    free_list: usize,
    // The number of data slots currently in the ring. The sentinel is
    // never counted.
    len_used: usize,
    // The number of slots currently on the free list.
    len_free: usize,
    // The memory used to back the ring. Slot 0 is the sentinel.
    slots: Vec<Slot<T>>,
}

impl<T> fmt::Debug for CircularDeque<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.values()).finish()
    }
}

impl<T> Default for CircularDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CircularDeque<T> {
    /// Creates an empty `CircularDeque`. The sentinel is linked to
    /// itself until values are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let deque: CircularDeque<f64> = CircularDeque::new();
    /// ```
    pub fn new() -> CircularDeque<T> {
        CircularDeque {
            free_list: usize::MAX,
            len_used: 0,
            len_free: 0,
            slots: vec![Slot::new_sentinel(SENTINEL)],
        }
    }

    /// Create a new `CircularDeque` instance with a freelist at least
    /// `capacity` elements deep.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let deque: CircularDeque<f64> = CircularDeque::with_capacity(16);
    /// ```
    pub fn with_capacity(capacity: usize) -> CircularDeque<T> {
        let mut vec = Vec::with_capacity(capacity + 1);
        vec.push(Slot::new_sentinel(SENTINEL));

        let mut next = usize::MAX;
        for i in 1..=capacity {
            vec.push(Slot::new_free(next));
            next = i;
        }

        CircularDeque {
            free_list: next,
            len_used: 0,
            len_free: capacity,
            slots: vec,
        }
    }

    /// Reserves capacity for at least `additional` more elements to
    /// be inserted into the given `CircularDeque`. Note: this only
    /// expands the size of the underlying `Vec`. It does not add the
    /// reserved elements to the free list.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d: CircularDeque<f64> = CircularDeque::new();
    /// d.reserve(16);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional)
    }

    /// Returns how many items could be held without resizing the
    /// internal vector. The sentinel's slot is excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let d: CircularDeque<f64> = CircularDeque::with_capacity(16);
    /// assert!(d.capacity() >= 16);
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// The number of items in the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d: CircularDeque<f64> = CircularDeque::new();
    ///
    /// d.push_front(1.0);
    /// d.push_back(2.0);
    /// assert_eq!(2, d.len());
    ///
    /// d.pop_front();
    /// assert_eq!(1, d.len());
    /// ```
    pub fn len(&self) -> usize {
        self.len_used
    }

    /// True when the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d: CircularDeque<f64> = CircularDeque::new();
    ///
    /// assert!(d.is_empty());
    ///
    /// d.push_front(1.0);
    /// assert!(!d.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        0 == self.len_used
    }

    /// The number of entries on the deque's freelist.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d: CircularDeque<f64> = CircularDeque::new();
    ///
    /// assert_eq!(0, d.len_freelist());
    ///
    /// d.push_front(1.0);
    /// assert_eq!(0, d.len_freelist());
    ///
    /// d.pop_front();
    /// assert_eq!(1, d.len_freelist());
    ///
    /// d.push_front(2.0);
    /// assert_eq!(0, d.len_freelist());
    /// ```
    pub fn len_freelist(&self) -> usize {
        self.len_free
    }

    /// Insert `value` at the front of the deque: the new element is
    /// spliced between the sentinel and the current front.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_front(10.0);
    /// d.push_front(20.0);
    ///
    /// assert_eq!(Ok(&20.0), d.front());
    /// assert_eq!(Ok(&10.0), d.back());
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.splice_after(SENTINEL, value);
    }

    /// Insert `value` at the back of the deque: the new element is
    /// spliced between the current back and the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_back(10.0);
    /// d.push_back(20.0);
    ///
    /// assert_eq!(Ok(&10.0), d.front());
    /// assert_eq!(Ok(&20.0), d.back());
    /// ```
    pub fn push_back(&mut self, value: T) {
        let back = self.slots[SENTINEL].get_used().unwrap().prev();
        self.splice_after(back, value);
    }

    /// Like [`push_front`], but surfaces arena growth failure as
    /// [`DequeError::AllocationFailed`] instead of aborting. The ring
    /// is not touched until space for the element is secured.
    ///
    /// [`push_front`]: #method.push_front
    /// [`DequeError::AllocationFailed`]: enum.DequeError.html
    pub fn try_push_front(&mut self, value: T) -> Result<(), DequeError> {
        self.ensure_slot()?;
        self.splice_after(SENTINEL, value);
        Ok(())
    }

    /// Like [`push_back`], but surfaces arena growth failure as
    /// [`DequeError::AllocationFailed`] instead of aborting. The ring
    /// is not touched until space for the element is secured.
    ///
    /// [`push_back`]: #method.push_back
    /// [`DequeError::AllocationFailed`]: enum.DequeError.html
    pub fn try_push_back(&mut self, value: T) -> Result<(), DequeError> {
        self.ensure_slot()?;
        let back = self.slots[SENTINEL].get_used().unwrap().prev();
        self.splice_after(back, value);
        Ok(())
    }

    /// Get the front value of the deque. If the deque is empty,
    /// `Err(DequeError::Empty)` is returned; the sentinel is never
    /// reported as if it were data.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::{CircularDeque, DequeError};
    ///
    /// let mut d = CircularDeque::new();
    /// assert_eq!(Err(DequeError::Empty), d.front());
    ///
    /// d.push_back(10.0);
    /// assert_eq!(Ok(&10.0), d.front());
    /// ```
    pub fn front(&self) -> Result<&T, DequeError> {
        let ix = self.slots[SENTINEL].get_used().unwrap().next();
        self.slots[ix]
            .get_used()
            .unwrap()
            .value()
            .ok_or(DequeError::Empty)
    }

    /// Get the back value of the deque. If the deque is empty,
    /// `Err(DequeError::Empty)` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::{CircularDeque, DequeError};
    ///
    /// let mut d = CircularDeque::new();
    /// assert_eq!(Err(DequeError::Empty), d.back());
    ///
    /// d.push_front(10.0);
    /// assert_eq!(Ok(&10.0), d.back());
    /// ```
    pub fn back(&self) -> Result<&T, DequeError> {
        let ix = self.slots[SENTINEL].get_used().unwrap().prev();
        self.slots[ix]
            .get_used()
            .unwrap()
            .value()
            .ok_or(DequeError::Empty)
    }

    /// Remove the front of the deque and return it. If the deque is
    /// empty, `Err(DequeError::Empty)` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::{CircularDeque, DequeError};
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_back(10.0);
    /// d.push_back(20.0);
    ///
    /// assert_eq!(Ok(10.0), d.pop_front());
    /// assert_eq!(Ok(20.0), d.pop_front());
    /// assert_eq!(Err(DequeError::Empty), d.pop_front());
    /// ```
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }

        let front = self.slots[SENTINEL].get_used().unwrap().next();
        Ok(self.unsplice(front))
    }

    /// Remove the back of the deque and return it. If the deque is
    /// empty, `Err(DequeError::Empty)` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::{CircularDeque, DequeError};
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_front(10.0);
    /// d.push_front(20.0);
    ///
    /// assert_eq!(Ok(10.0), d.pop_back());
    /// assert_eq!(Ok(20.0), d.pop_back());
    /// assert_eq!(Err(DequeError::Empty), d.pop_back());
    /// ```
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }

        let back = self.slots[SENTINEL].get_used().unwrap().prev();
        Ok(self.unsplice(back))
    }

    /// Reverse the deque in place: the former front becomes the back
    /// and vice versa. The sentinel's links are swapped first, then
    /// the links of every data slot, so each ring member is visited
    /// exactly once and nothing is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_back(1.0);
    /// d.push_back(2.0);
    /// d.push_back(3.0);
    ///
    /// d.reverse();
    ///
    /// assert_eq!(Ok(&3.0), d.front());
    /// assert_eq!(Ok(&1.0), d.back());
    /// ```
    pub fn reverse(&mut self) {
        self.slots[SENTINEL].get_used_mut().unwrap().swap_links();

        let mut cur = self.slots[SENTINEL].get_used().unwrap().next();
        while SENTINEL != cur {
            let s = self.slots[cur].get_used_mut().unwrap();
            s.swap_links();
            cur = s.next();
        }
    }

    /// Walk the ring from the sentinel's `next` until the sentinel
    /// comes around again, yielding each value front to back.
    fn values(&self) -> Values<'_, T> {
        Values {
            target: self,
            next_index: self.slots[SENTINEL].get_used().unwrap().next(),
        }
    }

    /// Splice a new slot holding `value` directly after `anchor`,
    /// which must be a ring member. With the sentinel as anchor this
    /// is a front insertion; with the sentinel's `prev` it is a back
    /// insertion.
    fn splice_after(&mut self, anchor: usize, value: T) {
        let next = self.slots[anchor].get_used().unwrap().next();
        let ix = self.allocate(next, anchor, value);

        self.slots[anchor].get_used_mut().unwrap().set_next(ix);
        self.slots[next].get_used_mut().unwrap().set_prev(ix);
    }

    /// Unlink the slot at `ix` from the ring, move its storage onto
    /// the free list, and return the value it held. `ix` must be a
    /// data slot, never the sentinel.
    fn unsplice(&mut self, ix: usize) -> T {
        debug_assert_ne!(SENTINEL, ix);

        let (prev, value, next) = self.free(ix).into_used().unwrap().take();

        self.slots[prev].get_used_mut().unwrap().set_next(next);
        self.slots[next].get_used_mut().unwrap().set_prev(prev);

        value.unwrap()
    }

    /// Make sure a slot is available for one more element without
    /// touching the ring, so a failed growth leaves the deque exactly
    /// as it was.
    fn ensure_slot(&mut self) -> Result<(), DequeError> {
        if usize::MAX == self.free_list {
            self.slots
                .try_reserve(1)
                .map_err(|_| DequeError::AllocationFailed)?;
        }

        Ok(())
    }

    fn allocate(&mut self, next: usize, prev: usize, value: T) -> usize {
        self.len_used += 1;

        let s = Slot::new_used(next, prev, value);

        if usize::MAX == self.free_list {
            self.slots.push(s);
            self.slots.len() - 1
        } else {
            let ix = self.free_list;
            self.free_list = self.slots[ix].get_free().unwrap().next();
            self.slots[ix] = s;
            self.len_free -= 1;
            ix
        }
    }

    fn free(&mut self, ix: usize) -> Slot<T> {
        debug_assert!(self.slots[ix].get_used().is_some());

        self.len_used -= 1;

        let mut v = Slot::new_free(self.free_list);
        std::mem::swap(&mut v, &mut self.slots[ix]);
        self.free_list = ix;
        self.len_free += 1;
        v
    }
}

impl<T> CircularDeque<T>
where
    T: fmt::Display,
{
    /// Write the values front to back into `w`: each value with six
    /// fractional digits followed by two spaces, then a final
    /// newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_deque::CircularDeque;
    ///
    /// let mut d = CircularDeque::new();
    /// d.push_back(1.0);
    /// d.push_back(2.5);
    ///
    /// let mut out = Vec::new();
    /// d.write_values(&mut out).unwrap();
    ///
    /// assert_eq!("1.000000  2.500000  \n", String::from_utf8(out).unwrap());
    /// ```
    pub fn write_values<W: Write>(&self, mut w: W) -> io::Result<()> {
        for value in self.values() {
            write!(w, "{:.6}  ", value)?;
        }
        writeln!(w)
    }

    /// Print the values front to back on standard output, in the
    /// format described by [`write_values`].
    ///
    /// [`write_values`]: #method.write_values
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_values(stdout.lock())
    }
}

impl<T> FromIterator<T> for CircularDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut d = Self::new();
        for i in iter {
            d.push_back(i);
        }
        d
    }
}

/// Front-to-back traversal of the ring, used for printing and for
/// the `Debug` rendering. Not part of the public surface.
struct Values<'l, T> {
    target: &'l CircularDeque<T>,
    next_index: usize,
}

impl<'l, T> Iterator for Values<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        if SENTINEL != self.next_index {
            let r = self.target.slots[self.next_index]
                .get_used()
                .expect("ring links are expected to reach only used slots");
            self.next_index = r.next();
            Some(r.value().expect("data slots are expected to hold a value"))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collected(d: &CircularDeque<f64>) -> Vec<f64> {
        d.values().cloned().collect()
    }

    #[test]
    fn push_front_works() {
        let mut d = CircularDeque::new();
        d.push_front(10.0);

        assert_eq!(Ok(&10.0), d.front());
        assert_eq!(Ok(&10.0), d.back());

        d.push_front(11.0);

        assert_eq!(Ok(&11.0), d.front());
        assert_eq!(Ok(&10.0), d.back());
    }

    #[test]
    fn push_back_works() {
        let mut d = CircularDeque::new();
        d.push_back(10.0);
        d.push_back(11.0);

        assert_eq!(Ok(&10.0), d.front());
        assert_eq!(Ok(&11.0), d.back());
    }

    #[test]
    fn mixed_pushes_order_front_to_back() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_front(0.0);

        assert_eq!(vec![0.0, 1.0, 2.0], collected(&d));
        assert_eq!(Ok(&0.0), d.front());
        assert_eq!(Ok(&2.0), d.back());
        assert_eq!(3, d.len());
    }

    #[test]
    fn back_query_after_second_push() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);

        assert_eq!(Ok(&2.0), d.back());
        assert_eq!(Ok(&1.0), d.front());
    }

    #[test]
    fn push_front_pop_front_round_trips() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);

        let before = collected(&d);
        d.push_front(99.0);
        assert_eq!(Ok(99.0), d.pop_front());

        assert_eq!(before, collected(&d));
        assert_eq!(2, d.len());
    }

    #[test]
    fn pops_drain_to_empty() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_back(3.0);

        assert_eq!(Ok(1.0), d.pop_front());
        assert_eq!(Ok(2.0), d.pop_front());
        assert_eq!(Ok(3.0), d.pop_front());

        assert!(d.is_empty());
        assert_eq!(0, d.len());
        assert_eq!(Err(DequeError::Empty), d.pop_front());
    }

    #[test]
    fn empty_deque_operations_report_empty() {
        let mut d: CircularDeque<f64> = CircularDeque::new();

        assert_eq!(Err(DequeError::Empty), d.front());
        assert_eq!(Err(DequeError::Empty), d.back());
        assert_eq!(Err(DequeError::Empty), d.pop_front());
        assert_eq!(Err(DequeError::Empty), d.pop_back());

        // The deque stays usable after a failed operation.
        d.push_back(1.0);
        assert_eq!(Ok(&1.0), d.front());
    }

    #[test]
    fn is_empty_tracks_pushes_and_pops() {
        let mut d = CircularDeque::new();
        assert!(d.is_empty());

        d.push_back(1.0);
        assert!(!d.is_empty());

        d.pop_back().unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn counts_work_as_expected() {
        let mut d = CircularDeque::new();
        d.push_front(10.0);
        d.push_front(11.0);
        assert_eq!(2, d.len());
        assert_eq!(0, d.len_freelist());

        d.pop_back().unwrap();
        assert_eq!(1, d.len());
        assert_eq!(1, d.len_freelist());

        d.pop_back().unwrap();
        assert_eq!(0, d.len());
        assert_eq!(2, d.len_freelist());

        d.push_front(12.0);
        assert_eq!(1, d.len());
        assert_eq!(1, d.len_freelist());

        d.push_front(13.0);
        assert_eq!(2, d.len());
        assert_eq!(0, d.len_freelist());
    }

    #[test]
    fn with_capacity_preallocates_free_list() {
        let mut d = CircularDeque::with_capacity(3);
        assert_eq!(3, d.len_freelist());
        assert_eq!(0, d.len());

        d.push_front(1.0);
        assert_eq!(2, d.len_freelist());
        assert_eq!(1, d.len());

        // The underlying capacity should not have changed.
        assert!(d.capacity() >= 3);

        d.push_front(2.0);
        d.push_front(3.0);
        d.push_front(4.0);

        assert_eq!(0, d.len_freelist());
        assert_eq!(4, d.len());
    }

    #[test]
    fn try_push_reports_ok_under_normal_conditions() {
        let mut d = CircularDeque::new();

        assert_eq!(Ok(()), d.try_push_back(1.0));
        assert_eq!(Ok(()), d.try_push_front(0.0));

        assert_eq!(vec![0.0, 1.0], collected(&d));
    }

    #[test]
    fn reverse_flips_order() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_front(0.0);

        d.reverse();

        assert_eq!(vec![2.0, 1.0, 0.0], collected(&d));
        assert_eq!(Ok(&2.0), d.front());
        assert_eq!(Ok(&0.0), d.back());
    }

    #[test]
    fn reverse_twice_is_identity() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_back(3.0);
        d.push_front(0.0);

        let before = collected(&d);

        d.reverse();
        d.reverse();

        assert_eq!(before, collected(&d));
    }

    #[test]
    fn reverse_of_empty_and_single_is_noop() {
        let mut d: CircularDeque<f64> = CircularDeque::new();
        d.reverse();
        assert!(d.is_empty());

        d.push_back(1.0);
        d.reverse();
        assert_eq!(Ok(&1.0), d.front());
        assert_eq!(Ok(&1.0), d.back());
        assert_eq!(1, d.len());
    }

    #[test]
    fn reversed_deque_keeps_splicing_correctly() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_back(3.0);

        d.reverse();
        d.push_front(4.0);
        d.push_back(0.0);

        assert_eq!(vec![4.0, 3.0, 2.0, 1.0, 0.0], collected(&d));
    }

    #[test]
    fn write_values_formats_like_print() {
        let mut d = CircularDeque::new();
        d.push_back(1.0);
        d.push_back(2.0);
        d.push_front(0.0);

        let mut out = Vec::new();
        d.write_values(&mut out).unwrap();

        assert_eq!(
            "0.000000  1.000000  2.000000  \n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn write_values_of_empty_is_bare_newline() {
        let d: CircularDeque<f64> = CircularDeque::new();

        let mut out = Vec::new();
        d.write_values(&mut out).unwrap();

        assert_eq!("\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn can_be_created_from_iterator() {
        let mut d: CircularDeque<f64> = (0..5).map(f64::from).collect();

        assert_eq!(Ok(0.0), d.pop_front());
        assert_eq!(Ok(1.0), d.pop_front());
        assert_eq!(Ok(2.0), d.pop_front());
        assert_eq!(Ok(3.0), d.pop_front());
        assert_eq!(Ok(4.0), d.pop_front());
        assert_eq!(Err(DequeError::Empty), d.pop_front());
    }

    #[test]
    fn debug_string() {
        let mut d: CircularDeque<u8> = CircularDeque::new();

        d.push_back(1);
        d.push_back(2);
        d.push_back(3);

        assert_eq!("[1, 2, 3]", format!("{:?}", d));
    }
}
