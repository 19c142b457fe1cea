use std::mem;

pub(crate) struct Free(FreeInner);
struct FreeInner {
    // The next free slot. MAX when this is the last free slot.
    next: usize,
}

impl Free {
    fn new(next: usize) -> Free {
        Free(FreeInner { next })
    }

    pub(crate) fn next(&self) -> usize {
        self.0.next
    }
}

pub(crate) struct Used<T>(UsedInner<T>);
struct UsedInner<T> {
    // The index of the slot after this one in the ring.
    next: usize,
    // The index of the slot before this one in the ring.
    prev: usize,
    // The contained value. `None` only for the sentinel slot.
    value: Option<T>,
}

impl<T> Used<T> {
    fn new(next: usize, prev: usize, value: Option<T>) -> Used<T> {
        Used(UsedInner { next, prev, value })
    }

    pub(crate) fn next(&self) -> usize {
        self.0.next
    }

    pub(crate) fn set_next(&mut self, new_next: usize) {
        self.0.next = new_next;
    }

    pub(crate) fn prev(&self) -> usize {
        self.0.prev
    }

    pub(crate) fn set_prev(&mut self, new_prev: usize) {
        self.0.prev = new_prev;
    }

    /// Exchange the `next` and `prev` links, flipping this slot's
    /// notion of ring direction.
    pub(crate) fn swap_links(&mut self) {
        mem::swap(&mut self.0.next, &mut self.0.prev);
    }

    pub(crate) fn take(self) -> (usize, Option<T>, usize) {
        let Used(UsedInner { next, prev, value }) = self;
        (prev, value, next)
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.0.value.as_ref()
    }
}

pub(crate) enum Slot<T> {
    Free(Free),
    Used(Used<T>),
}

impl<T> Slot<T> {
    pub(crate) fn new_free(next: usize) -> Slot<T> {
        Slot::Free(Free::new(next))
    }

    pub(crate) fn new_used(next: usize, prev: usize, value: T) -> Slot<T> {
        Slot::Used(Used::new(next, prev, Some(value)))
    }

    /// A self-linked sentinel at ring position `ix`. It participates
    /// in the ring like any other used slot but carries no value.
    pub(crate) fn new_sentinel(ix: usize) -> Slot<T> {
        Slot::Used(Used::new(ix, ix, None))
    }

    pub(crate) fn get_used(&self) -> Option<&Used<T>> {
        if let Slot::Used(used) = self {
            Some(used)
        } else {
            None
        }
    }

    pub(crate) fn get_used_mut(&mut self) -> Option<&mut Used<T>> {
        if let Slot::Used(used) = self {
            Some(used)
        } else {
            None
        }
    }

    pub(crate) fn get_free(&self) -> Option<&Free> {
        if let Slot::Free(free) = self {
            Some(free)
        } else {
            None
        }
    }

    pub(crate) fn into_used(self) -> Option<Used<T>> {
        if let Slot::Used(used) = self {
            Some(used)
        } else {
            None
        }
    }
}
