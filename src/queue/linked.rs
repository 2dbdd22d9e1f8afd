use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A strictly FIFO, singly linked, owning queue.
///
/// The chain is linked with raw node pointers in the convention of std's
/// `LinkedList`: nodes are heap allocated through `Box` and immediately
/// leaked, and every pointer in the chain stays a raw pointer until the node
/// is released, so the `tail` shortcut never aliases a live `Box`. Ownership
/// is logical: each node is reachable exactly once (through `head` or
/// through its predecessor's `next`) and is reboxed exactly once, on
/// dequeue, clear or drop.
///
/// Invariants:
/// - `len == 0` iff `head` and `tail` are both `None`.
/// - when `len > 0`, `tail` points at the node reached from `head` by
///   following `next` exactly `len - 1` times, and `tail`'s `next` is
///   `None`.
///
/// `enqueue`, `dequeue`, `peek`, `len` and `is_empty` are O(1); `clear` and
/// `Clone` are O(n). Dropping releases the chain iteratively, so queues of
/// any length are safe to drop without recursing.
pub struct LinkedQueue<T> {
    head: Option<NonNull<Node<T>>>,
    /// The last node of the chain; only used for O(1) append.
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    value: T,
    next: Option<NonNull<Node<T>>>,
}

// All node pointers are exclusively owned by one queue, so the queue as a
// whole has the same thread affinity as `Box<Node<T>>` would.
unsafe impl<T: Send> Send for LinkedQueue<T> {}
unsafe impl<T: Sync> Sync for LinkedQueue<T> {}

impl<T> LinkedQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no elements are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` as the new tail.
    pub fn enqueue(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: None })));

        match self.tail {
            // The old tail is the last node of the chain, so its `next` is
            // free and appending cannot leak an existing suffix.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => {
                debug_assert!(self.head.is_none());
                self.head = Some(node);
            }
        }

        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes and returns the head element, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        let head = self.head.take()?;
        // The head is reachable only through `self.head`, which has just
        // been cleared, so reboxing it here is the single release.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Returns the head element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Mutable access to the head element.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Removes every element, restoring the empty-queue invariant.
    ///
    /// Safe to call on an already empty queue. Runs iteratively so chains of
    /// any length unwind without growing the stack.
    pub fn clear(&mut self) {
        let mut next = self.head.take();
        while let Some(head) = next {
            let node = unsafe { Box::from_raw(head.as_ptr()) };
            next = node.next;
        }
        self.tail = None;
        self.len = 0;
    }

    /// Borrowing iterator in queue (FIFO) order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            marker: PhantomData,
        }
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    /// Independent deep copy: new nodes, same values, same order.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.extend(self.iter().cloned());
        copy
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedQueue<T> {}

/// Borrowing FIFO-order iterator over a [`LinkedQueue`].
pub struct Iter<'a, T> {
    next: Option<NonNull<Node<T>>>,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // The iterator borrows the queue, so the chain is immutable for 'a.
        let node = unsafe { self.next?.as_ref() };
        self.next = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning FIFO-order iterator over a [`LinkedQueue`].
pub struct IntoIter<T> {
    queue: LinkedQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    #[test]
    fn new_queue_is_empty() {
        let q: LinkedQueue<i32> = LinkedQueue::new();

        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek(), None);
        assert_eq!(q.iter().count(), 0);
    }

    #[test]
    fn dequeue_on_empty_returns_none() {
        let mut q: LinkedQueue<i32> = LinkedQueue::new();

        assert_eq!(q.dequeue(), None);
        assert_eq!(q.peek(), None);
        assert_eq!(q.peek_mut(), None);
        // Still empty and usable afterwards.
        q.enqueue(7);
        assert_eq!(q.dequeue(), Some(7));
    }

    #[test]
    fn fifo_order_round_trip() {
        let mut q = LinkedQueue::new();
        let input: Vec<i32> = (0..100).collect();

        for &v in &input {
            q.enqueue(v);
        }
        assert_eq!(q.len(), input.len());

        let mut output = Vec::new();
        while let Some(v) = q.dequeue() {
            output.push(v);
        }

        assert_eq!(output, input, "dequeue order must equal enqueue order");
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn len_decrements_by_one_per_dequeue() {
        let mut q: LinkedQueue<usize> = (0..10).collect();

        for expected in (0..10).rev() {
            let before = q.len();
            assert!(q.dequeue().is_some());
            assert_eq!(q.len(), before - 1);
            assert_eq!(q.len(), expected);
        }
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = LinkedQueue::new();
        q.enqueue("first");
        q.enqueue("second");

        assert_eq!(q.peek(), Some(&"first"));
        assert_eq!(q.peek(), Some(&"first"));
        assert_eq!(q.len(), 2);
        assert_eq!(q.dequeue(), Some("first"));
        assert_eq!(q.peek(), Some(&"second"));
    }

    #[test]
    fn peek_mut_writes_through_to_head() {
        let mut q: LinkedQueue<i32> = [1, 2, 3].into_iter().collect();

        if let Some(head) = q.peek_mut() {
            *head = 10;
        }

        assert_eq!(q.dequeue(), Some(10));
        assert_eq!(q.dequeue(), Some(2));
    }

    #[test]
    fn clear_resets_to_empty_and_is_idempotent() {
        let mut q: LinkedQueue<i32> = (0..50).collect();

        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek(), None);

        // Clearing an already empty queue is a no-op.
        q.clear();
        assert!(q.is_empty());

        // The queue is fully usable after clear.
        q.enqueue(1);
        q.enqueue(2);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
    }

    #[test]
    fn interleaved_enqueue_dequeue_keeps_tail_consistent() {
        let mut q = LinkedQueue::new();

        q.enqueue(1);
        assert_eq!(q.dequeue(), Some(1));
        // Queue drained to empty: the tail must have been cleared, so the
        // next enqueue rebuilds head and tail from scratch.
        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.dequeue(), Some(2));
        q.enqueue(4);
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), Some(4));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn tail_append_stays_valid_across_head_churn() {
        // Releasing a node must not invalidate the tail shortcut into its
        // successor: dequeue down to a single node, touch the head through
        // every borrowing entry point, then append through the tail again.
        let mut q = LinkedQueue::new();
        q.enqueue(1);
        q.enqueue(2);

        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.peek(), Some(&2));
        if let Some(head) = q.peek_mut() {
            *head += 10;
        }
        assert_eq!(q.iter().copied().collect::<Vec<i32>>(), vec![12]);

        q.enqueue(3);
        q.enqueue(4);
        assert_eq!(q.dequeue(), Some(12));
        assert_eq!(q.dequeue(), Some(3));
        q.enqueue(5);
        assert_eq!(q.dequeue(), Some(4));
        assert_eq!(q.dequeue(), Some(5));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let original: LinkedQueue<i32> = [1, 2, 3].into_iter().collect();
        let mut copy = original.clone();

        assert_eq!(copy, original);

        // Mutating the copy must not affect the original.
        copy.enqueue(4);
        assert_eq!(copy.dequeue(), Some(1));
        if let Some(head) = copy.peek_mut() {
            *head = 20;
        }

        let kept: Vec<i32> = original.iter().copied().collect();
        assert_eq!(kept, vec![1, 2, 3]);
    }

    #[test]
    fn clone_of_empty_is_empty() {
        let q: LinkedQueue<String> = LinkedQueue::new();
        let copy = q.clone();
        assert!(copy.is_empty());
        assert_eq!(copy.len(), 0);
    }

    #[test]
    fn take_moves_contents_and_leaves_source_empty() {
        let mut source: LinkedQueue<i32> = [1, 2, 3].into_iter().collect();

        let mut moved = std::mem::take(&mut source);

        assert!(source.is_empty());
        assert_eq!(source.dequeue(), None);
        // The source is a valid empty queue, not a husk.
        source.enqueue(9);
        assert_eq!(source.dequeue(), Some(9));

        assert_eq!(moved.len(), 3);
        assert_eq!(moved.dequeue(), Some(1));
        assert_eq!(moved.dequeue(), Some(2));
        assert_eq!(moved.dequeue(), Some(3));
    }

    #[test]
    fn iter_visits_in_fifo_order_without_consuming() {
        let q: LinkedQueue<i32> = (0..5).collect();

        let seen: Vec<i32> = q.iter().copied().collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(q.len(), 5, "borrowing iteration must not consume");

        let seen_again: Vec<i32> = (&q).into_iter().copied().collect();
        assert_eq!(seen_again, seen);
    }

    #[test]
    fn into_iter_drains_in_fifo_order() {
        let q: LinkedQueue<i32> = (0..5).collect();

        let iter = q.into_iter();
        assert_eq!(iter.len(), 5);
        let drained: Vec<i32> = iter.collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn owned_values_are_dropped_exactly_once() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut q = LinkedQueue::new();
        for _ in 0..10 {
            q.enqueue(Rc::clone(&tracker));
        }
        assert_eq!(Rc::strong_count(&tracker), 11);

        // Dequeue half, drop the values.
        for _ in 0..5 {
            drop(q.dequeue());
        }
        assert_eq!(Rc::strong_count(&tracker), 6);

        // Dropping the queue releases the rest.
        drop(q);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn long_chain_drops_without_stack_overflow() {
        let mut q = LinkedQueue::new();
        for i in 0..1_000_000_usize {
            q.enqueue(i);
        }
        assert_eq!(q.len(), 1_000_000);
        drop(q);
    }

    proptest! {
        // Any interleaving of operations must behave exactly like VecDeque.
        #[test]
        fn prop_matches_vecdeque_reference(
            ops in prop::collection::vec((0u8..=3, any::<i16>()), 0..=256)
        ) {
            let mut q: LinkedQueue<i16> = LinkedQueue::new();
            let mut reference: VecDeque<i16> = VecDeque::new();

            for (op, value) in ops {
                match op {
                    0 | 1 => {
                        q.enqueue(value);
                        reference.push_back(value);
                    }
                    2 => {
                        prop_assert_eq!(q.dequeue(), reference.pop_front());
                    }
                    _ => {
                        prop_assert_eq!(q.peek(), reference.front());
                    }
                }

                prop_assert_eq!(q.len(), reference.len());
                prop_assert_eq!(q.is_empty(), reference.is_empty());
            }

            // Drain both and compare tails.
            let drained: Vec<i16> = q.into_iter().collect();
            let expected: Vec<i16> = reference.into_iter().collect();
            prop_assert_eq!(drained, expected);
        }

        // Cloning at an arbitrary point must snapshot the exact contents.
        #[test]
        fn prop_clone_snapshots_contents(
            values in prop::collection::vec(any::<u32>(), 0..=64),
            drops in 0usize..=64,
        ) {
            let mut q: LinkedQueue<u32> = values.iter().copied().collect();
            for _ in 0..drops.min(values.len()) {
                q.dequeue();
            }

            let snapshot = q.clone();
            let expected: Vec<u32> = q.iter().copied().collect();
            let actual: Vec<u32> = snapshot.into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn random_stress_matches_reference() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x_4649_464F_5f51_5545);

        for _case in 0..100 {
            let mut q: LinkedQueue<u64> = LinkedQueue::new();
            let mut reference: VecDeque<u64> = VecDeque::new();

            let op_count = rng.random_range(0..=500usize);
            for _ in 0..op_count {
                if rng.random_bool(0.6) {
                    let value: u64 = rng.random();
                    q.enqueue(value);
                    reference.push_back(value);
                } else {
                    assert_eq!(q.dequeue(), reference.pop_front());
                }
                assert_eq!(q.len(), reference.len());
            }

            let drained: Vec<u64> = q.into_iter().collect();
            let expected: Vec<u64> = reference.into_iter().collect();
            assert_eq!(drained, expected);
        }
    }
}
