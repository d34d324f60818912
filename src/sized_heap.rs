//! A helper struct for maintaining a max heap of an optionally fixed size.

/// A helper struct for maintaining a max heap of a fixed size.
///
/// This is useful for maintaining the `k` nearest neighbors in a search
/// algorithm. Once the heap is full, a new item displaces the current worst
/// item only if it is strictly smaller.
pub struct SizedHeap<T: PartialOrd> {
    /// The heap of items.
    heap: std::collections::BinaryHeap<HeapItem<T>>,
    /// The maximum size of the heap.
    k: usize,
}

impl<T: PartialOrd> SizedHeap<T> {
    /// Creates a new `SizedHeap`, bounded by `k` if one is given.
    #[must_use]
    pub fn new(k: Option<usize>) -> Self {
        k.map_or_else(
            || Self {
                heap: std::collections::BinaryHeap::new(),
                k: usize::MAX,
            },
            |k| Self {
                heap: std::collections::BinaryHeap::with_capacity(k),
                k,
            },
        )
    }

    /// Pushes an item onto the heap, maintaining the max size.
    pub fn push(&mut self, item: T) {
        if self.heap.len() < self.k {
            self.heap.push(HeapItem(item));
        } else if let Some(top) = self.heap.peek() {
            if item < top.0 {
                self.heap.pop();
                self.heap.push(HeapItem(item));
            }
        }
    }

    /// Peeks at the top item in the heap.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|HeapItem(x)| x)
    }

    /// Pops the top item from the heap.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|HeapItem(x)| x)
    }

    /// Consumes the `SizedHeap` and returns the items in an iterator.
    pub fn items(self) -> impl Iterator<Item = T> {
        self.heap.into_iter().map(|HeapItem(x)| x)
    }

    /// Returns the number of items in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns whether the heap is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.k
    }
}

/// A wrapper struct for implementing `PartialOrd` and `Ord` on a type to use
/// with `SizedHeap`.
struct HeapItem<T: PartialOrd>(T);

impl<T: PartialOrd> PartialEq for HeapItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: PartialOrd> Eq for HeapItem<T> {}

impl<T: PartialOrd> PartialOrd for HeapItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: PartialOrd> Ord for HeapItem<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(core::cmp::Ordering::Less)
    }
}
