use crate::error::QueueError;

/// Which end of the priority range sits at the top of the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapOrder {
    /// Smallest priority on top.
    Min,
    /// Largest priority on top.
    Max,
}

impl HeapOrder {
    /// Returns `true` if `a` must sit strictly above `b`.
    #[inline(always)]
    fn precedes<P: PartialOrd>(self, a: &P, b: &P) -> bool {
        match self {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot<P> {
    id: usize,
    priority: P,
}

/// A binary heap of `(id, priority)` pairs addressable by id.
///
/// Every element carries an id in `0..capacity`, and each id is present at
/// most once. A position table maps each present id to its heap slot, which
/// makes [`change_priority`] and [`remove`] O(log n) and [`contains`] /
/// [`get_priority`] O(1).
///
/// The capacity is fixed on creation.
///
/// When both children of a slot tie during sift-down, the left child is
/// taken. Elements only move on a strict ordering violation, so equal
/// priorities never trade places.
///
/// [`change_priority`]: IndexedPriorityQueue::change_priority
/// [`remove`]: IndexedPriorityQueue::remove
/// [`contains`]: IndexedPriorityQueue::contains
/// [`get_priority`]: IndexedPriorityQueue::get_priority
///
/// # Examples
///
/// ```rust
/// # use travel_planner::IndexedPriorityQueue;
/// #
/// let mut pq = IndexedPriorityQueue::min(5);
/// for (id, priority) in [5.0, 1.0, 3.0, 2.0, 4.0].into_iter().enumerate() {
///     pq.insert(id, priority).unwrap();
/// }
///
/// pq.change_priority(0, 0.5).unwrap();
/// assert_eq!(pq.delete_top(), Ok((0, 0.5)));
/// assert_eq!(pq.delete_top(), Ok((1, 1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<P = f64> {
    heap: Vec<Slot<P>>,
    positions: Vec<Option<usize>>,
    order: HeapOrder,
}

impl<P> IndexedPriorityQueue<P>
where
    P: PartialOrd + Copy,
{
    /// Creates an empty queue accepting ids in `0..capacity`.
    pub fn new(capacity: usize, order: HeapOrder) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
            order,
        }
    }

    /// Creates an empty min-queue.
    pub fn min(capacity: usize) -> Self {
        Self::new(capacity, HeapOrder::Min)
    }

    /// Creates an empty max-queue.
    pub fn max(capacity: usize) -> Self {
        Self::new(capacity, HeapOrder::Max)
    }

    /// Builds a full queue in O(n): id `i` gets the `i`-th priority, and the
    /// capacity is the number of priorities.
    pub fn from_priorities(order: HeapOrder, priorities: impl IntoIterator<Item = P>) -> Self {
        let heap: Vec<Slot<P>> = priorities
            .into_iter()
            .enumerate()
            .map(|(id, priority)| Slot { id, priority })
            .collect();
        let positions = (0..heap.len()).map(Some).collect();

        let mut queue = Self {
            heap,
            positions,
            order,
        };
        for pos in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(pos);
        }
        queue
    }

    /// Number of ids this queue accepts.
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of elements currently queued.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The order this queue was created with.
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Returns `true` if `id` is queued. Out-of-range ids are never queued.
    pub fn contains(&self, id: usize) -> bool {
        self.position(id).is_some()
    }

    /// Returns the priority of `id`, if it is queued.
    pub fn get_priority(&self, id: usize) -> Option<P> {
        self.position(id).map(|pos| self.heap[pos].priority)
    }

    /// Returns the top `(id, priority)` pair without removing it.
    pub fn peek(&self) -> Option<(usize, P)> {
        self.heap.first().map(|slot| (slot.id, slot.priority))
    }

    /// Queues `id` with `priority`.
    ///
    /// Fails if `id` is out of range, already queued, or the queue is full.
    pub fn insert(&mut self, id: usize, priority: P) -> Result<(), QueueError> {
        self.check_range(id)?;
        if self.positions[id].is_some() {
            return reject(QueueError::DuplicateId(id));
        }
        if self.heap.len() >= self.capacity() {
            return reject(QueueError::Full {
                capacity: self.capacity(),
            });
        }

        let pos = self.heap.len();
        self.heap.push(Slot { id, priority });
        self.positions[id] = Some(pos);
        self.sift_up(pos);
        Ok(())
    }

    /// Replaces the priority of a queued `id` and restores heap order.
    pub fn change_priority(&mut self, id: usize, priority: P) -> Result<(), QueueError> {
        let pos = self.require(id)?;
        self.heap[pos].priority = priority;
        self.restore(pos);
        Ok(())
    }

    /// Removes a queued `id`, wherever it sits in the heap.
    ///
    /// The last slot moves into the vacated one and is then sifted into
    /// place.
    pub fn remove(&mut self, id: usize) -> Result<(), QueueError> {
        let pos = self.require(id)?;
        let last = self.heap.len() - 1;

        self.heap.swap_remove(pos);
        self.positions[id] = None;
        if pos != last {
            let moved = self.heap[pos].id;
            self.positions[moved] = Some(pos);
            self.restore(pos);
        }
        Ok(())
    }

    /// Removes and returns the top `(id, priority)` pair.
    pub fn delete_top(&mut self) -> Result<(usize, P), QueueError> {
        if self.heap.is_empty() {
            return reject(QueueError::Empty);
        }

        let top = self.heap.swap_remove(0);
        self.positions[top.id] = None;
        if let Some(root) = self.heap.first() {
            self.positions[root.id] = Some(0);
            self.sift_down(0);
        }
        Ok((top.id, top.priority))
    }

    /// Removes every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in self.heap.drain(..) {
            self.positions[slot.id] = None;
        }
    }

    /// Iterates over the queued `(id, priority)` pairs in heap order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, P)> + '_ {
        self.heap.iter().map(|slot| (slot.id, slot.priority))
    }

    fn position(&self, id: usize) -> Option<usize> {
        self.positions.get(id).copied().flatten()
    }

    fn check_range(&self, id: usize) -> Result<(), QueueError> {
        if id >= self.capacity() {
            return reject(QueueError::IdOutOfRange {
                id,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn require(&self, id: usize) -> Result<usize, QueueError> {
        self.check_range(id)?;
        match self.positions[id] {
            Some(pos) => Ok(pos),
            None => reject(QueueError::Absent(id)),
        }
    }

    /// Repairs heap order around `pos` after its priority changed in either
    /// direction. At most one of the two sifts moves anything.
    fn restore(&mut self, pos: usize) {
        let pos = self.sift_up(pos);
        self.sift_down(pos);
    }

    /// Exchanges two slots by value and repoints both ids.
    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].id] = Some(a);
        self.positions[self.heap[b].id] = Some(b);
    }

    /// Moves the slot at `pos` toward the root; returns where it stopped.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self
                .order
                .precedes(&self.heap[pos].priority, &self.heap[parent].priority)
            {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    /// Moves the slot at `pos` toward the leaves.
    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right < len
                && self
                    .order
                    .precedes(&self.heap[right].priority, &self.heap[left].priority)
            {
                child = right;
            }

            if !self
                .order
                .precedes(&self.heap[child].priority, &self.heap[pos].priority)
            {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    /// Panics if the heap order or the id index is broken.
    #[cfg(test)]
    fn check_invariants(&self) {
        for (pos, slot) in self.heap.iter().enumerate() {
            assert_eq!(self.positions[slot.id], Some(pos), "index of id {}", slot.id);
            for child in [2 * pos + 1, 2 * pos + 2] {
                if let Some(c) = self.heap.get(child) {
                    assert!(
                        !self.order.precedes(&c.priority, &slot.priority),
                        "slot {child} outranks its parent {pos}"
                    );
                }
            }
        }
        let present = self.positions.iter().filter(|p| p.is_some()).count();
        assert_eq!(present, self.heap.len());
    }
}

#[inline]
fn reject<T>(err: QueueError) -> Result<T, QueueError> {
    tracing::debug!(%err, "priority queue operation rejected");
    Err(err)
}
