//! Recency list backed by a slot arena
//!
//! Nodes live in a `Vec` of slots and link to each other by slot index, so a
//! node can be detached or moved to the head in O(1) given its handle. `prev`
//! points toward the tail (least recently used), `next` toward the head.

/// Node in the recency list
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked list of nodes ordered from tail (LRU) to head (MRU)
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked nodes
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Most recently used node
    #[cfg(test)]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    /// Least recently used node
    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    /// Allocate a node for `key` and push it at the head
    pub(crate) fn push_new(&mut self, key: K, value: V) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.push(idx);
        idx
    }

    /// Attach a detached node at the head
    pub(crate) fn push(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(head_idx) = old_head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.next = Some(idx);
            }
        }

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = old_head;
            node.next = None;
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.len += 1;
    }

    /// Detach a node from wherever it sits.
    ///
    /// Returns the handle back, or `None` when there was nothing to detach.
    pub(crate) fn unlink(&mut self, idx: Option<usize>) -> Option<usize> {
        let idx = idx?;
        let (prev, next) = {
            let node = self.node(idx)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.tail = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.head = prev;
            }
        }

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = None;
        }

        self.len -= 1;
        Some(idx)
    }

    /// Unlink a node and release its slot
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Node<K, V>> {
        let idx = self.unlink(Some(idx))?;
        self.free_list.push(idx);
        self.nodes[idx].take()
    }

    /// Hops from the tail to `idx`, walking `prev` links
    pub(crate) fn index(&self, idx: usize) -> Option<usize> {
        let mut hops = 0;
        let mut cursor = self.node(idx)?.prev;
        while let Some(prev_idx) = cursor {
            hops += 1;
            cursor = self.node(prev_idx).and_then(|node| node.prev);
        }
        Some(hops)
    }

    /// Iterate from tail to head
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.tail,
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    /// Panics if any link, the tail-to-head walk, or the count disagree
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut walked = 0;
        let mut prev = None;
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            let node = self.node(idx).expect("linked slot is empty");
            assert_eq!(node.prev, prev, "broken prev link at slot {}", idx);
            walked += 1;
            assert!(walked <= self.len, "cycle in recency list");
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(prev, self.head, "walk did not end at head");
        assert_eq!(walked, self.len, "count disagrees with list");
        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len, "orphaned slots in arena");
    }
}

/// Borrowing iterator over `(key, value)` from least to most recently used
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
