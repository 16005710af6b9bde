use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::{TryReserveError, Vec};

use super::position::{Link, Position};

/// a process-unique identity handed out to a chain's nodes and, separately,
/// to its sentinel. a copied list always gets new ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct ChainId(u64);

impl ChainId {
    pub(super) fn fresh() -> Self {
        static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// a live place in the chain that nodes can be linked after or unlinked from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Anchor {
    Sentinel,
    Node(usize),
}

/// the node storage behind a list. nodes are slots in `nodes` and link to
/// each other by index; vacated slots form a free list threaded through
/// `free`.
pub(super) struct NodeChain<T> {
    /// stamped on node positions. moves with the nodes in [`swap_nodes`](Self::swap_nodes)
    id: ChainId,
    /// stamped on the sentinel's position. never exchanged
    sentinel: ChainId,
    /// the sentinel's next link. the sentinel holds no value and never
    /// occupies a slot
    head: Option<usize>,
    nodes: Vec<Node<T>>,
    free: Option<usize>,
}

struct Node<T> {
    /// bumped every time the slot is vacated so positions to the old node go stale
    generation: u64,
    internal: InternalNode<T>,
}

enum InternalNode<T> {
    Data { data: T, next: Option<usize> },
    Vacant { next_free: Option<usize> },
}

impl<T> NodeChain<T> {
    pub(super) fn new() -> Self {
        Self {
            id: ChainId::fresh(),
            sentinel: ChainId::fresh(),
            head: None,
            nodes: Vec::new(),
            free: None,
        }
    }

    pub(super) fn head(&self) -> Option<usize> {
        self.head
    }

    /// map a position back to the node it names, returning None for the end
    /// position, positions from another chain, and positions whose node has
    /// since been erased
    pub(super) fn resolve(&self, position: Position) -> Option<Anchor> {
        let (chain, link) = position.target()?;
        match link {
            Link::Sentinel => (chain == self.sentinel).then_some(Anchor::Sentinel),
            Link::Node { .. } if chain != self.id => None,
            Link::Node { index, generation } => {
                let node = self.nodes.get(index)?;
                match node.internal {
                    InternalNode::Data { .. } if node.generation == generation => {
                        Some(Anchor::Node(index))
                    }
                    _ => None,
                }
            }
        }
    }

    pub(super) fn position_of(&self, anchor: Anchor) -> Position {
        match anchor {
            Anchor::Sentinel => Position::new(self.sentinel, Link::Sentinel),
            Anchor::Node(index) => Position::new(
                self.id,
                Link::Node {
                    index,
                    generation: self.nodes[index].generation,
                },
            ),
        }
    }

    /// the position of the node linked after `anchor`, or the end position
    pub(super) fn position_after(&self, anchor: Anchor) -> Position {
        match self.next(anchor) {
            Some(index) => self.position_of(Anchor::Node(index)),
            None => Position::END,
        }
    }

    pub(super) fn next(&self, anchor: Anchor) -> Option<usize> {
        match anchor {
            Anchor::Sentinel => self.head,
            Anchor::Node(index) => self.entry(index).1,
        }
    }

    fn next_mut(&mut self, anchor: Anchor) -> &mut Option<usize> {
        match anchor {
            Anchor::Sentinel => &mut self.head,
            Anchor::Node(index) => match &mut self.nodes[index].internal {
                InternalNode::Data { next, .. } => next,
                InternalNode::Vacant { .. } => unreachable!("anchors always name linked nodes"),
            },
        }
    }

    /// borrow the value held by a linked node along with its next link
    pub(super) fn entry(&self, index: usize) -> (&T, Option<usize>) {
        match &self.nodes[index].internal {
            InternalNode::Data { data, next } => (data, *next),
            InternalNode::Vacant { .. } => unreachable!("linked indices never name vacant slots"),
        }
    }

    pub(super) fn data_mut(&mut self, index: usize) -> &mut T {
        match &mut self.nodes[index].internal {
            InternalNode::Data { data, .. } => data,
            InternalNode::Vacant { .. } => unreachable!("linked indices never name vacant slots"),
        }
    }

    /// make sure `additional` more nodes can be linked without growing `nodes`
    pub(super) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let mut reusable = 0;
        let mut free = self.free;
        while let (Some(index), true) = (free, reusable < additional) {
            reusable += 1;
            free = match &self.nodes[index].internal {
                InternalNode::Vacant { next_free } => *next_free,
                InternalNode::Data { .. } => unreachable!("the free list only holds vacant slots"),
            };
        }
        self.nodes.try_reserve(additional - reusable)
    }

    /// link a new node holding `data` directly after `anchor` and return its
    /// slot. storage is secured before any link changes, so on error the
    /// chain is untouched and `data` is handed back.
    pub(super) fn link_after(
        &mut self,
        anchor: Anchor,
        data: T,
    ) -> Result<usize, (TryReserveError, T)> {
        if self.free.is_none() {
            if let Err(err) = self.nodes.try_reserve(1) {
                return Err((err, data));
            }
        }
        let next = self.next(anchor);
        let index = self.occupy(data, next);
        *self.next_mut(anchor) = Some(index);
        Ok(index)
    }

    fn occupy(&mut self, data: T, next: Option<usize>) -> usize {
        let Some(index) = self.free else {
            self.nodes.push(Node {
                generation: 0,
                internal: InternalNode::Data { data, next },
            });
            return self.nodes.len() - 1;
        };

        let node = &mut self.nodes[index];
        let next_free = match &node.internal {
            InternalNode::Vacant { next_free } => *next_free,
            InternalNode::Data { .. } => unreachable!("the free list only holds vacant slots"),
        };
        node.internal = InternalNode::Data { data, next };
        self.free = next_free;
        index
    }

    /// unlink the node following `anchor`, returning its value. the slot is
    /// vacated and its generation bumped.
    pub(super) fn unlink_after(&mut self, anchor: Anchor) -> Option<T> {
        let index = self.next(anchor)?;
        let node = &mut self.nodes[index];
        node.generation = node.generation.wrapping_add(1);
        let vacant = InternalNode::Vacant {
            next_free: self.free,
        };
        let InternalNode::Data { data, next } = core::mem::replace(&mut node.internal, vacant)
        else {
            unreachable!("linked indices never name vacant slots")
        };
        self.free = Some(index);
        *self.next_mut(anchor) = next;
        Some(data)
    }

    /// exchange every node with `other`, including the sentinels' next links.
    /// each sentinel keeps its identity, so a sentinel position still names
    /// the sentinel of the same chain afterwards.
    pub(super) fn swap_nodes(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.id, &mut other.id);
        core::mem::swap(&mut self.head, &mut other.head);
        core::mem::swap(&mut self.nodes, &mut other.nodes);
        core::mem::swap(&mut self.free, &mut other.free);
    }

    /// unlink every node, dropping values from front to back
    pub(super) fn clear(&mut self) {
        while self.unlink_after(Anchor::Sentinel).is_some() {}
    }

    pub(super) fn walk_mut(&mut self) -> ChainWalkMut<'_, T> {
        ChainWalkMut {
            nodes: NonNull::new(self.nodes.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            next: self.head,
            _marker: PhantomData,
        }
    }
}

/// yields a mutable reference to each linked value, front to back
pub(super) struct ChainWalkMut<'a, T> {
    nodes: NonNull<Node<T>>,
    next: Option<usize>,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for ChainWalkMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;

        // SAFETY: `index` was reached by following links from the sentinel, so
        // it is in bounds and occupied. the chain has no cycles, so every node
        // is visited at most once and no two yielded references alias. the
        // chain stays mutably borrowed for 'a.
        let node = unsafe { &mut *self.nodes.as_ptr().add(index) };
        match &mut node.internal {
            InternalNode::Data { data, next } => {
                self.next = *next;
                Some(data)
            }
            InternalNode::Vacant { .. } => unreachable!("linked indices never name vacant slots"),
        }
    }
}

unsafe impl<T: Send> Send for ChainWalkMut<'_, T> {}
unsafe impl<T: Sync> Sync for ChainWalkMut<'_, T> {}
