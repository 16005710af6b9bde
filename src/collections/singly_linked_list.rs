mod chain;
mod cursor;
mod iter;
mod position;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::TryReserveError;

use chain::{Anchor, NodeChain};

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};
pub use position::Position;

pub type ListResult<T> = Result<T, ListError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("failed to allocate a list node: {0}")]
    AllocFailed(#[from] TryReserveError),
    #[error("position does not name a live node of this list")]
    InvalidPosition,
}

/// a failed insertion. the value that could not be linked is handed back
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct InsertError<T> {
    pub error: ListError,
    pub value: T,
}

impl<T> InsertError<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> From<InsertError<T>> for ListError {
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}

/// a singly-linked list with a sentinel node in front of the first element.
///
/// every mutation is expressed relative to the node *before* the one being
/// added or removed, and the sentinel plays that role for the first element,
/// so inserting or erasing at the front is no different from doing so in the
/// middle of the list.
///
/// nodes never move once linked. a [`Position`] naming a node stays valid
/// until that node is erased, whatever happens elsewhere in the list, and
/// [`swap`](Self::swap) moves positions along with the nodes they name. the
/// sentinel is the one node that never changes lists.
pub struct SinglyLinkedList<T> {
    chain: NodeChain<T>,
    /// the number of non-sentinel nodes in the list
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    /// create an empty list. does not allocate.
    pub fn new() -> Self {
        Self {
            chain: NodeChain::new(),
            len: 0,
        }
    }

    /// build a list holding the values of `iter` in the order they are
    /// produced. if storage runs out partway through, every node built so far
    /// is released and the error is returned.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> ListResult<Self> {
        let iter = iter.into_iter();
        let mut list = Self::new();
        list.chain.try_reserve(iter.size_hint().0)?;

        let mut tail = Anchor::Sentinel;
        for value in iter {
            tail = Anchor::Node(list.link_after(tail, value)?);
        }
        Ok(list)
    }

    /// get the number of elements in the list, not including the sentinel node
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the length of the list is 0
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&T> {
        let index = self.chain.head()?;
        Some(self.chain.entry(index).0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let index = self.chain.head()?;
        Some(self.chain.data_mut(index))
    }

    /// push a value to the front of the list
    ///
    /// # Panics
    /// if storage for the node cannot be allocated, in which case the list is
    /// unchanged
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            panic!("push_front failed: {err}");
        }
    }

    /// push a value to the front of the list. if storage for the node cannot
    /// be allocated the list is unchanged and `value` comes back in the error.
    pub fn try_push_front(&mut self, value: T) -> Result<(), InsertError<T>> {
        self.link_after(Anchor::Sentinel, value).map(|_| ())
    }

    /// remove the first element and return it, or None if the list is empty
    pub fn pop_front(&mut self) -> Option<T> {
        let value = self.chain.unlink_after(Anchor::Sentinel)?;
        self.len -= 1;
        Some(value)
    }

    /// insert `value` directly after `position` and return the position of the
    /// new node. inserting after [`before_begin`](Self::before_begin) is a push
    /// to the front.
    ///
    /// # Panics
    /// if `position` is the end position, belongs to another list, or names an
    /// erased node, or if storage for the node cannot be allocated. the list is
    /// unchanged in every case.
    pub fn insert_after(&mut self, position: Position, value: T) -> Position {
        match self.try_insert_after(position, value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("insert_after failed: {}", err.error),
        }
    }

    /// like [`insert_after`](Self::insert_after), but reports failures
    /// instead of panicking. the list is unchanged on error, and `value` comes
    /// back in the error.
    pub fn try_insert_after(
        &mut self,
        position: Position,
        value: T,
    ) -> Result<Position, InsertError<T>> {
        let Some(anchor) = self.chain.resolve(position) else {
            tracing::debug!(?position, "rejected insert after an unusable position");
            return Err(InsertError {
                error: ListError::InvalidPosition,
                value,
            });
        };
        let index = self.link_after(anchor, value)?;
        Ok(self.chain.position_of(Anchor::Node(index)))
    }

    /// erase the node directly after `position`, dropping its value, and return
    /// the position of the node that now follows `position`. if nothing follows
    /// `position`, including when it is the end position, nothing is erased and
    /// the end position is returned.
    ///
    /// # Panics
    /// if `position` belongs to another list or names an erased node
    pub fn erase_after(&mut self, position: Position) -> Position {
        if position.is_end() {
            return Position::END;
        }

        let anchor = self.anchor(position);
        if self.chain.unlink_after(anchor).is_some() {
            self.len -= 1;
        }
        self.chain.position_after(anchor)
    }

    /// drop every element, leaving the sentinel in place
    pub fn clear(&mut self) {
        self.chain.clear();
        self.len = 0;
    }

    /// exchange the contents of two lists in constant time. no element is
    /// moved, copied, or dropped, and element positions keep naming the same
    /// nodes, which are now reached through the other list. each list keeps
    /// its own sentinel, so [`before_begin`](Self::before_begin) is the same
    /// position before and after.
    pub fn swap(&mut self, other: &mut Self) {
        self.chain.swap_nodes(&mut other.chain);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    /// the position of the sentinel, which comes before the first element
    pub fn before_begin(&self) -> Position {
        self.chain.position_of(Anchor::Sentinel)
    }

    /// the position of the first element, or the end position if the list is
    /// empty
    pub fn begin(&self) -> Position {
        self.chain.position_after(Anchor::Sentinel)
    }

    pub fn end(&self) -> Position {
        Position::END
    }

    /// the position following `position`
    ///
    /// # Panics
    /// if `position` is the end position, belongs to another list, or names an
    /// erased node
    pub fn advance(&self, position: Position) -> Position {
        assert!(
            !position.is_end(),
            "cannot advance a position past the end of the list"
        );
        self.chain.position_after(self.anchor(position))
    }

    /// get the element at `position`, or None if it is the sentinel, the end,
    /// or not a live node of this list
    pub fn get(&self, position: Position) -> Option<&T> {
        match self.chain.resolve(position)? {
            Anchor::Node(index) => Some(self.chain.entry(index).0),
            Anchor::Sentinel => None,
        }
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        match self.chain.resolve(position)? {
            Anchor::Node(index) => Some(self.chain.data_mut(index)),
            Anchor::Sentinel => None,
        }
    }

    /// returns true if `position` names the sentinel or an element of this list
    pub fn contains_position(&self, position: Position) -> bool {
        self.chain.resolve(position).is_some()
    }

    /// return a read-only cursor at `position`
    pub fn cursor(&self, position: Position) -> Cursor<'_, T> {
        Cursor::new(self, position)
    }

    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    pub fn cursor_before_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.before_begin())
    }

    /// return a mutable cursor at `position`
    pub fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, T> {
        CursorMut::new(self, position)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let begin = self.begin();
        CursorMut::new(self, begin)
    }

    pub fn cursor_before_front_mut(&mut self) -> CursorMut<'_, T> {
        let before_begin = self.before_begin();
        CursorMut::new(self, before_begin)
    }

    /// return an immutable iterator for this list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.chain, self.len)
    }

    /// return a mutable iterator for this list
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.chain, self.len)
    }

    fn anchor(&self, position: Position) -> Anchor {
        match self.chain.resolve(position) {
            Some(anchor) => anchor,
            None => panic!("{position:?} does not name a live node of this list"),
        }
    }

    fn link_after(&mut self, anchor: Anchor, value: T) -> Result<usize, InsertError<T>> {
        let index = self
            .chain
            .link_after(anchor, value)
            .map_err(|(err, value)| {
                tracing::warn!(len = self.len, %err, "node allocation failed, list left unchanged");
                InsertError {
                    error: ListError::from(err),
                    value,
                }
            })?;
        self.len += 1;
        Ok(index)
    }
}

impl<T: Clone> SinglyLinkedList<T> {
    /// copy every element into a new, independent list
    pub fn try_clone(&self) -> ListResult<Self> {
        Self::try_from_iter(self.iter().cloned())
    }

    /// replace the contents of `self` with copies of the elements of `source`.
    /// `self` is only modified once the copy is complete, so on error it is
    /// left exactly as it was.
    pub fn try_clone_from(&mut self, source: &Self) -> ListResult<()> {
        let mut replacement = source.try_clone()?;
        self.swap(&mut replacement);
        Ok(())
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        tracing::trace!(from = self.len, to = source.len, "replacing list contents");
        // a panicking element clone unwinds before `self` is touched
        let mut replacement = source.clone();
        self.swap(&mut replacement);
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        match Self::try_from_iter(iter) {
            Ok(list) => list,
            Err(err) => panic!("failed to build list: {err}"),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SinglyLinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: PartialOrd> PartialOrd for SinglyLinkedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for SinglyLinkedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for SinglyLinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}



// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_derive::Arbitrary;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn singly_linked_list_state_machine_test(
            sequential
            100..500
            =>
            SinglyLinkedList<u32>
        );
    }

    /// the possible transitions of the state machine. `after` counts nodes
    /// from the sentinel, so 0 is the sentinel and 1 is the first element.
    #[derive(Clone, Debug)]
    pub enum Transition {
        PushFront(u32),
        PopFront,
        InsertAfter { after: usize, value: u32 },
        EraseAfter { after: usize },
        Clear,
        SwapWithCopy,
    }

    pub struct SinglyLinkedListStateMachine;

    impl ReferenceStateMachine for SinglyLinkedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            let len = state.len();
            prop_oneof![
                2 => any::<u32>().prop_map(Transition::PushFront),
                1 => Just(Transition::PopFront),
                3 => (0..=len, any::<u32>())
                    .prop_map(|(after, value)| Transition::InsertAfter { after, value }),
                2 => (0..=len).prop_map(|after| Transition::EraseAfter { after }),
                1 => Just(Transition::SwapWithCopy),
                1 => Just(Transition::Clear),
            ]
            .boxed()
        }

        fn preconditions(state: &Self::State, transition: &Self::Transition) -> bool {
            match transition {
                Transition::InsertAfter { after, .. } | Transition::EraseAfter { after } => {
                    *after <= state.len()
                }
                _ => true,
            }
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::PushFront(value) => state.insert(0, *value),
                Transition::PopFront => {
                    if !state.is_empty() {
                        state.remove(0);
                    }
                }
                Transition::InsertAfter { after, value } => state.insert(*after, *value),
                Transition::EraseAfter { after } => {
                    if *after < state.len() {
                        state.remove(*after);
                    }
                }
                Transition::Clear => state.clear(),
                Transition::SwapWithCopy => {}
            }
            state
        }
    }

    fn nth_from_sentinel(ll: &SinglyLinkedList<u32>, n: usize) -> Position {
        let mut position = ll.before_begin();
        for _ in 0..n {
            position = ll.advance(position);
        }
        position
    }

    impl StateMachineTest for SinglyLinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = SinglyLinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::PushFront(value) => state.push_front(value),
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::InsertAfter { after, value } => {
                    let at = nth_from_sentinel(&state, after);
                    let inserted = state.insert_after(at, value);
                    assert_eq!(state.advance(at), inserted);
                    assert_eq!(state.get(inserted), Some(&value));
                }
                Transition::EraseAfter { after } => {
                    let at = nth_from_sentinel(&state, after);
                    let expected = if at.is_end() || state.advance(at).is_end() {
                        Position::END
                    } else {
                        state.advance(state.advance(at))
                    };
                    assert_eq!(state.erase_after(at), expected);
                }
                Transition::Clear => state.clear(),
                Transition::SwapWithCopy => {
                    let begin = state.begin();
                    let before_begin = state.before_begin();
                    let mut copy = state.clone();
                    state.swap(&mut copy);
                    assert_eq!(state, copy);
                    assert_eq!(copy.begin(), begin);
                    assert_eq!(state.before_begin(), before_begin);
                }
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.iter().count(), ref_state.len());
            assert!(state.iter().eq(ref_state.iter()));
        }
    }

    /// front-anchored operations for the plain property tests
    #[derive(Arbitrary, Clone, Copy, Debug)]
    enum FrontOp {
        PushFront(u8),
        PopFront,
        InsertAfterFront(u8),
        EraseAfterFront,
    }

    proptest! {
        #[test]
        fn len_matches_reachable_nodes(ops in proptest::collection::vec(any::<FrontOp>(), 0..64)) {
            let mut ll = SinglyLinkedList::new();
            for op in ops {
                match op {
                    FrontOp::PushFront(v) => ll.push_front(v),
                    FrontOp::PopFront => {
                        ll.pop_front();
                    }
                    FrontOp::InsertAfterFront(v) => {
                        if !ll.is_empty() {
                            ll.insert_after(ll.begin(), v);
                        }
                    }
                    FrontOp::EraseAfterFront => {
                        ll.erase_after(ll.begin());
                    }
                }
                prop_assert_eq!(ll.iter().count(), ll.len());
                prop_assert_eq!(ll.is_empty(), ll.begin() == ll.end());
            }
        }

        #[test]
        fn tail_position_survives_front_operations(ops in proptest::collection::vec(any::<FrontOp>(), 0..64)) {
            let mut ll = SinglyLinkedList::from([u8::MAX]);
            let tail = ll.begin();
            for op in ops {
                match op {
                    FrontOp::PushFront(v) => ll.push_front(v),
                    FrontOp::InsertAfterFront(v) => {
                        ll.insert_after(ll.before_begin(), v);
                    }
                    // never erase the tail itself
                    FrontOp::PopFront | FrontOp::EraseAfterFront => {
                        if ll.len() > 1 {
                            ll.pop_front();
                        }
                    }
                }
                prop_assert_eq!(ll.get(tail), Some(&u8::MAX));
                prop_assert_eq!(ll.advance(tail), ll.end());
            }
        }

        #[test]
        fn ordering_matches_slices(a in proptest::collection::vec(any::<u8>(), 0..8), b in proptest::collection::vec(any::<u8>(), 0..8)) {
            let la: SinglyLinkedList<u8> = a.iter().copied().collect();
            let lb: SinglyLinkedList<u8> = b.iter().copied().collect();
            prop_assert_eq!(la.cmp(&lb), a.cmp(&b));
            prop_assert_eq!(la == lb, a == b);
        }
    }
}
