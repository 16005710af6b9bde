use super::chain::ChainId;

/// identifies a single node of a [`SinglyLinkedList`](super::SinglyLinkedList):
/// the sentinel ("before begin"), an element, or the end of the list.
///
/// positions do not borrow the list, so they stay usable across insertions and
/// erasures elsewhere in the list. a position becomes stale once the node it
/// names is erased; stale positions never compare equal to a live one and are
/// rejected by every operation that takes a position.
///
/// two positions are equal iff they name the same node. every end position is
/// equal to every other end position, regardless of the list it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    target: Option<Target>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Target {
    chain: ChainId,
    link: Link,
}

/// the node a non-end position refers to within its chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) enum Link {
    Sentinel,
    Node { index: usize, generation: u64 },
}

impl Position {
    /// the one-past-the-last position, shared by every list
    pub const END: Position = Position { target: None };

    pub(super) fn new(chain: ChainId, link: Link) -> Self {
        Self {
            target: Some(Target { chain, link }),
        }
    }

    pub(super) fn target(self) -> Option<(ChainId, Link)> {
        self.target.map(|t| (t.chain, t.link))
    }

    /// returns true if this is the one-past-the-last position
    pub fn is_end(&self) -> bool {
        self.target.is_none()
    }

    /// returns true if this position names a list's sentinel
    pub fn is_before_begin(&self) -> bool {
        matches!(
            self.target,
            Some(Target {
                link: Link::Sentinel,
                ..
            })
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_position_is_end() {
        assert_eq!(Position::default(), Position::END);
        assert!(Position::default().is_end());
        assert!(!Position::default().is_before_begin());
    }

    #[test]
    fn sentinel_positions_are_before_begin() {
        let p = Position::new(ChainId::fresh(), Link::Sentinel);
        assert!(p.is_before_begin());
        assert!(!p.is_end());
    }

    #[test]
    fn sentinels_of_different_chains_are_distinct() {
        let a = Position::new(ChainId::fresh(), Link::Sentinel);
        let b = Position::new(ChainId::fresh(), Link::Sentinel);
        assert_ne!(a, b);
    }

    #[test]
    fn generation_is_part_of_identity() {
        let chain = ChainId::fresh();
        let old = Position::new(
            chain,
            Link::Node {
                index: 3,
                generation: 0,
            },
        );
        let reused = Position::new(
            chain,
            Link::Node {
                index: 3,
                generation: 1,
            },
        );
        assert_ne!(old, reused);
    }
}
