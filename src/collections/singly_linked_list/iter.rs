use core::iter::FusedIterator;

use super::chain::{ChainWalkMut, NodeChain};
use super::SinglyLinkedList;

/// an immutable front-to-back iterator over a [`SinglyLinkedList`]
pub struct Iter<'a, T> {
    chain: &'a NodeChain<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(chain: &'a NodeChain<T>, len: usize) -> Self {
        Self {
            chain,
            next: chain.head(),
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let (data, next) = self.chain.entry(index);
        self.next = next;
        self.remaining -= 1;
        Some(data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// a mutable front-to-back iterator over a [`SinglyLinkedList`]
pub struct IterMut<'a, T> {
    walk: ChainWalkMut<'a, T>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(chain: &'a mut NodeChain<T>, len: usize) -> Self {
        Self {
            walk: chain.walk_mut(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.walk.next()?;
        self.remaining -= 1;
        Some(data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// an owning iterator that pops values off the front of a [`SinglyLinkedList`]
pub struct IntoIter<T> {
    list: SinglyLinkedList<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(list: SinglyLinkedList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod iter_test {
    use super::*;

    #[test]
    fn basic_iter_test() {
        let nums = [73, 42, 114, 901];
        let ll = SinglyLinkedList::from(nums);

        for (value, num) in ll.iter().zip(nums.iter()) {
            assert_eq!(value, num);
        }
        assert_eq!(ll.iter().count(), nums.len());
    }

    #[test]
    fn iter_terminates_properly_single_element() {
        let val = 42;
        let mut ll = SinglyLinkedList::new();
        ll.push_front(val);

        let mut iter = ll.iter();
        assert_eq!(&val, iter.next().expect("should produce a value"));

        for _i in 0..10 {
            assert!(iter.next().is_none());
        }
    }

    #[test]
    fn iter_reports_exact_len() {
        let ll = SinglyLinkedList::from([1, 2, 3]);
        let mut iter = ll.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn cloned_iter_resumes_independently() {
        let ll = SinglyLinkedList::from([1, 2, 3]);
        let mut iter = ll.iter();
        iter.next();
        let copy = iter.clone();
        assert_eq!(iter.collect::<Vec<_>>(), [&2, &3]);
        assert_eq!(copy.collect::<Vec<_>>(), [&2, &3]);
    }

    #[test]
    fn basic_iter_mut_test() {
        let nums = [73, 42, 114, 901];
        let mut ll = SinglyLinkedList::from(nums);

        for value in ll.iter_mut() {
            *value += 1;
        }

        for (value, num) in ll.iter().zip(nums.iter()) {
            assert_eq!(value, &(*num + 1));
        }
    }

    #[test]
    fn iter_mut_follows_list_order_after_splicing() {
        let mut ll = SinglyLinkedList::from([1, 3]);
        let first = ll.begin();
        ll.insert_after(first, 2);
        ll.push_front(0);

        let mut seen = Vec::new();
        for value in &mut ll {
            seen.push(*value);
            *value *= 2;
        }
        assert_eq!(seen, [0, 1, 2, 3]);
        assert_eq!(ll, SinglyLinkedList::from([0, 2, 4, 6]));
    }

    #[test]
    fn iter_mut_terminates_properly_multi_element() {
        let mut ll = SinglyLinkedList::from([42, 73]);

        let mut iter = ll.iter_mut();
        assert_eq!(iter.len(), 2);
        assert_eq!(&42, iter.next().expect("should produce a value"));
        assert_eq!(&73, iter.next().expect("should produce a value"));

        for _i in 0..10 {
            assert!(iter.next().is_none());
        }
    }

    #[test]
    fn into_iter_yields_owned_values_in_order() {
        let ll = SinglyLinkedList::from([
            String::from("peter"),
            String::from("paul"),
            String::from("mary"),
        ]);
        let mut iter = ll.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().as_deref(), Some("peter"));
        assert_eq!(iter.collect::<Vec<_>>(), ["paul", "mary"]);
    }

    #[test]
    fn borrowed_into_iter_matches_iter() {
        let ll = SinglyLinkedList::from([5, 6, 7]);
        let mut total = 0;
        for value in &ll {
            total += value;
        }
        assert_eq!(total, 18);
    }
}
