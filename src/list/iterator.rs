use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A half-open `start..end` range of nodes, shared by the borrowing
/// iterators. `start` is the next node to yield going forward, and `end` is
/// the node right after the next one to yield going backward (the ghost node
/// for a full range).
struct Span<T> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    len: usize,
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> Span<T> {
    fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Take the node at `start` and move `start` along its `next` link.
    fn take_front(&mut self) -> Option<NonNull<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        let node = self.start;
        // SAFETY: a non-empty span of a borrowed list starts at an element
        // node, whose links are valid.
        self.start = unsafe { node.as_ref().next };
        self.len -= 1;
        Some(node)
    }

    /// Move `end` along its `prev` link and take the node it lands on.
    fn take_back(&mut self) -> Option<NonNull<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: in a non-empty span, `end.prev` is an element node.
        self.end = unsafe { self.end.as_ref().prev };
        self.len -= 1;
        Some(self.end)
    }
}

/// An iterator over the elements of a `List`.
///
/// Iterating forward follows the `next` links, and iterating backward (with
/// [`next_back`] or [`rev`]) follows the `prev` links. The iterator is
/// exhausted once both directions meet, or when [`has_more`] turns `false`.
///
/// `Iter` borrows the list immutably, so the list cannot be modified while
/// it is iterated.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
///
/// [`next_back`]: DoubleEndedIterator::next_back
/// [`rev`]: Iterator::rev
/// [`has_more`]: Iter::has_more
pub struct Iter<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self::from_range(list.front_node(), list.ghost_node(), list.len())
    }

    /// `start..end` must be a valid range of a borrowed list, and `len`
    /// must be its length.
    pub(crate) fn from_range(start: NonNull<Node<T>>, end: NonNull<Node<T>>, len: usize) -> Self {
        Self {
            span: Span { start, end, len },
            _marker: PhantomData,
        }
    }

    /// Returns `true` if there are elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1]);
    /// let mut iter = list.iter();
    /// assert!(iter.has_more());
    /// iter.next();
    /// assert!(!iter.has_more());
    /// ```
    #[inline]
    pub fn has_more(&self) -> bool {
        !self.span.is_empty()
    }

    fn element(node: NonNull<Node<T>>) -> &'a T {
        // SAFETY: spans only yield element nodes of a list borrowed for `'a`.
        unsafe { node.as_ref().element() }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.span.take_front().map(Self::element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.take_back().map(Self::element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An iterator over the elements of a `List` from the back to the front.
///
/// Each step follows the `prev` link of the last yielded node. Apart from
/// the direction, it offers the same protocol as [`Iter`], including
/// [`has_more`](DescendingIter::has_more).
///
/// # Examples
///
/// ```
/// use sentinel_list::List;
///
/// let list = List::from([1, 2]);
/// let mut iter = list.descending_iter();
/// assert!(iter.has_more());
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&1));
/// assert!(!iter.has_more());
/// ```
pub struct DescendingIter<'a, T: 'a> {
    inner: Iter<'a, T>,
}

impl<'a, T: 'a> DescendingIter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self { inner: list.iter() }
    }

    /// Returns `true` if there are elements left.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.inner.has_more()
    }
}

impl<T> Clone for DescendingIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for DescendingIter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DescendingIter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for DescendingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for DescendingIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, T: 'a> ExactSizeIterator for DescendingIter<'a, T> {}

impl<'a, T: 'a> FusedIterator for DescendingIter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// Only the elements can be mutated, never the links. `IterMut` borrows the
/// list mutably, so the list cannot even be read while it is alive.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let span = Span {
            start: list.front_node(),
            end: list.ghost_node(),
            len: list.len(),
        };
        Self {
            span,
            _marker: PhantomData,
        }
    }

    fn element(mut node: NonNull<Node<T>>) -> &'a mut T {
        // SAFETY: spans yield each element node of the exclusively borrowed
        // list at most once.
        unsafe { node.as_mut().element_mut() }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut span = self.span;
        while let Some(node) = span.take_front() {
            // SAFETY: only shared references are created, and they do not
            // outlive `fmt`.
            f.field(unsafe { node.as_ref().element() });
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.span.take_front().map(Self::element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len, Some(self.span.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.take_back().map(Self::element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `List`, created by
/// [`List::into_iter`]. Each step detaches a node from one of the ends.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }

    fn last(mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Sync> Send for DescendingIter<'_, T> {}

unsafe impl<T: Sync> Sync for DescendingIter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::{List, ListError};
    use rstest::rstest;
    use std::fmt::Debug;

    /// Pull `front` elements from the front, then the rest from the back,
    /// checking `len` after every step.
    fn pull_both_ends<I>(mut iter: I, front: usize) -> (Vec<I::Item>, Vec<I::Item>)
    where
        I: DoubleEndedIterator + ExactSizeIterator,
        I::Item: PartialEq + Debug,
    {
        let total = iter.len();
        let mut head = Vec::new();
        for _ in 0..front {
            head.extend(iter.next());
            assert_eq!(iter.len(), total - head.len());
        }
        let mut tail = Vec::new();
        while let Some(item) = iter.next_back() {
            tail.push(item);
            assert_eq!(iter.len(), total - head.len() - tail.len());
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        (head, tail)
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(10, 0)]
    #[case(10, 4)]
    #[case(10, 10)]
    fn iterators_meet_in_the_middle(#[case] len: i32, #[case] front: usize) {
        let vec: Vec<i32> = (0..len).collect();
        let mut list = List::from_iter(vec.clone());
        let split = front.min(vec.len());
        let expected_head: Vec<i32> = vec[..split].to_vec();
        let expected_tail: Vec<i32> = vec[split..].iter().rev().copied().collect();

        let (head, tail) = pull_both_ends(list.iter().copied(), front);
        assert_eq!((&head, &tail), (&expected_head, &expected_tail));

        let (head, tail) = pull_both_ends(list.iter_mut().map(|e| *e), front);
        assert_eq!((&head, &tail), (&expected_head, &expected_tail));

        let (head, tail) = pull_both_ends(list.descending_iter().copied(), front);
        let reversed: Vec<i32> = vec.iter().rev().copied().collect();
        assert_eq!(head, reversed[..split].to_vec());
        assert_eq!(tail, reversed[split..].iter().rev().copied().collect::<Vec<_>>());

        let (head, tail) = pull_both_ends(list.into_iter(), front);
        assert_eq!((head, tail), (expected_head, expected_tail));
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut list = List::from([1, 2, 3]);
        list.iter_mut().rev().for_each(|e| *e *= 10);
        assert_eq!(list.to_vec(), vec![10, 20, 30]);
        list.assert_ring();
    }

    #[test]
    fn forward_and_descending_directions_differ() {
        let list = List::from([1, 2, 3]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.descending_iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn descending_has_more() {
        let list = List::from([1]);
        let mut iter = list.descending_iter();
        assert!(iter.has_more());
        assert_eq!(iter.next(), Some(&1));
        assert!(!iter.has_more());
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    #[case(0, vec![1, 2, 3])]
    #[case(1, vec![2, 3])]
    #[case(2, vec![3])]
    fn iter_from_index(#[case] index: usize, #[case] expected: Vec<i32>) {
        let list = List::from([1, 2, 3]);
        let iter = list.iter_from(index).unwrap();
        assert_eq!(iter.len(), expected.len());
        assert_eq!(iter.copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn iter_from_out_of_range() {
        let list = List::from([1, 2, 3]);
        assert_eq!(
            list.iter_from(3).err(),
            Some(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    fn iterators_on_empty_list_are_exhausted(#[case] index: usize) {
        let list = List::<i32>::new();
        assert!(!list.iter_from(index).unwrap().has_more());
        assert!(!list.descending_iter().has_more());
        assert!(!list.iter().has_more());
    }

    #[test]
    fn has_more_until_both_ends_meet() {
        let list = List::from(['a', 'b']);
        let mut iter = list.iter();
        assert!(iter.has_more());
        assert_eq!(iter.next(), Some(&'a'));
        assert!(iter.has_more());
        assert_eq!(iter.next_back(), Some(&'b'));
        assert!(!iter.has_more());
    }

    #[test]
    fn extend_appends_at_the_back() {
        let mut list = List::from([1]);
        list.extend([2, 3]);
        list.extend(&[4, 5]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
        list.assert_ring();
    }

    #[test]
    fn debug_format() {
        let mut list = List::from([1, 2]);
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2])");
        assert_eq!(format!("{:?}", list.descending_iter()), "DescendingIter([2, 1])");
        assert_eq!(format!("{:?}", list.iter_mut()), "IterMut(1, 2)");
        assert_eq!(format!("{:?}", list.into_iter()), "IntoIter([1, 2])");
    }
}
