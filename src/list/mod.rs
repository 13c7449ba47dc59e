use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;

use tracing::trace;

use crate::error::ListError;
use crate::{Cursor, DescendingIter, IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
#[cfg(feature = "serde")]
mod serde_impl;

/// The `List` is an insertion-ordered doubly-linked list with owned nodes,
/// implemented as a ring anchored by a single ghost (sentinel) node.
///
/// Inserting or removing at either end takes constant time, while accessing,
/// inserting or removing at an arbitrary index takes *O*(*n*) time, walking
/// from whichever end is closer.
///
/// Besides the list operations, the `List` can be used as a queue
/// ([`offer`], [`poll`], [`peek`]), a deque ([`push_front`], [`push_back`],
/// [`pop_front`], [`pop_back`]) and a stack ([`push`], [`pop`]).
///
/// The `List` contains:
/// - a pointer `ghost` that points to the ghost node;
/// - a length field `len` counting the nodes reachable from the ghost node.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
///
/// [`offer`]: List::offer
/// [`poll`]: List::poll
/// [`peek`]: List::peek
/// [`push_front`]: List::push_front
/// [`push_back`]: List::push_back
/// [`pop_front`]: List::pop_front
/// [`pop_back`]: List::pop_back
/// [`push`]: List::push
/// [`pop`]: List::pop
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    /// the number of element nodes in the ring
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of the ring.
///
/// The `element` of the ghost node is never initialized. The `element` of
/// every other node is initialized from its creation until it is detached.
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    element: MaybeUninit<T>,
}

/// The scanning direction of the value-based removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the front (head) to the back (tail).
    Forward,
    /// From the back (tail) to the front (head).
    Backward,
}

/// Nodes fragment detached from a list, used in bulk insertion.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { self.ghost.as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { self.ghost.as_ref().prev }
    }

    /// Detach a single node `node` from the list, release it and return its
    /// element.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list,
    /// or whether it is the ghost node.
    ///
    /// If the `node` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> T {
        debug_assert!(node != self.ghost, "Cannot detach the ghost node");
        self.len -= 1;
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node.element.assume_init()
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Attach a range of detached nodes to the list, between `prev` and `next`.
    ///
    /// It is unsafe for the same reasons as [`List::attach_node`].
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        self.len += detached.len;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach all nodes from the list and consume it, or return `None` if the
    /// list is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid range,
    /// and the ghost node is reset before the list is dropped.
    pub(crate) fn into_detached(mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        let (front, back, len) = (self.front_node(), self.back_node(), self.len);
        // SAFETY: the ghost node is always valid.
        unsafe { connect(self.ghost, self.ghost) };
        self.len = 0;
        Some(DetachedNodes::new(front, back, len))
    }

    /// Resolve a position in `0..=len` to its node. Position `len` is the
    /// ghost node, i.e. the position right after the back.
    pub(crate) fn resolve_position(&self, index: usize) -> Result<NonNull<Node<T>>, ListError> {
        if index > self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.walk_to(index))
    }

    /// Resolve an index in `0..len` to its element node.
    pub(crate) fn resolve_element(&self, index: usize) -> Result<NonNull<Node<T>>, ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.walk_to(index))
    }

    /// Walk to the node at `index` from whichever end is closer.
    fn walk_to(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index <= self.len);
        // SAFETY: at most `len` steps are taken in either direction, so every
        // visited node belongs to the ring.
        unsafe {
            if index <= self.len / 2 {
                let mut node = self.front_node();
                for _ in 0..index {
                    node = node.as_ref().next;
                }
                node
            } else {
                let mut node = self.ghost;
                for _ in index..self.len {
                    node = node.as_ref().prev;
                }
                node
            }
        }
    }

    /// Free every element node and reset the ring.
    fn drop_nodes(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = new_ghost();
        let _marker = PhantomData;
        Self {
            ghost,
            len: 0,
            _marker,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`, dropping them in order.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing list");
        self.drop_nodes();
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        Some(unsafe { self.front_node().as_ref().element() })
    }

    /// Provides a mutable reference to the front element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, and it is borrowed mutably.
        Some(unsafe { self.front_node().as_mut().element_mut() })
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        Some(unsafe { self.back_node().as_ref().element() })
    }

    /// Provides a mutable reference to the back element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, and it is borrowed mutably.
        Some(unsafe { self.back_node().as_mut().element_mut() })
    }

    /// Like [`List::front`], but fails with [`ListError::EmptyCollection`]
    /// on an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.first(), Err(ListError::EmptyCollection));
    /// list.push_back('a');
    /// assert_eq!(list.first(), Ok(&'a'));
    /// ```
    pub fn first(&self) -> Result<&T, ListError> {
        self.front().ok_or(ListError::EmptyCollection)
    }

    /// Like [`List::back`], but fails with [`ListError::EmptyCollection`]
    /// on an empty list.
    pub fn last(&self) -> Result<&T, ListError> {
        self.back().ok_or(ListError::EmptyCollection)
    }

    /// Provides a reference to the element at the given index, or `None` if
    /// `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.get(1), Some(&2));
    /// assert_eq!(list.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let node = self.resolve_element(index).ok()?;
        // SAFETY: `node` is an element node of the list.
        Some(unsafe { node.as_ref().element() })
    }

    /// Provides a mutable reference to the element at the given index, or
    /// `None` if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let mut node = self.resolve_element(index).ok()?;
        // SAFETY: `node` is an element node of the list, which is borrowed mutably.
        Some(unsafe { node.as_mut().element_mut() })
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        // SAFETY: `ghost` and `ghost.next` are adjacent nodes of the list,
        // which are the same node when the list is empty.
        unsafe { self.attach_node(self.ghost, self.front_node(), Node::new_detached(elt)) };
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        // SAFETY: `ghost.prev` and `ghost` are adjacent nodes of the list.
        unsafe { self.attach_node(self.back_node(), self.ghost, Node::new_detached(elt)) };
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        Some(unsafe { self.detach_node(self.front_node()) })
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        Some(unsafe { self.detach_node(self.back_node()) })
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let mut list = List::from(["a"]);
    /// assert_eq!(list.remove_first(), Ok("a"));
    /// assert_eq!(list.remove_first(), Err(ListError::EmptyCollection));
    /// ```
    pub fn remove_first(&mut self) -> Result<T, ListError> {
        self.pop_front().ok_or(ListError::EmptyCollection)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::EmptyCollection`] if the list is empty.
    pub fn remove_last(&mut self) -> Result<T, ListError> {
        self.pop_back().ok_or(ListError::EmptyCollection)
    }

    /// Pushes an element onto the list seen as a stack, i.e. at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut stack = List::new();
    /// stack.push(1);
    /// stack.push(2);
    /// assert_eq!(stack.pop(), Some(2));
    /// assert_eq!(stack.pop(), Some(1));
    /// assert_eq!(stack.pop(), None);
    /// ```
    #[inline]
    pub fn push(&mut self, elt: T) {
        self.push_front(elt);
    }

    /// Pops the top element of the list seen as a stack, i.e. the front.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    /// Enqueues an element into the list seen as a queue, i.e. at the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut queue = List::new();
    /// queue.offer(1);
    /// queue.offer(2);
    /// assert_eq!(queue.peek(), Some(&1));
    /// assert_eq!(queue.poll(), Some(1));
    /// assert_eq!(queue.poll(), Some(2));
    /// assert_eq!(queue.poll(), None);
    /// ```
    #[inline]
    pub fn offer(&mut self, elt: T) {
        self.push_back(elt);
    }

    /// Dequeues the head of the list seen as a queue, i.e. the front.
    #[inline]
    pub fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }

    /// Provides a reference to the head of the list seen as a queue.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.front()
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator starting at the given index.
    ///
    /// An empty list yields an exhausted iterator whatever the index is.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if the list is not empty and
    /// `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([0, 1, 2]);
    /// let iter = list.iter_from(1).unwrap();
    /// assert_eq!(iter.copied().collect::<Vec<_>>(), vec![1, 2]);
    /// assert!(list.iter_from(3).is_err());
    /// ```
    pub fn iter_from(&self, index: usize) -> Result<Iter<'_, T>, ListError> {
        if self.is_empty() {
            return Ok(Iter::new(self));
        }
        let start = self.resolve_element(index)?;
        Ok(Iter::from_range(start, self.ghost, self.len - index))
    }

    /// Provides a reverse iterator, yielding the elements from the back to
    /// the front by following the `prev` links.
    ///
    /// Unlike a reversed [`Iter`], it reports [`has_more`] itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut iter = list.descending_iter();
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert!(!iter.has_more());
    /// ```
    ///
    /// [`has_more`]: DescendingIter::has_more
    #[inline]
    pub fn descending_iter(&self) -> DescendingIter<'_, T> {
        DescendingIter::new(self)
    }

    /// Provides a read-only cursor at the position `index` in `0..=len`.
    /// Position `len` is the ghost node, right after the back.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor(2).unwrap();
    /// assert_eq!(cursor.current(), Some(&3));
    /// cursor.move_prev().unwrap();
    /// assert_eq!((cursor.index(), cursor.current()), (1, Some(&2)));
    /// assert!(list.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, index: usize) -> Result<Cursor<'_, T>, ListError> {
        let node = self.resolve_position(index)?;
        Ok(Cursor::new(self, node, index))
    }

    /// Provides a cursor at the front node, or at the ghost node if the list
    /// is empty.
    #[inline]
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// Provides a cursor at the ghost node.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost, self.len)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(list.to_vec(), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Adds an element at the given index in the list, shifting the element
    /// currently at `index` (if any) and all after it towards the back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(6, 6).is_err());
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, elt: T) -> Result<(), ListError> {
        let next = self.resolve_position(index)?;
        // SAFETY: `next.prev` and `next` are adjacent nodes of the list.
        unsafe { self.attach_node(next.as_ref().prev, next, Node::new_detached(elt)) };
        Ok(())
    }

    /// Adds all the elements at the given index in the list, keeping their
    /// iteration order.
    ///
    /// The index is validated before `elements` is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 5]);
    /// list.insert_all(1, [2, 3, 4]).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_all<I>(&mut self, index: usize, elements: I) -> Result<(), ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let next = self.resolve_position(index)?;
        let other: List<T> = elements.into_iter().collect();
        let inserted = other.len;
        if let Some(detached) = other.into_detached() {
            // SAFETY: `next.prev` and `next` are adjacent nodes of the list.
            unsafe { self.attach_nodes(next.as_ref().prev, next, detached) };
        }
        trace!(index, inserted, len = self.len, "inserted elements");
        Ok(())
    }

    /// Removes the element at the given index and returns it.
    ///
    /// The node located at `index` is the one detached, even if an equal
    /// element appears earlier in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(1);
    /// list.push_front(2);
    /// list.push_front(3);
    ///
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert!(list.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        let node = self.resolve_element(index)?;
        // SAFETY: `node` is an element node of the list.
        Ok(unsafe { self.detach_node(node) })
    }

    /// Replaces the element at the given index and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from(['a', 'b']);
    /// assert_eq!(list.set(1, 'c'), Ok('b'));
    /// assert_eq!(list.to_vec(), vec!['a', 'c']);
    /// ```
    pub fn set(&mut self, index: usize, elt: T) -> Result<T, ListError> {
        let mut node = self.resolve_element(index)?;
        // SAFETY: `node` is an element node of the list, which is borrowed mutably.
        Ok(mem::replace(unsafe { node.as_mut().element_mut() }, elt))
    }

    /// Check the ring invariants, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_ring(&self) {
        let mut count = 0;
        let mut node = self.ghost;
        unsafe {
            loop {
                let next = node.as_ref().next;
                assert_eq!(next.as_ref().prev, node, "asymmetric links");
                node = next;
                if node == self.ghost {
                    break;
                }
                count += 1;
                assert!(count <= self.len, "more nodes than `len`");
            }
        }
        assert_eq!(count, self.len);
        assert_eq!(self.is_empty(), self.len == 0);
        assert_eq!(self.back_node() == self.ghost, self.len == 0);
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        Self::allocate(MaybeUninit::new(element))
    }

    fn allocate(element: MaybeUninit<T>) -> NonNull<Node<T>> {
        // `node.prev` and `node.next` are dangling until the node is attached.
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    /// It is unsafe because the ghost node has no element.
    pub(crate) unsafe fn element(&self) -> &T {
        self.element.assume_init_ref()
    }

    /// It is unsafe because the ghost node has no element.
    pub(crate) unsafe fn element_mut(&mut self) -> &mut T {
        self.element.assume_init_mut()
    }
}

impl<T> DetachedNodes<T> {
    /// It must be guaranteed that `front..=back` is a valid range and its
    /// length is equal to `len`.
    fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        let _marker = PhantomData;
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker,
        }
    }
}

pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

fn new_ghost<T>() -> NonNull<Node<T>> {
    let ghost = Node::allocate(MaybeUninit::uninit());
    // SAFETY: `ghost` was just allocated, and its element is never read.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.drop_nodes();
        // SAFETY: the ghost node was allocated by `new_ghost`, and no element
        // node refers to it anymore. Its element is `MaybeUninit`, so it is not
        // dropped.
        drop(unsafe { Box::from_raw(self.ghost.as_ptr()) });
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
