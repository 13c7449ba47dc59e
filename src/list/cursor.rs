use crate::error::ListError;
use crate::list::{List, Node};
use std::fmt;
use std::ptr::NonNull;

/// A read-only cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can step back-and-forth
/// from where it stands, and it always knows its index.
///
/// In a list with length *n*, there are *n* + 1 valid positions for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the ghost node of the list.
///
/// # Examples
///
/// The ghost node of the list is denoted by `#`.
/// ```
/// use sentinel_list::List;
///
/// // [ A B C D #]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // [ A|B C D #] (index = 1)
/// let mut cursor = list.cursor(1).unwrap();
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // [ A B|C D #] (index = 2)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'C'));
///
/// // Stepping back returns to where the cursor was: [ A|B C D #]
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.index(), 1);
/// assert_eq!(cursor.current(), Some(&'B'));
/// assert_eq!(cursor.previous(), Some(&'A'));
/// ```
///
/// The cursor borrows the list, so the list cannot be modified while the
/// cursor is alive.
/// ```compile_fail
/// use sentinel_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let cursor = list.cursor_start();
/// list.push_back(4);
/// println!("{:?}", cursor.current());
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    current: NonNull<Node<T>>,
    list: &'a List<T>,
}

// Private methods
impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    fn is_ghost_node(&self) -> bool {
        self.current == self.list.ghost_node()
    }

    fn prev_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `current.prev` is always valid since it is a cyclic list.
        unsafe { self.current.as_ref().prev }
    }

    fn next_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `current.next` is always valid since it is a cyclic list.
        unsafe { self.current.as_ref().next }
    }
}

impl<'a, T: 'a> Cursor<'a, T> {
    /// Returns the index of the cursor, `len` when it is at the ghost node.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if an element is under the cursor, i.e. the cursor is
    /// not at the ghost node.
    #[inline]
    pub fn has_next(&self) -> bool {
        !self.is_ghost_node()
    }

    /// Returns `true` if an element lies before the cursor.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns the element under the cursor, or `None` at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// assert_eq!(list.cursor(0).unwrap().current(), Some(&1));
    /// assert_eq!(list.cursor(1).unwrap().current(), Some(&2));
    /// assert_eq!(list.cursor(2).unwrap().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost nodes always hold an initialized element, and
        // the list is borrowed for `'a`.
        Some(unsafe { self.current.as_ref().element() })
    }

    /// Returns the element right before the cursor, or `None` at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// assert_eq!(list.cursor(0).unwrap().previous(), None);
    /// assert_eq!(list.cursor(2).unwrap().previous(), Some(&2));
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        if !self.has_previous() {
            return None;
        }
        // SAFETY: the cursor is not at the front, so its previous node is an
        // element node.
        Some(unsafe { self.prev_node().as_ref().element() })
    }

    /// Moves the cursor one step towards the back.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CursorBoundary`] at the ghost node. The cursor
    /// stays put.
    pub fn move_next(&mut self) -> Result<(), ListError> {
        if self.is_ghost_node() {
            return Err(ListError::CursorBoundary);
        }
        self.current = self.next_node();
        self.index += 1;
        Ok(())
    }

    /// Moves the cursor one step towards the front, following the `prev`
    /// link of the node under it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::CursorBoundary`] at the front. The cursor stays
    /// put.
    pub fn move_prev(&mut self) -> Result<(), ListError> {
        if !self.has_previous() {
            return Err(ListError::CursorBoundary);
        }
        self.current = self.prev_node();
        self.index -= 1;
        Ok(())
    }

    /// Moves the cursor to the position `target` in `0..=len`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] if `target > len`. The cursor
    /// stays put.
    pub fn seek_to(&mut self, target: usize) -> Result<(), ListError> {
        self.current = self.list.resolve_position(target)?;
        self.index = target;
        Ok(())
    }

    /// Moves the cursor to the front of the list.
    #[inline]
    pub fn move_to_start(&mut self) {
        self.index = 0;
        self.current = self.list.front_node();
    }

    /// Moves the cursor to the ghost node.
    #[inline]
    pub fn move_to_end(&mut self) {
        self.index = self.list.len();
        self.current = self.list.ghost_node();
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("current", &self.current())
            .finish()
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::{List, ListError};
    use rstest::rstest;

    #[test]
    fn cursor_steps_back_from_its_position() {
        let list = List::from([1, 2, 3, 4]);
        let mut cursor = list.cursor(1).unwrap();
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_next().unwrap();
        assert_eq!(cursor.current(), Some(&3));
        cursor.move_prev().unwrap();
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(cursor.previous(), Some(&1));
    }

    #[test]
    fn cursor_walks_both_directions() {
        let list = List::from(['a', 'b', 'c']);

        let mut cursor = list.cursor_start();
        let mut forward = Vec::new();
        while let Some(&element) = cursor.current() {
            forward.push((cursor.index(), element));
            cursor.move_next().unwrap();
        }
        assert_eq!(forward, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
        assert!(!cursor.has_next());
        assert_eq!(cursor.move_next(), Err(ListError::CursorBoundary));
        assert_eq!(cursor.index(), 3);

        let mut backward = Vec::new();
        while let Some(&element) = cursor.previous() {
            cursor.move_prev().unwrap();
            backward.push((cursor.index(), element));
        }
        assert_eq!(backward, vec![(2, 'c'), (1, 'b'), (0, 'a')]);
        assert!(!cursor.has_previous());
        assert_eq!(cursor.move_prev(), Err(ListError::CursorBoundary));
        assert_eq!(cursor.current(), Some(&'a'));
    }

    #[rstest]
    #[case(0, Some(1), None)]
    #[case(1, Some(2), Some(1))]
    #[case(3, None, Some(3))]
    fn cursor_at(#[case] index: usize, #[case] current: Option<i32>, #[case] previous: Option<i32>) {
        let list = List::from([1, 2, 3]);
        let cursor = list.cursor(index).unwrap();
        assert_eq!(cursor.index(), index);
        assert_eq!(cursor.current().copied(), current);
        assert_eq!(cursor.previous().copied(), previous);
    }

    #[test]
    fn cursor_out_of_range() {
        let list = List::from([1, 2, 3]);
        assert_eq!(
            list.cursor(4).err(),
            Some(ListError::IndexOutOfRange { index: 4, len: 3 })
        );

        let mut cursor = list.cursor(2).unwrap();
        assert!(cursor.seek_to(4).is_err());
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current(), Some(&3));
        cursor.seek_to(0).unwrap();
        assert_eq!(cursor.current(), Some(&1));
    }

    #[test]
    fn cursor_on_empty_list() {
        let list = List::<i32>::new();
        let mut cursor = list.cursor_start();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.previous(), None);
        assert!(cursor.move_next().is_err());
        assert!(cursor.move_prev().is_err());
    }

    #[test]
    fn cursor_jumps_to_the_ends() {
        let list = List::from([1, 2, 3]);
        let mut cursor = list.cursor(1).unwrap();
        cursor.move_to_end();
        assert_eq!((cursor.index(), cursor.current()), (3, None));
        assert_eq!(cursor.previous(), Some(&3));
        cursor.move_to_start();
        assert_eq!((cursor.index(), cursor.current()), (0, Some(&1)));
        assert_eq!(format!("{:?}", cursor), "Cursor { index: 0, current: Some(1) }");
    }
}
