use crate::error::ListError;
use crate::list::{Direction, List, Node};
use crate::Iter;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;
use tracing::trace;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

/// Duplicates the list by appending a clone of every element to a fresh
/// list, duplicates included.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::new();
        for elt in self {
            list.push_back(elt.clone());
        }
        list
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl Direction {
    /// Returns the neighbour of `node` in this direction.
    ///
    /// # Safety
    ///
    /// `node` must be a node of a well-formed list.
    unsafe fn step<T>(self, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
        match self {
            Direction::Forward => node.as_ref().next,
            Direction::Backward => node.as_ref().prev,
        }
    }
}

// private methods
impl<T> List<T> {
    /// Returns the first node, scanning in `direction`, whose element
    /// satisfies `pred`.
    fn find_node<F>(&self, direction: Direction, mut pred: F) -> Option<NonNull<Node<T>>>
    where
        F: FnMut(&T) -> bool,
    {
        let ghost = self.ghost_node();
        // SAFETY: the scan starts from a neighbour of the ghost node and stops
        // when it gets back to it, so only element nodes are read.
        unsafe {
            let mut node = direction.step(ghost);
            while node != ghost {
                if pred(node.as_ref().element()) {
                    return Some(node);
                }
                node = direction.step(node);
            }
        }
        None
    }

    /// Detach every node whose element satisfies `pred`, returning how many
    /// were removed.
    ///
    /// The matching nodes are collected in a first pass, and only detached
    /// once the scan is over.
    fn remove_nodes_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut targets = Vec::new();
        // SAFETY: the scan walks the element nodes from the front to the ghost.
        unsafe {
            let mut node = self.front_node();
            while node != ghost {
                if pred(node.as_ref().element()) {
                    targets.push(node);
                }
                node = node.as_ref().next;
            }
        }
        let removed = targets.len();
        for node in targets {
            // SAFETY: every target is a distinct element node of the list, and
            // detaching one node does not invalidate the others.
            drop(unsafe { self.detach_node(node) });
        }
        removed
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns the index of the first element equal to `x`, or `None` if there
    /// is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 1]);
    /// assert_eq!(list.index_of(&1), Some(0));
    /// assert_eq!(list.index_of(&3), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x)
    }

    /// Returns the index of the last element equal to `x`, or `None` if there
    /// is no such element.
    ///
    /// The scan starts from the back of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 1]);
    /// assert_eq!(list.last_index_of(&1), Some(2));
    /// assert_eq!(list.last_index_of(&3), list.index_of(&3));
    /// ```
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().rposition(|e| e == x)
    }

    /// Returns `true` if every element of `items` is contained in the list.
    ///
    /// It stops at the first element that is not found. An empty `items`
    /// is trivially contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert!(list.contains_all(&[3, 1]));
    /// assert!(!list.contains_all(&[1, 4]));
    /// assert!(!list.contains_all(&[4, 1]));
    /// ```
    pub fn contains_all<'b, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'b T>,
        T: PartialEq<T> + 'b,
    {
        items.into_iter().all(|x| self.contains(x))
    }

    /// Appends `elt` to the back of the list unless an equal element is
    /// already present. Returns whether it was inserted.
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
    /// let mut list = List::new();
    /// assert!(list.insert_unique("X"));
    /// assert!(!list.insert_unique("X"));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, elt: T) -> bool
    where
        T: PartialEq<T>,
    {
        if self.contains(&elt) {
            return false;
        }
        self.push_back(elt);
        true
    }

    /// Removes the first element equal to `x`, scanning from the front.
    /// Returns whether an element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 1]);
    /// assert!(list.remove_item(&1));
    /// assert_eq!(list.to_vec(), vec![2, 1]);
    /// assert!(!list.remove_item(&3));
    /// ```
    pub fn remove_item(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.remove_item_directional(x, Direction::Forward)
    }

    /// Removes the first element equal to `x` met when scanning in the given
    /// direction. Returns whether an element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Direction, List};
    ///
    /// let mut list = List::from(['a', 'b', 'a', 'c']);
    /// assert!(list.remove_item_directional(&'a', Direction::Backward));
    /// assert_eq!(list.to_vec(), vec!['a', 'b', 'c']);
    /// assert!(list.remove_item_directional(&'a', Direction::Forward));
    /// assert_eq!(list.to_vec(), vec!['b', 'c']);
    /// ```
    pub fn remove_item_directional(&mut self, x: &T, direction: Direction) -> bool
    where
        T: PartialEq<T>,
    {
        match self.find_node(direction, |e| e == x) {
            Some(node) => {
                // SAFETY: `node` is an element node of the list.
                drop(unsafe { self.detach_node(node) });
                true
            }
            None => false,
        }
    }

    /// Same as [`List::remove_item`].
    #[inline]
    pub fn remove_first_occurrence(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.remove_item_directional(x, Direction::Forward)
    }

    /// Removes the last element equal to `x`, scanning from the back.
    /// Returns whether an element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 1]);
    /// assert!(list.remove_last_occurrence(&1));
    /// assert_eq!(list.to_vec(), vec![1, 2]);
    /// ```
    #[inline]
    pub fn remove_last_occurrence(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.remove_item_directional(x, Direction::Backward)
    }

    /// Removes every element equal to some element of `items`. Returns
    /// whether the list changed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * *m*) time, where *m* is
    /// the number of `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3, 2, 1]);
    /// assert!(list.remove_all(&[1, 4]));
    /// assert_eq!(list.to_vec(), vec![2, 3, 2]);
    /// assert!(!list.remove_all(&[4]));
    /// ```
    pub fn remove_all<'b, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'b T>,
        T: PartialEq<T> + 'b,
    {
        let items: Vec<&T> = items.into_iter().collect();
        let removed = self.remove_nodes_where(|e| items.contains(&e));
        trace!(removed, len = self.len(), "removed all matching elements");
        removed > 0
    }

    /// Keeps only the elements equal to some element of `items`. Returns
    /// whether the list changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from([1, 2, 3, 2, 1]);
    /// assert!(list.retain_all(&[2, 3]));
    /// assert_eq!(list.to_vec(), vec![2, 3, 2]);
    /// assert!(!list.retain_all(&[2, 3]));
    /// ```
    pub fn retain_all<'b, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'b T>,
        T: PartialEq<T> + 'b,
    {
        let items: Vec<&T> = items.into_iter().collect();
        let removed = self.remove_nodes_where(|e| !items.contains(&e));
        trace!(removed, len = self.len(), "retained matching elements");
        removed > 0
    }

    /// Returns a new list holding clones of the elements in `from..to`.
    ///
    /// The returned list shares nothing with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::IndexOutOfRange`] unless `from <= to <= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([0, 1, 2, 3]);
    /// let mut sub = list.sub_list(1, 3).unwrap();
    /// sub.push_back(9);
    /// assert_eq!(sub.to_vec(), vec![1, 2, 9]);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// assert!(list.sub_list(3, 2).is_err());
    /// ```
    pub fn sub_list(&self, from: usize, to: usize) -> Result<List<T>, ListError>
    where
        T: Clone,
    {
        self.sub_list_into(from, to)
    }

    /// Like [`List::sub_list`], but collects the clones into any collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::collections::VecDeque;
    ///
    /// let list = List::from(['a', 'b', 'c']);
    /// let sub: VecDeque<char> = list.sub_list_into(1, 3).unwrap();
    /// assert_eq!(sub, VecDeque::from(['b', 'c']));
    /// ```
    pub fn sub_list_into<C>(&self, from: usize, to: usize) -> Result<C, ListError>
    where
        T: Clone,
        C: FromIterator<T>,
    {
        let len = self.len();
        if to > len {
            return Err(ListError::IndexOutOfRange { index: to, len });
        }
        if from > to {
            return Err(ListError::IndexOutOfRange { index: from, len });
        }
        let start = self.resolve_position(from)?;
        trace!(from, to, "copying sub-list");
        Ok(Iter::from_range(start, self.ghost_node(), len - from)
            .take(to - from)
            .cloned()
            .collect())
    }

    /// Returns a vector holding clones of the elements, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns a newly allocated fixed-size array holding clones of the
    /// elements, in order.
    pub fn to_boxed_slice(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.to_vec().into_boxed_slice()
    }

    /// Consumes the list into a vector of its elements, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from([3, 1, 2]);
    /// assert_eq!(list.into_vec(), vec![3, 1, 2]);
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Clones the elements into the front of `dst` and returns the written
    /// part of it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InsufficientCapacity`] if `dst` is shorter than
    /// the list, leaving `dst` untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    ///
    /// let list = List::from([1, 2]);
    /// let mut buffer = [0; 3];
    /// assert_eq!(list.clone_into_slice(&mut buffer), Ok(&mut [1, 2][..]));
    /// assert_eq!(buffer, [1, 2, 0]);
    ///
    /// let mut small = [0; 1];
    /// assert_eq!(
    ///     list.clone_into_slice(&mut small),
    ///     Err(ListError::InsufficientCapacity { required: 2, capacity: 1 })
    /// );
    /// ```
    pub fn clone_into_slice<'s>(&self, dst: &'s mut [T]) -> Result<&'s mut [T], ListError>
    where
        T: Clone,
    {
        if dst.len() < self.len() {
            return Err(ListError::InsufficientCapacity {
                required: self.len(),
                capacity: dst.len(),
            });
        }
        let dst = &mut dst[..self.len()];
        for (slot, elt) in dst.iter_mut().zip(self) {
            slot.clone_from(elt);
        }
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, List, ListError};
    use rstest::rstest;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[test]
    fn insert_unique_is_idempotent() {
        let mut list = List::new();
        assert!(list.insert_unique("X"));
        assert_eq!(list.len(), 1);
        assert!(!list.insert_unique("X"));
        assert_eq!(list.len(), 1);
        assert!(list.insert_unique("Y"));
        assert_eq!(list.to_vec(), vec!["X", "Y"]);
        list.assert_ring();
    }

    #[rstest]
    #[case(&[], 1, None, None)]
    #[case(&[1], 1, Some(0), Some(0))]
    #[case(&[1, 2, 1, 3], 1, Some(0), Some(2))]
    #[case(&[1, 2, 1, 3], 4, None, None)]
    fn index_of_and_last_index_of(
        #[case] elements: &[i32],
        #[case] x: i32,
        #[case] first: Option<usize>,
        #[case] last: Option<usize>,
    ) {
        let list = List::from_iter(elements.iter().copied());
        assert_eq!(list.index_of(&x), first);
        assert_eq!(list.last_index_of(&x), last);
        assert_eq!(list.contains(&x), first.is_some());
    }

    #[rstest]
    #[case(Direction::Forward, vec![2, 1, 3])]
    #[case(Direction::Backward, vec![1, 2, 3])]
    fn remove_item_directional(#[case] direction: Direction, #[case] expected: Vec<i32>) {
        let mut list = List::from([1, 2, 1, 3]);
        assert!(list.remove_item_directional(&1, direction));
        assert_eq!(list.to_vec(), expected);
        assert!(!list.remove_item_directional(&4, direction));
        list.assert_ring();
    }

    #[test]
    fn remove_first_and_last_occurrence() {
        let mut list = List::from(["a", "b", "a", "b"]);
        assert!(list.remove_last_occurrence(&"a"));
        assert!(list.remove_first_occurrence(&"b"));
        assert_eq!(list.to_vec(), vec!["a", "b"]);
        assert!(list.remove_item(&"a"));
        assert!(list.remove_item(&"b"));
        assert!(!list.remove_item(&"b"));
        assert!(list.is_empty());
        list.assert_ring();
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[2], true)]
    #[case(&[3, 1, 2], true)]
    #[case(&[4, 1], false)]
    #[case(&[1, 4], false)]
    fn contains_all(#[case] items: &[i32], #[case] expected: bool) {
        let list = List::from([1, 2, 3]);
        assert_eq!(list.contains_all(items), expected);
    }

    #[test]
    fn remove_all_removes_every_match() {
        let mut list = List::from([1, 2, 1, 3, 1]);
        assert!(list.remove_all(&List::from([1, 5])));
        assert_eq!(list.to_vec(), vec![2, 3]);
        assert!(!list.remove_all(&[5]));
        assert!(!list.remove_all(&[]));
        list.assert_ring();
    }

    #[test]
    fn retain_all_keeps_matches_only() {
        let mut list = List::from([1, 2, 1, 3, 1]);
        assert!(list.retain_all(&[1]));
        assert_eq!(list.to_vec(), vec![1, 1, 1]);
        assert!(!list.retain_all(&[1, 2]));
        assert!(list.retain_all(&[]));
        assert!(list.is_empty());
        list.assert_ring();
    }

    #[rstest]
    #[case(0, 0, vec![])]
    #[case(0, 4, vec![0, 1, 2, 3])]
    #[case(1, 3, vec![1, 2])]
    #[case(3, 4, vec![3])]
    #[case(4, 4, vec![])]
    fn sub_list(#[case] from: usize, #[case] to: usize, #[case] expected: Vec<i32>) {
        let list = List::from([0, 1, 2, 3]);
        let sub = list.sub_list(from, to).unwrap();
        sub.assert_ring();
        assert_eq!(sub.to_vec(), expected);
    }

    #[rstest]
    #[case(0, 5, 5)]
    #[case(3, 2, 3)]
    #[case(5, 6, 6)]
    fn sub_list_out_of_range(#[case] from: usize, #[case] to: usize, #[case] index: usize) {
        let list = List::from([0, 1, 2, 3]);
        assert_eq!(
            list.sub_list(from, to),
            Err(ListError::IndexOutOfRange { index, len: 4 })
        );
    }

    #[test]
    fn sub_list_is_a_snapshot() {
        let mut list = List::from([String::from("a"), String::from("b"), String::from("c")]);
        let mut sub = list.sub_list(0, 2).unwrap();
        sub.set(0, String::from("x")).unwrap();
        sub.pop_back();
        assert_eq!(list.to_vec(), vec!["a", "b", "c"]);
        list.clear();
        assert_eq!(sub.to_vec(), vec!["x"]);
    }

    #[test]
    fn clone_is_independent_and_keeps_duplicates() {
        let list = List::from([1, 1, 2]);
        let mut copy = list.clone();
        assert_eq!(copy, list);
        copy.push_front(0);
        assert_eq!(list.to_vec(), vec![1, 1, 2]);
        assert_eq!(copy.to_vec(), vec![0, 1, 1, 2]);
        copy.assert_ring();
    }

    #[test]
    fn export_to_arrays() {
        let list = List::from(['C', 'B']);
        assert_eq!(&*list.to_boxed_slice(), &['C', 'B']);
        let mut buffer = ['_'; 2];
        assert_eq!(list.clone_into_slice(&mut buffer).map(|s| s.len()), Ok(2));
        assert_eq!(buffer, ['C', 'B']);
        assert_eq!(List::<char>::new().to_boxed_slice().len(), 0);
    }

    #[test]
    fn equality_and_hash() {
        fn hash_of<T: Hash>(x: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            x.hash(&mut hasher);
            hasher.finish()
        }
        let a = List::from([1, 2]);
        let b = List::from_iter(1..=2);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, List::from([1, 2, 3]));
        assert_ne!(a, List::from([2, 1]));
    }
}
