//! This crate provides an insertion-ordered [`List`] that can be used as a
//! list, a queue, a deque or a stack. It is a doubly-linked list with owned
//! nodes, closed into a ring by a single ghost (sentinel) node instead of
//! null head and tail references.
//!
//! Pushing and popping at either end take constant time. Indexed accesses,
//! positional inserts and removals take *O*(*n*) time, and searches by
//! value compare elements with their [`PartialEq`] implementation.
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::new();
//! list.push_back("A");
//! list.push_back("B");
//! list.push_front("C");
//! assert_eq!(list.to_vec(), vec!["C", "A", "B"]);
//!
//! assert_eq!(list.remove(1), Ok("A")); // removes the element at index 1
//! assert!(!list.contains(&"A"));
//! assert_eq!(&*list.to_boxed_slice(), &["C", "B"]);
//!
//! assert!(list.insert_unique("D"));
//! assert!(!list.insert_unique("D")); // already present
//! assert_eq!(list.len(), 3);
//! ```
//!
//! # Memory Layout
//!
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                       Ghost node    │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ element T ║           ║ element T ║                        ┊(uninit T) ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//!
//! The ghost node is allocated with the list and lives as long as it. Its
//! `next` is the front (head) of the list and its `prev` is the back (tail).
//! In an empty list both point back to the ghost node itself.
//!
//! Each element node is allocated on the heap when inserted and released
//! as soon as it is removed: the list is the only owner of its nodes, and
//! no reference to a node outlives its removal.
//!
//! In a list with length *n*, the element nodes are indexed by 0, 1, ...,
//! *n* - 1, and the ghost node stands for position *n*, which is where
//! [`List::insert`] appends.
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] are double-ended, fused and exact-size. Going
//! forward follows the `next` links, going backward follows the `prev`
//! links. [`List::descending_iter`] iterates from the back to the front, and
//! [`List::iter_from`] starts from a given index.
//!
//! A [`Cursor`] stands at one position of the list and steps either way
//! from there, keeping track of its index.
//!
//! ```
//! use sentinel_list::List;
//!
//! let list = List::from([1, 2, 3]);
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! assert_eq!(list.descending_iter().collect::<Vec<_>>(), vec![&3, &2, &1]);
//! assert_eq!(list.iter_from(1).unwrap().collect::<Vec<_>>(), vec![&2, &3]);
//!
//! let mut cursor = list.cursor(1).unwrap();
//! cursor.move_next().unwrap();
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor.current(), Some(&2));
//! ```
//!
//! Iterators borrow the list, so it cannot be structurally modified while
//! one of them is alive.
//!
//! # Errors
//!
//! Operations with a precondition return a [`ListError`] instead of
//! panicking, and never touch the list when they fail.
//!
//! # Threads
//!
//! The list has no internal synchronization. It is [`Send`] and [`Sync`]
//! when its elements are, so it can be moved to another thread or shared
//! behind a lock.
//!
//! # Features
//!
//! - `serde`: implements `Serialize` and `Deserialize` for [`List`], as a
//!   sequence of its elements.
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::Cursor
//! [`ListError`]: crate::ListError

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{DescendingIter, IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{Direction, List};

pub mod list;

mod error;
