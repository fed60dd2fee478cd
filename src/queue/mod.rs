//! Generic sorted priority queue.
//!
//! A [`PriorityQueue`] keeps `(element, priority)` pairs ordered from the
//! highest priority to the lowest. What "higher" means, and when two elements
//! are the same, is supplied by an [`ElementBehavior`] implementation bound at
//! compile time.
//!
//! # Ordering
//!
//! Entries are sorted descending by [`ElementBehavior::compare_priorities`].
//! Among equal priorities the entry inserted first stays first (stable).
//!
//! # Value Semantics
//!
//! Insertion clones the element and the priority. The queue never holds a
//! reference to caller data, and [`Clone`] produces a fully independent copy.
//!
//! # Iteration
//!
//! Two styles are offered:
//! - [`PriorityQueue::iter`] borrows the queue; the borrow checker rules out
//!   mutation while iterating.
//! - [`PriorityQueue::get_first`] / [`PriorityQueue::get_next`] form a
//!   restartable cursor stored inside the queue. Every mutating call bumps a
//!   generation counter and leaves the cursor undefined until the next
//!   `get_first`.

use std::cmp::Ordering;

use thiserror::Error;

/// Behavior contract parameterizing a [`PriorityQueue`].
///
/// Duplication is [`Clone`] and release is [`Drop`]; the two remaining
/// operations are supplied here.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_agenda::queue::{ElementBehavior, PriorityQueue};
///
/// struct Jobs;
///
/// impl ElementBehavior for Jobs {
///     type Element = String;
///     type Priority = u32;
///
///     fn same_element(a: &String, b: &String) -> bool {
///         a == b
///     }
///
///     fn compare_priorities(a: &u32, b: &u32) -> Ordering {
///         a.cmp(b)
///     }
/// }
///
/// let mut queue = PriorityQueue::<Jobs>::new();
/// queue.insert(&"low".to_string(), &1).unwrap();
/// queue.insert(&"high".to_string(), &9).unwrap();
/// assert_eq!(queue.first().map(String::as_str), Some("high"));
/// ```
pub trait ElementBehavior {
    /// Payload type stored in the queue.
    type Element: Clone;
    /// Priority type the queue is sorted by.
    type Priority: Clone;

    /// Whether two elements denote the same entity.
    fn same_element(a: &Self::Element, b: &Self::Element) -> bool;

    /// Total order over priorities. `Greater` means `a` sorts before `b`.
    fn compare_priorities(a: &Self::Priority, b: &Self::Priority) -> Ordering;
}

/// Errors reported by [`PriorityQueue`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Growing the backing storage failed.
    #[error("out of memory while growing the queue")]
    OutOfMemory,
    /// The queue holds no entries.
    #[error("queue is empty")]
    Empty,
    /// No entry matches the requested element (and priority).
    #[error("element not found in queue")]
    NotFound,
    /// `get_next` was called without a valid cursor.
    #[error("cursor is undefined; call get_first first")]
    CursorUndefined,
}

/// Result alias for queue operations.
pub type QueueResult<T> = std::result::Result<T, QueueError>;

#[derive(Debug, Clone)]
struct Entry<E, P> {
    element: E,
    priority: P,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    position: usize,
    generation: u64,
}

/// A sequence of `(element, priority)` pairs kept in descending priority order.
pub struct PriorityQueue<B: ElementBehavior> {
    entries: Vec<Entry<B::Element, B::Priority>>,
    generation: u64,
    cursor: Option<Cursor>,
}

impl<B: ElementBehavior> PriorityQueue<B> {
    /// Creates an empty queue with an undefined cursor.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
            cursor: None,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry equal to `element` (under the contract) exists.
    pub fn contains(&self, element: &B::Element) -> bool {
        self.position_of(element).is_some()
    }

    /// Inserts clones of `element` and `priority`.
    ///
    /// The new entry lands after every entry whose priority is greater than
    /// or equal to `priority`, so earlier insertions win ties.
    pub fn insert(&mut self, element: &B::Element, priority: &B::Priority) -> QueueResult<()> {
        self.entries
            .try_reserve(1)
            .map_err(|_| QueueError::OutOfMemory)?;
        self.invalidate();
        let at = self.insertion_point(priority);
        self.entries.insert(
            at,
            Entry {
                element: element.clone(),
                priority: priority.clone(),
            },
        );
        Ok(())
    }

    /// Removes the highest-priority entry.
    pub fn remove_first(&mut self) -> QueueResult<()> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }
        self.invalidate();
        self.entries.remove(0);
        Ok(())
    }

    /// Removes the first entry equal to `element`.
    pub fn remove_matching(&mut self, element: &B::Element) -> QueueResult<()> {
        let index = self.position_of(element).ok_or(QueueError::NotFound)?;
        self.invalidate();
        self.entries.remove(index);
        Ok(())
    }

    /// Re-keys the entry matching `element` with priority `old_priority`.
    ///
    /// Equal old and new priorities leave the entry where it is. Otherwise the
    /// entry is moved as if freshly inserted with `new_priority`, keeping the
    /// stored element.
    pub fn change_priority(
        &mut self,
        element: &B::Element,
        old_priority: &B::Priority,
        new_priority: &B::Priority,
    ) -> QueueResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| {
                B::same_element(&e.element, element)
                    && B::compare_priorities(&e.priority, old_priority) == Ordering::Equal
            })
            .ok_or(QueueError::NotFound)?;

        self.invalidate();
        if B::compare_priorities(old_priority, new_priority) == Ordering::Equal {
            return Ok(());
        }

        // Removal frees a slot, so the reinsert never reallocates.
        let mut entry = self.entries.remove(index);
        entry.priority = new_priority.clone();
        let at = self.insertion_point(&entry.priority);
        self.entries.insert(at, entry);
        Ok(())
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.invalidate();
        self.entries.clear();
    }

    /// Highest-priority element, without touching the cursor.
    pub fn first(&self) -> Option<&B::Element> {
        self.entries.first().map(|e| &e.element)
    }

    /// Priority of the head entry.
    pub fn first_priority(&self) -> Option<&B::Priority> {
        self.entries.first().map(|e| &e.priority)
    }

    /// Resets the cursor to the head and returns its element.
    pub fn get_first(&mut self) -> Option<&B::Element> {
        if self.entries.is_empty() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(Cursor {
            position: 0,
            generation: self.generation,
        });
        self.entries.first().map(|e| &e.element)
    }

    /// Advances the cursor and returns the following element.
    ///
    /// Returns `Ok(None)` once the end is reached, and
    /// [`QueueError::CursorUndefined`] if `get_first` has not been called
    /// since the last mutation.
    pub fn get_next(&mut self) -> QueueResult<Option<&B::Element>> {
        let cursor = match self.cursor {
            Some(c) if c.generation == self.generation => c,
            _ => return Err(QueueError::CursorUndefined),
        };
        let position = (cursor.position + 1).min(self.entries.len());
        self.cursor = Some(Cursor {
            position,
            generation: cursor.generation,
        });
        Ok(self.entries.get(position).map(|e| &e.element))
    }

    /// Borrowing iterator over `(element, priority)` in queue order.
    pub fn iter(&self) -> Iter<'_, B> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Elements in queue order.
    pub fn elements(&self) -> impl Iterator<Item = &B::Element> + '_ {
        self.entries.iter().map(|e| &e.element)
    }

    /// First element satisfying `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&B::Element>
    where
        F: FnMut(&B::Element) -> bool,
    {
        self.entries
            .iter()
            .find(|e| predicate(&e.element))
            .map(|e| &e.element)
    }

    /// First `(element, priority)` pair satisfying `predicate`.
    pub fn find_entry<F>(&self, mut predicate: F) -> Option<(&B::Element, &B::Priority)>
    where
        F: FnMut(&B::Element) -> bool,
    {
        self.entries
            .iter()
            .find(|e| predicate(&e.element))
            .map(|e| (&e.element, &e.priority))
    }

    /// Mutable access to the first element satisfying `predicate`.
    ///
    /// The stored priority is not reachable from here, so edits cannot break
    /// the ordering. Counts as a mutation for the cursor.
    pub fn find_mut<F>(&mut self, mut predicate: F) -> Option<&mut B::Element>
    where
        F: FnMut(&B::Element) -> bool,
    {
        self.invalidate();
        self.entries
            .iter_mut()
            .find(|e| predicate(&e.element))
            .map(|e| &mut e.element)
    }

    /// Whether every adjacent pair is in non-increasing priority order.
    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| B::compare_priorities(&w[0].priority, &w[1].priority) != Ordering::Less)
    }

    fn position_of(&self, element: &B::Element) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| B::same_element(&e.element, element))
    }

    fn insertion_point(&self, priority: &B::Priority) -> usize {
        self.entries
            .partition_point(|e| B::compare_priorities(&e.priority, priority) != Ordering::Less)
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.cursor = None;
    }
}

impl<B: ElementBehavior> Default for PriorityQueue<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ElementBehavior> Clone for PriorityQueue<B> {
    /// Deep copy. The copy starts with an undefined cursor.
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            generation: 0,
            cursor: None,
        }
    }
}

impl<B> std::fmt::Debug for PriorityQueue<B>
where
    B: ElementBehavior,
    B::Element: std::fmt::Debug,
    B::Priority: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.element, &e.priority)))
            .finish()
    }
}

/// Borrowing iterator returned by [`PriorityQueue::iter`].
pub struct Iter<'a, B: ElementBehavior> {
    inner: std::slice::Iter<'a, Entry<B::Element, B::Priority>>,
}

impl<'a, B: ElementBehavior> Iterator for Iter<'a, B> {
    type Item = (&'a B::Element, &'a B::Priority);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.element, &e.priority))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<B: ElementBehavior> ExactSizeIterator for Iter<'_, B> {}

impl<'a, B: ElementBehavior> IntoIterator for &'a PriorityQueue<B> {
    type Item = (&'a B::Element, &'a B::Priority);
    type IntoIter = Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
