//! MtfTable: key-value table that moves each looked-up entry to the front.

use crate::error::{InvariantError, TableError};
use crate::node_list::{NodeList, Position, MAX_NODES};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

/// Key comparison used by lookups and removals. Two keys are equal iff
/// `compare` returns `Ordering::Equal`.
///
/// Implemented for every `Fn(&Q, &Q) -> Ordering` and for [`OrdCompare`].
pub trait Comparator<Q: ?Sized> {
    fn compare(&self, stored: &Q, query: &Q) -> Ordering;
}

impl<Q: ?Sized, F> Comparator<Q> for F
where
    F: Fn(&Q, &Q) -> Ordering,
{
    #[inline]
    fn compare(&self, stored: &Q, query: &Q) -> Ordering {
        self(stored, query)
    }
}

/// Comparator used by [`MtfTable::new`]: `Ord` on whatever borrowed form of
/// the key is looked up, so `MtfTable<String, _>` accepts `&str`.
#[derive(Copy, Clone, Debug, Default)]
pub struct OrdCompare;

impl<Q: ?Sized + Ord> Comparator<Q> for OrdCompare {
    #[inline]
    fn compare(&self, stored: &Q, query: &Q) -> Ordering {
        stored.cmp(query)
    }
}

/// Hook that takes ownership of a key when its entry leaves the table.
pub type KeyDestructor<'a, K> = Box<dyn FnMut(K) + Send + 'a>;

/// Hook that takes ownership of a value when its entry leaves the table.
pub type ValueDestructor<'a, V> = Box<dyn FnMut(V) + Send + 'a>;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A move-to-front table.
///
/// Entries are kept in recency order, most recently inserted or looked up
/// first. Keys are matched with the comparator supplied at creation (equal
/// iff it returns `Ordering::Equal`); duplicates are allowed.
///
/// When an entry leaves the table (via [`remove`](Self::remove),
/// [`clear`](Self::clear), [`destroy`](Self::destroy) or drop) its key and
/// value are passed to the configured destructor hooks, or dropped if no
/// hook is set. Each key and value is released exactly once. Hooks may
/// borrow state that outlives `'a`.
///
/// Every operation needs exclusive access. Hooks must be `Send`, so the
/// table is `Send` whenever `K`, `V` and `C` are, and can be shared across
/// threads behind a `Mutex`.
pub struct MtfTable<'a, K, V, C = OrdCompare> {
    entries: NodeList<Entry<K, V>>,
    compare: C,
    key_destructor: Option<KeyDestructor<'a, K>>,
    value_destructor: Option<ValueDestructor<'a, V>>,
}

impl<'a, K: Ord, V> MtfTable<'a, K, V> {
    pub fn new() -> Self {
        Self::with_comparator(OrdCompare)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, OrdCompare)
    }
}

impl<'a, K: Ord, V> Default for MtfTable<'a, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, C> MtfTable<'a, K, V, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self {
            entries: NodeList::new(),
            compare,
            key_destructor: None,
            value_destructor: None,
        }
    }

    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        Self {
            entries: NodeList::with_capacity(capacity),
            compare,
            key_destructor: None,
            value_destructor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the hook that receives keys of released entries, including
    /// entries inserted before this call.
    pub fn set_key_destructor<F>(&mut self, hook: F)
    where
        F: FnMut(K) + Send + 'a,
    {
        self.key_destructor = Some(Box::new(hook));
    }

    /// Sets the hook that receives values of released entries, including
    /// entries inserted before this call.
    pub fn set_value_destructor<F>(&mut self, hook: F)
    where
        F: FnMut(V) + Send + 'a,
    {
        self.value_destructor = Some(Box::new(hook));
    }

    /// Removes the key hook; released keys are dropped from then on.
    pub fn clear_key_destructor(&mut self) -> Option<KeyDestructor<'a, K>> {
        self.key_destructor.take()
    }

    /// Removes the value hook; released values are dropped from then on.
    pub fn clear_value_destructor(&mut self) -> Option<ValueDestructor<'a, V>> {
        self.value_destructor.take()
    }

    pub fn has_key_destructor(&self) -> bool {
        self.key_destructor.is_some()
    }

    pub fn has_value_destructor(&self) -> bool {
        self.value_destructor.is_some()
    }

    /// Inserts at the front without checking for an existing equal key.
    ///
    /// Fails only when the node arena is out of index space, in which case
    /// the table is unchanged and `key`/`value` are dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        if self.entries.len() >= MAX_NODES {
            return Err(TableError::CapacityExhausted { max: MAX_NODES });
        }
        self.entries.push_front(Entry { key, value });
        Ok(())
    }

    /// Returns the value of the first entry matching `key` and moves that
    /// entry to the front. A miss leaves the order unchanged.
    ///
    /// The scan is linear; the relocation is a constant-time relink.
    pub fn lookup<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let p = self.position_of(key)?;
        self.entries.splice_to_front(p);
        self.entries.front().map(|e| &e.value)
    }

    /// Like [`lookup`](Self::lookup), returning the value mutably.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let p = self.position_of(key)?;
        self.entries.splice_to_front(p);
        self.entries.front_mut().map(|e| &mut e.value)
    }

    /// Removes every entry matching `key`, releasing each one as it is
    /// unlinked. Returns how many were removed.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut removed = 0;
        let mut p = self.entries.first();
        loop {
            let matched = match self.entries.inspect(p) {
                Some(entry) => self.compare.compare(entry.key.borrow(), key).is_eq(),
                None => break,
            };
            if matched {
                if let Some(entry) = self.entries.remove(p) {
                    self.release(entry);
                    removed += 1;
                }
            } else {
                match self.entries.next(p) {
                    Some(next) => p = next,
                    None => break,
                }
            }
        }
        removed
    }

    /// Releases every entry front to back. Hooks stay configured.
    pub fn clear(&mut self) {
        while let Some(entry) = self.entries.remove(Position::HEAD) {
            self.release(entry);
        }
    }

    /// Releases every entry and frees the table. Equivalent to dropping it.
    pub fn destroy(mut self) {
        self.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.entries.validate()
    }

    fn position_of<Q>(&self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut p = self.entries.first();
        while !self.entries.is_end(p) {
            let entry = self.entries.inspect(p)?;
            if self.compare.compare(entry.key.borrow(), key).is_eq() {
                return Some(p);
            }
            p = self.entries.next(p)?;
        }
        None
    }

    // The entry is already unlinked, so hooks never see a half-updated list.
    fn release(&mut self, entry: Entry<K, V>) {
        let Entry { key, value } = entry;
        match self.key_destructor.as_mut() {
            Some(hook) => hook(key),
            None => drop(key),
        }
        match self.value_destructor.as_mut() {
            Some(hook) => hook(value),
            None => drop(value),
        }
    }
}

impl<'a, K, V, C> Drop for MtfTable<'a, K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, K, V, C> fmt::Debug for MtfTable<'a, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MtfTable")
            .field("len", &self.len())
            .field("key_destructor", &self.key_destructor.is_some())
            .field("value_destructor", &self.value_destructor.is_some())
            .finish()
    }
}

#[cfg(test)]
impl<'a, K: Clone, V: Clone, C> MtfTable<'a, K, V, C> {
    /// Entries front to back.
    pub(crate) fn snapshot(&self) -> Vec<(K, V)> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    pub(crate) fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }
}
