use std::{
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::memory::EntityIndex;

/// A slab arena that manages fixed-sized objects.
///
/// Freed keys are kept on an internal free list and reused by later
/// insertions, so the key space stays dense apart from the gaps left by
/// removals. [`Slab::compact`] closes those gaps explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slab<K, V> {
    data: Vec<Entry<V>>,
    free: usize,
    len: usize,
    phantom: PhantomData<K>,
}

impl<K, V> Slab<K, V>
where
    K: EntityIndex,
{
    /// Creates an empty [`Slab<K, V>`].
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            free: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            free: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there is no stored value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an exclusive upper bound on the keys handed out so far.
    ///
    /// Suitable for sizing arrays or bit vectors indexed by this slab's keys.
    pub fn upper_bound(&self) -> usize {
        self.data.len()
    }

    pub fn contains(&self, key: K) -> bool {
        matches!(self.data.get(key.index()), Some(Entry::Full(_)))
    }

    pub fn insert(&mut self, value: V) -> K {
        let index = self.free;

        if index == self.data.len() {
            self.data.push(Entry::Full(value));
            self.free += 1;
        } else {
            let Entry::Free(next) = self.data[index] else { unreachable!() };
            self.free = next;
            self.data[index] = Entry::Full(value);
        }

        self.len += 1;

        K::new(index)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let index = key.index();
        let entry = self.data.get_mut(index)?;

        let entry_data = std::mem::replace(entry, Entry::Free(self.free));

        match entry_data {
            Entry::Free(_) => {
                *entry = entry_data;
                None
            }
            Entry::Full(value) => {
                self.free = index;
                self.len -= 1;
                Some(value)
            }
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        match self.data.get(key.index()) {
            Some(Entry::Full(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        match self.data.get_mut(key.index()) {
            Some(Entry::Full(value)) => Some(value),
            _ => None,
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    /// Shrink the buffer to fit the currently present values.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit()
    }

    /// Compacts the slab by moving all entries to the front.
    ///
    /// Calls a `rekey` function with the old and new key for every entry.
    /// Preserves the iteration order of the entries.
    pub fn compact<F>(&mut self, mut rekey: F)
    where
        F: FnMut(&mut V, K, K),
    {
        let mut old_index = 0;
        let mut new_index = 0;

        self.data.retain_mut(|entry| match entry {
            Entry::Free(_) => {
                old_index += 1;
                false
            }
            Entry::Full(value) => {
                rekey(value, K::new(old_index), K::new(new_index));
                old_index += 1;
                new_index += 1;
                true
            }
        });

        self.free = self.data.len();
    }
}

impl<K, V> Index<K> for Slab<K, V>
where
    K: EntityIndex,
{
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key).expect("invalid key")
    }
}

impl<K, V> IndexMut<K> for Slab<K, V>
where
    K: EntityIndex,
{
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        self.get_mut(key).expect("invalid key")
    }
}

impl<K, V> Default for Slab<K, V>
where
    K: EntityIndex,
{
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry<V> {
    Free(usize),
    Full(V),
}

pub struct Iter<'a, K, V> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Entry<V>>>,
    len: usize,
    phantom: PhantomData<K>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(slab: &'a Slab<K, V>) -> Self {
        Self {
            entries: slab.data.iter().enumerate(),
            len: slab.len,
            phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in self.entries.by_ref() {
            if let Entry::Full(value) = entry {
                self.len -= 1;
                return Some((K::new(index), value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> where K: EntityIndex {}

impl<'a, K, V> IntoIterator for &'a Slab<K, V>
where
    K: EntityIndex,
{
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IterMut<'a, K, V> {
    entries: std::iter::Enumerate<std::slice::IterMut<'a, Entry<V>>>,
    len: usize,
    phantom: PhantomData<K>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn new(slab: &'a mut Slab<K, V>) -> Self {
        Self {
            entries: slab.data.iter_mut().enumerate(),
            len: slab.len,
            phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V>
where
    K: EntityIndex,
{
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in self.entries.by_ref() {
            if let Entry::Full(value) = entry {
                self.len -= 1;
                return Some((K::new(index), value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V>
where
    K: EntityIndex,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> where K: EntityIndex {}

#[cfg(test)]
mod test {
    use super::*;

    crate::make_entity! {
        pub struct TestIndex(u32);
    }

    #[test]
    fn insert_reuses_freed_keys() {
        let mut slab: Slab<TestIndex, i8> = Slab::new();

        let k0 = slab.insert(0);
        let k1 = slab.insert(1);
        let k2 = slab.insert(2);

        assert_eq!(slab.remove(k1), Some(1));
        assert_eq!(slab.remove(k1), None);
        assert_eq!(slab.len(), 2);

        let k3 = slab.insert(3);
        assert_eq!(k3, k1);
        assert_eq!(slab.upper_bound(), 3);
        assert!(slab.iter().eq([(k0, &0), (k3, &3), (k2, &2)]));
    }

    #[test]
    fn compact_preserves_order() {
        let mut slab: Slab<TestIndex, i8> = Slab::new();

        let keys: Vec<_> = (0..5).map(|v| slab.insert(v)).collect();
        slab.remove(keys[0]);
        slab.remove(keys[2]);

        let mut moves = Vec::new();
        slab.compact(|_, old, new| moves.push((old, new)));

        assert_eq!(
            moves,
            vec![
                (keys[1], TestIndex::new(0)),
                (keys[3], TestIndex::new(1)),
                (keys[4], TestIndex::new(2)),
            ]
        );
        assert_eq!(slab.upper_bound(), 3);
        assert!(slab.iter().map(|(_, v)| *v).eq([1, 3, 4]));
    }
}
