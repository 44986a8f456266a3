//! Direct-addressed map keyed by a domain: [`EnumMap`].
//!
//! The map keeps one slot per distinct domain value, indexed by ordinal. Lookups, inserts and
//! removals are a single array access. Capacity is fixed at the domain size for the lifetime
//! of the map.

use std::fmt::{Debug, Display, Formatter};
use std::iter::{Enumerate, FusedIterator};
use std::ops::{Index, IndexMut};

use crate::descriptor::DomainDescriptor;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::set::EnumSet;

/// A map from the values of domain `K` to `V`.
///
/// Aliased keys share a slot: writing through one alias overwrites the value stored under
/// the other.
///
/// # Examples
///
/// ```
/// use enum_bitset::impl_domain;
/// use enum_bitset::map::EnumMap;
///
/// #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// enum Abc {
///     A,
///     B,
///     C,
/// }
/// impl_domain!(Abc => [Abc::A, Abc::B, Abc::C]);
///
/// let mut m = EnumMap::new();
/// m.set(Abc::C, "c");
/// m.set(Abc::A, "a");
/// assert_eq!(m.len(), 2);
/// assert_eq!(m[Abc::A], "a");
/// assert!(m.add(Abc::A, "again").is_err());
/// assert_eq!(m.keys().collect::<Vec<_>>(), vec![Abc::A, Abc::C]);
/// ```
#[derive(Clone)]
pub struct EnumMap<K: Domain, V> {
    slots: Box<[Option<V>]>,
    len: usize,
    descriptor: &'static DomainDescriptor<K>,
}

impl<K: Domain, V> EnumMap<K, V> {
    pub fn new() -> Self {
        let descriptor = DomainDescriptor::<K>::get();
        Self {
            slots: std::iter::repeat_with(|| None)
                .take(descriptor.len())
                .collect(),
            len: 0,
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &'static DomainDescriptor<K> {
        self.descriptor
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots, equal to the domain size.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.slots[self.descriptor.ordinal_of(key)].as_ref()
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.slots[self.descriptor.ordinal_of(key)].as_mut()
    }

    /// Like [`get`](EnumMap::get), but an absent key is an error.
    pub fn try_get(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or_else(|| Error::KeyNotFound {
            key: format!("{:?}", key),
        })
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let old = self.slots[self.descriptor.ordinal_of(&key)].replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Stores `value` under `key`, failing if the key is already present.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        let slot = &mut self.slots[self.descriptor.ordinal_of(&key)];
        if slot.is_some() {
            return Err(Error::DuplicateKey {
                key: format!("{:?}", key),
            });
        }
        *slot = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value under `key`.
    pub fn take(&mut self, key: &K) -> Option<V> {
        let old = self.slots[self.descriptor.ordinal_of(key)].take();
        if old.is_some() {
            self.len -= 1;
        }
        old
    }

    /// Removes the value under `key`. Returns true if there was one.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    /// The set of keys that currently hold a value.
    pub fn key_set(&self) -> EnumSet<K> {
        self.keys().collect()
    }

    /// Iterates over `(key, &value)` pairs in ascending key ordinal order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter().enumerate(),
            remaining: self.len,
            descriptor: self.descriptor,
        }
    }

    /// Iterates over `(key, &mut value)` pairs in ascending key ordinal order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut().enumerate(),
            remaining: self.len,
            descriptor: self.descriptor,
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl ExactSizeIterator<Item = &mut V> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }
}

impl<K: Domain, V: PartialEq> EnumMap<K, V> {
    /// Whether `key` is present and holds a value equal to `value`.
    pub fn contains_entry(&self, key: &K, value: &V) -> bool {
        self.get(key) == Some(value)
    }

    /// Removes `key` only if it holds a value equal to `value`. Returns true if removed.
    pub fn remove_entry(&mut self, key: &K, value: &V) -> bool {
        self.contains_entry(key, value) && self.remove(key)
    }
}

impl<K: Domain, V: Clone> EnumMap<K, V> {
    /// Copies the entries out, in ascending key ordinal order.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }
}

impl<K: Domain, V> Default for EnumMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Domain, V: PartialEq> PartialEq for EnumMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<K: Domain, V: Eq> Eq for EnumMap<K, V> {}

impl<K: Domain, V: Debug> Debug for EnumMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Displays a map as `{key: value, ...}` in ascending key ordinal order.
impl<K: Domain, V: Display> Display for EnumMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<K: Domain, V> Index<K> for EnumMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        match self.get(&key) {
            Some(value) => value,
            None => panic!("key {:?} is not present in the map", key),
        }
    }
}

impl<K: Domain, V> IndexMut<K> for EnumMap<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.get_mut(&key) {
            Some(value) => value,
            None => panic!("key {:?} is not present in the map", key),
        }
    }
}

impl<K: Domain, V> FromIterator<(K, V)> for EnumMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Domain, V> Extend<(K, V)> for EnumMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K: Domain, V> IntoIterator for &'a EnumMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Domain, V> IntoIterator for &'a mut EnumMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: Domain, V> IntoIterator for EnumMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_vec().into_iter().enumerate(),
            remaining: self.len,
            descriptor: self.descriptor,
        }
    }
}

/// Advances an enumerated slot iterator to the next occupied slot.
macro_rules! next_occupied {
    ($it:expr) => {{
        for (ordinal, slot) in $it.slots.by_ref() {
            if let Some(value) = slot {
                $it.remaining -= 1;
                return Some(($it.descriptor.value(ordinal), value));
            }
        }
        None
    }};
}

pub struct Iter<'a, K: Domain, V> {
    slots: Enumerate<std::slice::Iter<'a, Option<V>>>,
    remaining: usize,
    descriptor: &'static DomainDescriptor<K>,
}

impl<'a, K: Domain, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        next_occupied!(self)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Domain, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Domain, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Domain, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
            descriptor: self.descriptor,
        }
    }
}

pub struct IterMut<'a, K: Domain, V> {
    slots: Enumerate<std::slice::IterMut<'a, Option<V>>>,
    remaining: usize,
    descriptor: &'static DomainDescriptor<K>,
}

impl<'a, K: Domain, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        next_occupied!(self)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Domain, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: Domain, V> FusedIterator for IterMut<'_, K, V> {}

pub struct IntoIter<K: Domain, V> {
    slots: Enumerate<std::vec::IntoIter<Option<V>>>,
    remaining: usize,
    descriptor: &'static DomainDescriptor<K>,
}

impl<K: Domain, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        next_occupied!(self)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Domain, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K: Domain, V> FusedIterator for IntoIter<K, V> {}
