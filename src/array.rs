//! Word-array bitset for domains of any size.
//!
//! This is the storage [`EnumSet`][crate::set::EnumSet] picks for domains with more than 64
//! distinct values, but it is valid for every domain.

use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, SubAssign};

use log::debug;

use crate::bits::{
    count_words, last_word_mask, lowest_bit, popcount, trailing_zero_index, word_and_bit,
    BITS_PER_WORD,
};
use crate::descriptor::DomainDescriptor;
use crate::domain::Domain;
use crate::error::Result;
use crate::operand::{copy_into, Operand};

/// A set over `D` stored in `ceil(N / 64)` words.
///
/// # Invariants
///
/// - Bit `i % 64` of word `i / 64` is set iff the value with ordinal `i` is a member.
/// - Unused high bits of the last word are always clear.
/// - `count` equals the number of set bits.
#[derive(Clone)]
pub struct ArraySet<D: Domain> {
    /// Storage: each u64 holds 64 members.
    words: Box<[u64]>,
    /// Number of members (cached for O(1) len()).
    count: usize,
    descriptor: &'static DomainDescriptor<D>,
}

impl<D: Domain> ArraySet<D> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::with_descriptor(DomainDescriptor::get())
    }

    /// Creates a set holding every value of the domain.
    pub fn full() -> Self {
        let mut set = Self::new();
        set.complement();
        set
    }

    pub(crate) fn with_descriptor(descriptor: &'static DomainDescriptor<D>) -> Self {
        Self {
            words: vec![0; descriptor.words()].into_boxed_slice(),
            count: 0,
            descriptor,
        }
    }

    pub(crate) fn materialize(values: impl IntoIterator<Item = D>) -> Self {
        let mut set = Self::new();
        set.extend(values);
        set
    }

    /// The raw membership words, lowest ordinals first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn descriptor(&self) -> &'static DomainDescriptor<D> {
        self.descriptor
    }

    /// Word index and bit mask of `value`.
    fn locate(&self, value: &D) -> (usize, u64) {
        let (word, bit) = word_and_bit(self.descriptor.ordinal_of(value));
        (word, 1 << bit)
    }

    fn recount(&mut self) {
        self.count = count_words(&self.words);
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether every value of the domain is a member.
    pub fn is_full(&self) -> bool {
        self.count == self.descriptor.len()
    }

    pub fn contains(&self, value: &D) -> bool {
        let (word, mask) = self.locate(value);
        self.words[word] & mask != 0
    }

    /// Adds `value`. Returns true if it was not already a member.
    pub fn insert(&mut self, value: D) -> bool {
        let (word, mask) = self.locate(&value);
        let was_clear = self.words[word] & mask == 0;
        if was_clear {
            self.words[word] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Removes `value`. Returns true if it was a member.
    pub fn remove(&mut self, value: &D) -> bool {
        let (word, mask) = self.locate(value);
        let was_set = self.words[word] & mask != 0;
        if was_set {
            self.words[word] &= !mask;
            self.count -= 1;
        }
        was_set
    }

    /// Adds or removes `value`. Returns true if membership changed.
    pub fn set(&mut self, value: D, present: bool) -> bool {
        if present {
            self.insert(value)
        } else {
            self.remove(&value)
        }
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
        self.count = 0;
    }

    /// Replaces the set with its complement within the domain.
    pub fn complement(&mut self) {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
        if let Some(last) = self.words.last_mut() {
            *last &= last_word_mask(self.descriptor.len());
        }
        self.count = self.descriptor.len() - self.count;
    }

    /// Combines `other` into `self` word by word, then refreshes the cached count.
    ///
    /// # Panics
    ///
    /// Panics if the word arrays differ in length.
    fn apply(&mut self, other: &Self, op: &str, f: impl Fn(u64, u64) -> u64) {
        debug!("{}({} words)", op, self.words.len());
        Self::check_compatible(self, other);
        for (word, &rhs) in self.words.iter_mut().zip(other.words.iter()) {
            *word = f(*word, rhs);
        }
        self.recount();
    }

    fn check_compatible(a: &Self, b: &Self) {
        assert_eq!(
            a.words.len(),
            b.words.len(),
            "word arrays of different length ({} vs {})",
            a.words.len(),
            b.words.len()
        );
    }

    pub fn union_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self |= &*other.to_array()?;
        Ok(())
    }

    pub fn intersect_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self &= &*other.to_array()?;
        Ok(())
    }

    pub fn except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self -= &*other.to_array()?;
        Ok(())
    }

    pub fn symmetric_except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self ^= &*other.to_array()?;
        Ok(())
    }

    pub(crate) fn subset(a: &Self, b: &Self) -> bool {
        Self::check_compatible(a, b);
        a.words.iter().zip(b.words.iter()).all(|(&x, &y)| x & !y == 0)
    }

    pub(crate) fn proper_subset(a: &Self, b: &Self) -> bool {
        Self::subset(a, b) && a.count < b.count
    }

    pub(crate) fn overlap(a: &Self, b: &Self) -> bool {
        Self::check_compatible(a, b);
        a.words.iter().zip(b.words.iter()).any(|(&x, &y)| x & y != 0)
    }

    pub(crate) fn same_members(a: &Self, b: &Self) -> bool {
        Self::check_compatible(a, b);
        a.words == b.words
    }

    pub fn is_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::subset(self, &*other.to_array()?))
    }

    pub fn is_proper_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::proper_subset(self, &*other.to_array()?))
    }

    pub fn is_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::subset(&*other.to_array()?, self))
    }

    pub fn is_proper_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::proper_subset(&*other.to_array()?, self))
    }

    pub fn overlaps<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::overlap(self, &*other.to_array()?))
    }

    /// Whether `other` has exactly the same members.
    pub fn set_equals<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::same_members(self, &*other.to_array()?))
    }

    /// Writes the members, in ordinal order, into `destination` starting at `start`.
    ///
    /// All preconditions are checked before anything is written.
    pub fn copy_to(&self, destination: Option<&mut [D]>, start: isize) -> Result<()> {
        copy_into(self.iter(), self.count, destination, start)
    }

    /// Iterates over the members in ascending ordinal order.
    pub fn iter(&self) -> Iter<'_, D> {
        Iter {
            words: &self.words,
            index: 0,
            unseen: self.words.first().copied().unwrap_or(0),
            descriptor: self.descriptor,
        }
    }
}

impl<D: Domain> Default for ArraySet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> PartialEq for ArraySet<D> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<D: Domain> Eq for ArraySet<D> {}

impl<D: Domain> Hash for ArraySet<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl<D: Domain> Debug for ArraySet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<D: Domain> BitOrAssign<&ArraySet<D>> for ArraySet<D> {
    fn bitor_assign(&mut self, rhs: &ArraySet<D>) {
        self.apply(rhs, "union", |a, b| a | b);
    }
}

impl<D: Domain> BitAndAssign<&ArraySet<D>> for ArraySet<D> {
    fn bitand_assign(&mut self, rhs: &ArraySet<D>) {
        self.apply(rhs, "intersect", |a, b| a & b);
    }
}

impl<D: Domain> SubAssign<&ArraySet<D>> for ArraySet<D> {
    fn sub_assign(&mut self, rhs: &ArraySet<D>) {
        self.apply(rhs, "except", |a, b| a & !b);
    }
}

impl<D: Domain> BitXorAssign<&ArraySet<D>> for ArraySet<D> {
    fn bitxor_assign(&mut self, rhs: &ArraySet<D>) {
        self.apply(rhs, "symmetric_except", |a, b| a ^ b);
    }
}

impl<D: Domain> Extend<D> for ArraySet<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, D: Domain> IntoIterator for &'a ArraySet<D> {
    type Item = D;
    type IntoIter = Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of an [`ArraySet`].
///
/// Keeps the index of the current word and the bits of that word not yet returned. When
/// those run out it moves on to the next non-zero word. Never consults the cached count.
#[derive(Clone)]
pub struct Iter<'a, D: Domain> {
    words: &'a [u64],
    index: usize,
    unseen: u64,
    descriptor: &'static DomainDescriptor<D>,
}

impl<D: Domain> Iterator for Iter<'_, D> {
    type Item = D;

    fn next(&mut self) -> Option<Self::Item> {
        while self.unseen == 0 {
            if self.index + 1 >= self.words.len() {
                return None;
            }
            self.index += 1;
            self.unseen = self.words[self.index];
        }

        let bit = lowest_bit(self.unseen);
        self.unseen -= bit;
        let ordinal = self.index * BITS_PER_WORD + trailing_zero_index(bit) as usize;
        Some(self.descriptor.value(ordinal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.words.get(self.index + 1..).map_or(0, count_words);
        let n = popcount(self.unseen) as usize + rest;
        (n, Some(n))
    }
}

impl<D: Domain> ExactSizeIterator for Iter<'_, D> {}

impl<D: Domain> FusedIterator for Iter<'_, D> {}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::operand::Members;
    use crate::testing::{Abc, Empty, Spill, Wide};

    fn of<D: Domain>(values: impl IntoIterator<Item = D>) -> ArraySet<D> {
        ArraySet::materialize(values)
    }

    #[test]
    fn test_empty() {
        let s = ArraySet::<Wide>::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.words().len(), 2);
        assert!(!s.contains(&Wide(0)));
        assert!(!s.contains(&Wide(69)));
    }

    #[test]
    fn test_insert_remove_across_words() {
        let mut s = ArraySet::<Spill>::new();
        assert!(s.insert(Spill(63)));
        assert!(s.insert(Spill(64)));
        assert!(!s.insert(Spill(64)));
        assert_eq!(s.len(), 2);
        assert_eq!(s.words(), &[1 << 63, 1]);
        assert!(s.remove(&Spill(63)));
        assert!(!s.remove(&Spill(63)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.words(), &[0, 1]);
    }

    #[test]
    fn test_boundary_algebra() {
        let mut u = of([Spill(63)]);
        u.union_with(&of([Spill(64)])).unwrap();
        assert_eq!(u.len(), 2);
        assert_eq!(u.iter().collect::<Vec<_>>(), vec![Spill(63), Spill(64)]);

        let mut i = of([Spill(1), Spill(63), Spill(64)]);
        i.intersect_with(&of([Spill(63), Spill(64), Spill(2)])).unwrap();
        assert_eq!(i, of([Spill(63), Spill(64)]));
        assert_eq!(i.len(), 2);
    }

    #[test]
    fn test_except_and_proper_subset() {
        let mut s = of([Wide(2), Wide(68)]);
        s.except_with(&of([Wide(68)])).unwrap();
        assert_eq!(s, of([Wide(2)]));
        assert_eq!(s.len(), 1);

        let a = of([Wide(2), Wide(68)]);
        let b = of([Wide(2), Wide(68), Wide(22)]);
        assert!(a.is_proper_subset_of(&b).unwrap());
        assert!(!b.is_proper_subset_of(&a).unwrap());
        assert!(b.is_proper_superset_of(&a).unwrap());
        assert!(a.is_subset_of(&a.clone()).unwrap());
        assert!(!a.is_proper_subset_of(&a.clone()).unwrap());
    }

    #[test]
    fn test_symmetric_except() {
        let mut s = of([Wide(0), Wide(65)]);
        s.symmetric_except_with(&of([Wide(65), Wide(69)])).unwrap();
        assert_eq!(s, of([Wide(0), Wide(69)]));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_overlaps_uses_and() {
        let a = of([Wide(3)]);
        let b = of([Wide(67)]);
        assert!(!a.overlaps(&b).unwrap());
        assert!(of([Wide(3), Wide(67)]).overlaps(&b).unwrap());
        assert!(!ArraySet::<Wide>::new().overlaps(&ArraySet::new()).unwrap());
    }

    #[test]
    fn test_set_equals() {
        let a = of([Wide(1), Wide(66)]);
        assert!(a.set_equals([Wide(66), Wide(1)]).unwrap());
        assert!(!a.set_equals([Wide(66)]).unwrap());
        assert_eq!(
            a.set_equals(None::<&ArraySet<Wide>>),
            Err(Error::NullArgument { name: "other" })
        );
    }

    #[test]
    fn test_complement_keeps_padding_clear() {
        let mut s = of([Wide(0), Wide(69)]);
        s.complement();
        assert_eq!(s.len(), 68);
        assert_eq!(s.words()[1] >> 6, 0);
        assert!(!s.contains(&Wide(69)));
        assert!(s.contains(&Wide(68)));
        assert_eq!(s.iter().count(), 68);

        let full = ArraySet::<Wide>::full();
        assert!(full.is_full());
        assert_eq!(full.words(), &[u64::MAX, 0b11_1111]);
    }

    #[test]
    fn test_small_domain_in_array_storage() {
        let mut s = ArraySet::<Abc>::full();
        assert_eq!(s.words(), &[0b111]);
        s.remove(&Abc::B);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Abc::A, Abc::C]);
    }

    #[test]
    fn test_count_after_bulk_ops() {
        let mut s = of((0..70).map(Wide));
        assert_eq!(s.len(), 70);
        s.intersect_with(Members((0..70).filter(|i| i % 3 == 0).map(Wide)))
            .unwrap();
        assert_eq!(s.len(), 24);
        assert_eq!(s.len(), s.iter().count());
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.iter().next(), None);
    }

    #[test]
    fn test_iter() {
        let s = of([Wide(65), Wide(3), Wide(64), Wide(10), Wide(5)]);
        let it = s.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(
            it.collect::<Vec<_>>(),
            vec![Wide(3), Wide(5), Wide(10), Wide(64), Wide(65)]
        );

        // Leading empty word.
        let s = of([Wide(66)]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Wide(66)]);
    }

    #[test]
    fn test_empty_domain() {
        let s = ArraySet::<Empty>::full();
        assert!(s.words().is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.iter().next(), None);
    }

    #[test]
    fn test_copy_to_round_trip() {
        let s = of([Wide(69), Wide(0), Wide(64)]);
        let mut dest = vec![Wide(1); s.len()];
        s.copy_to(Some(dest.as_mut_slice()), 0).unwrap();
        assert_eq!(of(dest), s);
    }

}
