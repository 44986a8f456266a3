//! Single-word bitset for domains of at most 64 distinct values.

use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, SubAssign};

use crate::bits::{last_word_mask, lowest_bit, popcount, trailing_zero_index};
use crate::descriptor::DomainDescriptor;
use crate::domain::Domain;
use crate::error::Result;
use crate::operand::{copy_into, Operand};

/// A set over `D` stored in one `u64`.
///
/// Bit `i` is set iff the value with ordinal `i` is a member. Bits at or above the domain
/// size are always clear.
#[derive(Clone, Copy)]
pub struct ScalarSet<D: Domain> {
    bits: u64,
    descriptor: &'static DomainDescriptor<D>,
}

impl<D: Domain> ScalarSet<D> {
    /// Creates an empty set.
    ///
    /// Fails with [`Error::DomainTooLarge`][crate::error::Error::DomainTooLarge] if `D` has
    /// more than 64 distinct values.
    pub fn new() -> Result<Self> {
        Ok(Self::with_descriptor(DomainDescriptor::scalar()?))
    }

    /// Creates a set holding every value of the domain.
    pub fn full() -> Result<Self> {
        let mut set = Self::new()?;
        set.complement();
        Ok(set)
    }

    pub(crate) fn with_descriptor(descriptor: &'static DomainDescriptor<D>) -> Self {
        debug_assert!(descriptor.fits_scalar());
        Self {
            bits: 0,
            descriptor,
        }
    }

    /// Builds a scratch set for an operand.
    ///
    /// Fails with [`Error::DomainTooLarge`][crate::error::Error::DomainTooLarge] if `D` has
    /// more than 64 distinct values.
    pub(crate) fn materialize(values: impl IntoIterator<Item = D>) -> Result<Self> {
        let mut set = Self::new()?;
        set.extend(values);
        Ok(set)
    }

    /// The raw membership word.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn descriptor(&self) -> &'static DomainDescriptor<D> {
        self.descriptor
    }

    fn mask(&self) -> u64 {
        last_word_mask(self.descriptor.len())
    }

    fn bit(&self, value: &D) -> u64 {
        1 << self.descriptor.ordinal_of(value)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        popcount(self.bits) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Whether every value of the domain is a member.
    pub fn is_full(&self) -> bool {
        self.bits == self.mask()
    }

    pub fn contains(&self, value: &D) -> bool {
        self.bits & self.bit(value) != 0
    }

    /// Adds `value`. Returns true if it was not already a member.
    pub fn insert(&mut self, value: D) -> bool {
        let previous = self.bits;
        self.bits |= self.bit(&value);
        self.bits != previous
    }

    /// Removes `value`. Returns true if it was a member.
    pub fn remove(&mut self, value: &D) -> bool {
        let previous = self.bits;
        self.bits &= !self.bit(value);
        self.bits != previous
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
        self.bits = 0;
    }

    /// Replaces the set with its complement within the domain.
    pub fn complement(&mut self) {
        self.bits = !self.bits & self.mask();
    }

    pub fn union_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self |= &*other.to_scalar()?;
        Ok(())
    }

    pub fn intersect_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self &= &*other.to_scalar()?;
        Ok(())
    }

    pub fn except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self -= &*other.to_scalar()?;
        Ok(())
    }

    pub fn symmetric_except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        *self ^= &*other.to_scalar()?;
        Ok(())
    }

    pub(crate) fn subset(a: &Self, b: &Self) -> bool {
        a.bits & !b.bits == 0
    }

    pub(crate) fn proper_subset(a: &Self, b: &Self) -> bool {
        Self::subset(a, b) && a.len() < b.len()
    }

    pub(crate) fn overlap(a: &Self, b: &Self) -> bool {
        a.bits & b.bits != 0
    }

    pub fn is_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::subset(self, &*other.to_scalar()?))
    }

    pub fn is_proper_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::proper_subset(self, &*other.to_scalar()?))
    }

    pub fn is_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::subset(&*other.to_scalar()?, self))
    }

    pub fn is_proper_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::proper_subset(&*other.to_scalar()?, self))
    }

    pub fn overlaps<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(Self::overlap(self, &*other.to_scalar()?))
    }

    /// Whether `other` has exactly the same members.
    pub fn set_equals<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        Ok(self.bits == other.to_scalar()?.bits)
    }

    /// Writes the members, in ordinal order, into `destination` starting at `start`.
    ///
    /// All preconditions are checked before anything is written.
    pub fn copy_to(&self, destination: Option<&mut [D]>, start: isize) -> Result<()> {
        copy_into(self.iter(), self.len(), destination, start)
    }

    /// Iterates over the members in ascending ordinal order.
    pub fn iter(&self) -> Iter<D> {
        Iter {
            unseen: self.bits,
            descriptor: self.descriptor,
        }
    }
}

impl<D: Domain> PartialEq for ScalarSet<D> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<D: Domain> Eq for ScalarSet<D> {}

impl<D: Domain> Hash for ScalarSet<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<D: Domain> Debug for ScalarSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<D: Domain> BitOrAssign<&ScalarSet<D>> for ScalarSet<D> {
    fn bitor_assign(&mut self, rhs: &ScalarSet<D>) {
        self.bits |= rhs.bits;
    }
}

impl<D: Domain> BitAndAssign<&ScalarSet<D>> for ScalarSet<D> {
    fn bitand_assign(&mut self, rhs: &ScalarSet<D>) {
        self.bits &= rhs.bits;
    }
}

impl<D: Domain> SubAssign<&ScalarSet<D>> for ScalarSet<D> {
    fn sub_assign(&mut self, rhs: &ScalarSet<D>) {
        self.bits &= !rhs.bits;
    }
}

impl<D: Domain> BitXorAssign<&ScalarSet<D>> for ScalarSet<D> {
    fn bitxor_assign(&mut self, rhs: &ScalarSet<D>) {
        self.bits ^= rhs.bits;
    }
}

impl<D: Domain> Extend<D> for ScalarSet<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<D: Domain> IntoIterator for ScalarSet<D> {
    type Item = D;
    type IntoIter = Iter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<D: Domain> IntoIterator for &ScalarSet<D> {
    type Item = D;
    type IntoIter = Iter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`ScalarSet`].
///
/// Works on a snapshot of the word: each step isolates the lowest unseen bit, maps its
/// position to a value and clears it.
#[derive(Clone)]
pub struct Iter<D: Domain> {
    unseen: u64,
    descriptor: &'static DomainDescriptor<D>,
}

impl<D: Domain> Iterator for Iter<D> {
    type Item = D;

    fn next(&mut self) -> Option<Self::Item> {
        if self.unseen == 0 {
            return None;
        }
        let bit = lowest_bit(self.unseen);
        self.unseen -= bit;
        Some(self.descriptor.value(trailing_zero_index(bit) as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = popcount(self.unseen) as usize;
        (n, Some(n))
    }
}

impl<D: Domain> ExactSizeIterator for Iter<D> {}

impl<D: Domain> FusedIterator for Iter<D> {}
