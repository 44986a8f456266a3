//! The set type clients use: [`EnumSet`].
//!
//! `EnumSet` is a tagged variant over the two storages. The variant is picked once, when the
//! set is created, from the size of the domain:
//!
//! - up to 64 distinct values: [`ScalarSet`], a single word;
//! - more: [`ArraySet`], an array of words.
//!
//! A set never switches storage afterwards. Every operation is forwarded to the storage, and
//! right-hand operands are coerced to the same storage (see [`operand`][crate::operand]).
//!
//! # Examples
//!
//! ```
//! use enum_bitset::impl_domain;
//! use enum_bitset::set::EnumSet;
//!
//! #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
//! enum Abc {
//!     A,
//!     B,
//!     C,
//! }
//! impl_domain!(Abc => [Abc::A, Abc::B, Abc::C]);
//!
//! let mut s = EnumSet::of([Abc::A, Abc::B]);
//! s.union_with(&EnumSet::of([Abc::B, Abc::C])).unwrap();
//! assert_eq!(s, EnumSet::all());
//! assert_eq!(s.len(), 3);
//! assert_eq!(s.to_string(), "{A, B, C}");
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign,
};

use log::debug;

use crate::array::{self, ArraySet};
use crate::descriptor::DomainDescriptor;
use crate::domain::Domain;
use crate::error::Result;
use crate::operand::Operand;
use crate::scalar::{self, ScalarSet};

/// Concrete storage of a set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StorageKind {
    /// One 64-bit word.
    Scalar,
    /// An array of 64-bit words.
    Array,
}

/// How [`EnumSet::with_config`] chooses storage.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum StoragePolicy {
    /// Scalar for domains of at most 64 values, array otherwise.
    #[default]
    Auto,
    /// Always scalar; fails for domains with more than 64 values.
    Scalar,
    /// Always an array, whatever the domain size.
    Array,
}

/// Configuration for creating sets.
///
/// # Examples
///
/// ```
/// use enum_bitset::impl_domain;
/// use enum_bitset::set::{EnumSet, SetConfig, StorageKind, StoragePolicy};
///
/// #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// enum Abc {
///     A,
///     B,
/// }
/// impl_domain!(Abc => [Abc::A, Abc::B]);
///
/// let config = SetConfig {
///     storage: StoragePolicy::Array,
/// };
/// let s = EnumSet::<Abc>::with_config(&config).unwrap();
/// assert_eq!(s.kind(), StorageKind::Array);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SetConfig {
    pub storage: StoragePolicy,
}

/// A bit-packed set over the domain `D`.
///
/// Two sets are equal iff they have the same storage kind and the same bits. Use
/// [`set_equals`](EnumSet::set_equals) to compare members regardless of storage.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum EnumSet<D: Domain> {
    Scalar(ScalarSet<D>),
    Array(ArraySet<D>),
}

macro_rules! dispatch {
    ($set:expr, $s:ident => $body:expr) => {
        match $set {
            EnumSet::Scalar($s) => $body,
            EnumSet::Array($s) => $body,
        }
    };
}

impl<D: Domain> EnumSet<D> {
    /// Creates an empty set, choosing storage from the domain size.
    pub fn none() -> Self {
        let descriptor = DomainDescriptor::<D>::get();
        if descriptor.fits_scalar() {
            Self::Scalar(ScalarSet::with_descriptor(descriptor))
        } else {
            debug!(
                "none({}): array storage, {} words",
                type_name::<D>(),
                descriptor.words()
            );
            Self::Array(ArraySet::with_descriptor(descriptor))
        }
    }

    /// Creates a set holding every value of the domain.
    pub fn all() -> Self {
        let mut set = Self::none();
        set.complement();
        set
    }

    /// Creates a set holding `values`.
    pub fn of(values: impl IntoIterator<Item = D>) -> Self {
        let mut set = Self::none();
        set.extend(values);
        set
    }

    /// Creates an empty set with storage chosen by `config`.
    pub fn with_config(config: &SetConfig) -> Result<Self> {
        debug!("with_config({}, {:?})", type_name::<D>(), config);
        Ok(match config.storage {
            StoragePolicy::Auto => Self::none(),
            StoragePolicy::Scalar => Self::Scalar(ScalarSet::new()?),
            StoragePolicy::Array => Self::Array(ArraySet::new()),
        })
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            EnumSet::Scalar(_) => StorageKind::Scalar,
            EnumSet::Array(_) => StorageKind::Array,
        }
    }

    pub fn descriptor(&self) -> &'static DomainDescriptor<D> {
        dispatch!(self, s => s.descriptor())
    }

    /// Borrows the set as scalar storage, copying it if it is an array.
    ///
    /// Only called on behalf of a scalar receiver of the same domain, so the domain fits.
    fn scalar_view(&self) -> Cow<'_, ScalarSet<D>> {
        match self {
            EnumSet::Scalar(s) => Cow::Borrowed(s),
            EnumSet::Array(a) => {
                let mut set = ScalarSet::with_descriptor(a.descriptor());
                set.extend(a.iter());
                Cow::Owned(set)
            }
        }
    }

    /// Borrows the set as array storage, copying it if it is scalar.
    fn array_view(&self) -> Cow<'_, ArraySet<D>> {
        match self {
            EnumSet::Scalar(s) => Cow::Owned(ArraySet::materialize(s.iter())),
            EnumSet::Array(a) => Cow::Borrowed(a),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        dispatch!(self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, s => s.is_empty())
    }

    pub fn is_full(&self) -> bool {
        dispatch!(self, s => s.is_full())
    }

    pub fn contains(&self, value: &D) -> bool {
        dispatch!(self, s => s.contains(value))
    }

    /// Adds `value`. Returns true if it was not already a member.
    pub fn insert(&mut self, value: D) -> bool {
        dispatch!(self, s => s.insert(value))
    }

    /// Removes `value`. Returns true if it was a member.
    pub fn remove(&mut self, value: &D) -> bool {
        dispatch!(self, s => s.remove(value))
    }

    /// Adds `value` if `present`, removes it otherwise. Returns true if membership changed.
    pub fn set(&mut self, value: D, present: bool) -> bool {
        dispatch!(self, s => s.set(value, present))
    }

    pub fn clear(&mut self) {
        dispatch!(self, s => s.clear())
    }

    /// Replaces the set with its complement within the domain.
    pub fn complement(&mut self) {
        dispatch!(self, s => s.complement())
    }

    /// In-place union.
    pub fn union_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        dispatch!(self, s => s.union_with(other))
    }

    /// In-place intersection.
    pub fn intersect_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        dispatch!(self, s => s.intersect_with(other))
    }

    /// In-place difference.
    pub fn except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        dispatch!(self, s => s.except_with(other))
    }

    /// In-place symmetric difference.
    pub fn symmetric_except_with<'a>(&mut self, other: impl Operand<'a, D>) -> Result<()> {
        dispatch!(self, s => s.symmetric_except_with(other))
    }

    pub fn is_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.is_subset_of(other))
    }

    pub fn is_proper_subset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.is_proper_subset_of(other))
    }

    pub fn is_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.is_superset_of(other))
    }

    pub fn is_proper_superset_of<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.is_proper_superset_of(other))
    }

    /// Whether the sets share at least one member.
    pub fn overlaps<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.overlaps(other))
    }

    /// Whether `other` has exactly the same members.
    pub fn set_equals<'a>(&self, other: impl Operand<'a, D>) -> Result<bool> {
        dispatch!(self, s => s.set_equals(other))
    }

    /// Writes the members, in ordinal order, into `destination` starting at `start`.
    pub fn copy_to(&self, destination: Option<&mut [D]>, start: isize) -> Result<()> {
        dispatch!(self, s => s.copy_to(destination, start))
    }

    /// Iterates over the members in ascending ordinal order.
    pub fn iter(&self) -> Iter<'_, D> {
        match self {
            EnumSet::Scalar(s) => Iter::Scalar(s.iter()),
            EnumSet::Array(a) => Iter::Array(a.iter()),
        }
    }

    fn combine(
        &mut self,
        rhs: &Self,
        scalar: impl FnOnce(&mut ScalarSet<D>, &ScalarSet<D>),
        array: impl FnOnce(&mut ArraySet<D>, &ArraySet<D>),
    ) {
        match self {
            EnumSet::Scalar(s) => scalar(s, &*rhs.scalar_view()),
            EnumSet::Array(a) => array(a, &*rhs.array_view()),
        }
    }
}

impl<D: Domain> Default for EnumSet<D> {
    fn default() -> Self {
        Self::none()
    }
}

impl<D: Domain> From<ScalarSet<D>> for EnumSet<D> {
    fn from(set: ScalarSet<D>) -> Self {
        Self::Scalar(set)
    }
}

impl<D: Domain> From<ArraySet<D>> for EnumSet<D> {
    fn from(set: ArraySet<D>) -> Self {
        Self::Array(set)
    }
}

impl<D: Domain> Debug for EnumSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, s => Debug::fmt(s, f))
    }
}

/// Displays a set in roster notation, members in ordinal order.
impl<D: Domain> Display for EnumSet<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", value)?;
        }
        write!(f, "}}")
    }
}

impl<D: Domain> FromIterator<D> for EnumSet<D> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<D: Domain> Extend<D> for EnumSet<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        dispatch!(self, s => s.extend(iter))
    }
}

impl<'a, D: Domain> IntoIterator for &'a EnumSet<D> {
    type Item = D;
    type IntoIter = Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<D: Domain> BitOrAssign<&EnumSet<D>> for EnumSet<D> {
    fn bitor_assign(&mut self, rhs: &EnumSet<D>) {
        self.combine(rhs, |a, b| *a |= b, |a, b| *a |= b);
    }
}

impl<D: Domain> BitAndAssign<&EnumSet<D>> for EnumSet<D> {
    fn bitand_assign(&mut self, rhs: &EnumSet<D>) {
        self.combine(rhs, |a, b| *a &= b, |a, b| *a &= b);
    }
}

impl<D: Domain> SubAssign<&EnumSet<D>> for EnumSet<D> {
    fn sub_assign(&mut self, rhs: &EnumSet<D>) {
        self.combine(rhs, |a, b| *a -= b, |a, b| *a -= b);
    }
}

impl<D: Domain> BitXorAssign<&EnumSet<D>> for EnumSet<D> {
    fn bitxor_assign(&mut self, rhs: &EnumSet<D>) {
        self.combine(rhs, |a, b| *a ^= b, |a, b| *a ^= b);
    }
}

/// Implements a binary operator on set references in terms of its assigning form.
macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign:tt) => {
        impl<D: Domain> $op<&EnumSet<D>> for &EnumSet<D> {
            type Output = EnumSet<D>;

            fn $method(self, rhs: &EnumSet<D>) -> EnumSet<D> {
                let mut result = self.clone();
                result $assign rhs;
                result
            }
        }
    };
}

impl_binary_op!(BitOr, bitor, |=);
impl_binary_op!(BitAnd, bitand, &=);
impl_binary_op!(Sub, sub, -=);
impl_binary_op!(BitXor, bitxor, ^=);

impl<D: Domain> Not for EnumSet<D> {
    type Output = EnumSet<D>;

    fn not(mut self) -> EnumSet<D> {
        self.complement();
        self
    }
}

impl<D: Domain> Not for &EnumSet<D> {
    type Output = EnumSet<D>;

    fn not(self) -> EnumSet<D> {
        !self.clone()
    }
}

/// Iterator over the members of an [`EnumSet`].
#[derive(Clone)]
pub enum Iter<'a, D: Domain> {
    Scalar(scalar::Iter<D>),
    Array(array::Iter<'a, D>),
}

impl<D: Domain> Iterator for Iter<'_, D> {
    type Item = D;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Scalar(it) => it.next(),
            Iter::Array(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Scalar(it) => it.size_hint(),
            Iter::Array(it) => it.size_hint(),
        }
    }
}

impl<D: Domain> ExactSizeIterator for Iter<'_, D> {}

impl<D: Domain> FusedIterator for Iter<'_, D> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::testing::{Abc, Bird, Empty, Full, Spill, Wide};

    #[test]
    fn test_storage_selection() {
        assert_eq!(EnumSet::<Abc>::none().kind(), StorageKind::Scalar);
        assert_eq!(EnumSet::<Full>::none().kind(), StorageKind::Scalar);
        assert_eq!(EnumSet::<Spill>::none().kind(), StorageKind::Array);
        assert_eq!(EnumSet::<Wide>::none().kind(), StorageKind::Array);
        assert_eq!(EnumSet::<Empty>::none().kind(), StorageKind::Scalar);
    }

    #[test]
    fn test_all() {
        assert_eq!(EnumSet::<Abc>::all().len(), 3);
        assert_eq!(EnumSet::<Full>::all().len(), 64);
        assert_eq!(EnumSet::<Spill>::all().len(), 65);
        assert_eq!(EnumSet::<Bird>::all().len(), 4);
        assert_eq!(EnumSet::<Empty>::all().len(), 0);
    }

    #[test]
    fn test_with_config() {
        let scalar = SetConfig {
            storage: StoragePolicy::Scalar,
        };
        let array = SetConfig {
            storage: StoragePolicy::Array,
        };
        assert_eq!(
            EnumSet::<Abc>::with_config(&SetConfig::default())
                .unwrap()
                .kind(),
            StorageKind::Scalar
        );
        assert_eq!(
            EnumSet::<Abc>::with_config(&array).unwrap().kind(),
            StorageKind::Array
        );
        assert_eq!(
            EnumSet::<Full>::with_config(&scalar).unwrap().kind(),
            StorageKind::Scalar
        );
        assert!(matches!(
            EnumSet::<Spill>::with_config(&scalar),
            Err(Error::DomainTooLarge { size: 65, .. })
        ));
    }

    #[test]
    fn test_mixed_storage() {
        let mut forced = EnumSet::<Abc>::with_config(&SetConfig {
            storage: StoragePolicy::Array,
        })
        .unwrap();
        forced.insert(Abc::A);
        forced.insert(Abc::C);
        let auto = EnumSet::of([Abc::A, Abc::C]);

        // Same members, different storage.
        assert_ne!(forced, auto);
        assert!(forced.set_equals(&auto).unwrap());
        assert!(auto.set_equals(&forced).unwrap());

        forced.intersect_with(&EnumSet::of([Abc::C])).unwrap();
        assert_eq!(forced.kind(), StorageKind::Array);
        assert_eq!(forced.iter().collect::<Vec<_>>(), vec![Abc::C]);

        let mut auto = auto;
        auto |= &forced;
        assert_eq!(auto, EnumSet::of([Abc::A, Abc::C]));
    }

    #[test]
    fn test_operators() {
        let ab = EnumSet::of([Abc::A, Abc::B]);
        let bc = EnumSet::of([Abc::B, Abc::C]);
        assert_eq!(&ab | &bc, EnumSet::all());
        assert_eq!(&ab & &bc, EnumSet::of([Abc::B]));
        assert_eq!(&ab - &bc, EnumSet::of([Abc::A]));
        assert_eq!(&ab ^ &bc, EnumSet::of([Abc::A, Abc::C]));
        assert_eq!(!&ab, EnumSet::of([Abc::C]));
        assert_eq!(!EnumSet::<Abc>::none(), EnumSet::all());

        let wide = EnumSet::of([Wide(2), Wide(68)]);
        assert_eq!(&wide - &EnumSet::of([Wide(68)]), EnumSet::of([Wide(2)]));
        assert_eq!((!&wide).len(), 68);
    }

    #[test]
    fn test_idempotence() {
        for s in [
            EnumSet::of([Abc::A, Abc::C]),
            EnumSet::none(),
            EnumSet::all(),
        ] {
            let mut u = s.clone();
            u.union_with(&s).unwrap();
            assert_eq!(u, s);
            let mut i = s.clone();
            i.intersect_with(&s).unwrap();
            assert_eq!(i, s);
        }
    }

    #[test]
    fn test_hash_follows_bits() {
        let mut seen = HashSet::new();
        seen.insert(EnumSet::of([Bird::STORK, Bird::PUFFIN]));
        assert!(seen.contains(&EnumSet::of([Bird::SEA_PARROT, Bird::STORK])));
        assert!(!seen.contains(&EnumSet::of([Bird::STORK])));

        let mut wide = HashSet::new();
        wide.insert(EnumSet::of([Wide(1), Wide(69)]));
        assert!(wide.contains(&EnumSet::of([Wide(69), Wide(1)])));
    }

    #[test]
    fn test_absent_operand_leaves_receiver() {
        let mut s = EnumSet::of([Wide(5), Wide(66)]);
        let before = s.clone();
        let none: Option<&EnumSet<Wide>> = None;
        assert_eq!(
            s.intersect_with(none),
            Err(Error::NullArgument { name: "other" })
        );
        assert_eq!(
            s.symmetric_except_with(None::<Vec<Wide>>),
            Err(Error::NullArgument { name: "other" })
        );
        assert_eq!(
            s.is_subset_of(None::<&EnumSet<Wide>>),
            Err(Error::NullArgument { name: "other" })
        );
        assert_eq!(s, before);
    }

    #[test]
    fn test_display() {
        assert_eq!(EnumSet::<Abc>::none().to_string(), "{}");
        assert_eq!(EnumSet::of([Abc::C, Abc::A]).to_string(), "{A, C}");
        assert_eq!(
            EnumSet::of([Wide(64), Wide(1)]).to_string(),
            "{Wide(1), Wide(64)}"
        );
        assert_eq!(format!("{:?}", EnumSet::of([Abc::B])), "{B}");
    }

    #[test]
    fn test_collect_and_iter() {
        let s: EnumSet<Wide> = [Wide(69), Wide(0), Wide(63), Wide(64)]
            .into_iter()
            .collect();
        let it = s.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(
            it.collect::<Vec<_>>(),
            vec![Wide(0), Wide(63), Wide(64), Wide(69)]
        );
        let mut n = 0;
        for _ in &s {
            n += 1;
        }
        assert_eq!(n, 4);
    }
}
