//! Right-hand operands of set algebra.
//!
//! Binary operations accept anything implementing [`Operand`]: another set, a slice, a
//! vector, an array, an arbitrary iterator wrapped in [`Members`], or an `Option` of any of
//! those. Before the word-level operation runs, the operand is coerced into the receiver's
//! concrete storage:
//!
//! - an operand that already *is* that storage is borrowed as-is;
//! - anything else is materialized into a fresh set by inserting every element;
//! - `None` is rejected with [`Error::NullArgument`] before the receiver is touched.

use std::borrow::Cow;

use crate::array::ArraySet;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::scalar::ScalarSet;
use crate::set::EnumSet;

/// A value usable as the right-hand side of a set operation over domain `D`.
pub trait Operand<'a, D: Domain> {
    /// Coerces the operand into single-word storage.
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>>;

    /// Coerces the operand into word-array storage.
    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>>;
}

/// Wraps an arbitrary iterator of domain values so it can be used as an [`Operand`].
///
/// ```
/// use enum_bitset::impl_domain;
/// use enum_bitset::operand::Members;
/// use enum_bitset::set::EnumSet;
///
/// #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// enum Abc {
///     A,
///     B,
///     C,
/// }
/// impl_domain!(Abc => [Abc::A, Abc::B, Abc::C]);
///
/// let mut s = EnumSet::of([Abc::A]);
/// s.union_with(Members([Abc::B, Abc::C].into_iter().filter(|&x| x != Abc::B)))
///     .unwrap();
/// assert_eq!(s, EnumSet::of([Abc::A, Abc::C]));
/// ```
#[derive(Debug, Clone)]
pub struct Members<I>(pub I);

impl<'a, D: Domain> Operand<'a, D> for &'a ScalarSet<D> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        Ok(Cow::Borrowed(self))
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Ok(Cow::Owned(ArraySet::materialize(self.iter())))
    }
}

impl<'a, D: Domain> Operand<'a, D> for &'a ArraySet<D> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        ScalarSet::materialize(self.iter()).map(Cow::Owned)
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a, D: Domain> Operand<'a, D> for &'a EnumSet<D> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        match self {
            EnumSet::Scalar(set) => set.to_scalar(),
            EnumSet::Array(set) => set.to_scalar(),
        }
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        match self {
            EnumSet::Scalar(set) => set.to_array(),
            EnumSet::Array(set) => set.to_array(),
        }
    }
}

impl<'a, D: Domain, T: Operand<'a, D>> Operand<'a, D> for Option<T> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        self.ok_or(Error::NullArgument { name: "other" })?
            .to_scalar()
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        self.ok_or(Error::NullArgument { name: "other" })?
            .to_array()
    }
}

impl<'a, D: Domain, I: IntoIterator<Item = D>> Operand<'a, D> for Members<I> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        ScalarSet::materialize(self.0).map(Cow::Owned)
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Ok(Cow::Owned(ArraySet::materialize(self.0)))
    }
}

impl<'a, D: Domain> Operand<'a, D> for &'a [D] {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        Members(self.iter().copied()).to_scalar()
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Members(self.iter().copied()).to_array()
    }
}

impl<'a, D: Domain> Operand<'a, D> for &'a Vec<D> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        self.as_slice().to_scalar()
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        self.as_slice().to_array()
    }
}

impl<'a, D: Domain> Operand<'a, D> for Vec<D> {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        Members(self).to_scalar()
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Members(self).to_array()
    }
}

impl<'a, D: Domain, const N: usize> Operand<'a, D> for [D; N] {
    fn to_scalar(self) -> Result<Cow<'a, ScalarSet<D>>> {
        Members(self).to_scalar()
    }

    fn to_array(self) -> Result<Cow<'a, ArraySet<D>>> {
        Members(self).to_array()
    }
}

/// Writes `members` into `destination[start..]` after validating every precondition.
///
/// Nothing is written unless all checks pass.
pub(crate) fn copy_into<D: Copy>(
    members: impl Iterator<Item = D>,
    len: usize,
    destination: Option<&mut [D]>,
    start: isize,
) -> Result<()> {
    let destination = destination.ok_or(Error::NullArgument {
        name: "destination",
    })?;
    let offset = usize::try_from(start).map_err(|_| Error::InvalidIndex { index: start })?;
    match destination.len().checked_sub(offset) {
        Some(available) if available >= len => {}
        available => {
            return Err(Error::InsufficientCapacity {
                required: len,
                available: available.unwrap_or(0),
            })
        }
    }

    for (slot, value) in destination[offset..].iter_mut().zip(members) {
        *slot = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::testing::{Abc, Wide};

    #[test]
    fn test_scalar_coercion_rejects_wide_domain() {
        assert!(matches!(
            Members([Wide(68)]).to_scalar(),
            Err(Error::DomainTooLarge { size: 70, .. })
        ));
        assert!(matches!(
            vec![Wide(3)].to_scalar(),
            Err(Error::DomainTooLarge { size: 70, .. })
        ));
        let wide = EnumSet::of([Wide(1), Wide(68)]);
        assert!(matches!(
            (&wide).to_scalar(),
            Err(Error::DomainTooLarge { size: 70, .. })
        ));
        assert_eq!(Members([Wide(68)]).to_array().unwrap().len(), 1);
    }

    #[test]
    fn test_scalar_coercion_of_array_storage() {
        let mut array = ArraySet::<Abc>::new();
        array.insert(Abc::C);
        let scalar = (&array).to_scalar().unwrap();
        assert_eq!(scalar.bits(), 0b100);
        assert!(matches!(scalar, Cow::Owned(_)));

        let mut s = ScalarSet::<Abc>::new().unwrap();
        s.union_with(&array).unwrap();
        assert_eq!(s.bits(), 0b100);
    }

    #[test]
    fn test_copy_into() {
        let mut dest = [0u8; 5];
        copy_into([7, 8].into_iter(), 2, Some(&mut dest[..]), 3).unwrap();
        assert_eq!(dest, [0, 0, 0, 7, 8]);
    }

    #[test]
    fn test_copy_into_checks_before_writing() {
        let mut dest = [0u8; 3];
        assert_eq!(
            copy_into([1, 2].into_iter(), 2, None, 0),
            Err(Error::NullArgument {
                name: "destination"
            })
        );
        assert_eq!(
            copy_into([1, 2].into_iter(), 2, Some(&mut dest[..]), -1),
            Err(Error::InvalidIndex { index: -1 })
        );
        assert_eq!(
            copy_into([1, 2].into_iter(), 2, Some(&mut dest[..]), 2),
            Err(Error::InsufficientCapacity {
                required: 2,
                available: 1
            })
        );
        assert_eq!(
            copy_into(std::iter::empty(), 0, Some(&mut dest[..]), 4),
            Err(Error::InsufficientCapacity {
                required: 0,
                available: 0
            })
        );
        assert_eq!(dest, [0, 0, 0]);
    }
}
