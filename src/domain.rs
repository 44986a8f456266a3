//! Finite enumerated domains.
//!
//! A [`Domain`] is any type whose legal values can be listed up front. The list may contain
//! aliases (distinct named constants sharing one underlying value); they collapse to a single
//! ordinal in the [`DomainDescriptor`][crate::descriptor::DomainDescriptor].
//!
//! # Examples
//!
//! A plain fieldless enum:
//!
//! ```
//! use enum_bitset::impl_domain;
//!
//! #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
//! enum Color {
//!     Red,
//!     Green,
//!     Blue,
//! }
//!
//! impl_domain!(Color => [Color::Red, Color::Green, Color::Blue]);
//! ```
//!
//! A newtype with aliased constants:
//!
//! ```
//! use enum_bitset::impl_domain;
//!
//! #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
//! struct Bird(u8);
//!
//! impl Bird {
//!     const BLUE_JAY: Bird = Bird(0);
//!     const PUFFIN: Bird = Bird(2);
//!     const SEA_PARROT: Bird = Bird(2);
//! }
//!
//! impl_domain!(Bird => [Bird::BLUE_JAY, Bird::PUFFIN, Bird::SEA_PARROT]);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// A finite enumerated type usable as the universe of an [`EnumSet`][crate::set::EnumSet] or
/// the key space of an [`EnumMap`][crate::map::EnumMap].
///
/// # Invariants
///
/// - `constants()` returns the same sequence on every call.
/// - Every value a client can construct and hand to a set or map appears in that sequence.
pub trait Domain: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// All declared constants in declaration order, aliases included.
    ///
    /// Called once per process, when the domain's descriptor is first built.
    fn constants() -> Vec<Self>;
}

/// Implements [`Domain`] for a type from a list of its constants.
///
/// ```
/// use enum_bitset::impl_domain;
///
/// #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// enum Dir {
///     North,
///     South,
/// }
///
/// impl_domain!(Dir => [Dir::North, Dir::South]);
/// ```
#[macro_export]
macro_rules! impl_domain {
    ($ty:ty => [$($value:expr),* $(,)?]) => {
        impl $crate::domain::Domain for $ty {
            fn constants() -> ::std::vec::Vec<Self> {
                ::std::vec![$($value),*]
            }
        }
    };
}
