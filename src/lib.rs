//! # enum-bitset: Bit-packed sets and maps over finite domains
//!
//! **`enum-bitset`** provides a dense set type over the values of an enumerated type, plus a
//! direct-addressed map keyed by the same values.
//! Membership is a bit per distinct value, so the classic set algebra (union, intersection,
//! difference, symmetric difference, subset and overlap tests, complement) costs O(1) or
//! O(word count), independent of how many members a set holds.
//!
//! ## Key Features
//!
//! - **Domains**: any `Copy + Eq + Hash + Debug` type with a fixed list of constants implements [`Domain`][crate::domain::Domain]. Constants with equal values are aliases and share one bit.
//! - **Two storages**: domains of up to 64 values live in a single word ([`ScalarSet`][crate::scalar::ScalarSet]); larger ones in an array of words ([`ArraySet`][crate::array::ArraySet]). [`EnumSet`][crate::set::EnumSet] picks one at construction.
//! - **Flexible operands**: binary operations accept another set, a slice, a vector, an array, or any iterator wrapped in [`Members`][crate::operand::Members]; see [`operand`].
//! - **Checked inputs**: absent operands and bad `copy_to` destinations are reported as [`Error`] before anything is modified.
//!
//! ## Basic Usage
//!
//! ```rust
//! use enum_bitset::{impl_domain, EnumMap, EnumSet};
//!
//! #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
//! enum Abc {
//!     A,
//!     B,
//!     C,
//! }
//!
//! // 1. Declare the domain
//! impl_domain!(Abc => [Abc::A, Abc::B, Abc::C]);
//!
//! // 2. Build sets
//! let mut s = EnumSet::of([Abc::A, Abc::B]);
//! let t = EnumSet::of([Abc::B, Abc::C]);
//!
//! // 3. Combine them
//! s.union_with(&t).unwrap();
//! assert_eq!(s, EnumSet::all());
//! assert!(EnumSet::of([Abc::B]).is_proper_subset_of(&t).unwrap());
//! assert_eq!(&s - &t, EnumSet::of([Abc::A]));
//!
//! // 4. Maps use the same ordinals
//! let mut m = EnumMap::new();
//! m.set(Abc::B, 2);
//! assert_eq!(m.to_string(), "{B: 2}");
//! ```
//!
//! ## Core Components
//!
//! - **[`descriptor`]**: the per-domain ordinal table, computed once per process.
//! - **[`set`]**: the [`EnumSet`] tagged variant and its configuration.
//! - **[`map`]**: the [`EnumMap`] direct-addressed map.
//! - **[`bits`]**: word-level bit tricks shared by both storages.

pub mod array;
pub mod bits;
pub mod descriptor;
pub mod domain;
pub mod error;
pub mod map;
pub mod operand;
pub mod scalar;
pub mod set;

#[cfg(test)]
mod testing;

pub use crate::domain::Domain;
pub use crate::error::{Error, Result};
pub use crate::map::EnumMap;
pub use crate::set::EnumSet;
