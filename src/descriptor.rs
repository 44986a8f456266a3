//! Dense ordinal numbering of a [`Domain`].
//!
//! A [`DomainDescriptor`] is built once per domain type and lives for the rest of the
//! process. Lookups go through a single registry keyed by [`TypeId`]; the registry is the only
//! shared state in the crate and is only ever appended to.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{OnceLock, PoisonError, RwLock};

use indexmap::IndexSet;
use log::debug;

use crate::bits::{word_count, BITS_PER_WORD};
use crate::domain::Domain;
use crate::error::{Error, Result};

type Registry = RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Ordered distinct values of a domain and their ordinals.
///
/// # Invariants
///
/// - Ordinals are dense: `0..len()`, in declaration order.
/// - Aliases share the ordinal of their first occurrence.
/// - Never mutated after construction.
pub struct DomainDescriptor<D> {
    values: IndexSet<D>,
}

impl<D: Domain> DomainDescriptor<D> {
    /// Builds a descriptor directly from the domain's constants, bypassing the registry.
    fn build() -> Self {
        let constants = D::constants();
        let declared = constants.len();
        let values: IndexSet<D> = constants.into_iter().collect();
        debug!(
            "descriptor({}): {} constants, {} distinct",
            type_name::<D>(),
            declared,
            values.len()
        );
        Self { values }
    }

    /// Returns the process-wide descriptor for `D`, building it on first use.
    ///
    /// Concurrent first uses race to build, but only one descriptor is ever published.
    pub fn get() -> &'static Self {
        let registry = REGISTRY.get_or_init(Default::default);
        let id = TypeId::of::<D>();

        if let Some(&entry) = registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Self::downcast(entry);
        }

        // Built outside the lock: `constants()` is client code.
        let built = Self::build();
        let mut map = registry.write().unwrap_or_else(PoisonError::into_inner);
        let entry = *map.entry(id).or_insert_with(|| {
            let leaked: &'static (dyn Any + Send + Sync) = Box::leak(Box::new(built));
            leaked
        });
        Self::downcast(entry)
    }

    /// Returns the descriptor for `D`, requiring it to fit into a single word.
    pub fn scalar() -> Result<&'static Self> {
        let descriptor = Self::get();
        if descriptor.len() > BITS_PER_WORD {
            return Err(Error::DomainTooLarge {
                domain: type_name::<D>(),
                size: descriptor.len(),
            });
        }
        Ok(descriptor)
    }

    fn downcast(entry: &'static (dyn Any + Send + Sync)) -> &'static Self {
        match entry.downcast_ref::<Self>() {
            Some(descriptor) => descriptor,
            None => unreachable!("registry entry for {} has a foreign type", type_name::<D>()),
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the domain has no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of 64-bit words an array bitset over this domain needs.
    pub fn words(&self) -> usize {
        word_count(self.len())
    }

    /// Whether the domain fits into a single word.
    pub fn fits_scalar(&self) -> bool {
        self.len() <= BITS_PER_WORD
    }

    /// Distinct values in ordinal order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = D> + '_ {
        self.values.iter().copied()
    }

    /// Returns the value with the given ordinal.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= self.len()`.
    pub fn value(&self, ordinal: usize) -> D {
        match self.values.get_index(ordinal) {
            Some(&value) => value,
            None => panic!(
                "ordinal {} out of range for domain {} of size {}",
                ordinal,
                type_name::<D>(),
                self.len()
            ),
        }
    }

    /// Returns the ordinal of `value`, or `None` if it is not a legal value of the domain.
    pub fn ordinal(&self, value: &D) -> Option<usize> {
        self.values.get_index_of(value)
    }

    /// Returns the ordinal of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not one of the domain's constants.
    pub fn ordinal_of(&self, value: &D) -> usize {
        match self.ordinal(value) {
            Some(ordinal) => ordinal,
            None => panic!("{:?} is not a value of domain {}", value, type_name::<D>()),
        }
    }

    /// Whether `value` is one of the domain's constants.
    pub fn contains(&self, value: &D) -> bool {
        self.values.contains(value)
    }
}

impl<D: Domain> Debug for DomainDescriptor<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainDescriptor")
            .field("domain", &type_name::<D>())
            .field("len", &self.len())
            .field("words", &self.words())
            .finish()
    }
}
