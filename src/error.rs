//! Error type shared by sets, maps and the domain registry.

use thiserror::Error;

/// Errors surfaced by the strict operations of this crate.
///
/// Every operation that can fail checks its preconditions before touching any state, so
/// an `Err` always leaves the receiver exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required argument was absent.
    #[error("argument `{name}` must not be absent")]
    NullArgument { name: &'static str },

    /// A start index was negative.
    #[error("index {index} is out of range")]
    InvalidIndex { index: isize },

    /// A destination cannot hold all members starting at the requested index.
    #[error("destination has room for {available} elements, but {required} are required")]
    InsufficientCapacity { required: usize, available: usize },

    /// Scalar storage was requested for a domain with more than 64 distinct values.
    #[error("domain `{domain}` has {size} distinct values, scalar storage holds at most 64")]
    DomainTooLarge { domain: &'static str, size: usize },

    /// A strict map lookup found no value for the key.
    #[error("key {key} is not present in the map")]
    KeyNotFound { key: String },

    /// A strict map insertion found the key already occupied.
    #[error("an element with key {key} already exists")]
    DuplicateKey { key: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::DomainTooLarge {
            domain: "Wide",
            size: 70,
        };
        assert_eq!(
            err.to_string(),
            "domain `Wide` has 70 distinct values, scalar storage holds at most 64"
        );

        let err = Error::InsufficientCapacity {
            required: 3,
            available: 2,
        };
        assert!(err.to_string().contains("room for 2"));

        let err = Error::KeyNotFound {
            key: "Puffin".to_string(),
        };
        assert_eq!(err.to_string(), "key Puffin is not present in the map");
    }
}
