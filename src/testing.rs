//! Domains shared by the unit tests.

use crate::domain::Domain;
use crate::impl_domain;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Abc {
    A,
    B,
    C,
}

impl_domain!(Abc => [Abc::A, Abc::B, Abc::C]);

/// Five declared constants, four distinct values: `SEA_PARROT` aliases `PUFFIN`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bird(pub u8);

impl Bird {
    pub const BLUE_JAY: Bird = Bird(0);
    pub const STORK: Bird = Bird(1);
    pub const PUFFIN: Bird = Bird(2);
    pub const SEA_PARROT: Bird = Bird(2);
    pub const CHICKEN: Bird = Bird(3);
}

impl_domain!(Bird => [
    Bird::BLUE_JAY,
    Bird::STORK,
    Bird::PUFFIN,
    Bird::SEA_PARROT,
    Bird::CHICKEN,
]);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Empty {}

impl_domain!(Empty => []);

/// Exactly one word.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Full(pub u8);

impl Domain for Full {
    fn constants() -> Vec<Self> {
        (0..64).map(Full).collect()
    }
}

/// One bit past a word.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Spill(pub u8);

impl Domain for Spill {
    fn constants() -> Vec<Self> {
        (0..65).map(Spill).collect()
    }
}

/// Seventy constants `E00..E69`, `Wide(i)` standing for `Ei`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Wide(pub u8);

impl Domain for Wide {
    fn constants() -> Vec<Self> {
        (0..70).map(Wide).collect()
    }
}
