//! Map behavior through the public API.

use enum_bitset::{impl_domain, EnumMap, EnumSet, Error};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Bird {
    BlueJay,
    Stork,
    Puffin,
    Chicken,
}

impl Bird {
    #[allow(non_upper_case_globals)]
    const SeaParrot: Bird = Bird::Puffin;
}

impl_domain!(Bird => [
    Bird::BlueJay,
    Bird::Stork,
    Bird::Puffin,
    Bird::SeaParrot,
    Bird::Chicken,
]);

#[test]
fn counts_follow_occupancy() {
    let mut m = EnumMap::new();
    assert_eq!(m.capacity(), 4);

    m.set(Bird::Stork, "white");
    m.set(Bird::Stork, "black");
    assert_eq!(m.len(), 1);
    assert_eq!(m[Bird::Stork], "black");

    m.add(Bird::Chicken, "red").unwrap();
    assert!(matches!(
        m.add(Bird::Chicken, "brown"),
        Err(Error::DuplicateKey { .. })
    ));
    assert_eq!(m.len(), 2);

    assert!(m.remove(&Bird::Stork));
    assert!(!m.remove(&Bird::Stork));
    assert_eq!(m.len(), 1);
    assert!(matches!(
        m.try_get(&Bird::Stork),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn alias_overwrites_slot() {
    let mut m = EnumMap::new();
    m.set(Bird::Puffin, 1);
    m.set(Bird::SeaParrot, 2);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&Bird::Puffin), Some(&2));
}

#[test]
fn entries_in_ordinal_order() {
    let m: EnumMap<Bird, u32> = [(Bird::Chicken, 4), (Bird::BlueJay, 1), (Bird::Puffin, 3)]
        .into_iter()
        .collect();
    assert_eq!(
        m.to_vec(),
        vec![(Bird::BlueJay, 1), (Bird::Puffin, 3), (Bird::Chicken, 4)]
    );
    assert_eq!(
        m.key_set(),
        EnumSet::of([Bird::BlueJay, Bird::Puffin, Bird::Chicken])
    );
    assert_eq!(m.to_string(), "{BlueJay: 1, Puffin: 3, Chicken: 4}");
}
