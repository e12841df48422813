//! Entity Store - the known cars and the lookups the resolver runs over them.

use car_rules::{Entity, Prefix};
use tracing::debug;

/// A car ranked by how many base answers it differs in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<'a> {
    pub entity: &'a Entity,
    pub distance: u32,
}

/// Known cars in insertion order.
///
/// Order matters for display and for breaking ranking ties, never for matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a car. Its code is valid by construction.
    ///
    /// Returns the car's position in the store.
    pub fn add(&mut self, entity: Entity) -> usize {
        debug!(name = %entity.name, code = %entity.code, "storing car");
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Every car whose first five bits equal `prefix`, whatever its code length.
    pub fn matching_prefix(&self, prefix: Prefix) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.prefix() == prefix)
            .collect()
    }

    /// Positions of the cars [`matching_prefix`](Self::matching_prefix) returns.
    pub fn matching_positions(&self, prefix: Prefix) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.prefix() == prefix)
            .map(|(i, _)| i)
            .collect()
    }

    /// The `k` cars closest to `prefix` by Hamming distance over the first five bits.
    ///
    /// Sorted by ascending distance; equal distances keep insertion order.
    pub fn nearest(&self, prefix: Prefix, k: usize) -> Vec<Suggestion<'_>> {
        let mut scored: Vec<_> = self
            .entities
            .iter()
            .map(|entity| Suggestion {
                entity,
                distance: prefix.hamming(&entity.prefix()),
            })
            .collect();

        // sort_by_key is stable
        scored.sort_by_key(|s| s.distance);
        scored.truncate(k);
        scored
    }

    /// Get car by position.
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// Get mutable car by position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(cars: &[(&str, &str)]) -> EntityStore {
        let mut store = EntityStore::new();
        for (name, bits) in cars {
            store.add(Entity::parse(*name, bits).unwrap());
        }
        store
    }

    fn prefix(bits: &str) -> Prefix {
        bits.parse().unwrap()
    }

    #[test]
    fn test_added_car_matches_its_prefix() {
        let mut store = EntityStore::new();
        store.add(Entity::parse("Audi R8", "1-0-1-0-1").unwrap());

        let found = store.matching_prefix(prefix("1-0-1-0-1"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Audi R8");
    }

    #[test]
    fn test_matching_ignores_sixth_bit() {
        let store = store(&[
            ("McLaren F1", "1-1-0-0-1-1"),
            ("Ferrari F40", "1-1-0-1-1"),
            ("Pagani Zonda", "1-1-0-0-1-0"),
            ("Unsorted", "1-1-0-0-1"),
        ]);

        let names: Vec<_> = store
            .matching_prefix(prefix("1-1-0-0-1"))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["McLaren F1", "Pagani Zonda", "Unsorted"]);
        assert_eq!(store.matching_positions(prefix("1-1-0-0-1")), [0, 2, 3]);
        assert!(store.matching_prefix(prefix("0-0-0-0-0")).is_empty());
    }

    #[test]
    fn test_nearest_sorted_and_stable() {
        let store = store(&[
            ("far", "1-0-0-0-0"),
            ("one-a", "0-1-1-1-0"),
            ("exact-long", "0-1-1-1-1-0"),
            ("one-b", "1-1-1-1-1"),
            ("two", "0-0-0-1-1"),
        ]);

        let ranked = store.nearest(prefix("0-1-1-1-1"), 6);
        let view: Vec<_> = ranked
            .iter()
            .map(|s| (s.entity.name.as_str(), s.distance))
            .collect();
        assert_eq!(
            view,
            [
                ("exact-long", 0),
                ("one-a", 1),
                ("one-b", 1),
                ("two", 2),
                ("far", 5),
            ]
        );
    }

    #[test]
    fn test_nearest_truncates() {
        let store = store(&[("a", "0-0-0-0-0"), ("b", "0-0-0-0-1"), ("c", "0-0-0-1-1")]);
        let ranked = store.nearest(prefix("0-0-0-0-0"), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].entity.name, "a");
        assert_eq!(ranked[1].entity.name, "b");
        assert!(store.nearest(prefix("0-0-0-0-0"), 0).is_empty());
    }

    #[test]
    fn test_lookups_are_repeatable() {
        let store = store(&[("a", "1-1-1-1-1"), ("b", "1-1-1-1-0"), ("c", "1-1-1-1-1-1")]);
        let p = prefix("1-1-1-1-0");
        assert_eq!(store.nearest(p, 6), store.nearest(p, 6));
        assert_eq!(store.matching_prefix(p), store.matching_prefix(p));
    }
}
