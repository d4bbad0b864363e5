//! Insertion-ordered grouping.
//!
//! [`OrderedMap`] keeps keys in first-seen order explicitly (a `Vec` of entries plus a key →
//! position index), so iteration order never depends on hashing. [`group_by`] folds a flat
//! sequence into a two-level [`GroupedHierarchy`] in one pass.

use std::collections::HashMap;

/// A string-keyed map that iterates in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, inserting `make()` at the end if the key is new.
    pub fn get_or_insert_with<F>(&mut self, key: &str, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.entries.push((key.to_string(), make()));
                self.index.insert(key.to_string(), pos);
                pos
            }
        };
        &mut self.entries[pos].1
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Outer key → inner key → records, all in first-seen order.
pub type GroupedHierarchy<T> = OrderedMap<OrderedMap<Vec<T>>>;

/// Group `items` under `outer_key` then `inner_key`.
///
/// Single linear pass. Keys keep first-seen order and records keep their relative input order
/// within each bucket; nothing is sorted.
pub fn group_by<T, I, O, N>(items: I, outer_key: O, inner_key: N) -> GroupedHierarchy<T>
where
    I: IntoIterator<Item = T>,
    O: Fn(&T) -> &str,
    N: Fn(&T) -> &str,
{
    let mut groups: GroupedHierarchy<T> = OrderedMap::new();
    for item in items {
        let bucket = groups
            .get_or_insert_with(outer_key(&item), OrderedMap::new)
            .get_or_insert_with(inner_key(&item), Vec::new);
        bucket.push(item);
    }
    groups
}

/// Total number of leaf records in a hierarchy.
pub fn leaf_count<T>(groups: &GroupedHierarchy<T>) -> usize {
    groups
        .iter()
        .flat_map(|(_, inner)| inner.iter())
        .map(|(_, leaves)| leaves.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{group_by, leaf_count, OrderedMap};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        a: String,
        b: String,
        id: u32,
    }

    fn item(a: &str, b: &str, id: u32) -> Item {
        Item {
            a: a.to_string(),
            b: b.to_string(),
            id,
        }
    }

    fn by_a(i: &Item) -> &str {
        &i.a
    }

    fn by_b(i: &Item) -> &str {
        &i.b
    }

    #[test]
    fn ordered_map_keeps_insertion_order() {
        let mut m: OrderedMap<u32> = OrderedMap::new();
        for key in ["zeta", "alpha", "mid", "alpha"] {
            *m.get_or_insert_with(key, || 0) += 1;
        }
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(m.get("alpha"), Some(&2));
        assert_eq!(m.get("missing"), None);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn groups_in_first_seen_order_and_stays_stable() {
        let items = vec![
            item("x", "p", 1),
            item("y", "q", 2),
            item("x", "q", 3),
            item("x", "p", 4),
            item("y", "q", 5),
        ];
        let groups = group_by(items, by_a, by_b);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        let x = groups.get("x").unwrap();
        assert_eq!(x.keys().collect::<Vec<_>>(), vec!["p", "q"]);
        let ids: Vec<u32> = x.get("p").unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
        let ids: Vec<u32> = groups.get("y").unwrap().get("q").unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(leaf_count(&groups), 5);
    }

    #[test]
    fn swapped_keys_regroup_the_same_items() {
        let items = vec![item("x", "p", 1), item("y", "p", 2), item("x", "q", 3)];
        let groups = group_by(items, by_b, by_a);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["p", "q"]);
        assert_eq!(
            groups.get("p").unwrap().keys().collect::<Vec<_>>(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn empty_input_gives_empty_hierarchy() {
        let groups = group_by(Vec::<Item>::new(), by_a, by_b);
        assert!(groups.is_empty());
        assert_eq!(leaf_count(&groups), 0);
    }
}
