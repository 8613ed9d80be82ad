//! Join and group-by over row slices.
//!
//! Just enough relational algebra for the reports: an inner hash join and
//! an ordered grouped sum. Rows stay as plain structs; keys are extracted
//! with closures.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::ops::AddAssign;

/// Inner equi-join. Every (left, right) pair with equal keys is emitted, in
/// left-row order; rows without a partner on the other side are dropped.
pub fn hash_join<'a, K, L, R>(
    left: &'a [L],
    right: &'a [R],
    left_key: impl Fn(&L) -> K,
    right_key: impl Fn(&R) -> K,
) -> Vec<(&'a L, &'a R)>
where
    K: Eq + Hash,
{
    let mut index: HashMap<K, Vec<&'a R>> = HashMap::with_capacity(right.len());
    for r in right {
        index.entry(right_key(r)).or_default().push(r);
    }

    let mut joined = Vec::with_capacity(left.len());
    for l in left {
        if let Some(matches) = index.get(&left_key(l)) {
            joined.extend(matches.iter().map(|r| (l, *r)));
        }
    }
    joined
}

/// Sum `value` per distinct `key`. Output is ordered by key; keys with no
/// rows do not appear.
pub fn group_sum<T, K, V>(
    rows: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> V,
) -> Vec<(K, V)>
where
    K: Ord,
    V: AddAssign + Default,
{
    let mut groups: BTreeMap<K, V> = BTreeMap::new();
    for row in rows {
        *groups.entry(key(&row)).or_default() += value(&row);
    }
    groups.into_iter().collect()
}

/// Move groups with a null key after all others, keeping relative order.
pub fn nulls_last<K, V>(mut groups: Vec<(Option<K>, V)>) -> Vec<(Option<K>, V)> {
    groups.sort_by_key(|(k, _)| k.is_none());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_emits_every_matching_pair() {
        let left = [(1, "a"), (2, "b"), (3, "c")];
        let right = [(1, 10), (1, 11), (3, 30), (4, 40)];
        let joined = hash_join(&left, &right, |l| l.0, |r| r.0);
        let pairs: Vec<_> = joined.iter().map(|(l, r)| (l.1, r.1)).collect();
        assert_eq!(pairs, vec![("a", 10), ("a", 11), ("c", 30)]);
    }

    #[test]
    fn group_sum_orders_by_key() {
        let rows = [("b", 2), ("a", 1), ("b", 5)];
        let sums = group_sum(rows, |r| r.0, |r| r.1);
        assert_eq!(sums, vec![("a", 1), ("b", 7)]);
    }

    #[test]
    fn null_key_is_its_own_group_placed_last() {
        let rows = [(Some(7), 1.5), (None, 2.0), (Some(3), 1.0), (None, 0.5)];
        let sums = nulls_last(group_sum(rows, |r| r.0, |r| r.1));
        assert_eq!(sums, vec![(Some(3), 1.0), (Some(7), 1.5), (None, 2.5)]);
    }
}
