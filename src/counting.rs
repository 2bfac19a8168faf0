//! Small reducers used by the aggregates: ordered group counts and a
//! frequency counter whose ties keep first-seen order.

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Count items per key, ordered by key.
pub fn count_by_key<T, K: Ord>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> K) -> BTreeMap<K, u64> {
    let mut m = BTreeMap::<K, u64>::new();
    for it in items {
        *m.entry(key(&it)).or_insert(0) += 1;
    }
    m
}

/// Frequency counter. `most_common` sorts by descending count; equal counts keep
/// the order in which keys were first seen.
#[derive(Debug)]
pub struct StableCounter<K> {
    counts: AHashMap<K, (u64, usize)>,
}

impl<K> Default for StableCounter<K> {
    fn default() -> Self {
        Self { counts: AHashMap::new() }
    }
}

impl<K: Hash + Eq> StableCounter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        let next = self.counts.len();
        self.counts.entry(key).or_insert((0, next)).0 += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|(c, _)| *c).sum()
    }

    /// Top `n` entries, or all of them when `n` is `None`.
    pub fn most_common(self, n: Option<usize>) -> Vec<(K, u64)> {
        let mut v: Vec<(K, u64, usize)> = self.counts.into_iter().map(|(k, (c, first))| (k, c, first)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        if let Some(n) = n {
            v.truncate(n);
        }
        v.into_iter().map(|(k, c, _)| (k, c)).collect()
    }
}

impl<K: Hash + Eq> FromIterator<K> for StableCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut c = Self::new();
        for k in iter {
            c.add(k);
        }
        c
    }
}

/// `part / total * 100`, rounded to two decimals; 0 when `total` is 0.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_seen_order() {
        let c: StableCounter<&str> = ["b", "a", "c", "a", "b", "d"].into_iter().collect();
        assert_eq!(c.total(), 6);
        assert_eq!(c.most_common(Some(3)), vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn count_by_key_orders_keys() {
        let m = count_by_key([3, 1, 3, 2], |x| *x);
        assert_eq!(m.into_iter().collect::<Vec<_>>(), vec![(1, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(percent(1, 3), 33.33);
        assert_eq!(percent(2, 3), 66.67);
        assert_eq!(percent(0, 0), 0.0);
    }
}
