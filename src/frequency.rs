use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Counts occurrences per key and renders them in a deterministic order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    counts: HashMap<K, u64>,
    total: u64,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Ord> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, amount: u64) {
        *self.counts.entry(key).or_insert(0) += amount;
        self.total += amount;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest counts first, ties broken by ascending key. `top == 0` keeps everything.
    pub fn into_ranked(self, top: usize) -> Vec<(K, u64)> {
        let mut items = self.counts.into_iter().collect::<Vec<_>>();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if top > 0 && items.len() > top {
            items.truncate(top);
        }
        items
    }

    /// Ascending key order, for time series and breakdowns.
    pub fn into_sorted(self) -> Vec<(K, u64)> {
        let mut items = self.counts.into_iter().collect::<Vec<_>>();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items
    }
}

impl<K: Eq + Hash + Ord> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key, 1);
        }
        tally
    }
}

/// Keeps the first row seen for each key, preserving input order. Rows whose
/// key cannot be built (`None`) are dropped.
pub fn distinct_by<'a, T, K, F>(rows: &[&'a T], mut key: F) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: FnMut(&'a T) -> Option<K>,
{
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .copied()
        .filter(|row| key(*row).is_some_and(|k| seen.insert(k)))
        .collect()
}
