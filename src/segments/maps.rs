use std::marker::PhantomData;

use litemap::LiteMap;

use crate::segment::Segment;

/// Common lookup interface shared by the three statically-sized map flavors, so
/// [`Mapped`] can be generic over whichever one backs it.
pub trait Finder<K, V> {
    fn find(&self, key: &K) -> V;
    fn rfind(&self, value: &V) -> K;
}

/// Index-keyed lookup over a fixed list of values: O(1) `find`.
pub struct IndexMap<V> {
    values: Vec<V>,
}

impl<V> IndexMap<V> {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<V> = values.into_iter().collect();
        assert!(!values.is_empty(), "IndexMap requires at least one value");
        Self { values }
    }
}

impl<V: Clone + PartialEq> Finder<usize, V> for IndexMap<V> {
    fn find(&self, key: &usize) -> V {
        self.values.get(*key).cloned().unwrap_or_else(|| self.values[0].clone())
    }
    fn rfind(&self, value: &V) -> usize {
        self.values.iter().position(|v| v == value).unwrap_or(0)
    }
}

/// A sorted-key map, backed by [`litemap::LiteMap`]: O(log N) `find` via binary search.
pub struct OrderedMap<K, V> {
    map: LiteMap<K, V>,
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// # Panics
    /// Panics if `entries` is empty.
    pub fn new(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut map = LiteMap::new();
        for (k, v) in entries {
            map.insert(k, v);
        }
        assert!(!map.is_empty(), "OrderedMap requires at least one entry");
        Self { map }
    }
}

impl<K: Ord + Clone, V: Clone + PartialEq> Finder<K, V> for OrderedMap<K, V> {
    fn find(&self, key: &K) -> V {
        self.map
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.map.iter().next().expect("non-empty").1.clone())
    }
    fn rfind(&self, value: &V) -> K {
        self.map
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| self.map.iter().next().expect("non-empty").0.clone())
    }
}

/// An unordered map with no assumptions on `K`: O(N) linear-scan `find`.
pub struct RandomMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> RandomMap<K, V> {
    /// # Panics
    /// Panics if `entries` is empty.
    pub fn new(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        assert!(!entries.is_empty(), "RandomMap requires at least one entry");
        Self { entries }
    }
}

impl<K: Clone + PartialEq, V: Clone + PartialEq> Finder<K, V> for RandomMap<K, V> {
    fn find(&self, key: &K) -> V {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.entries[0].1.clone())
    }
    fn rfind(&self, value: &V) -> K {
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| self.entries[0].0.clone())
    }
}

/// A segment whose `exit_cast` is a [`Finder::find`] and whose `entry_cast` is the
/// matching [`Finder::rfind`], backed by any of [`IndexMap`]/[`OrderedMap`]/[`RandomMap`].
pub struct Mapped<From, To, M> {
    map: M,
    _marker: PhantomData<fn(From) -> To>,
}

impl<From, To, M: Finder<From, To>> Mapped<From, To, M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            _marker: PhantomData,
        }
    }
}

impl<From, To: Default, M: Finder<From, To>> Segment for Mapped<From, To, M> {
    type In = From;
    type Out = To;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: From) -> To {
        self.map.find(&input)
    }
    fn entry_cast(&self, out: To) -> From {
        self.map.rfind(&out)
    }
    fn exit_cast(&self, input: From) -> To {
        self.map.find(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_reverse_lookup_with_miss_fallback() {
        let map = OrderedMap::new([(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(map.find(&2), "b");
        assert_eq!(map.find(&99), "a");
        assert_eq!(map.rfind(&"c"), 3);
        assert_eq!(map.rfind(&"zz"), 1);
    }

    #[test]
    fn mapped_segment_delegates_to_finder() {
        let mut mapped = Mapped::new(OrderedMap::new([(1, "a"), (2, "b")]));
        assert_eq!(mapped.inject(2), "b");
        assert_eq!(mapped.entry_cast("a"), 1);
    }
}
