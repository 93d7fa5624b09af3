//! Separate-chaining hash table with load-factor driven growth
//!
//! Each bucket holds a singly linked chain of boxed entries. Before an
//! insertion would push `count / capacity` past the load factor threshold,
//! the bucket array doubles and every entry is moved into its new chain.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::Index;

use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::limits::{self, DEFAULT_LOAD_FACTOR, DEFAULT_TABLE_CAPACITY};

struct Entry<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

type Link<K, V> = Option<Box<Entry<K, V>>>;

fn empty_buckets<K, V>(capacity: usize) -> Vec<Link<K, V>> {
    (0..capacity).map(|_| None).collect()
}

fn key_matches<K, Q>(stored: &K, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    let stored: &Q = stored.borrow();
    stored == key
}

/// Appends `entry` at the tail of the chain starting at `link`
fn push_tail<K, V>(mut link: &mut Link<K, V>, entry: Box<Entry<K, V>>) {
    while let Some(existing) = link {
        link = &mut existing.next;
    }
    *link = Some(entry);
}

/// Construction parameters for a [`HashTable`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Initial number of buckets
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Ratio of entries to buckets above which the table doubles
    #[serde(default = "default_load_factor")]
    pub load_factor: f64,
}

fn default_capacity() -> usize {
    DEFAULT_TABLE_CAPACITY
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            load_factor: default_load_factor(),
        }
    }
}

impl TableConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        limits::validate_capacity(self.capacity)?;
        limits::validate_load_factor(self.load_factor)
    }
}

/// Hash table mapping keys to values with chained collision resolution.
///
/// Hashing goes through `S`; the default [`FxBuildHasher`] is unseeded, so
/// bucket layout is identical from run to run.
///
/// # Example
///
/// ```
/// use linkwork_core::HashTable;
///
/// let mut table = HashTable::new();
/// table.put("apple", 10);
/// table.put("apple", 100);
/// assert_eq!(table.get("apple"), Some(&100));
/// assert_eq!(table.len(), 1);
/// assert!(table.remove("pear").is_err());
/// ```
pub struct HashTable<K, V, S = FxBuildHasher> {
    buckets: Vec<Link<K, V>>,
    count: usize,
    load_factor: f64,
    hasher: S,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with 10 buckets and a 0.7 load factor
    pub fn new() -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_TABLE_CAPACITY),
            count: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
            hasher: FxBuildHasher,
        }
    }

    /// Creates an empty table with `capacity` buckets
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::new(capacity))
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, FxBuildHasher)
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buckets: empty_buckets(config.capacity),
            count: 0,
            load_factor: config.load_factor,
            hasher,
        })
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Threshold that triggers a resize
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor
    }

    /// Current entries-per-bucket ratio
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Length of every chain, in bucket order
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut len = 0;
                let mut link = bucket.as_deref();
                while let Some(entry) = link {
                    len += 1;
                    link = entry.next.as_deref();
                }
                len
            })
            .collect()
    }

    /// Entries in bucket order, chain order within a bucket
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Inserts or updates `key`, returning the previous value on update.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if (self.count + 1) as f64 / self.buckets.len() as f64 > self.load_factor {
            self.resize();
        }

        let index = self.bucket_index(&key);
        let mut link = &mut self.buckets[index];
        while let Some(entry) = link {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value));
            }
            link = &mut entry.next;
        }
        *link = Some(Box::new(Entry {
            key,
            value,
            next: None,
        }));
        self.count += 1;
        None
    }

    /// Doubles the bucket array and moves every entry into its new chain.
    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let old = std::mem::replace(&mut self.buckets, empty_buckets(old_capacity * 2));

        for mut link in old {
            while let Some(mut entry) = link {
                link = entry.next.take();
                let index = self.bucket_index(&entry.key);
                push_tail(&mut self.buckets[index], entry);
            }
        }

        tracing::debug!(
            "Resized hash table from {} to {} buckets ({} entries)",
            old_capacity,
            self.buckets.len(),
            self.count
        );
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut link = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(entry) = link {
            if key_matches(&entry.key, key) {
                return Some(&entry.value);
            }
            link = entry.next.as_deref();
        }
        None
    }

    /// Looks up `key`, falling back to the caller's `default`
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).unwrap_or(default)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        let mut link = self.buckets[index].as_deref_mut();
        while let Some(entry) = link {
            if key_matches(&entry.key, key) {
                return Some(&mut entry.value);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Unlinks `key` and returns its value.
    ///
    /// Unlike [`SearchTree::delete`](crate::SearchTree::delete), a missing
    /// key is an error: callers are expected to remove only keys they know
    /// are present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + fmt::Debug,
    {
        let index = self.bucket_index(key);
        let mut link = &mut self.buckets[index];
        while link
            .as_ref()
            .is_some_and(|entry| !key_matches(&entry.key, key))
        {
            if let Some(entry) = link {
                link = &mut entry.next;
            }
        }

        let Some(entry) = link.take() else {
            return Err(Error::KeyNotFound(format!("{:?}", key)));
        };
        let Entry { value, next, .. } = *entry;
        *link = next;
        self.count -= 1;
        Ok(value)
    }
}

/// Chains are rebuilt back to front so cloning never recurses.
impl<K: Clone, V: Clone, S: Clone> Clone for HashTable<K, V, S> {
    fn clone(&self) -> Self {
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| {
                let mut entries = Vec::new();
                let mut link = bucket.as_deref();
                while let Some(entry) = link {
                    entries.push(entry);
                    link = entry.next.as_deref();
                }

                let mut chain: Link<K, V> = None;
                for entry in entries.into_iter().rev() {
                    chain = Some(Box::new(Entry {
                        key: entry.key.clone(),
                        value: entry.value.clone(),
                        next: chain,
                    }));
                }
                chain
            })
            .collect();

        Self {
            buckets,
            count: self.count,
            load_factor: self.load_factor,
            hasher: self.hasher.clone(),
        }
    }
}

/// Unlinks every chain one entry at a time; the default drop glue would
/// recurse once per entry and can overflow the stack on a long chain.
impl<K, V, S> Drop for HashTable<K, V, S> {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
    }
}

impl<K, V, S, Q> Index<&Q> for HashTable<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in HashTable")
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders every non-empty bucket as `index: key:value -> key:value`.
impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut link = bucket.as_deref();
            if link.is_none() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}: ", index)?;
            let mut separator = "";
            while let Some(entry) = link {
                write!(f, "{}{}:{}", separator, entry.key, entry.value)?;
                separator = " -> ";
                link = entry.next.as_deref();
            }
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`HashTable`]
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Link<K, V>>,
    current: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                return Some((&entry.key, &entry.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{BuildHasherDefault, Hasher};

    /// Sends every key to bucket 0
    #[derive(Default)]
    struct SingleBucket;

    impl Hasher for SingleBucket {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    fn single_bucket_table<K, V>() -> HashTable<K, V, BuildHasherDefault<SingleBucket>> {
        let config = TableConfig::new(1).with_load_factor(4.0);
        HashTable::with_config_and_hasher(config, BuildHasherDefault::default()).unwrap()
    }

    #[test]
    fn test_put_get_update() {
        let mut table = HashTable::with_capacity(5).unwrap();
        assert_eq!(table.put("apple", 10), None);
        assert_eq!(table.put("banana", 20), None);
        assert_eq!(table.put("apple", 100), Some(10));
        assert_eq!(table.get("apple"), Some(&100));
        assert_eq!(table["banana"], 20);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_get_or_default() {
        let table: HashTable<&str, i32> = HashTable::new();
        assert_eq!(*table.get_or("missing", &-1), -1);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new();
        table.put("k".to_string(), 1);
        *table.get_mut("k").unwrap() += 41;
        assert_eq!(table.get("k"), Some(&42));
        assert!(table.get_mut("nope").is_none());
    }

    #[test]
    fn test_resize_doubles_before_crossing_threshold() {
        let mut table = HashTable::with_capacity(5).unwrap();
        for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
            table.put(key, i);
        }
        // 3 / 5 = 0.6
        assert_eq!(table.capacity(), 5);
        // (3 + 1) / 5 = 0.8 > 0.7
        table.put("d", 3);
        assert_eq!(table.capacity(), 10);
        assert_eq!(table.len(), 4);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            assert_eq!(table.get(key), Some(&i));
        }
    }

    #[test]
    fn test_chain_unlinking() {
        let config = TableConfig::new(1).with_load_factor(4.0);
        let mut table = HashTable::with_config(config).unwrap();
        for i in 1..=4 {
            table.put(i, i * 10);
        }
        assert_eq!(table.chain_lengths(), vec![4]);

        assert_eq!(table.remove(&3), Ok(30));
        assert_eq!(table.remove(&1), Ok(10));
        assert_eq!(table.remove(&4), Ok(40));
        assert_eq!(table.chain_lengths(), vec![1]);
        assert_eq!(table.get(&2), Some(&20));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_error() {
        let mut table = HashTable::new();
        table.put("apple", 1);
        let err = table.remove("pear").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(ref k) if k == "\"pear\""));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_then_contains() {
        let mut table = HashTable::new();
        table.put("banana", 20);
        assert!(table.contains_key("banana"));
        assert_eq!(table.remove("banana"), Ok(20));
        assert!(!table.contains_key("banana"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            HashTable::<i32, i32>::with_capacity(0),
            Err(Error::InvalidCapacity { capacity: 0, .. })
        ));
        let config = TableConfig::default().with_load_factor(0.0);
        assert!(HashTable::<i32, i32>::with_config(config).is_err());
    }

    #[test]
    fn test_display_single_bucket() {
        let config = TableConfig::new(1).with_load_factor(4.0);
        let mut table = HashTable::with_config(config).unwrap();
        table.put("a", 1);
        table.put("b", 2);
        assert_eq!(table.to_string(), "0: a:1 -> b:2");
        assert_eq!(HashTable::<i32, i32>::new().to_string(), "");
    }

    #[test]
    fn test_iter_visits_every_entry() {
        let table: HashTable<i32, i32> = (0..50).map(|i| (i, i * i)).collect();
        let mut seen: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).map(|i| (i, i * i)).collect::<Vec<_>>());
        assert_eq!(table.chain_lengths().iter().sum::<usize>(), 50);
    }

    #[test]
    fn test_colliding_hasher_keeps_one_chain() {
        let mut table = single_bucket_table();
        for i in 0..2_000u32 {
            table.put(i, i * 2);
        }
        assert!(table.capacity() > 1);
        assert_eq!(table.chain_lengths()[0], 2_000);
        assert_eq!(table.get(&1_999), Some(&3_998));
        assert_eq!(table.remove(&0), Ok(0));
        assert_eq!(table.len(), 1_999);
    }

    #[test]
    fn test_long_chain_clone_and_drop() {
        const CHAIN: usize = 50_000;
        let mut table = single_bucket_table();
        let mut chain: Link<usize, usize> = None;
        for key in (0..CHAIN).rev() {
            chain = Some(Box::new(Entry {
                key,
                value: key,
                next: chain,
            }));
        }
        table.buckets[0] = chain;
        table.count = CHAIN;
        assert_eq!(table.chain_lengths(), vec![CHAIN]);

        let copy = table.clone();
        assert_eq!(copy.len(), CHAIN);
        assert_eq!(copy.get(&(CHAIN - 1)), Some(&(CHAIN - 1)));
        assert_eq!(copy.iter().next(), Some((&0, &0)));

        drop(copy);
        drop(table);
    }
}
