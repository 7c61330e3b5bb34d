use core::fmt::Debug;
use core::marker::PhantomData;

use crate::error::MapError;
use crate::hash_fn::BuiltinHash;
use crate::hash_fn::HashFunction;

/// Bucket count used when `0` is requested.
pub const DEFAULT_BUCKETS: usize = 128;

/// Load factor used when a non-positive (or NaN) factor is requested.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

#[derive(Clone)]
struct Node<V> {
    key: String,
    value: V,
    /// Hash of `key` under the function active at insertion. Reused on
    /// resize.
    hash: u32,
}

type Chain<V> = Vec<Node<V>>;

#[inline(always)]
fn max_len_for(buckets: usize, load_factor: f64) -> usize {
    (buckets as f64 * load_factor) as usize
}

#[inline(always)]
fn bucket_for(hash: u32, buckets: usize) -> usize {
    hash as usize % buckets
}

/// A string-keyed hash map using separate chaining.
///
/// `HashMap<V>` owns a copy of every key and stores values of type `V`. The
/// hash function is pluggable (see [`HashFunction`]) and may be replaced
/// while the map is empty. When the number of entries exceeds
/// `bucket_count * max_load_factor` the bucket table doubles; entries are
/// redistributed using the hash cached at insertion, so the hash function
/// runs exactly once per inserted key.
///
/// The map never shrinks.
///
/// # Examples
///
/// ```rust
/// # use travel_planner::HashMap;
/// #
/// let mut cities = HashMap::new();
/// cities.insert("Denver", 0usize);
/// cities.insert("Omaha", 1);
///
/// assert_eq!(cities.get("Omaha"), Some(&1));
/// assert_eq!(cities.insert("Omaha", 7), Some(1));
/// assert_eq!(cities.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashMap<V> {
    buckets: Vec<Chain<V>>,
    len: usize,
    max_load_factor: f64,
    max_len: usize,
    hasher: HashFunction,
}

impl<V> Debug for HashMap<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(&k, v);
        }
        map.finish()
    }
}

impl<V> Default for HashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashMap<V> {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets, a load factor
    /// of [`DEFAULT_LOAD_FACTOR`] and the default hash function.
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(0, 0.0)
    }

    /// Creates an empty map with the given initial bucket count and maximum
    /// load factor.
    ///
    /// A bucket count of `0` selects [`DEFAULT_BUCKETS`]; a load factor that
    /// is not strictly positive selects [`DEFAULT_LOAD_FACTOR`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use travel_planner::HashMap;
    /// #
    /// let map: HashMap<u32> = HashMap::with_capacity_and_load_factor(0, -1.0);
    /// assert_eq!(map.bucket_count(), 128);
    /// assert_eq!(map.max_load_factor(), 0.75);
    ///
    /// let map: HashMap<u32> = HashMap::with_capacity_and_load_factor(16, 1.0);
    /// assert_eq!(map.bucket_count(), 16);
    /// ```
    pub fn with_capacity_and_load_factor(buckets: usize, load_factor: f64) -> Self {
        Self::with_hash_function(buckets, load_factor, HashFunction::default())
    }

    /// Like [`with_capacity_and_load_factor`], with an explicit hash
    /// function.
    ///
    /// [`with_capacity_and_load_factor`]: HashMap::with_capacity_and_load_factor
    pub fn with_hash_function(buckets: usize, load_factor: f64, hasher: HashFunction) -> Self {
        let buckets = if buckets == 0 { DEFAULT_BUCKETS } else { buckets };
        // `!(x > 0.0)` also catches NaN.
        let load_factor = if !(load_factor > 0.0) {
            DEFAULT_LOAD_FACTOR
        } else {
            load_factor
        };

        Self {
            buckets: (0..buckets).map(|_| Vec::new()).collect(),
            len: 0,
            max_load_factor: load_factor,
            max_len: max_len_for(buckets, load_factor),
            hasher,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the configured maximum load factor.
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the current load factor, `len / bucket_count`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the number of entries the map holds before it grows.
    pub fn capacity(&self) -> usize {
        self.max_len
    }

    /// Describes the active hash function.
    pub fn hash_description(&self) -> &str {
        self.hasher.description()
    }

    /// Replaces the hash function.
    ///
    /// Cached hashes would be meaningless under a new function, so this
    /// fails with [`MapError::NotEmpty`] unless the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use travel_planner::HashMap;
    /// # use travel_planner::hash_fn::HashFunction;
    /// #
    /// fn first_byte(s: &str) -> u32 {
    ///     s.bytes().next().map_or(0, u32::from)
    /// }
    ///
    /// let mut map = HashMap::new();
    /// map.set_hash_function(HashFunction::custom(first_byte, Some("first byte")))
    ///     .unwrap();
    /// assert_eq!(map.hash_description(), "first byte");
    ///
    /// map.insert("x", 1);
    /// assert!(map.set_hash_function(HashFunction::default()).is_err());
    /// ```
    pub fn set_hash_function(&mut self, hasher: HashFunction) -> Result<(), MapError> {
        if self.len > 0 {
            tracing::warn!(
                len = self.len,
                "attempt to change hash function on non-empty map"
            );
            return Err(MapError::NotEmpty { len: self.len });
        }

        self.hasher = hasher;
        Ok(())
    }

    /// Selects one of the built-in hash functions by numeric id.
    ///
    /// See [`BuiltinHash`] for the ids. Unknown ids fail with
    /// [`MapError::UnknownHashFunction`] and leave the map unchanged.
    pub fn set_builtin_hash(&mut self, id: i32) -> Result<(), MapError> {
        let Some(builtin) = BuiltinHash::from_id(id) else {
            tracing::warn!(id, "invalid hash function id");
            return Err(MapError::UnknownHashFunction(id));
        };

        self.set_hash_function(builtin.into())
    }

    /// Inserts `value` under `key`, returning the value previously stored
    /// there.
    ///
    /// The key is copied into the map only when it was not present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let hash = self.hasher.hash(key);
        match self.find(key, hash) {
            Some((bucket, pos)) => Some(core::mem::replace(
                &mut self.buckets[bucket][pos].value,
                value,
            )),
            None => {
                self.insert_new(key.to_string(), hash, value);
                None
            }
        }
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let hash = self.hasher.hash(key);
        self.find(key, hash)
            .map(|(bucket, pos)| &self.buckets[bucket][pos].value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = self.hasher.hash(key);
        self.find(key, hash)
            .map(|(bucket, pos)| &mut self.buckets[bucket][pos].value)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// ```rust
    /// # use travel_planner::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.remove("a"), Some(1));
    /// assert_eq!(map.remove("a"), None);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let hash = self.hasher.hash(key);
        let (bucket, pos) = self.find(key, hash)?;
        Some(self.take(bucket, pos))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// ```rust
    /// # use travel_planner::HashMap;
    /// #
    /// let mut ids = HashMap::new();
    /// for name in ["a", "b", "a", "c", "b"] {
    ///     let next = ids.len();
    ///     ids.entry(name).or_insert(next);
    /// }
    ///
    /// assert_eq!(ids.get("a"), Some(&0));
    /// assert_eq!(ids.get("c"), Some(&2));
    /// ```
    pub fn entry<'a>(&'a mut self, key: &'a str) -> Entry<'a, V> {
        let hash = self.hasher.hash(key);
        match self.find(key, hash) {
            Some((bucket, pos)) => Entry::Occupied(OccupiedEntry {
                map: self,
                bucket,
                pos,
            }),
            None => Entry::Vacant(VacantEntry {
                map: self,
                key,
                hash,
            }),
        }
    }

    /// Removes every entry. The bucket table keeps its size.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Removes and yields every `(key, value)` pair, leaving the map empty.
    ///
    /// This is how a caller takes back ownership of stored values before
    /// discarding the map.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let nodes: Vec<Node<V>> = self
            .buckets
            .iter_mut()
            .flat_map(|chain| chain.drain(..))
            .collect();
        self.len = 0;

        Drain {
            inner: nodes.into_iter(),
            _map: PhantomData,
        }
    }

    fn find(&self, key: &str, hash: u32) -> Option<(usize, usize)> {
        let bucket = bucket_for(hash, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .position(|node| node.hash == hash && node.key == key)
            .map(|pos| (bucket, pos))
    }

    fn insert_new(&mut self, key: String, hash: u32, value: V) -> &mut V {
        self.len += 1;
        if self.len > self.max_len {
            self.grow();
        }

        let bucket = bucket_for(hash, self.buckets.len());
        let chain = &mut self.buckets[bucket];
        chain.push(Node { key, value, hash });
        let last = chain.len() - 1;
        &mut chain[last].value
    }

    fn take(&mut self, bucket: usize, pos: usize) -> (String, V) {
        let node = self.buckets[bucket].swap_remove(pos);
        self.len -= 1;
        (node.key, node.value)
    }

    #[cold]
    fn grow(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = core::mem::replace(
            &mut self.buckets,
            (0..new_count).map(|_| Vec::new()).collect(),
        );

        for node in old.into_iter().flatten() {
            self.buckets[bucket_for(node.hash, new_count)].push(node);
        }
        self.max_len = max_len_for(new_count, self.max_load_factor);

        tracing::debug!(
            buckets = new_count,
            len = self.len,
            max_len = self.max_len,
            "hash map grew"
        );
    }
}

/// A view into a single entry of a [`HashMap`], which may be vacant or
/// occupied.
///
/// Constructed by [`HashMap::entry`].
pub enum Entry<'a, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns this entry's key.
    pub fn key(&self) -> &str {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry of a [`HashMap`].
pub struct VacantEntry<'a, V> {
    map: &'a mut HashMap<V>,
    key: &'a str,
    hash: u32,
}

impl<'a, V> VacantEntry<'a, V> {
    /// The key that would be inserted.
    pub fn key(&self) -> &str {
        self.key
    }

    /// Copies the key into the map, stores `value`, and returns a mutable
    /// reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        self.map.insert_new(self.key.to_string(), self.hash, value)
    }
}

/// A view into an occupied entry of a [`HashMap`].
pub struct OccupiedEntry<'a, V> {
    map: &'a mut HashMap<V>,
    bucket: usize,
    pos: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// The stored key.
    pub fn key(&self) -> &str {
        &self.map.buckets[self.bucket][self.pos].key
    }

    /// A reference to the stored value.
    pub fn get(&self) -> &V {
        &self.map.buckets[self.bucket][self.pos].value
    }

    /// A mutable reference to the stored value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.buckets[self.bucket][self.pos].value
    }

    /// Converts the entry into a mutable reference bound to the map.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.buckets[self.bucket][self.pos].value
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry, returning its key and value.
    pub fn remove_entry(self) -> (String, V) {
        self.map.take(self.bucket, self.pos)
    }
}

/// An iterator over the `(key, value)` pairs of a [`HashMap`].
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Chain<V>>,
    chain: core::slice::Iter<'a, Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.next() {
                self.remaining -= 1;
                return Some((node.key.as_str(), &node.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a HashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the `(key, value)` pairs of a [`HashMap`].
pub struct Drain<'a, V> {
    inner: std::vec::IntoIter<Node<V>>,
    _map: PhantomData<&'a mut HashMap<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| (node.key, node.value))
    }
}

/// Chain length statistics for a [`HashMap`].
///
/// Available in tests and with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries in the map
    pub len: usize,
    /// Number of buckets
    pub buckets: usize,
    /// Entries allowed before the next resize
    pub capacity: usize,
    /// Current load factor (len / buckets)
    pub load_factor: f64,
    /// Configured maximum load factor
    pub max_load_factor: f64,
    /// Buckets holding no entries
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean chain length over non-empty buckets
    pub mean_chain: f64,
    /// Description of the active hash function
    pub hash_description: String,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Prints the statistics to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

#[cfg(any(test, feature = "stats"))]
impl core::fmt::Display for DebugStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "hash function:   {}", self.hash_description)?;
        writeln!(f, "entries:         {}", self.len)?;
        writeln!(f, "buckets:         {}", self.buckets)?;
        writeln!(f, "capacity:        {}", self.capacity)?;
        writeln!(
            f,
            "load factor:     {:.3} (max {:.3})",
            self.load_factor, self.max_load_factor
        )?;
        writeln!(f, "empty buckets:   {}", self.empty_buckets)?;
        writeln!(f, "longest chain:   {}", self.longest_chain)?;
        write!(f, "mean chain:      {:.3}", self.mean_chain)
    }
}

/// Number of buckets per chain length: `counts()[k]` buckets hold exactly
/// `k` entries.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ChainHistogram {
    /// Bucket counts indexed by chain length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Prints the histogram to stdout as a horizontal bar chart.
    pub fn print(&self) {
        println!("{self}");
    }
}

#[cfg(any(test, feature = "stats"))]
impl core::fmt::Display for ChainHistogram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return write!(f, "chain histogram: empty");
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        let make_bar = |count: usize| -> String {
            if count == 0 {
                return String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                0 => None,
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                _ => Some('▉'),
            };
            bar.extend(partial);
            bar
        };

        writeln!(f, "chain histogram ({} buckets):", self.counts.iter().sum::<usize>())?;
        for (len, &count) in self.counts.iter().enumerate() {
            writeln!(f, "{:>3} | {} ({})", len, make_bar(count), count)?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "stats"))]
impl<V> HashMap<V> {
    /// Returns the chain length histogram.
    pub fn chain_histogram(&self) -> ChainHistogram {
        let longest = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let mut counts = vec![0usize; longest + 1];
        for chain in &self.buckets {
            counts[chain.len()] += 1;
        }
        ChainHistogram { counts }
    }

    /// Returns chain statistics for debugging.
    pub fn debug_stats(&self) -> DebugStats {
        let empty_buckets = self.buckets.iter().filter(|c| c.is_empty()).count();
        let used = self.buckets.len() - empty_buckets;

        DebugStats {
            len: self.len,
            buckets: self.buckets.len(),
            capacity: self.max_len,
            load_factor: self.load_factor(),
            max_load_factor: self.max_load_factor,
            empty_buckets,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            mean_chain: if used == 0 {
                0.0
            } else {
                self.len as f64 / used as f64
            },
            hash_description: self.hash_description().to_string(),
        }
    }

    /// Prints one row per bucket with an `X` per chained entry.
    pub fn print_profile(&self) {
        for chain in &self.buckets {
            println!("|-|{}", "X".repeat(chain.len()));
        }
    }
}
