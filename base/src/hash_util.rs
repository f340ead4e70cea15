use std::collections::{HashMap, HashSet};
use xxhash_rust::xxh3::Xxh3Builder;

/// The default choice for hashing in this workspace.
pub type NonCryptoHashBuilder = Xxh3Builder;

/// The default choice for hash maps in this workspace.
pub type NonCryptoHashMap<K, V> = HashMap<K, V, NonCryptoHashBuilder>;

/// The default choice for hash sets in this workspace.
pub type NonCryptoHashSet<T> = HashSet<T, NonCryptoHashBuilder>;

