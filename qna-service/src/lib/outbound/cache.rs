use std::hash::Hash;
use std::time::Duration;
use std::time::Instant;

use dashmap::DashMap;

use crate::domain::test::models::Test;
use crate::domain::test::models::TestId;
use crate::domain::test::ports::TestCache;
use crate::domain::user::models::UserId;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Concurrent map whose entries expire `ttl` after insertion.
///
/// Expired entries are dropped lazily when read. Patching an entry through
/// [`TtlCache::update`] keeps its original insertion time.
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        {
            let entry = self.entries.get(key)?;
            if now.duration_since(entry.inserted_at) < self.ttl {
                return Some(entry.value.clone());
            }
        }

        // Read guard must be released before removing from the same shard.
        self.entries
            .remove_if(key, |_, entry| now.duration_since(entry.inserted_at) >= self.ttl);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn remove(&self, key: &K) {
        self.entries.remove(key);
    }

    /// Drop every entry whose value matches `predicate`.
    pub fn remove_where<F>(&self, predicate: F)
    where
        F: Fn(&V) -> bool,
    {
        self.entries.retain(|_, entry| !predicate(&entry.value));
    }

    /// Apply `f` to the entry under `key`, if one is present.
    pub fn update<F>(&self, key: &K, f: F)
    where
        F: FnOnce(&mut V),
    {
        if let Some(mut entry) = self.entries.get_mut(key) {
            f(&mut entry.value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TestCache for TtlCache<TestId, Test> {
    fn get(&self, id: &TestId) -> Option<Test> {
        TtlCache::get(self, id)
    }

    fn insert(&self, id: TestId, test: Test) {
        TtlCache::insert(self, id, test);
    }

    fn remove(&self, id: &TestId) {
        TtlCache::remove(self, id);
    }

    fn update(&self, id: &TestId, f: &dyn Fn(&mut Test)) {
        TtlCache::update(self, id, f);
    }

    fn remove_by_author(&self, author_id: UserId) {
        self.remove_where(|test| test.author_id == author_id);
    }
}
