//! Process-wide string intern caches for repeated object keys and short
//! string values.
//!
//! Grounded in `ext/oj/cache.c`'s near-Murmur hash and open-chained bucket
//! array; the teacher crate has no equivalent (it never interns), so the
//! bucket/chain/rehash shape here is ported from the original C
//! implementation's behavior rather than its code.

use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

const DEFAULT_BUCKETS: usize = 8192;
const REHASH_CHAIN_LEN: usize = 64;

/// The near-Murmur 32-bit mix `ext/oj/cache.c` uses: four bytes at a time
/// through a multiply-xor, folding in the trailing 1-3 bytes and the
/// length.
fn hash_bytes(key: &[u8]) -> u32 {
    const M: u32 = 0x5bd1_e995;
    let mut h = key.len() as u32;
    let mut chunks = key.chunks_exact(4);
    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> 24;
        h = h.wrapping_mul(M);
        h ^= k.wrapping_mul(M);
    }
    let rem = chunks.remainder();
    if rem.len() > 1 {
        let k16 = u16::from_le_bytes([rem[0], rem[1]]);
        h ^= (k16 as u32) << 8;
    }
    if let Some(&last) = rem.last() {
        if rem.len() == 1 || rem.len() == 3 {
            h ^= last as u32;
        }
    }
    h = h.wrapping_mul(M);
    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

struct Slot {
    key: Box<[u8]>,
    value: Arc<str>,
    next: Option<Box<Slot>>,
}

struct Table {
    buckets: Vec<Option<Box<Slot>>>,
    count: usize,
}

impl Table {
    fn new(buckets: usize) -> Self {
        Table {
            buckets: (0..buckets).map(|_| None).collect(),
            count: 0,
        }
    }

    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    fn lookup(&self, key: &[u8], hash: u32) -> Option<Arc<str>> {
        let idx = (hash as usize) & self.mask();
        let mut slot = self.buckets[idx].as_deref();
        while let Some(s) = slot {
            if s.key.as_ref() == key {
                return Some(Arc::clone(&s.value));
            }
            slot = s.next.as_deref();
        }
        None
    }

    fn insert(&mut self, key: &[u8], hash: u32, value: Arc<str>) {
        let idx = (hash as usize) & self.mask();
        let new_slot = Box::new(Slot {
            key: key.into(),
            value,
            next: self.buckets[idx].take(),
        });
        self.buckets[idx] = Some(new_slot);
        self.count += 1;
    }

    fn should_rehash(&self) -> bool {
        self.count / self.buckets.len().max(1) > REHASH_CHAIN_LEN
    }

    fn rehash(&mut self) {
        let new_len = self.buckets.len() * 2;
        let mut new_table = Table::new(new_len);
        for bucket in self.buckets.drain(..) {
            let mut slot = bucket;
            while let Some(mut s) = slot {
                slot = s.next.take();
                let hash = hash_bytes(&s.key);
                let idx = (hash as usize) & new_table.mask();
                s.next = new_table.buckets[idx].take();
                new_table.buckets[idx] = Some(s);
            }
        }
        new_table.count = self.count;
        *self = new_table;
    }
}

/// A bounded, thread-safe string intern cache.
///
/// Looking the same byte sequence up twice returns the same `Arc<str>`
/// (pointer-equal via [`Arc::ptr_eq`]), so callers can compare keys by
/// pointer once they've been through a cache with caching enabled.
pub struct InternCache {
    table: Mutex<Table>,
}

impl InternCache {
    pub fn new() -> Self {
        InternCache {
            table: Mutex::new(Table::new(DEFAULT_BUCKETS)),
        }
    }

    /// Returns the interned `Arc<str>` for `key`, validating it as UTF-8 and
    /// inserting it on first sight.
    pub fn intern(&self, key: &[u8]) -> Result<Arc<str>, std::str::Utf8Error> {
        let hash = hash_bytes(key);
        let mut table = self.table.lock().unwrap();
        if let Some(existing) = table.lookup(key, hash) {
            return Ok(existing);
        }
        let s: Arc<str> = Arc::from(std::str::from_utf8(key)?);
        table.insert(key, hash, Arc::clone(&s));
        if table.should_rehash() {
            table.rehash();
        }
        Ok(s)
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InternCache {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// The process-wide cache for object keys, which is where interning
    /// pays off the most: typical JSON repeats the same small set of keys
    /// across every element of an array of objects.
    pub static ref KEY_CACHE: InternCache = InternCache::new();

    /// The process-wide cache for "short" string values, disabled by
    /// default (see `ParserOptions::cache_strings_threshold`).
    pub static ref VALUE_CACHE: InternCache = InternCache::new();
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn interning_same_bytes_twice_is_pointer_equal() {
        let cache = InternCache::new();
        let a = cache.intern(b"hello").unwrap();
        let b = cache.intern(b"hello").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_keys_are_not_equal() {
        let cache = InternCache::new();
        let a = cache.intern(b"hello").unwrap();
        let b = cache.intern(b"world").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let cache = InternCache::new();
        assert!(cache.intern(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }

    #[test]
    fn many_keys_trigger_rehash_without_losing_entries() {
        let cache = InternCache::new();
        let keys: Vec<String> = (0..20_000).map(|i| format!("key-{i}")).collect();
        for k in &keys {
            cache.intern(k.as_bytes()).unwrap();
        }
        for k in &keys {
            let a = cache.intern(k.as_bytes()).unwrap();
            let b = cache.intern(k.as_bytes()).unwrap();
            assert!(Arc::ptr_eq(&a, &b));
        }
    }
}
