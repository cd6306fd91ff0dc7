use std::{fmt, sync::Arc};

use bytes::Bytes;

// (table file number, block offset)
pub type BlockKey = (u64, u64);

pub type BlockCache = moka::sync::Cache<BlockKey, Bytes>;

/// Shared block cache handle, bounded by the total size of cached blocks.
pub struct LruCache {
    capacity: usize,
    blocks: BlockCache,
}

pub fn new_lru_cache(capacity: usize) -> Arc<LruCache> {
    let blocks = moka::sync::Cache::builder()
        .max_capacity(capacity as u64)
        .weigher(|_key: &BlockKey, block: &Bytes| u32::try_from(block.len()).unwrap_or(u32::MAX))
        .build();
    Arc::new(LruCache { capacity, blocks })
}

impl LruCache {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn insert(&self, key: BlockKey, block: Bytes) {
        self.blocks.insert(key, block);
    }

    pub fn get(&self, key: &BlockKey) -> Option<Bytes> {
        self.blocks.get(key)
    }

    pub fn usage(&self) -> u64 {
        self.blocks.run_pending_tasks();
        self.blocks.weighted_size()
    }
}

// two handles are interchangeable when they were sized the same
impl PartialEq for LruCache {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
    }
}

impl fmt::Debug for LruCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .finish()
    }
}
