//! Shared resources referenced from table-format and column-family
//! options. Each is built by a named constructor and handed out as an
//! `Arc`.

pub mod block_cache;
pub mod bloom;
pub mod factory;

pub use block_cache::{new_lru_cache, LruCache};
pub use bloom::{new_bloom_filter_policy, BloomFilterPolicy};
pub use factory::{new_block_based_table_factory, BlockBasedTableFactory};
