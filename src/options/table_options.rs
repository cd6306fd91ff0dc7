use std::sync::Arc;

use crate::{
    convert::{parse_bool, parse_int32, parse_size_t},
    error::{ConvertError, Result},
    table::{new_bloom_filter_policy, new_lru_cache, BloomFilterPolicy, LruCache},
    tokenizer::{string_to_map, trim, RawConfigMap},
    types::{ChecksumType, IndexType, NamedEnum},
};

use super::Stage;

const BLOOM_FILTER_PREFIX: &str = "bloomfilter:";

/// Options for the block-based table format.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBasedTableOptions {
    pub cache_index_and_filter_blocks: bool,
    pub index_type: IndexType,
    pub hash_index_allow_collision: bool,
    pub checksum: ChecksumType,
    pub no_block_cache: bool,
    pub block_cache: Option<Arc<LruCache>>,
    pub block_cache_compressed: Option<Arc<LruCache>>,
    /// Approximate uncompressed size of a data block.
    pub block_size: usize,
    /// Percentage of free space below which a block is closed early.
    pub block_size_deviation: i32,
    pub block_restart_interval: i32,
    pub filter_policy: Option<Arc<BloomFilterPolicy>>,
    pub whole_key_filtering: bool,
}

impl Default for BlockBasedTableOptions {
    fn default() -> Self {
        Self {
            cache_index_and_filter_blocks: false,
            index_type: IndexType::BinarySearch,
            hash_index_allow_collision: true,
            checksum: ChecksumType::Crc32c,
            no_block_cache: false,
            block_cache: None,
            block_cache_compressed: None,
            block_size: 4 * 1024,
            block_size_deviation: 10,
            block_restart_interval: 16,
            filter_policy: None,
            whole_key_filtering: true,
        }
    }
}

const TABLE_STAGE: Stage<BlockBasedTableOptions> = &[
    entry!("cache_index_and_filter_blocks", |o, v| {
        o.cache_index_and_filter_blocks = parse_bool("cache_index_and_filter_blocks", v)?
    }),
    entry!("index_type", |o, v| o.index_type = IndexType::from_name(v)?),
    entry!("hash_index_allow_collision", |o, v| {
        o.hash_index_allow_collision = parse_bool("hash_index_allow_collision", v)?
    }),
    entry!("checksum", |o, v| o.checksum = ChecksumType::from_name(v)?),
    entry!("no_block_cache", |o, v| o.no_block_cache = parse_bool("no_block_cache", v)?),
    entry!("block_cache", |o, v| o.block_cache = Some(new_lru_cache(parse_size_t(v)?))),
    entry!("block_cache_compressed", |o, v| {
        o.block_cache_compressed = Some(new_lru_cache(parse_size_t(v)?))
    }),
    entry!("block_size", |o, v| o.block_size = parse_size_t(v)?),
    entry!("block_size_deviation", |o, v| o.block_size_deviation = parse_int32(v)?),
    entry!("block_restart_interval", |o, v| o.block_restart_interval = parse_int32(v)?),
    entry!("filter_policy", |o, v| o.filter_policy = Some(parse_filter_policy(v)?)),
    entry!("whole_key_filtering", |o, v| o.whole_key_filtering = parse_bool("whole_key_filtering", v)?),
];

// bloomfilter:<bits_per_key>:<use_block_based_builder>
fn parse_filter_policy(value: &str) -> std::result::Result<Arc<BloomFilterPolicy>, ConvertError> {
    let Some(params) = value.strip_prefix(BLOOM_FILTER_PREFIX) else {
        return Err(ConvertError::InvalidType(format!("invalid filter policy name: {}", value)));
    };
    let Some((bits_per_key, use_block_based_builder)) = params.split_once(':') else {
        return Err(ConvertError::InvalidArity {
            expected: 2,
            value: params.to_string(),
        });
    };
    let bits_per_key = parse_int32(trim(bits_per_key))?;
    let use_block_based_builder = parse_bool("use_block_based_builder", trim(use_block_based_builder))?;
    Ok(new_bloom_filter_policy(bits_per_key, use_block_based_builder))
}

pub fn apply_table_options_in_place(target: &mut BlockBasedTableOptions, map: &RawConfigMap) -> Result<()> {
    super::apply_in_place(target, map, &[TABLE_STAGE], "Unrecognized option")
}

pub fn apply_table_options(base: &BlockBasedTableOptions, map: &RawConfigMap) -> Result<BlockBasedTableOptions> {
    super::apply(base, map, &[TABLE_STAGE], "Unrecognized option")
}

pub fn table_options_from_string(base: &BlockBasedTableOptions, opts_str: &str) -> Result<BlockBasedTableOptions> {
    let map = string_to_map(opts_str)?;
    apply_table_options(base, &map)
}
