//! Maps `key=value;nested={...}` configuration strings onto typed
//! storage-engine option records.

pub mod convert;
pub mod error;
pub mod options;
pub mod slice_transform;
pub mod table;
pub mod tokenizer;
pub mod types;

pub use convert::{parse_bool, parse_double, parse_int32, parse_list, parse_size_t, parse_uint32, parse_uint64};
pub use error::{ConvertError, ErrorKind, OptionsError, Result};
pub use options::{
    cf_options::{
        apply_cf_options, apply_cf_options_in_place, cf_options_from_string, ColumnFamilyOptions,
        CompactionOptionsFifo, CompactionOptionsUniversal, CompressionOptions,
    },
    db_options::{apply_db_options, apply_db_options_in_place, db_options_from_string, DbOptions, DbPath},
    mutable_cf_options::{
        apply_mutable_cf_options, apply_mutable_cf_options_in_place, mutable_cf_options_from_string,
        MutableCfOptions,
    },
    table_options::{
        apply_table_options, apply_table_options_in_place, table_options_from_string, BlockBasedTableOptions,
    },
};
pub use slice_transform::{new_fixed_prefix_transform, FixedPrefixTransform};
pub use table::{
    new_block_based_table_factory, new_bloom_filter_policy, new_lru_cache, BlockBasedTableFactory, BloomFilterPolicy,
    LruCache,
};
pub use tokenizer::{string_to_map, RawConfigMap};
pub use types::{ChecksumType, CompactionStyle, CompressionType, IndexType, NamedEnum};
