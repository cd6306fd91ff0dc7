use std::sync::Arc;

use crate::{
    convert::{
        parse_bool, parse_double, parse_int32, parse_list, parse_size_t, parse_uint32, parse_uint64,
    },
    error::{ConvertError, Result},
    slice_transform::{new_fixed_prefix_transform, FixedPrefixTransform},
    table::{new_block_based_table_factory, BlockBasedTableFactory},
    tokenizer::{string_to_map, trim, RawConfigMap},
    types::{CompactionStyle, CompressionType, NamedEnum},
};

use super::{
    table_options::{table_options_from_string, BlockBasedTableOptions},
    Stage,
};

const FIXED_PREFIX: &str = "fixed:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    pub window_bits: i32,
    pub level: i32,
    pub strategy: i32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            window_bits: -14,
            level: -1,
            strategy: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionOptionsUniversal {
    pub size_ratio: u32,
    pub min_merge_width: u32,
    pub max_merge_width: u32,
    pub max_size_amplification_percent: u32,
    pub compression_size_percent: i32,
}

impl Default for CompactionOptionsUniversal {
    fn default() -> Self {
        Self {
            size_ratio: 1,
            min_merge_width: 2,
            max_merge_width: u32::MAX,
            max_size_amplification_percent: 200,
            compression_size_percent: -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionOptionsFifo {
    /// Oldest table files are dropped once their total size exceeds this.
    pub max_table_files_size: u64,
}

impl Default for CompactionOptionsFifo {
    fn default() -> Self {
        Self {
            max_table_files_size: 1024 * 1024 * 1024,
        }
    }
}

/// Options of a single column family.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFamilyOptions {
    // memtable
    pub write_buffer_size: usize,
    pub arena_block_size: usize,
    pub memtable_prefix_bloom_bits: u32,
    pub memtable_prefix_bloom_probes: u32,
    pub memtable_prefix_bloom_huge_page_tlb_size: usize,
    pub max_successive_merges: usize,
    pub filter_deletes: bool,
    pub max_write_buffer_number: i32,
    pub inplace_update_num_locks: usize,

    // compaction
    pub disable_auto_compactions: bool,
    pub soft_rate_limit: f64,
    pub hard_rate_limit: f64,
    pub level0_file_num_compaction_trigger: i32,
    pub level0_slowdown_writes_trigger: i32,
    pub level0_stop_writes_trigger: i32,
    pub max_grandparent_overlap_factor: i32,
    pub expanded_compaction_factor: i32,
    pub source_compaction_factor: i32,
    pub target_file_size_base: u64,
    pub target_file_size_multiplier: i32,
    pub max_bytes_for_level_base: u64,
    pub max_bytes_for_level_multiplier: i32,
    pub max_bytes_for_level_multiplier_additional: Vec<i32>,
    pub max_mem_compaction_level: i32,
    pub verify_checksums_in_compaction: bool,

    pub max_sequential_skip_in_iterations: u64,

    pub table_factory: Arc<BlockBasedTableFactory>,
    pub min_write_buffer_number_to_merge: i32,
    pub compression: CompressionType,
    /// Overrides `compression` per level when non-empty.
    pub compression_per_level: Vec<CompressionType>,
    pub compression_opts: CompressionOptions,
    pub num_levels: i32,
    pub purge_redundant_kvs_while_flush: bool,
    pub compaction_style: CompactionStyle,
    pub compaction_options_universal: CompactionOptionsUniversal,
    pub compaction_options_fifo: CompactionOptionsFifo,
    pub bloom_locality: u32,
    pub min_partial_merge_operands: u32,
    pub inplace_update_support: bool,
    pub prefix_extractor: Option<Arc<FixedPrefixTransform>>,
}

impl Default for ColumnFamilyOptions {
    fn default() -> Self {
        let num_levels = 7;
        Self {
            write_buffer_size: 4 << 20,
            arena_block_size: 0,
            memtable_prefix_bloom_bits: 0,
            memtable_prefix_bloom_probes: 6,
            memtable_prefix_bloom_huge_page_tlb_size: 0,
            max_successive_merges: 0,
            filter_deletes: false,
            max_write_buffer_number: 2,
            inplace_update_num_locks: 10000,

            disable_auto_compactions: false,
            soft_rate_limit: 0.0,
            hard_rate_limit: 0.0,
            level0_file_num_compaction_trigger: 4,
            level0_slowdown_writes_trigger: 20,
            level0_stop_writes_trigger: 24,
            max_grandparent_overlap_factor: 10,
            expanded_compaction_factor: 25,
            source_compaction_factor: 1,
            target_file_size_base: 2 * 1048576,
            target_file_size_multiplier: 1,
            max_bytes_for_level_base: 10 * 1048576,
            max_bytes_for_level_multiplier: 10,
            max_bytes_for_level_multiplier_additional: vec![1; num_levels as usize],
            max_mem_compaction_level: 2,
            verify_checksums_in_compaction: true,

            max_sequential_skip_in_iterations: 8,

            table_factory: Arc::new(BlockBasedTableFactory::default()),
            min_write_buffer_number_to_merge: 1,
            compression: CompressionType::Snappy,
            compression_per_level: Vec::new(),
            compression_opts: CompressionOptions::default(),
            num_levels,
            purge_redundant_kvs_while_flush: true,
            compaction_style: CompactionStyle::Level,
            compaction_options_universal: CompactionOptionsUniversal::default(),
            compaction_options_fifo: CompactionOptionsFifo::default(),
            bloom_locality: 0,
            min_partial_merge_operands: 2,
            inplace_update_support: false,
            prefix_extractor: None,
        }
    }
}

const MEMTABLE_STAGE: Stage<ColumnFamilyOptions> = memtable_stage!();
const COMPACTION_STAGE: Stage<ColumnFamilyOptions> = compaction_stage!();
const MISC_STAGE: Stage<ColumnFamilyOptions> = misc_stage!();

const CF_STAGE: Stage<ColumnFamilyOptions> = &[
    entry!("block_based_table_factory", |o, v| {
        // nested blocks start from defaults, never from the parent's table options
        let table_options = table_options_from_string(&BlockBasedTableOptions::default(), v)
            .map_err(ConvertError::Nested)?;
        o.table_factory = new_block_based_table_factory(table_options)
    }),
    entry!("min_write_buffer_number_to_merge", |o, v| {
        o.min_write_buffer_number_to_merge = parse_int32(v)?
    }),
    entry!("compression", |o, v| o.compression = CompressionType::from_name(v)?),
    entry!("compression_per_level", |o, v| {
        o.compression_per_level = parse_list(v, CompressionType::from_name)?
    }),
    entry!("compression_opts", |o, v| o.compression_opts = parse_compression_opts(v)?),
    entry!("num_levels", |o, v| o.num_levels = parse_int32(v)?),
    entry!("purge_redundant_kvs_while_flush", |o, v| {
        o.purge_redundant_kvs_while_flush = parse_bool("purge_redundant_kvs_while_flush", v)?
    }),
    entry!("compaction_style", |o, v| o.compaction_style = CompactionStyle::from_name(v)?),
    not_supported!("compaction_options_universal"),
    entry!("compaction_options_fifo", |o, v| {
        o.compaction_options_fifo.max_table_files_size = parse_uint64(v)?
    }),
    entry!("bloom_locality", |o, v| o.bloom_locality = parse_uint32(v)?),
    entry!("min_partial_merge_operands", |o, v| o.min_partial_merge_operands = parse_uint32(v)?),
    entry!("inplace_update_support", |o, v| {
        o.inplace_update_support = parse_bool("inplace_update_support", v)?
    }),
    entry!("prefix_extractor", |o, v| o.prefix_extractor = Some(parse_prefix_extractor(v)?)),
];

const CF_STAGES: &[Stage<ColumnFamilyOptions>] = &[MEMTABLE_STAGE, COMPACTION_STAGE, MISC_STAGE, CF_STAGE];

// window_bits:level:strategy
fn parse_compression_opts(value: &str) -> std::result::Result<CompressionOptions, ConvertError> {
    let fields: Vec<&str> = value.splitn(3, ':').collect();
    if fields.len() != 3 || fields[2].is_empty() {
        return Err(ConvertError::InvalidArity {
            expected: 3,
            value: value.to_string(),
        });
    }
    Ok(CompressionOptions {
        window_bits: parse_int32(fields[0])?,
        level: parse_int32(fields[1])?,
        strategy: parse_int32(fields[2])?,
    })
}

// fixed:<prefix_len>
fn parse_prefix_extractor(value: &str) -> std::result::Result<Arc<FixedPrefixTransform>, ConvertError> {
    let Some(prefix_len) = value.strip_prefix(FIXED_PREFIX) else {
        return Err(ConvertError::InvalidType(format!("invalid prefix extractor type: {}", value)));
    };
    let prefix_len = parse_int32(trim(prefix_len))?;
    let prefix_len = usize::try_from(prefix_len).map_err(|_| ConvertError::OutOfRange(value.to_string()))?;
    Ok(new_fixed_prefix_transform(prefix_len))
}

pub fn apply_cf_options_in_place(target: &mut ColumnFamilyOptions, map: &RawConfigMap) -> Result<()> {
    super::apply_in_place(target, map, CF_STAGES, "Unrecognized option")
}

pub fn apply_cf_options(base: &ColumnFamilyOptions, map: &RawConfigMap) -> Result<ColumnFamilyOptions> {
    super::apply(base, map, CF_STAGES, "Unrecognized option")
}

pub fn cf_options_from_string(base: &ColumnFamilyOptions, opts_str: &str) -> Result<ColumnFamilyOptions> {
    let map = string_to_map(opts_str)?;
    apply_cf_options(base, &map)
}
