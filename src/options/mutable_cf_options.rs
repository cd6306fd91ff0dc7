use crate::{
    convert::{parse_bool, parse_double, parse_int32, parse_list, parse_size_t, parse_uint32, parse_uint64},
    error::Result,
    tokenizer::{string_to_map, RawConfigMap},
};

use super::{cf_options::ColumnFamilyOptions, Stage};

/// The column-family settings that may change while the column family is
/// open.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableCfOptions {
    pub write_buffer_size: usize,
    pub arena_block_size: usize,
    pub memtable_prefix_bloom_bits: u32,
    pub memtable_prefix_bloom_probes: u32,
    pub memtable_prefix_bloom_huge_page_tlb_size: usize,
    pub max_successive_merges: usize,
    pub filter_deletes: bool,
    pub max_write_buffer_number: i32,
    pub inplace_update_num_locks: usize,

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
}

impl From<&ColumnFamilyOptions> for MutableCfOptions {
    fn from(options: &ColumnFamilyOptions) -> Self {
        Self {
            write_buffer_size: options.write_buffer_size,
            arena_block_size: options.arena_block_size,
            memtable_prefix_bloom_bits: options.memtable_prefix_bloom_bits,
            memtable_prefix_bloom_probes: options.memtable_prefix_bloom_probes,
            memtable_prefix_bloom_huge_page_tlb_size: options.memtable_prefix_bloom_huge_page_tlb_size,
            max_successive_merges: options.max_successive_merges,
            filter_deletes: options.filter_deletes,
            max_write_buffer_number: options.max_write_buffer_number,
            inplace_update_num_locks: options.inplace_update_num_locks,
            disable_auto_compactions: options.disable_auto_compactions,
            soft_rate_limit: options.soft_rate_limit,
            hard_rate_limit: options.hard_rate_limit,
            level0_file_num_compaction_trigger: options.level0_file_num_compaction_trigger,
            level0_slowdown_writes_trigger: options.level0_slowdown_writes_trigger,
            level0_stop_writes_trigger: options.level0_stop_writes_trigger,
            max_grandparent_overlap_factor: options.max_grandparent_overlap_factor,
            expanded_compaction_factor: options.expanded_compaction_factor,
            source_compaction_factor: options.source_compaction_factor,
            target_file_size_base: options.target_file_size_base,
            target_file_size_multiplier: options.target_file_size_multiplier,
            max_bytes_for_level_base: options.max_bytes_for_level_base,
            max_bytes_for_level_multiplier: options.max_bytes_for_level_multiplier,
            max_bytes_for_level_multiplier_additional: options.max_bytes_for_level_multiplier_additional.clone(),
            max_mem_compaction_level: options.max_mem_compaction_level,
            verify_checksums_in_compaction: options.verify_checksums_in_compaction,
            max_sequential_skip_in_iterations: options.max_sequential_skip_in_iterations,
        }
    }
}

impl Default for MutableCfOptions {
    fn default() -> Self {
        Self::from(&ColumnFamilyOptions::default())
    }
}

const MEMTABLE_STAGE: Stage<MutableCfOptions> = memtable_stage!();
const COMPACTION_STAGE: Stage<MutableCfOptions> = compaction_stage!();
const MISC_STAGE: Stage<MutableCfOptions> = misc_stage!();

const MUTABLE_STAGES: &[Stage<MutableCfOptions>] = &[MEMTABLE_STAGE, COMPACTION_STAGE, MISC_STAGE];

pub fn apply_mutable_cf_options_in_place(target: &mut MutableCfOptions, map: &RawConfigMap) -> Result<()> {
    super::apply_in_place(target, map, MUTABLE_STAGES, "unsupported dynamic option")
}

pub fn apply_mutable_cf_options(base: &MutableCfOptions, map: &RawConfigMap) -> Result<MutableCfOptions> {
    super::apply(base, map, MUTABLE_STAGES, "unsupported dynamic option")
}

pub fn mutable_cf_options_from_string(base: &MutableCfOptions, opts_str: &str) -> Result<MutableCfOptions> {
    let map = string_to_map(opts_str)?;
    apply_mutable_cf_options(base, &map)
}
