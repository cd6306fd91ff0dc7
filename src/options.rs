//! Typed option records and the key tables that populate them from a
//! [`RawConfigMap`](crate::tokenizer::RawConfigMap).
//!
//! Every record family owns an ordered list of stages. A key is looked up
//! in each stage in turn and the first match wins, so a name must appear in
//! at most one stage of a family. Keys no stage knows are rejected.

use tracing::{debug, warn};

use crate::{
    error::{ConvertError, OptionsError, Result},
    tokenizer::RawConfigMap,
};

pub type Setter<T> = fn(&mut T, &str) -> std::result::Result<(), ConvertError>;

/// One recognized key and the conversion that writes it into a record.
pub struct OptionEntry<T> {
    pub name: &'static str,
    pub apply: Setter<T>,
}

pub type Stage<T> = &'static [OptionEntry<T>];

// `entry!("key", |o, v| o.field = parse(v)?)`
macro_rules! entry {
    ($name:literal, |$o:ident, $v:ident| $body:expr) => {
        $crate::options::OptionEntry {
            name: $name,
            apply: |$o, $v| {
                $body;
                Ok(())
            },
        }
    };
}

macro_rules! not_supported {
    ($name:literal) => {
        $crate::options::OptionEntry {
            name: $name,
            apply: |_, _| Err($crate::error::ConvertError::NotSupported),
        }
    };
}

// Keys shared by column-family and mutable column-family records. Each
// expands against whatever record type the surrounding const names.
macro_rules! memtable_stage {
    () => {
        &[
            entry!("write_buffer_size", |o, v| o.write_buffer_size = parse_size_t(v)?),
            entry!("arena_block_size", |o, v| o.arena_block_size = parse_size_t(v)?),
            entry!("memtable_prefix_bloom_bits", |o, v| o.memtable_prefix_bloom_bits = parse_uint32(v)?),
            entry!("memtable_prefix_bloom_probes", |o, v| o.memtable_prefix_bloom_probes = parse_uint32(v)?),
            entry!("memtable_prefix_bloom_huge_page_tlb_size", |o, v| {
                o.memtable_prefix_bloom_huge_page_tlb_size = parse_size_t(v)?
            }),
            entry!("max_successive_merges", |o, v| o.max_successive_merges = parse_size_t(v)?),
            entry!("filter_deletes", |o, v| o.filter_deletes = parse_bool("filter_deletes", v)?),
            entry!("max_write_buffer_number", |o, v| o.max_write_buffer_number = parse_int32(v)?),
            entry!("inplace_update_num_locks", |o, v| o.inplace_update_num_locks = parse_size_t(v)?),
        ]
    };
}

macro_rules! compaction_stage {
    () => {
        &[
            entry!("disable_auto_compactions", |o, v| {
                o.disable_auto_compactions = parse_bool("disable_auto_compactions", v)?
            }),
            entry!("soft_rate_limit", |o, v| o.soft_rate_limit = parse_double(v)?),
            entry!("hard_rate_limit", |o, v| o.hard_rate_limit = parse_double(v)?),
            entry!("level0_file_num_compaction_trigger", |o, v| {
                o.level0_file_num_compaction_trigger = parse_int32(v)?
            }),
            entry!("level0_slowdown_writes_trigger", |o, v| o.level0_slowdown_writes_trigger = parse_int32(v)?),
            entry!("level0_stop_writes_trigger", |o, v| o.level0_stop_writes_trigger = parse_int32(v)?),
            entry!("max_grandparent_overlap_factor", |o, v| o.max_grandparent_overlap_factor = parse_int32(v)?),
            entry!("expanded_compaction_factor", |o, v| o.expanded_compaction_factor = parse_int32(v)?),
            entry!("source_compaction_factor", |o, v| o.source_compaction_factor = parse_int32(v)?),
            entry!("target_file_size_base", |o, v| o.target_file_size_base = parse_uint64(v)?),
            entry!("target_file_size_multiplier", |o, v| o.target_file_size_multiplier = parse_int32(v)?),
            entry!("max_bytes_for_level_base", |o, v| o.max_bytes_for_level_base = parse_uint64(v)?),
            entry!("max_bytes_for_level_multiplier", |o, v| o.max_bytes_for_level_multiplier = parse_int32(v)?),
            entry!("max_bytes_for_level_multiplier_additional", |o, v| {
                o.max_bytes_for_level_multiplier_additional = parse_list(v, parse_int32)?
            }),
            entry!("max_mem_compaction_level", |o, v| o.max_mem_compaction_level = parse_int32(v)?),
            entry!("verify_checksums_in_compaction", |o, v| {
                o.verify_checksums_in_compaction = parse_bool("verify_checksums_in_compaction", v)?
            }),
        ]
    };
}

macro_rules! misc_stage {
    () => {
        &[entry!("max_sequential_skip_in_iterations", |o, v| {
            o.max_sequential_skip_in_iterations = parse_uint64(v)?
        })]
    };
}

pub mod cf_options;
pub mod db_options;
pub mod mutable_cf_options;
pub mod table_options;

/// Applies `map` onto `target` one key at a time, in map iteration order.
///
/// Stops at the first key that is unknown or fails to convert. Keys applied
/// before that one stay applied; nothing is rolled back.
pub(crate) fn apply_in_place<T>(
    target: &mut T,
    map: &RawConfigMap,
    stages: &[Stage<T>],
    unmatched: &str,
) -> Result<()> {
    for (key, value) in map {
        let entry = stages
            .iter()
            .flat_map(|stage| stage.iter())
            .find(|entry| entry.name == key.as_str());
        let Some(entry) = entry else {
            warn!("{}: {}", unmatched, key);
            return Err(OptionsError::InvalidArgument(format!("{}: {}", unmatched, key)));
        };
        if let Err(e) = (entry.apply)(target, value) {
            let err = e.for_key(key);
            warn!("rejected option {}={}: {}", key, value, err);
            return Err(err);
        }
        debug!("applied option {}={}", key, value);
    }
    Ok(())
}

/// Copy-returning form of [`apply_in_place`]: `base` is never touched.
pub(crate) fn apply<T: Clone>(base: &T, map: &RawConfigMap, stages: &[Stage<T>], unmatched: &str) -> Result<T> {
    let mut new_options = base.clone();
    apply_in_place(&mut new_options, map, stages, unmatched)?;
    Ok(new_options)
}

#[cfg(test)]
mod tests {
    use crate::{convert::parse_int32, error::ErrorKind, tokenizer::RawConfigMap};

    use super::{apply, apply_in_place, Stage};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Pair {
        a: i32,
        b: i32,
    }

    const FIRST: Stage<Pair> = &[entry!("a", |o, v| o.a = parse_int32(v)?)];
    const SECOND: Stage<Pair> = &[
        // shadowed by FIRST
        entry!("a", |o, _v| o.a = -1),
        entry!("b", |o, v| o.b = parse_int32(v)?),
        not_supported!("c"),
    ];

    fn map(pairs: &[(&str, &str)]) -> RawConfigMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_stage_wins() {
        let out = apply(&Pair::default(), &map(&[("a", "3"), ("b", "4")]), &[FIRST, SECOND], "Unrecognized option").unwrap();
        assert_eq!(out, Pair { a: 3, b: 4 });
    }

    #[test]
    fn test_unmatched_key() {
        let err = apply(&Pair::default(), &map(&[("zzz", "1")]), &[FIRST, SECOND], "Unrecognized option").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "Unrecognized option: zzz");
    }

    #[test]
    fn test_not_supported_entry() {
        let err = apply(&Pair::default(), &map(&[("c", "1")]), &[FIRST, SECOND], "Unrecognized option").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }

    #[test]
    fn test_in_place_keeps_earlier_keys() {
        let mut target = Pair::default();
        // a single-key map makes the order deterministic
        apply_in_place(&mut target, &map(&[("a", "7")]), &[FIRST, SECOND], "Unrecognized option").unwrap();
        let err = apply_in_place(&mut target, &map(&[("b", "x")]), &[FIRST, SECOND], "Unrecognized option").unwrap_err();
        assert!(err.message().contains("error parsing b"));
        assert_eq!(target, Pair { a: 7, b: 0 });
    }

    #[test]
    fn test_copy_leaves_base_untouched() {
        let base = Pair { a: 1, b: 2 };
        assert!(apply(&base, &map(&[("a", "9"), ("b", "bad")]), &[FIRST, SECOND], "Unrecognized option").is_err());
        assert_eq!(base, Pair { a: 1, b: 2 });
    }
}
