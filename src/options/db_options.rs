use std::path::PathBuf;

use crate::{
    convert::{parse_bool, parse_int32, parse_size_t, parse_uint32, parse_uint64},
    error::Result,
    tokenizer::{string_to_map, RawConfigMap},
};

use super::Stage;

/// A directory plus the total size of data it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    pub path: PathBuf,
    pub target_size: u64,
}

/// Engine-wide options.
#[derive(Debug, Clone, PartialEq)]
pub struct DbOptions {
    pub create_if_missing: bool,
    pub create_missing_column_families: bool,
    pub error_if_exists: bool,
    pub paranoid_checks: bool,
    /// -1 keeps every file open.
    pub max_open_files: i32,
    pub max_total_wal_size: u64,
    pub disable_data_sync: bool,
    pub use_fsync: bool,
    pub db_paths: Vec<DbPath>,
    pub db_log_dir: String,
    pub wal_dir: String,
    pub delete_obsolete_files_period_micros: u64,
    pub max_background_compactions: i32,
    pub max_background_flushes: i32,
    pub max_log_file_size: usize,
    pub log_file_time_to_roll: usize,
    pub keep_log_file_num: usize,
    pub max_manifest_file_size: u64,
    pub table_cache_numshardbits: i32,
    pub table_cache_remove_scan_count_limit: i32,
    pub wal_ttl_seconds: u64,
    pub wal_size_limit_mb: u64,
    pub manifest_preallocation_size: usize,
    pub allow_os_buffer: bool,
    pub allow_mmap_reads: bool,
    pub allow_mmap_writes: bool,
    pub is_fd_close_on_exec: bool,
    pub skip_log_error_on_recovery: bool,
    pub stats_dump_period_sec: u32,
    pub advise_random_on_open: bool,
    pub db_write_buffer_size: u64,
    pub use_adaptive_mutex: bool,
    pub bytes_per_sync: u64,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            create_if_missing: false,
            create_missing_column_families: false,
            error_if_exists: false,
            paranoid_checks: true,
            max_open_files: 5000,
            max_total_wal_size: 0,
            disable_data_sync: false,
            use_fsync: false,
            db_paths: Vec::new(),
            db_log_dir: String::new(),
            wal_dir: String::new(),
            // 6 hours
            delete_obsolete_files_period_micros: 6 * 60 * 60 * 1_000_000,
            max_background_compactions: 1,
            max_background_flushes: 1,
            max_log_file_size: 0,
            log_file_time_to_roll: 0,
            keep_log_file_num: 1000,
            max_manifest_file_size: u64::MAX,
            table_cache_numshardbits: 4,
            table_cache_remove_scan_count_limit: 16,
            wal_ttl_seconds: 0,
            wal_size_limit_mb: 0,
            manifest_preallocation_size: 4 * 1024 * 1024,
            allow_os_buffer: true,
            allow_mmap_reads: false,
            allow_mmap_writes: false,
            is_fd_close_on_exec: true,
            skip_log_error_on_recovery: false,
            stats_dump_period_sec: 3600,
            advise_random_on_open: true,
            db_write_buffer_size: 0,
            use_adaptive_mutex: false,
            bytes_per_sync: 0,
        }
    }
}

const DB_STAGE: Stage<DbOptions> = &[
    entry!("create_if_missing", |o, v| o.create_if_missing = parse_bool("create_if_missing", v)?),
    entry!("create_missing_column_families", |o, v| {
        o.create_missing_column_families = parse_bool("create_missing_column_families", v)?
    }),
    entry!("error_if_exists", |o, v| o.error_if_exists = parse_bool("error_if_exists", v)?),
    entry!("paranoid_checks", |o, v| o.paranoid_checks = parse_bool("paranoid_checks", v)?),
    entry!("max_open_files", |o, v| o.max_open_files = parse_int32(v)?),
    entry!("max_total_wal_size", |o, v| o.max_total_wal_size = parse_uint64(v)?),
    entry!("disable_data_sync", |o, v| o.disable_data_sync = parse_bool("disable_data_sync", v)?),
    entry!("use_fsync", |o, v| o.use_fsync = parse_bool("use_fsync", v)?),
    not_supported!("db_paths"),
    entry!("db_log_dir", |o, v| o.db_log_dir = v.to_string()),
    entry!("wal_dir", |o, v| o.wal_dir = v.to_string()),
    entry!("delete_obsolete_files_period_micros", |o, v| {
        o.delete_obsolete_files_period_micros = parse_uint64(v)?
    }),
    entry!("max_background_compactions", |o, v| o.max_background_compactions = parse_int32(v)?),
    entry!("max_background_flushes", |o, v| o.max_background_flushes = parse_int32(v)?),
    entry!("max_log_file_size", |o, v| o.max_log_file_size = parse_size_t(v)?),
    entry!("log_file_time_to_roll", |o, v| o.log_file_time_to_roll = parse_size_t(v)?),
    entry!("keep_log_file_num", |o, v| o.keep_log_file_num = parse_size_t(v)?),
    entry!("max_manifest_file_size", |o, v| o.max_manifest_file_size = parse_uint64(v)?),
    entry!("table_cache_numshardbits", |o, v| o.table_cache_numshardbits = parse_int32(v)?),
    entry!("table_cache_remove_scan_count_limit", |o, v| {
        o.table_cache_remove_scan_count_limit = parse_int32(v)?
    }),
    entry!("WAL_ttl_seconds", |o, v| o.wal_ttl_seconds = parse_uint64(v)?),
    entry!("WAL_size_limit_MB", |o, v| o.wal_size_limit_mb = parse_uint64(v)?),
    entry!("manifest_preallocation_size", |o, v| o.manifest_preallocation_size = parse_size_t(v)?),
    entry!("allow_os_buffer", |o, v| o.allow_os_buffer = parse_bool("allow_os_buffer", v)?),
    entry!("allow_mmap_reads", |o, v| o.allow_mmap_reads = parse_bool("allow_mmap_reads", v)?),
    entry!("allow_mmap_writes", |o, v| o.allow_mmap_writes = parse_bool("allow_mmap_writes", v)?),
    entry!("is_fd_close_on_exec", |o, v| o.is_fd_close_on_exec = parse_bool("is_fd_close_on_exec", v)?),
    entry!("skip_log_error_on_recovery", |o, v| {
        o.skip_log_error_on_recovery = parse_bool("skip_log_error_on_recovery", v)?
    }),
    entry!("stats_dump_period_sec", |o, v| o.stats_dump_period_sec = parse_uint32(v)?),
    entry!("advise_random_on_open", |o, v| o.advise_random_on_open = parse_bool("advise_random_on_open", v)?),
    entry!("db_write_buffer_size", |o, v| o.db_write_buffer_size = parse_uint64(v)?),
    entry!("use_adaptive_mutex", |o, v| o.use_adaptive_mutex = parse_bool("use_adaptive_mutex", v)?),
    entry!("bytes_per_sync", |o, v| o.bytes_per_sync = parse_uint64(v)?),
];

pub fn apply_db_options_in_place(target: &mut DbOptions, map: &RawConfigMap) -> Result<()> {
    super::apply_in_place(target, map, &[DB_STAGE], "Unrecognized option")
}

pub fn apply_db_options(base: &DbOptions, map: &RawConfigMap) -> Result<DbOptions> {
    super::apply(base, map, &[DB_STAGE], "Unrecognized option")
}

pub fn db_options_from_string(base: &DbOptions, opts_str: &str) -> Result<DbOptions> {
    let map = string_to_map(opts_str)?;
    apply_db_options(base, &map)
}

#[cfg(test)]
mod tests {
    use crate::tokenizer::RawConfigMap;

    use super::{apply_db_options, db_options_from_string, DbOptions};

    #[test]
    fn test_from_string() {
        let base = DbOptions::default();
        let opts = db_options_from_string(
            &base,
            "create_if_missing=true;create_missing_column_families=1;error_if_exists=0;\
             paranoid_checks=false;max_open_files=32;max_total_wal_size=33;\
             disable_data_sync=1;use_fsync=true;db_log_dir=/db_log_dir;wal_dir=/wal_dir;\
             delete_obsolete_files_period_micros=34;max_background_compactions=35;\
             max_background_flushes=36;max_log_file_size=37;log_file_time_to_roll=38;\
             keep_log_file_num=39;max_manifest_file_size=40;table_cache_numshardbits=41;\
             table_cache_remove_scan_count_limit=42;WAL_ttl_seconds=43;WAL_size_limit_MB=44;\
             manifest_preallocation_size=45;allow_os_buffer=false;allow_mmap_reads=true;\
             allow_mmap_writes=false;is_fd_close_on_exec=true;skip_log_error_on_recovery=false;\
             stats_dump_period_sec=46;advise_random_on_open=true;db_write_buffer_size=2k;\
             use_adaptive_mutex=false;bytes_per_sync=47",
        )
        .unwrap();
        assert!(opts.create_if_missing);
        assert!(opts.create_missing_column_families);
        assert!(!opts.error_if_exists);
        assert!(!opts.paranoid_checks);
        assert_eq!(opts.max_open_files, 32);
        assert_eq!(opts.max_total_wal_size, 33);
        assert!(opts.disable_data_sync);
        assert!(opts.use_fsync);
        assert_eq!(opts.db_log_dir, "/db_log_dir");
        assert_eq!(opts.wal_dir, "/wal_dir");
        assert_eq!(opts.delete_obsolete_files_period_micros, 34);
        assert_eq!(opts.max_background_compactions, 35);
        assert_eq!(opts.max_background_flushes, 36);
        assert_eq!(opts.max_log_file_size, 37);
        assert_eq!(opts.log_file_time_to_roll, 38);
        assert_eq!(opts.keep_log_file_num, 39);
        assert_eq!(opts.max_manifest_file_size, 40);
        assert_eq!(opts.table_cache_numshardbits, 41);
        assert_eq!(opts.table_cache_remove_scan_count_limit, 42);
        assert_eq!(opts.wal_ttl_seconds, 43);
        assert_eq!(opts.wal_size_limit_mb, 44);
        assert_eq!(opts.manifest_preallocation_size, 45);
        assert!(!opts.allow_os_buffer);
        assert!(opts.allow_mmap_reads);
        assert!(!opts.allow_mmap_writes);
        assert!(opts.is_fd_close_on_exec);
        assert!(!opts.skip_log_error_on_recovery);
        assert_eq!(opts.stats_dump_period_sec, 46);
        assert!(opts.advise_random_on_open);
        assert_eq!(opts.db_write_buffer_size, 2048);
        assert!(!opts.use_adaptive_mutex);
        assert_eq!(opts.bytes_per_sync, 47);
    }

    #[test]
    fn test_empty_map_is_identity() {
        let mut base = DbOptions::default();
        base.wal_dir = "/tmp/wal".to_string();
        base.max_open_files = -1;
        assert_eq!(apply_db_options(&base, &RawConfigMap::new()).unwrap(), base);
    }

    #[test]
    fn test_unrecognized_key() {
        let mut map = RawConfigMap::new();
        map.insert("totally_bogus_option".to_string(), "1".to_string());
        let err = apply_db_options(&DbOptions::default(), &map).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.message().contains("totally_bogus_option"));
    }

    #[test]
    fn test_column_family_keys_rejected() {
        let err = db_options_from_string(&DbOptions::default(), "write_buffer_size=1").unwrap_err();
        assert_eq!(err.message(), "Unrecognized option: write_buffer_size");
    }

    #[test]
    fn test_db_paths_not_supported() {
        let err = db_options_from_string(&DbOptions::default(), "db_paths=/a").unwrap_err();
        assert!(err.is_not_supported());
        assert!(err.message().contains("db_paths"));
    }

    #[test]
    fn test_stats_dump_period_range() {
        let err = db_options_from_string(&DbOptions::default(), "stats_dump_period_sec=8g").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.message().contains("stats_dump_period_sec"));
    }
}
