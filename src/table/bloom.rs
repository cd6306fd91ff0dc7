use std::sync::Arc;

use bitvec::{bitvec, field::BitField, order::Lsb0, view::BitView};
use bytes::Bytes;
use xxhash_rust::xxh3::xxh3_64;

const MIN_FILTER_BITS: usize = 64;

/// Bloom filter policy built from `bloomfilter:<bits_per_key>:<use_block_based_builder>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilterPolicy {
    bits_per_key: i32,
    use_block_based_builder: bool,
    num_probes: u8,
}

pub fn new_bloom_filter_policy(bits_per_key: i32, use_block_based_builder: bool) -> Arc<BloomFilterPolicy> {
    Arc::new(BloomFilterPolicy::new(bits_per_key, use_block_based_builder))
}

impl BloomFilterPolicy {
    pub fn new(bits_per_key: i32, use_block_based_builder: bool) -> Self {
        // k = bits_per_key * ln(2), kept within [1, 30]
        let num_probes = (f64::from(bits_per_key) * std::f64::consts::LN_2)
            .round()
            .clamp(1.0, 30.0) as u8;
        Self {
            bits_per_key,
            use_block_based_builder,
            num_probes,
        }
    }

    pub fn name(&self) -> &'static str {
        "rocksdb.BuiltinBloomFilter"
    }

    pub fn bits_per_key(&self) -> i32 {
        self.bits_per_key
    }

    pub fn use_block_based_builder(&self) -> bool {
        self.use_block_based_builder
    }

    pub fn num_probes(&self) -> u8 {
        self.num_probes
    }

    /// Encodes a filter over `keys`: the bit array followed by one byte
    /// holding the probe count.
    pub fn create_filter(&self, keys: &[&[u8]]) -> Bytes {
        let bits_per_key = usize::try_from(self.bits_per_key).unwrap_or(0);
        let m = (keys.len() * bits_per_key).max(MIN_FILTER_BITS);
        // pad to byte length
        let m = 8 * m.div_ceil(8);

        let mut bit_vec = bitvec![0; m];
        for key in keys {
            for i in Self::get_indices_for_key(key, m, self.num_probes) {
                bit_vec.set(i, true);
            }
        }

        let mut encoded: Vec<u8> = bit_vec.chunks(8).map(|v| v.load::<u8>()).collect();
        encoded.push(self.num_probes);
        Bytes::from(encoded)
    }

    pub fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        let Some((&k, bits)) = filter.split_last() else {
            return true;
        };
        if bits.is_empty() {
            return true;
        }
        let bit_slice = bits.view_bits::<Lsb0>();
        Self::get_indices_for_key(key, bit_slice.len(), k)
            .into_iter()
            .all(|i| bit_slice[i])
    }

    fn get_indices_for_key(key: &[u8], m: usize, k: u8) -> Vec<usize> {
        let hash64 = xxh3_64(key);
        let (h1, h2) = ((hash64 >> 32) as u32, hash64 as u32);

        let mut indices: Vec<usize> = vec![];
        let mut km_hash = h1;
        for _ in 0..k {
            indices.push((km_hash % (m as u32)) as usize);
            // Kirsch-Mitzenmacher optimization: hash_i = hash1 + i * hash2
            km_hash = km_hash.wrapping_add(h2);
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::{new_bloom_filter_policy, BloomFilterPolicy};

    #[test]
    fn test_probe_count() {
        assert_eq!(BloomFilterPolicy::new(10, false).num_probes(), 7);
        assert_eq!(BloomFilterPolicy::new(0, false).num_probes(), 1);
        assert_eq!(BloomFilterPolicy::new(100, true).num_probes(), 30);
    }

    #[test]
    fn test_filter_membership() {
        let policy = new_bloom_filter_policy(10, false);
        let keys: Vec<&[u8]> = vec![&b"hello"[..], &b"world"[..]];
        let filter = policy.create_filter(&keys);
        assert_eq!(*filter.last().unwrap(), policy.num_probes());
        // 64 bits minimum plus the probe byte
        assert_eq!(filter.len(), 9);

        assert!(policy.key_may_match(b"hello", &filter));
        assert!(policy.key_may_match(b"world", &filter));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let policy = new_bloom_filter_policy(10, false);
        assert!(policy.key_may_match(b"anything", &[]));
    }

    #[test]
    fn test_equality() {
        assert_eq!(*new_bloom_filter_policy(10, true), BloomFilterPolicy::new(10, true));
        assert_ne!(*new_bloom_filter_policy(10, true), BloomFilterPolicy::new(10, false));
    }
}
