use std::sync::Arc;

use bytes::Bytes;

/// Prefix extractor keeping the first `prefix_len` bytes of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPrefixTransform {
    prefix_len: usize,
}

pub fn new_fixed_prefix_transform(prefix_len: usize) -> Arc<FixedPrefixTransform> {
    Arc::new(FixedPrefixTransform { prefix_len })
}

impl FixedPrefixTransform {
    pub fn name(&self) -> String {
        format!("rocksdb.FixedPrefix.{}", self.prefix_len)
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    pub fn in_domain(&self, key: &[u8]) -> bool {
        key.len() >= self.prefix_len
    }

    /// Callers must check [`in_domain`](Self::in_domain) first.
    pub fn transform(&self, key: &Bytes) -> Bytes {
        key.slice(..self.prefix_len.min(key.len()))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::new_fixed_prefix_transform;

    #[test]
    fn test_transform() {
        let transform = new_fixed_prefix_transform(3);
        assert_eq!(transform.name(), "rocksdb.FixedPrefix.3");
        let key = Bytes::from("user:42");
        assert!(transform.in_domain(&key));
        assert_eq!(transform.transform(&key), Bytes::from("use"));
        assert!(!transform.in_domain(b"ab"));
    }
}
