use std::{fmt, str::FromStr};

use crate::error::ConvertError;

/// A closed enumeration with one canonical symbolic name per member.
pub trait NamedEnum: Sized + Copy + 'static {
    /// What the enumeration is called in error messages.
    const KIND: &'static str;
    /// Every member paired with its name.
    const REGISTRY: &'static [(&'static str, Self)];

    fn name(&self) -> &'static str;

    fn from_name(literal: &str) -> Result<Self, ConvertError> {
        Self::REGISTRY
            .iter()
            .find(|(name, _)| *name == literal)
            .map(|(_, value)| *value)
            .ok_or_else(|| ConvertError::UnknownEnum {
                kind: Self::KIND,
                literal: literal.to_string(),
            })
    }
}

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $ty:ident, $kind:literal, default = $default:ident {
            $($variant:ident => $name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl NamedEnum for $ty {
            const KIND: &'static str = $kind;
            const REGISTRY: &'static [(&'static str, Self)] = &[$(($name, $ty::$variant)),+];

            fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                $ty::$default
            }
        }

        impl FromStr for $ty {
            type Err = ConvertError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum! {
    /// Block compression algorithm.
    CompressionType, "compression type", default = Snappy {
        None => "kNoCompression",
        Snappy => "kSnappyCompression",
        Zlib => "kZlibCompression",
        BZip2 => "kBZip2Compression",
        Lz4 => "kLZ4Compression",
        Lz4hc => "kLZ4HCCompression",
    }
}

named_enum! {
    /// Checksum stored with each table block.
    ChecksumType, "checksum type", default = Crc32c {
        None => "kNoChecksum",
        Crc32c => "kCRC32c",
        XxHash => "kxxHash",
    }
}

named_enum! {
    /// Index layout inside a block-based table.
    IndexType, "index type", default = BinarySearch {
        BinarySearch => "kBinarySearch",
        HashSearch => "kHashSearch",
    }
}

named_enum! {
    CompactionStyle, "compaction style", default = Level {
        Level => "kCompactionStyleLevel",
        Universal => "kCompactionStyleUniversal",
        Fifo => "kCompactionStyleFIFO",
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConvertError;

    use super::{ChecksumType, CompactionStyle, CompressionType, IndexType, NamedEnum};

    #[test]
    fn test_names_round_trip() {
        for (name, value) in CompressionType::REGISTRY {
            assert_eq!(CompressionType::from_name(name).unwrap(), *value);
            assert_eq!(value.name(), *name);
        }
        assert_eq!(ChecksumType::REGISTRY.len(), 3);
        assert_eq!(CompactionStyle::REGISTRY.len(), 3);
        assert_eq!(IndexType::REGISTRY.len(), 2);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!("kxxHash".parse::<ChecksumType>().unwrap(), ChecksumType::XxHash);
        assert_eq!("kHashSearch".parse::<IndexType>().unwrap(), IndexType::HashSearch);
        assert_eq!(
            "kCompactionStyleFIFO".parse::<CompactionStyle>().unwrap(),
            CompactionStyle::Fifo
        );
        assert_eq!(CompressionType::Lz4hc.to_string(), "kLZ4HCCompression");
    }

    #[test]
    fn test_unknown_literal() {
        let err = CompressionType::from_name("kFooCompression").unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnknownEnum {
                kind: "compression type",
                literal: "kFooCompression".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown compression type: kFooCompression");
        // names are case sensitive
        assert!(IndexType::from_name("kbinarysearch").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CompressionType::default(), CompressionType::Snappy);
        assert_eq!(ChecksumType::default(), ChecksumType::Crc32c);
        assert_eq!(IndexType::default(), IndexType::BinarySearch);
        assert_eq!(CompactionStyle::default(), CompactionStyle::Level);
    }
}
