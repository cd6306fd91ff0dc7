use crate::error::ConvertError;
use crate::tokenizer::{is_space, trim};

pub fn parse_bool(field: &str, value: &str) -> Result<bool, ConvertError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConvertError::InvalidBool {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parses a leading decimal literal with an optional k/m/g/t suffix
/// (powers of 1024). Anything after the first suffix character is ignored
/// and the shift is allowed to overflow.
pub fn parse_uint64(value: &str) -> Result<u64, ConvertError> {
    let (digits, rest) = split_literal(value, false);
    if digits.is_empty() {
        return Err(ConvertError::InvalidNumber(value.to_string()));
    }
    let mut num: u64 = digits
        .parse()
        .map_err(|_| ConvertError::OutOfRange(value.to_string()))?;

    match rest.chars().next() {
        Some('k' | 'K') => num <<= 10,
        Some('m' | 'M') => num <<= 20,
        Some('g' | 'G') => num <<= 30,
        Some('t' | 'T') => num <<= 40,
        _ => {}
    }
    Ok(num)
}

/// Signed 32-bit variant of [`parse_uint64`]. Accepts k/m/g but not t.
pub fn parse_int32(value: &str) -> Result<i32, ConvertError> {
    let (digits, rest) = split_literal(value, true);
    if digits.is_empty() {
        return Err(ConvertError::InvalidNumber(value.to_string()));
    }
    let mut num: i32 = match digits.parse::<i64>() {
        Ok(n) => i32::try_from(n).map_err(|_| ConvertError::OutOfRange(value.to_string()))?,
        Err(_) => return Err(ConvertError::OutOfRange(value.to_string())),
    };

    match rest.chars().next() {
        Some('k' | 'K') => num <<= 10,
        Some('m' | 'M') => num <<= 20,
        Some('g' | 'G') => num <<= 30,
        _ => {}
    }
    Ok(num)
}

pub fn parse_uint32(value: &str) -> Result<u32, ConvertError> {
    let num = parse_uint64(value)?;
    u32::try_from(num).map_err(|_| ConvertError::OutOfRange(value.to_string()))
}

pub fn parse_size_t(value: &str) -> Result<usize, ConvertError> {
    Ok(parse_uint64(value)? as usize)
}

pub fn parse_double(value: &str) -> Result<f64, ConvertError> {
    trim(value)
        .parse()
        .map_err(|_| ConvertError::InvalidNumber(value.to_string()))
}

/// Converts each `:`-separated token of `value` in order.
pub fn parse_list<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, ConvertError>,
) -> Result<Vec<T>, ConvertError> {
    value.split(':').map(parse).collect()
}

// (sign + digits, remainder) after skipping leading whitespace
fn split_literal(value: &str, signed: bool) -> (&str, &str) {
    let s = value.trim_start_matches(|c: char| c.is_ascii() && is_space(c as u8));
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || (signed && bytes[end] == b'-')) {
        end += 1;
    }
    let sign_len = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == sign_len {
        return ("", s);
    }
    (&s[..end], &s[end..])
}

#[cfg(test)]
mod tests {
    use crate::error::ConvertError;

    use super::{parse_bool, parse_double, parse_int32, parse_list, parse_size_t, parse_uint32, parse_uint64};

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("f", "true").unwrap());
        assert!(parse_bool("f", "1").unwrap());
        assert!(!parse_bool("f", "false").unwrap());
        assert!(!parse_bool("f", "0").unwrap());
        let err = parse_bool("filter_deletes", "yes").unwrap_err();
        assert!(err.to_string().contains("filter_deletes"));
    }

    #[test]
    fn test_parse_uint64_suffixes() {
        assert_eq!(parse_uint64("4k").unwrap(), 4096);
        assert_eq!(parse_uint64("4K").unwrap(), 4096);
        assert_eq!(parse_uint64("2M").unwrap(), 2u64 << 20);
        assert_eq!(parse_uint64("3g").unwrap(), 3u64 << 30);
        assert_eq!(parse_uint64("1T").unwrap(), 1u64 << 40);
        assert_eq!(parse_uint64("100").unwrap(), 100);
    }

    #[test]
    fn test_parse_uint64_trailing_garbage_ignored() {
        assert_eq!(parse_uint64("4kxyz").unwrap(), 4096);
        assert_eq!(parse_uint64("12abc").unwrap(), 12);
    }

    #[test]
    fn test_parse_uint64_shift_not_clamped() {
        // bits shifted past 64 are dropped
        assert_eq!(parse_uint64("16777216T").unwrap(), 0);
        assert_eq!(parse_uint64("16777217T").unwrap(), 1u64 << 40);
    }

    #[test]
    fn test_parse_uint64_errors() {
        assert_eq!(
            parse_uint64("abc").unwrap_err(),
            ConvertError::InvalidNumber("abc".to_string())
        );
        assert!(parse_uint64("").is_err());
        // no wrap-around for negative literals
        assert_eq!(
            parse_uint64("-1").unwrap_err(),
            ConvertError::InvalidNumber("-1".to_string())
        );
        assert_eq!(parse_uint64("\x0b7").unwrap(), 7);
        assert!(matches!(
            parse_uint64("99999999999999999999").unwrap_err(),
            ConvertError::OutOfRange(_)
        ));
    }

    #[test]
    fn test_parse_int32() {
        assert_eq!(parse_int32("1g").unwrap(), 1 << 30);
        assert_eq!(parse_int32("-3").unwrap(), -3);
        assert_eq!(parse_int32("2k").unwrap(), 2048);
        // no terabyte suffix for 32-bit values
        assert_eq!(parse_int32("5t").unwrap(), 5);
        assert!(parse_int32("-").is_err());
        assert!(matches!(
            parse_int32("3000000000").unwrap_err(),
            ConvertError::OutOfRange(_)
        ));
    }

    #[test]
    fn test_parse_uint32_range() {
        assert_eq!(parse_uint32("4294967295").unwrap(), u32::MAX);
        assert!(matches!(
            parse_uint32("4294967296").unwrap_err(),
            ConvertError::OutOfRange(_)
        ));
        assert!(parse_uint32("4g").is_err());
    }

    #[test]
    fn test_parse_size_t_and_double() {
        assert_eq!(parse_size_t("8m").unwrap(), 8usize << 20);
        assert_eq!(parse_double("0.5").unwrap(), 0.5);
        assert_eq!(parse_double("2").unwrap(), 2.0);
        assert!(parse_double("2x").is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("1:2:3", parse_int32).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_list("7", parse_int32).unwrap(), vec![7]);
        assert!(parse_list("1::3", parse_int32).is_err());
    }
}
