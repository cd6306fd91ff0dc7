use std::collections::HashMap;

use tracing::trace;

use crate::error::{OptionsError, Result};

/// Key to raw value. Nested block values have their braces stripped.
pub type RawConfigMap = HashMap<String, String>;

// ASCII whitespace plus vertical tab
pub(crate) fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b'\x0b'
}

pub fn trim(s: &str) -> &str {
    // all-whitespace and empty inputs both come back as ""
    if s.is_empty() {
        return s;
    }
    s.trim_matches(|c: char| c.is_ascii() && is_space(c as u8))
}

/// Splits `key1=v1;key2={nested};...` into a map.
///
/// Nested blocks are returned verbatim (minus the outer braces) so the
/// applier that knows the key can tokenize them again.
pub fn string_to_map(opts_str: &str) -> Result<RawConfigMap> {
    let opts = trim(opts_str);
    let bytes = opts.as_bytes();
    let mut map = RawConfigMap::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let eq_pos = match opts[pos..].find('=') {
            Some(offset) => pos + offset,
            None => {
                return Err(OptionsError::InvalidArgument(
                    "Mismatched key value pair, '=' expected".to_string(),
                ))
            }
        };
        let key = trim(&opts[pos..eq_pos]);
        if key.is_empty() {
            return Err(OptionsError::InvalidArgument("Empty key found".to_string()));
        }

        // skip space after '=' and look for '{' for possible nested options
        pos = eq_pos + 1;
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            insert(&mut map, key, "");
            break;
        }

        if bytes[pos] == b'{' {
            let close = match matching_brace(bytes, pos) {
                Some(close) => close,
                None => {
                    return Err(OptionsError::InvalidArgument(
                        "Mismatched curly braces for nested options".to_string(),
                    ))
                }
            };
            insert(&mut map, key, trim(&opts[pos + 1..close]));

            pos = close + 1;
            while pos < bytes.len() && is_space(bytes[pos]) {
                pos += 1;
            }
            if pos < bytes.len() && bytes[pos] != b';' {
                return Err(OptionsError::InvalidArgument(
                    "Unexpected chars after nested options".to_string(),
                ));
            }
            // step over the ';' (or past the end)
            pos += 1;
        } else {
            match opts[pos..].find(';') {
                Some(offset) => {
                    insert(&mut map, key, trim(&opts[pos..pos + offset]));
                    pos += offset + 1;
                }
                None => {
                    insert(&mut map, key, trim(&opts[pos..]));
                    break;
                }
            }
        }
    }

    Ok(map)
}

// index of the '}' closing the '{' at `open`
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1;
    for (i, b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn insert(map: &mut RawConfigMap, key: &str, value: &str) {
    trace!("tokenized {}={}", key, value);
    map.insert(key.to_string(), value.to_string());
}
