// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute extraction from raw STEP argument text

/// Split an argument list at top-level commas.
///
/// Nested parentheses and quoted strings are kept intact, so
/// `'a,b',(1,2),#3` yields three attributes.
pub fn split_attrs(args: &str) -> Vec<&str> {
    let bytes = args.as_bytes();
    let mut attrs = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\'' {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                    i += 1;
                } else {
                    in_string = false;
                }
            }
        } else {
            match b {
                b'\'' => in_string = true,
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    attrs.push(args[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }
        i += 1;
    }
    if start <= args.len() && !args.is_empty() {
        attrs.push(args[start..].trim());
    }
    attrs
}

/// Decode attribute `idx` as a string, unescaping doubled quotes.
/// `$` (unset) and non-string values yield `None`.
pub fn attr_string(attrs: &[&str], idx: usize) -> Option<String> {
    let raw = attrs.get(idx)?;
    let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.replace("''", "'"))
}

/// Decode attribute `idx` as a single `#ref`.
pub fn attr_ref(attrs: &[&str], idx: usize) -> Option<u64> {
    let raw = attrs.get(idx)?;
    raw.strip_prefix('#')?.parse().ok()
}

/// All `#ref` ids appearing anywhere in the text, in order, skipping
/// references inside quoted strings.
pub fn all_refs(text: &str) -> Vec<u64> {
    let bytes = text.as_bytes();
    let mut refs = Vec::new();
    let mut in_string = false;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\'' && !(i + 1 < bytes.len() && bytes[i + 1] == b'\'') {
                in_string = false;
            } else if b == b'\'' {
                i += 1;
            }
        } else if b == b'\'' {
            in_string = true;
        } else if b == b'#' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(id) = text[start..end].parse() {
                    refs.push(id);
                }
            }
            i = end;
            continue;
        }
        i += 1;
    }
    refs
}

/// All real numbers in the text, in order. Handles scientific notation as
/// written by IFC exporters (`1.5E-2`).
pub fn all_floats(text: &str) -> Vec<f32> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() || ((b == b'-' || b == b'+') && is_digit_at(bytes, i + 1)) {
            let start = i;
            i += 1;
            while i < bytes.len() && is_number_byte(bytes, i) {
                i += 1;
            }
            // Trailing '.' as in '0.' parses fine with lexical
            if let Ok(v) = lexical_core::parse::<f32>(&bytes[start..i]) {
                values.push(v);
            }
        } else {
            i += 1;
        }
    }
    values
}

/// All unsigned integers in the text, in order.
pub fn all_uints(text: &str) -> Vec<u32> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if let Ok(v) = lexical_core::parse::<u32>(&bytes[start..i]) {
                values.push(v);
            }
        } else {
            i += 1;
        }
    }
    values
}

fn is_digit_at(bytes: &[u8], i: usize) -> bool {
    i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.')
}

fn is_number_byte(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'0'..=b'9' | b'.' => true,
        b'E' | b'e' => true,
        // Sign only valid right after an exponent marker
        b'-' | b'+' => i > 0 && matches!(bytes[i - 1], b'E' | b'e'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top_level_only() {
        let attrs = split_attrs("'a,b',(1,(2,3)),#4,$,.T.");
        assert_eq!(attrs, vec!["'a,b'", "(1,(2,3))", "#4", "$", ".T."]);
    }

    #[test]
    fn test_attr_string_unescapes() {
        let attrs = split_attrs("'guid',#2,'O''Brien Deck',$");
        assert_eq!(attr_string(&attrs, 2), Some("O'Brien Deck".to_string()));
        assert_eq!(attr_string(&attrs, 3), None);
        assert_eq!(attr_string(&attrs, 1), None);
    }

    #[test]
    fn test_attr_ref() {
        let attrs = split_attrs("#3,$,.T.,((1,2,3))");
        assert_eq!(attr_ref(&attrs, 0), Some(3));
        assert_eq!(attr_ref(&attrs, 1), None);
    }

    #[test]
    fn test_all_refs_skip_strings() {
        assert_eq!(all_refs("'see #99',#1,(#2,#3)"), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_floats() {
        assert_eq!(
            all_floats("((0.,-1.5,2.5E-1),(3,4.,5.))"),
            vec![0.0, -1.5, 0.25, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_all_uints() {
        assert_eq!(all_uints("((1,2,3),(4,5,6))"), vec![1, 2, 3, 4, 5, 6]);
    }
}
