//! Header source parsing.

use std::collections::HashMap;

use serde_json::Value;

/// Parse a header source into a mapping.
///
/// The input may be a JSON object (`{"A":"1"}`) or a comma-separated list of
/// `key=value` / `key:value` pairs. Non-string JSON values are kept as their
/// JSON text. Malformed pairs are skipped. Empty input yields an empty map.
pub fn parse_headers(input: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    if input.trim().is_empty() {
        return headers;
    }

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(input) {
        for (key, value) in obj {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            headers.insert(key, value);
        }
        return headers;
    }

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some(idx) = part.find(['=', ':']) else {
            continue;
        };
        let key = part[..idx].trim();
        let value = part[idx + 1..].trim();
        if !key.is_empty() && !value.is_empty() {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_json_values_coerced_to_strings() {
        let h = parse_headers(r#"{"A":"1","B":2}"#);
        assert_eq!(h, map(&[("A", "1"), ("B", "2")]));

        let h = parse_headers(r#"{"Flag":true}"#);
        assert_eq!(h["Flag"], "true");
    }

    #[test]
    fn test_delimited_pairs() {
        let h = parse_headers("X=1,Y:2,Z=three");
        assert_eq!(h, map(&[("X", "1"), ("Y", "2"), ("Z", "three")]));
    }

    #[test]
    fn test_malformed_segments_skipped() {
        let h = parse_headers("X=1,notvalid,Y=2");
        assert_eq!(h, map(&[("X", "1"), ("Y", "2")]));

        let h = parse_headers("=novalue, nokey= ,K = v ");
        assert_eq!(h, map(&[("K", "v")]));
    }

    #[test]
    fn test_first_separator_wins() {
        let h = parse_headers("Authorization: Basic a=b");
        assert_eq!(h["Authorization"], "Basic a=b");

        let h = parse_headers("X-Url=http://a");
        assert_eq!(h["X-Url"], "http://a");
    }

    #[test]
    fn test_non_object_json_falls_back_to_pairs() {
        assert!(parse_headers("[1,2]").is_empty());
        assert!(parse_headers("42").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_headers("").is_empty());
        assert!(parse_headers("   ").is_empty());
    }
}
