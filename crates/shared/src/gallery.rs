//! Defensive gallery-field parsing.
//!
//! `batch_images` has accumulated three shapes in production data: a
//! JSON-encoded array string, a plain array, and free text that was never
//! JSON. Parsing recovers locally and never surfaces an error to the caller.

use serde_json::Value;

/// Parse a model's gallery field into a list of image URLs.
///
/// Absent or null → empty list. A string is parsed as JSON: an array yields
/// its string elements, anything else (including a parse failure) falls back
/// to a one-element list holding the raw string. A plain array yields its
/// string elements. Any other shape yields an empty list.
pub fn parse_gallery(raw: Option<&Value>) -> Vec<String> {
    match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => collect_strings(&items),
            _ => vec![s.clone()],
        },
        Some(Value::Array(items)) => collect_strings(items),
        Some(_) => Vec::new(),
    }
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_is_empty() {
        assert!(parse_gallery(None).is_empty());
    }

    #[test]
    fn test_null_is_empty() {
        assert!(parse_gallery(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_json_array_string_parses() {
        let raw = json!(r#"["a.jpg","b.jpg"]"#);
        assert_eq!(parse_gallery(Some(&raw)), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_non_json_string_falls_back_to_single_element() {
        let raw = json!("not-json");
        assert_eq!(parse_gallery(Some(&raw)), vec!["not-json"]);
    }

    #[test]
    fn test_json_scalar_string_falls_back_to_single_element() {
        // "42" parses as JSON but is not an array; the raw string is kept.
        let raw = json!("42");
        assert_eq!(parse_gallery(Some(&raw)), vec!["42"]);
    }

    #[test]
    fn test_plain_array_passes_through() {
        let raw = json!(["x.webp", "y.webp"]);
        assert_eq!(parse_gallery(Some(&raw)), vec!["x.webp", "y.webp"]);
    }

    #[test]
    fn test_array_drops_non_string_elements() {
        let raw = json!(["a.jpg", 3, null, "b.jpg"]);
        assert_eq!(parse_gallery(Some(&raw)), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        assert!(parse_gallery(Some(&json!({"oops": true}))).is_empty());
        assert!(parse_gallery(Some(&json!(7))).is_empty());
    }

    #[test]
    fn test_empty_json_array_string() {
        assert!(parse_gallery(Some(&json!("[]"))).is_empty());
    }
}
