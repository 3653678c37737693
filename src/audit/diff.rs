//! Field-level diffs between two record states

use serde_json::Value;

/// Fields that change on every write and say nothing about the edit
const IGNORED_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_CHARS: usize = 50;

/// Summarize top-level field changes between two JSON values
///
/// Returns `None` when nothing but ignored fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_STRING_CHARS {
                let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"category": "Food", "amount": 1000});
        let after = json!({"category": "Food", "amount": 1500});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 1000 -> 1500");
    }

    #[test]
    fn test_string_change() {
        let before = json!({"category": "Food"});
        let after = json!({"category": "Dining"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("category: \"Food\" -> \"Dining\""));
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"name": "Rent", "end_date": "2025-12-01"});
        let after = json!({"name": "Rent", "category": "Housing"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("end_date: \"2025-12-01\" -> (removed)"));
        assert!(diff.contains("category: (added) -> \"Housing\""));
    }

    #[test]
    fn test_timestamp_only_change_is_no_diff() {
        let before = json!({"amount": 100, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"amount": 100, "updated_at": "2025-01-02T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_participants_summarized() {
        let before = json!({"participants": [{"name": "A"}, {"name": "B"}]});
        let after = json!({"participants": [{"name": "A"}, {"name": "B"}, {"name": "C"}]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "participants: [2 items] -> [3 items]");
    }

    #[test]
    fn test_long_multibyte_string_truncated() {
        let long = "₹".repeat(80);
        let before = json!({"description": long});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!("x")), "\"x\"");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
