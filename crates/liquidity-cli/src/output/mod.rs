pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted `field, value` rows.
///
/// Arrays of scalars are joined with ", ". Arrays of objects are indexed
/// (`forecast.moderate.years.0.current_ratio`).
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(&join_key(prefix, key), val, rows);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object() || v.is_array()) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&join_key(prefix, &i.to_string()), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), scalar(value))),
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Render a leaf value as plain text.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The `result` section of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_report_sections() {
        let value = json!({
            "ratios": { "current": "2", "quick": "1.5" },
            "recommendations": [{ "action": "Improve Current Ratio" }],
            "warnings": ["a", "b"]
        });
        assert_eq!(
            flatten(&value),
            vec![
                ("ratios.current".to_string(), "2".to_string()),
                ("ratios.quick".to_string(), "1.5".to_string()),
                (
                    "recommendations.0.action".to_string(),
                    "Improve Current Ratio".to_string()
                ),
                ("warnings".to_string(), "a, b".to_string()),
            ]
        );
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let value = json!({ "result": { "band": "Good" }, "warnings": [] });
        assert_eq!(result_of(&value), &json!({ "band": "Good" }));
        let bare = json!({ "band": "Fair" });
        assert_eq!(result_of(&bare), &bare);
    }
}
