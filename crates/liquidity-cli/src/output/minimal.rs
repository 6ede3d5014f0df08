use serde_json::Value;

use super::{result_of, scalar};

/// Headline fields, most informative first. Nested paths use dots.
const PRIORITY_PATHS: &[&str] = &[
    "summary.health_score",
    "health_score",
    "overall.status",
    "band",
    "value",
    "outlook.status",
    "liquidity_status.status",
    "moderate.years",
];

/// Print just the headline answer from the output.
///
/// Looks for well-known result paths in order, then falls back to the first
/// field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    for path in PRIORITY_PATHS {
        if let Some(val) = lookup(result_obj, path) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

fn format_minimal(value: &Value) -> String {
    match value {
        // Forecast: show the final year's moderate current ratio.
        Value::Array(years) => years
            .last()
            .and_then(|y| y.get("current_ratio"))
            .map(scalar)
            .unwrap_or_default(),
        Value::Null => "null".to_string(),
        other => scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_path() {
        let value = json!({ "summary": { "health_score": 100 } });
        assert_eq!(lookup(&value, "summary.health_score"), Some(&json!(100)));
        assert_eq!(lookup(&value, "summary.missing"), None);
    }

    #[test]
    fn test_forecast_shows_last_year_ratio() {
        let years = json!([{ "current_ratio": "2" }, { "current_ratio": "2.1" }]);
        assert_eq!(format_minimal(&years), "2.1");
    }
}
