use liquidity_core::assumptions::AnalysisAssumptions;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON file as a generic serde_json::Value.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

/// Read analysis assumptions; `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
/// Fields left out keep their defaults.
pub fn read_assumptions(path: &str) -> Result<AnalysisAssumptions, Box<dyn std::error::Error>> {
    let assumptions: AnalysisAssumptions = if is_yaml(Path::new(path)) {
        let (canonical, contents) = read_file(path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        read_json(path)?
    };
    tracing::debug!(path, forecast_years = assumptions.forecast_years, "loaded assumptions");
    Ok(assumptions)
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_file(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}

/// Resolve relative paths against the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }
    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extension_detection() {
        assert!(is_yaml(Path::new("assumptions.yaml")));
        assert!(is_yaml(Path::new("dir/assumptions.yml")));
        assert!(!is_yaml(Path::new("assumptions.json")));
        assert!(!is_yaml(Path::new("assumptions")));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_json_value("definitely-not-here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
