use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON document from stdin when one is piped in.
/// Returns None for an interactive terminal or empty input, so flag values apply.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse balance sheet from stdin: {}", e))?;
    tracing::debug!("read balance sheet from stdin");
    Ok(Some(value))
}
