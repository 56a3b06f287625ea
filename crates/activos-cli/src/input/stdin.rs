use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read JSON parameters piped on stdin, deserialised into the command's
/// typed parameter struct. Returns None when stdin is a TTY or empty, so a
/// flags-only invocation keeps working interactively.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let params: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse piped JSON parameters: {e}"))?;
    Ok(Some(params))
}
