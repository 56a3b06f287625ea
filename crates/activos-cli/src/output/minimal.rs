use serde_json::Value;

/// Bare `key: value` lines for scripting; arrays shrink to their length.
pub fn print_minimal(value: &Value) {
    let result = super::result_of(value);

    match result {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) => continue,
                    Value::Array(items) => println!("{key}: {}", items.len()),
                    Value::String(s) => println!("{key}: {s}"),
                    other => println!("{key}: {other}"),
                }
            }
        }
        other => println!("{other}"),
    }
}
