use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
///
/// Array fields inside the result (asset summaries, sheet names) get their
/// own table; scalar fields render as a field/value listing; warnings and
/// methodology follow, as in the JSON envelope.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{value}");
        return;
    };

    match envelope.get("result") {
        Some(result) => print_result(result),
        None => print_scalars(value),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(s) = warning {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn print_result(result: &Value) {
    match result {
        Value::Object(map) => {
            print_scalars(result);
            for (key, val) in map {
                if let Value::Array(items) = val {
                    if items.iter().all(|i| matches!(i, Value::Object(_))) && !items.is_empty() {
                        println!("\n{key}:");
                        print_records(items);
                    }
                }
            }
        }
        Value::Array(items) => print_records(items),
        other => println!("{other}"),
    }
}

fn print_scalars(value: &Value) {
    let Value::Object(map) = value else {
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut any = false;
    for (key, val) in map {
        match val {
            Value::Object(_) => continue,
            Value::Array(items) => {
                if items.iter().all(|i| !matches!(i, Value::Object(_))) {
                    let joined: Vec<String> = items.iter().map(format_value).collect();
                    builder.push_record([key.as_str(), joined.join(", ").as_str()]);
                    any = true;
                }
            }
            _ => {
                builder.push_record([key.as_str(), format_value(val).as_str()]);
                any = true;
            }
        }
    }
    if any {
        println!("{}", Table::from(builder));
    }
}

fn print_records(items: &[Value]) {
    if items.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
