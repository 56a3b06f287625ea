use serde_json::Value;
use std::io;

/// Format output as CSV. The first array of records inside the result (the
/// asset summaries, for the commands that produce them) becomes the rows;
/// otherwise the result's scalar fields become a single header + data row.
pub fn print_csv(value: &Value) {
    let result = super::result_of(value);

    let records = find_records(result);
    let mut writer = csv::Writer::from_writer(io::stdout());

    let outcome = match records {
        Some(items) => write_records(&mut writer, items),
        None => write_scalars(&mut writer, result),
    };

    if outcome.and_then(|_| writer.flush().map_err(Into::into)).is_err() {
        eprintln!("failed to write CSV output");
    }
}

fn find_records(result: &Value) -> Option<&Vec<Value>> {
    match result {
        Value::Array(items) if items.iter().all(|i| matches!(i, Value::Object(_))) => Some(items),
        Value::Object(map) => map.values().find_map(|v| match v {
            Value::Array(items)
                if !items.is_empty() && items.iter().all(|i| matches!(i, Value::Object(_))) =>
            {
                Some(items)
            }
            _ => None,
        }),
        _ => None,
    }
}

fn write_records(
    writer: &mut csv::Writer<io::Stdout>,
    items: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(Value::Object(first)) = items.first() else {
        return Ok(());
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    writer.write_record(&headers)?;
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(plain).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }
    }
    Ok(())
}

fn write_scalars(
    writer: &mut csv::Writer<io::Stdout>,
    result: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let Value::Object(map) = result else {
        return Ok(());
    };

    let scalars: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(_, v)| !matches!(v, Value::Object(_) | Value::Array(_)))
        .collect();

    writer.write_record(scalars.iter().map(|(k, _)| k.as_str()))?;
    writer.write_record(scalars.iter().map(|(_, v)| plain(v)))?;
    Ok(())
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
