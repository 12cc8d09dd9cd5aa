use serde_json::{json, Map, Value};
use std::fmt::Write;

use crate::classifier::DataType;
use crate::config::ReportMode;
use crate::stats::{Statistics, StatsRecord};

/// Renders the plain-text statistics report, or `None` if no report was
/// requested. Types without data are left out.
pub fn render_text(statistics: &Statistics, mode: ReportMode) -> Option<String> {
    if mode == ReportMode::None {
        return None;
    }

    let mut out = String::from("\n=== Statistics ===\n");
    for (data_type, record) in statistics.iter().filter(|(_, record)| record.has_data()) {
        // Writing to a String cannot fail
        let _ = write_section(&mut out, data_type, record, mode);
    }
    Some(out)
}

fn write_section(
    out: &mut String,
    data_type: DataType,
    record: &StatsRecord,
    mode: ReportMode,
) -> std::fmt::Result {
    writeln!(out, "\n{}:", data_type.file_name().to_uppercase())?;
    writeln!(out, "  Count: {}", record.count())?;

    if mode != ReportMode::Full {
        return Ok(());
    }

    match data_type {
        DataType::Integer => {
            if let (Some(min), Some(max)) = (record.min_integer(), record.max_integer()) {
                writeln!(out, "  Min: {}", min)?;
                writeln!(out, "  Max: {}", max)?;
            }
            writeln!(out, "  Sum: {}", record.sum())?;
            writeln!(out, "  Average: {:.2}", record.average_integer())?;
        }
        DataType::Float => {
            if let (Some(min), Some(max)) = (record.min_double(), record.max_double()) {
                writeln!(out, "  Min: {:?}", min)?;
                writeln!(out, "  Max: {:?}", max)?;
            }
            writeln!(out, "  Sum: {:.10}", record.double_sum())?;
            writeln!(out, "  Average: {:.10}", record.average_float())?;
        }
        DataType::String => {
            if let (Some(min), Some(max)) = (record.min_string_length(), record.max_string_length()) {
                writeln!(out, "  Min Length: {}", min)?;
                writeln!(out, "  Max Length: {}", max)?;
            }
        }
    }
    Ok(())
}

/// Same content as [`render_text`], as a JSON object keyed by type name.
pub fn render_json(statistics: &Statistics, mode: ReportMode) -> Value {
    let mut report = Map::new();
    if mode == ReportMode::None {
        return Value::Object(report);
    }

    for (data_type, record) in statistics.iter().filter(|(_, record)| record.has_data()) {
        let mut entry = json!({ "count": record.count() });
        if mode == ReportMode::Full {
            let details = match data_type {
                DataType::Integer => json!({
                    "min": record.min_integer(),
                    "max": record.max_integer(),
                    "sum": record.sum(),
                    "average": record.average_integer(),
                }),
                DataType::Float => json!({
                    "min": record.min_double(),
                    "max": record.max_double(),
                    "sum": record.double_sum(),
                    "average": record.average_float(),
                }),
                DataType::String => json!({
                    "min_length": record.min_string_length(),
                    "max_length": record.max_string_length(),
                }),
            };
            if let (Value::Object(fields), Value::Object(details)) = (&mut entry, details) {
                fields.extend(details);
            }
        }
        report.insert(data_type.file_name().to_string(), entry);
    }
    Value::Object(report)
}
