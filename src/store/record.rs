//! Order record codec.
//!
//! One order per line, six comma-separated fields in fixed order:
//! `customer_name, dish_name, prep_time, category, priority, timestamp`.
//! Fields may be double-quoted (`""` escapes a quote). Unquoted fields are
//! trimmed; quoted content is kept verbatim. A row whose first field is
//! literally `customer_name` is a header and is skipped.

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{time, Order};
use crate::validation::validate_order;

/// Column names, in record order.
pub const HEADER: [&str; 6] = [
    "customer_name",
    "dish_name",
    "prep_time",
    "category",
    "priority",
    "timestamp",
];

/// Parses one line of the order file.
///
/// Returns `Ok(None)` for blank lines and the header row. Trailing fields
/// beyond the sixth are ignored.
///
/// # Errors
/// [`SchedulerError::MalformedRecord`] if a field is missing, a number or
/// timestamp does not parse, or the order violates its invariants.
pub fn parse_record(line_no: usize, line: &str) -> SchedulerResult<Option<Order>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields = split_fields(line).map_err(|reason| SchedulerError::malformed(line_no, reason))?;
    if fields.first().map(String::as_str) == Some(HEADER[0]) {
        return Ok(None);
    }
    if fields.len() < HEADER.len() {
        return Err(SchedulerError::malformed(
            line_no,
            format!("expected {} fields, found {}", HEADER.len(), fields.len()),
        ));
    }

    let prep_time: u32 = fields[2].parse().map_err(|_| {
        SchedulerError::malformed(line_no, format!("prep_time {:?} is not a valid integer", fields[2]))
    })?;
    let priority: i32 = fields[4].parse().map_err(|_| {
        SchedulerError::malformed(line_no, format!("priority {:?} is not a valid integer", fields[4]))
    })?;
    let timestamp = time::parse_timestamp(&fields[5]).map_err(|e| {
        SchedulerError::malformed(line_no, format!("timestamp {:?}: {e}", fields[5]))
    })?;

    let order = Order::new(fields[0].as_str(), fields[1].as_str(), prep_time, timestamp)
        .with_category(fields[3].as_str())
        .with_priority(priority);

    validate_order(&order).map_err(|errors| {
        let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
        SchedulerError::malformed(line_no, reasons.join("; "))
    })?;

    Ok(Some(order))
}

/// Formats an order as one line (without the trailing newline).
pub fn format_record(order: &Order) -> String {
    [
        quote(&order.customer_name),
        quote(&order.dish_name),
        order.prep_time.to_string(),
        quote(&order.category),
        order.priority.to_string(),
        time::format_timestamp(&order.timestamp),
    ]
    .join(",")
}

/// The header row (without the trailing newline).
pub fn header_line() -> String {
    HEADER.join(",")
}

fn quote(field: &str) -> String {
    if field.contains([',', '"']) || field.trim() != field {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits a line into fields, honoring double quotes.
fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if !quoted && current.trim().is_empty() => {
                current.clear();
                quoted = true;
                in_quotes = true;
            }
            (',', false) => {
                fields.push(finish_field(std::mem::take(&mut current), quoted));
                quoted = false;
            }
            // Only padding may follow a closing quote.
            (c, false) if quoted => {
                if !c.is_whitespace() {
                    return Err(format!("unexpected {c:?} after closing quote"));
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(finish_field(current, quoted));
    Ok(fields)
}

fn finish_field(raw: String, quoted: bool) -> String {
    if quoted {
        raw
    } else {
        raw.trim().to_string()
    }
}
