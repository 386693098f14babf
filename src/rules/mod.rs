// Extraction rule suites for the log formats quarry understands.

pub mod gaussian;
pub mod molcas;

use serde_json::Value;

/// Fetch the nth whitespace-separated field of a line.
pub(crate) fn field(line: &str, n: usize) -> Result<&str, String> {
    line.split_whitespace()
        .nth(n)
        .ok_or_else(|| format!("no field {} in line {:?}", n, line))
}

/// Fetch the nth field and read it as a float.
pub(crate) fn float_field(line: &str, n: usize) -> Result<f64, String> {
    let raw = field(line, n)?;
    raw.parse()
        .map_err(|_| format!("{:?} is not a number in line {:?}", raw, line))
}

/// Fetch the nth field and read it as an integer.
pub(crate) fn int_field(line: &str, n: usize) -> Result<i64, String> {
    let raw = field(line, n)?;
    raw.parse()
        .map_err(|_| format!("{:?} is not an integer in line {:?}", raw, line))
}

/// Fetch the last field of a line, for tables that print a label padded
/// out to a trailing value.
pub(crate) fn last_field(line: &str) -> Result<&str, String> {
    line.split_whitespace()
        .last()
        .ok_or_else(|| format!("no fields in line {:?}", line))
}

/// Unwrap the array a composite's reset always produces.
pub(crate) fn into_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(parts) => parts,
        _ => unreachable!("composite rules reset to an array"),
    }
}
