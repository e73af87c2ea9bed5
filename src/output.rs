//! Console formatting for counts, sizes and run summaries.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::decode::MIB;

/// Formats `n` with comma thousands separators, e.g. `24,648,499`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Byte count expressed in mebibytes.
pub fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Byte count in mebibytes, one decimal place.
pub fn format_mib(bytes: u64) -> String {
    format!("{:.1}", to_mib(bytes))
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
