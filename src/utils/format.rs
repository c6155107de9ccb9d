//! Formatting helpers shared by console report output

use crate::errors::AppResult;
use serde::Serialize;

/// Format number with thousand separators for console output
///
/// ```
/// # use droplog_reports::utils::format::format_number;
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(2500), "2,500");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format a percentage with two decimals
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Export data as pretty JSON
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
