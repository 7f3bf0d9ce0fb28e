//! Shared formatting helpers for cell values.

use serde_json::Value;

/// Formats a cell value as display text.
///
/// Strings are shown without quotes, `null` as an empty string, and
/// composite values as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Formats an optional field, treating a missing field like `null`.
pub fn format_opt_value(value: Option<&Value>) -> String {
    value.map(format_value).unwrap_or_default()
}

/// Renders a rating as filled/empty stars out of `max`.
pub fn format_rating(value: &Value, max: u8) -> String {
    let filled = value
        .as_f64()
        .map(|v| v.round().clamp(0.0, max as f64) as usize)
        .unwrap_or(0);
    let mut out = String::with_capacity(max as usize * 3);
    for i in 0..max as usize {
        out.push(if i < filled { '★' } else { '☆' });
    }
    out
}

/// Renders a 0..=100 slider value as a fixed-width bar.
pub fn format_slider(value: &Value, width: usize) -> String {
    let v = value.as_f64().unwrap_or(0.0).clamp(0.0, 100.0);
    let filled = ((v / 100.0) * width as f64).round() as usize;
    format!(
        "{}{} {}",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled)),
        format_value(value)
    )
}

/// Truncates text to `max` chars, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
