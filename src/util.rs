pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Shortens an ISO-8601 timestamp to its date part for display.
pub fn short_date(timestamp: &str) -> &str {
    timestamp.split_once('T').map(|(date, _)| date).unwrap_or(timestamp)
}
