use chrono::DateTime;

/// Human-readable byte count, binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} PB", value)
}

/// RFC 3339 timestamp to `dd-mm-yyyy - HH:MM`; unparseable input is
/// passed through truncated to the date-time prefix.
pub fn format_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "Unknown".to_string();
    }
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%d-%m-%Y - %H:%M").to_string(),
        Err(_) => timestamp.chars().take(19).collect(),
    }
}

/// Shorten long identifiers (peer ids, addresses) for display:
/// `head…tail` once the value exceeds both affix lengths.
pub fn truncate_id(id: &str, head: usize, tail: usize) -> String {
    if id.len() <= head + tail {
        return id.to_string();
    }
    format!("{}...{}", &id[..head], &id[id.len() - tail..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512), "512.0 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        assert_eq!(format_timestamp("2025-06-01T10:30:00Z"), "01-06-2025 - 10:30");
        assert_eq!(
            format_timestamp("2025-06-01T10:30:00+00:00"),
            "01-06-2025 - 10:30"
        );
    }

    #[test]
    fn test_format_timestamp_fallbacks() {
        assert_eq!(format_timestamp(""), "Unknown");
        assert_eq!(format_timestamp("2025-06-01 10:30:00.123456"), "2025-06-01 10:30:00");
    }

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("0123456789abcdef", 4, 4), "0123...cdef");
        assert_eq!(truncate_id("short", 4, 4), "short");
    }
}
