//! Display formatting utilities

use std::time::Duration;

/// Format a mean rate in events per second
#[inline]
#[must_use]
pub fn format_rate(rate: f64) -> String {
    if rate >= 1_000_000.0 {
        format!("{:.2}M/s", rate / 1_000_000.0)
    } else if rate >= 1_000.0 {
        format!("{:.2}k/s", rate / 1_000.0)
    } else {
        format!("{:.1}/s", rate)
    }
}

/// Format bytes in human-readable form (KB, MB, GB)
#[inline]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a duration as `1h 02m 03s` / `2m 03s` / `3s`
#[inline]
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format an optional data age for the panels (`-` before first data)
#[inline]
#[must_use]
pub fn format_age(age: Option<Duration>) -> String {
    match age {
        Some(age) if age.as_secs() == 0 => "<1s ago".to_string(),
        Some(age) => format!("{} ago", format_duration(age)),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0/s");
        assert_eq!(format_rate(42.25), "42.2/s");
        assert_eq!(format_rate(1_500.0), "1.50k/s");
        assert_eq!(format_rate(2_400_000.0), "2.40M/s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(29_312_178), "27.95 MB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3)), "3s");
        assert_eq!(format_duration(Duration::from_secs(123)), "2m 03s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h 02m 03s");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(None), "-");
        assert_eq!(format_age(Some(Duration::from_millis(200))), "<1s ago");
        assert_eq!(format_age(Some(Duration::from_secs(5))), "5s ago");
    }
}
