use std::time::Duration;

const SI_BASE: u64 = 1000;
const SI_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count with SI units, e.g. `82854982` becomes `83 MB`.
pub fn human_bytes(size: u64) -> String {
    if size < 10 {
        return format!("{} B", size);
    }

    let mut exponent = 0;
    let mut scale = 1u64;
    while exponent + 1 < SI_UNITS.len() && size / scale >= SI_BASE {
        scale *= SI_BASE;
        exponent += 1;
    }

    let value = (size as f64 / scale as f64 * 10.0 + 0.5).floor() / 10.0;
    if value < 10.0 {
        format!("{:.1} {}", value, SI_UNITS[exponent])
    } else {
        format!("{:.0} {}", value, SI_UNITS[exponent])
    }
}

/// Formats an elapsed duration at millisecond precision, e.g. `1s 234ms`.
pub fn human_elapsed(elapsed: Duration) -> String {
    let millis = Duration::new(elapsed.as_secs(), elapsed.subsec_millis() * 1_000_000);
    humantime::format_duration(millis).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sizes_are_plain_bytes() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(9), "9 B");
        assert_eq!(human_bytes(10), "10 B");
        assert_eq!(human_bytes(999), "999 B");
    }

    #[test]
    fn test_scaled_sizes() {
        assert_eq!(human_bytes(1000), "1.0 kB");
        assert_eq!(human_bytes(1500), "1.5 kB");
        assert_eq!(human_bytes(1_000_000), "1.0 MB");
        assert_eq!(human_bytes(82_854_982), "83 MB");
        assert_eq!(human_bytes(5_368_709_120), "5.4 GB");
    }

    #[test]
    fn test_largest_unit() {
        assert_eq!(human_bytes(u64::MAX), "18 EB");
    }

    #[test]
    fn test_elapsed_is_truncated_to_millis() {
        assert_eq!(human_elapsed(Duration::new(1, 234_567_891)), "1s 234ms");
        assert_eq!(human_elapsed(Duration::from_micros(999)), "0s");
        assert_eq!(
            human_elapsed(Duration::from_secs(u64::MAX)),
            humantime::format_duration(Duration::from_secs(u64::MAX)).to_string()
        );
    }
}
