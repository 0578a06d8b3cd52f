use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;
use std::time::{Duration, SystemTime};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Formats a timestamp as ISO-8601 in UTC with microsecond precision,
/// e.g. `2024-03-01T12:00:00.250000Z`.
pub fn format_time(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Formats a duration the way the ingestion service expects it:
/// `[d.]hh:mm:ss.ffffff`, the day part only present when non-zero.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    let micros = duration.subsec_micros();

    let mut formatted = String::with_capacity(20);
    if days > 0 {
        let _ = write!(formatted, "{days}.");
    }
    let _ = write!(formatted, "{hours:02}:{minutes:02}:{seconds:02}.{micros:06}");
    formatted
}

/// Duration between two timestamps, zero when `end` precedes `start`.
pub(crate) fn elapsed(start: SystemTime, end: SystemTime) -> Duration {
    end.duration_since(start).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::ZERO, "00:00:00.000000")]
    #[case(Duration::from_millis(1500), "00:00:01.500000")]
    #[case(Duration::from_nanos(1_999), "00:00:00.000001")]
    #[case(Duration::from_secs(3_723), "01:02:03.000000")]
    #[case(Duration::from_secs(26 * 3_600), "1.02:00:00.000000")]
    #[case(Duration::from_secs(12 * 86_400 + 59), "12.00:00:59.000000")]
    fn duration_formatting(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
    }

    #[test]
    fn time_formatting_uses_micros_and_zulu() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_micros(1_709_294_400_250_000);
        assert_eq!(format_time(time), "2024-03-01T12:00:00.250000Z");
    }

    #[test]
    fn elapsed_saturates() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let end = SystemTime::UNIX_EPOCH + Duration::from_secs(5);
        assert_eq!(elapsed(start, end), Duration::ZERO);
        assert_eq!(elapsed(end, start), Duration::from_secs(5));
    }
}
