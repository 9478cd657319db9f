//! Clock-face formatting shared by the focus timer and the stopwatch.

/// `HH:MM:SS` for a whole number of seconds.
pub fn hms(total_secs: u64) -> String {
    let (hours, rem) = (total_secs / 3600, total_secs % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `MM:SS`, used for the break countdown.
pub fn ms(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// `HH:MM:SS` for a millisecond counter, truncating the fraction.
pub fn hms_millis(elapsed_ms: u64) -> String {
    hms(elapsed_ms / 1000)
}

/// `HH:MM:SS.hh` with hundredths, used for stopwatch laps.
pub fn hms_hundredths(elapsed_ms: u64) -> String {
    let hundredths = (elapsed_ms % 1000) / 10;
    format!("{}.{hundredths:02}", hms_millis(elapsed_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(hms(0), "00:00:00");
        assert_eq!(hms(25 * 60), "00:25:00");
        assert_eq!(hms(3600 + 61), "01:01:01");
    }

    #[test]
    fn formats_break_countdown() {
        assert_eq!(ms(299), "04:59");
    }

    #[test]
    fn hundredths_truncate_milliseconds() {
        assert_eq!(hms_hundredths(1_234), "00:00:01.23");
        assert_eq!(hms_hundredths(3_600_000 + 5), "01:00:00.00");
    }
}
