//! Time formatting

use chrono::{DateTime, FixedOffset};

use super::TimeMode;

const SECONDS_PER_DAY: i64 = 86_400;

/// Format `seconds` as `HH:MM:SS`.
///
/// `Now` reads `seconds` as Unix epoch seconds and shows the 24-hour time of
/// day at `utc_offset_seconds`. `CountUp` and `CountDown` read it as a
/// duration; hours wrap at 24 and negative values show as zero.
pub fn format_time(seconds: i64, mode: TimeMode, utc_offset_seconds: i32) -> String {
    match mode {
        TimeMode::Now => time_of_day(seconds, utc_offset_seconds),
        TimeMode::CountUp | TimeMode::CountDown => duration(seconds.max(0)),
    }
}

fn duration(seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        (seconds / 3600) % 24,
        (seconds / 60) % 60,
        seconds % 60
    )
}

fn time_of_day(epoch_seconds: i64, utc_offset_seconds: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_seconds);
    match offset.zip(DateTime::from_timestamp(epoch_seconds, 0)) {
        Some((offset, utc)) => utc.with_timezone(&offset).format("%H:%M:%S").to_string(),
        // Out of chrono's range; the time of day is still well defined
        None => {
            let local = epoch_seconds.rem_euclid(SECONDS_PER_DAY)
                + (utc_offset_seconds as i64).rem_euclid(SECONDS_PER_DAY);
            duration(local.rem_euclid(SECONDS_PER_DAY))
        }
    }
}

/// The six digit characters of a formatted time, in reading order.
///
/// Non-digits are skipped; missing digits read as `'0'`.
pub fn split_digits(formatted: &str) -> [char; 6] {
    let mut digits = ['0'; 6];
    for (slot, ch) in digits
        .iter_mut()
        .zip(formatted.chars().filter(char::is_ascii_digit))
    {
        *slot = ch;
    }
    digits
}
