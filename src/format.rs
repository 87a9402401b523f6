use std::{fmt::Display, time::SystemTime};

use chrono::{DateTime, Local, TimeZone};
use humansize::{format_size, BINARY};

const DATE_FORMAT: &str = "%b %d, %Y";
const TIMESTAMP_FORMAT: &str = "%b %d, %Y %H:%M:%S";

// --- Sizes ---

/// `"<n> B"` below one KiB, otherwise binary units with one decimal.
pub fn file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    // Using BINARY (KiB, MiB), always with one decimal
    format_size(bytes, BINARY.decimal_places(1).decimal_zeroes(1))
}

// --- Dates ---

/// Day-level date shown on listing cards.
pub fn date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format(DATE_FORMAT).to_string()
}

/// Full timestamp shown in the media viewer.
pub fn timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn local_time(time: SystemTime) -> DateTime<Local> {
    time.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sizes_below_a_kibibyte_are_bytes() {
        assert_eq!(file_size(0), "0 B");
        assert_eq!(file_size(1), "1 B");
        assert_eq!(file_size(1023), "1023 B");
    }

    #[test]
    fn sizes_use_binary_units_with_one_decimal() {
        assert_eq!(file_size(1024), "1.0 KiB");
        assert_eq!(file_size(1536), "1.5 KiB");
        assert_eq!(file_size(1_048_576), "1.0 MiB");
        assert_eq!(file_size(1_073_741_824), "1.0 GiB");
    }

    #[test]
    fn dates_use_month_abbreviation() {
        let time = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(date(&time), "Jan 02, 2006");
        assert_eq!(timestamp(&time), "Jan 02, 2006 15:04:05");
    }
}
