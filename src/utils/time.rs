use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// This is the standard way of writing dates throughout the application and
/// its data files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| anyhow!("expected a date like 2017-06-01, got {input:?}"))
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|_| anyhow!("expected a time like 18:30, got {input:?}"))
}

pub fn parse_minute(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), MINUTE_FORMAT)
        .map_err(|_| anyhow!("expected a moment like 2017-06-01 18:30, got {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_formats() {
        assert_eq!(
            parse_date("2017-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2017, 6, 1).unwrap()
        );
        assert_eq!(
            parse_time("18:30").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert_eq!(
            parse_minute("2017-06-01 18:30").unwrap(),
            NaiveDate::from_ymd_opt(2017, 6, 1)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );
        assert!(parse_date("06/01/2017").is_err());
    }
}
