use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// Date and time strings for the overview header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockLabels {
    pub date: String,
    pub time: String,
}

impl ClockLabels {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: instant.format("%A, %B %-d, %Y").to_string(),
            time: time_label(instant),
        }
    }
}

/// 12-hour wall clock time with seconds, e.g. `03:04:05 PM`.
pub fn time_label<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn labels_use_long_date_and_twelve_hour_time() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 16, 15, 4, 5).unwrap();
        let labels = ClockLabels::at(&instant);
        assert_eq!(labels.date, "Friday, October 16, 2026");
        assert_eq!(labels.time, "03:04:05 PM");
    }

    #[test]
    fn single_digit_day_is_not_padded() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 9).unwrap();
        assert_eq!(ClockLabels::at(&instant).date, "Monday, March 2, 2026");
        assert_eq!(time_label(&instant), "12:00:09 AM");
    }
}
