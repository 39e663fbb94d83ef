//! Date/time display
//!
//! Formats in US long form: "Monday, October 19, 2026" and "03:04:05 PM".
//! On the web, fields come from the browser's local time; natively, from UTC.

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar fields for one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    /// 0 = Sunday
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateParts {
    /// UTC fields for a Unix timestamp in milliseconds
    pub fn from_unix_millis(millis: i64) -> Self {
        let secs = millis.div_euclid(1000);
        let days = secs.div_euclid(86_400);
        let secs_of_day = secs.rem_euclid(86_400) as u32;

        // Days to civil date (proleptic Gregorian)
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;

        Self {
            year,
            month,
            day,
            // 1970-01-01 was a Thursday
            weekday: (days + 4).rem_euclid(7) as u32,
            hour: secs_of_day / 3600,
            minute: secs_of_day / 60 % 60,
            second: secs_of_day % 60,
        }
    }

    /// Browser local time
    #[cfg(target_arch = "wasm32")]
    pub fn now() -> Self {
        let date = js_sys::Date::new_0();
        Self {
            year: date.get_full_year() as i32,
            month: date.get_month() + 1,
            day: date.get_date(),
            weekday: date.get_day(),
            hour: date.get_hours(),
            minute: date.get_minutes(),
            second: date.get_seconds(),
        }
    }

    /// System time (UTC)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self::from_unix_millis(millis)
    }

    /// "Monday, October 19, 2026"
    pub fn format_date(&self) -> String {
        format!(
            "{}, {} {}, {}",
            WEEKDAYS[self.weekday as usize % 7],
            MONTHS[(self.month as usize + 11) % 12],
            self.day,
            self.year
        )
    }

    /// "03:04:05 PM"
    pub fn format_time(&self) -> String {
        let meridiem = if self.hour < 12 { "AM" } else { "PM" };
        let hour12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02}:{:02} {}", hour12, self.minute, self.second, meridiem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let parts = DateParts::from_unix_millis(0);
        assert_eq!(parts.format_date(), "Thursday, January 1, 1970");
        assert_eq!(parts.format_time(), "12:00:00 AM");
    }

    #[test]
    fn test_billennium() {
        let parts = DateParts::from_unix_millis(1_000_000_000_000);
        assert_eq!(parts.format_date(), "Sunday, September 9, 2001");
        assert_eq!(parts.format_time(), "01:46:40 AM");
    }

    #[test]
    fn test_leap_day_afternoon() {
        // 2024-02-29T15:04:05Z
        let parts = DateParts::from_unix_millis(1_709_219_045_000);
        assert_eq!(parts.format_date(), "Thursday, February 29, 2024");
        assert_eq!(parts.format_time(), "03:04:05 PM");
    }

    #[test]
    fn test_before_epoch() {
        let parts = DateParts::from_unix_millis(-1000);
        assert_eq!(parts.year, 1969);
        assert_eq!(parts.month, 12);
        assert_eq!(parts.day, 31);
        assert_eq!(parts.format_time(), "11:59:59 PM");
    }
}
