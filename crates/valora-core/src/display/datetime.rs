//! Date, time and money display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A `Timestamp` rendered in the lead's own time zone.
///
/// Unknown zone names fall back to the system time zone. The format is
/// `YYYY-MM-DD HH:MM TZ`.
///
/// ```rust
/// use jiff::Timestamp;
/// use valora_core::display::LocalDateTime;
///
/// let at: Timestamp = "2026-01-15T09:30:00Z".parse()?;
/// assert_eq!(
///     LocalDateTime::new(&at, "Europe/Madrid").to_string(),
///     "2026-01-15 10:30 CET"
/// );
/// # Ok::<(), jiff::Error>(())
/// ```
pub struct LocalDateTime<'a> {
    pub timestamp: &'a Timestamp,
    pub time_zone: &'a str,
}

impl<'a> LocalDateTime<'a> {
    pub fn new(timestamp: &'a Timestamp, time_zone: &'a str) -> Self {
        Self {
            timestamp,
            time_zone,
        }
    }
}

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tz = TimeZone::get(self.time_zone).unwrap_or_else(|_| TimeZone::system());
        write!(
            f,
            "{}",
            self.timestamp.to_zoned(tz).strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

/// Whole euros with `.` as the thousands separator.
///
/// ```rust
/// use valora_core::display::Euros;
///
/// assert_eq!(Euros(1_234_567.4).to_string(), "1.234.567 €");
/// assert_eq!(Euros(-950.0).to_string(), "-950 €");
/// ```
pub struct Euros(pub f64);

impl fmt::Display for Euros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round();
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        let sign = if rounded < 0.0 { "-" } else { "" };
        write!(f, "{sign}{grouped} €")
    }
}
