//! Schedule
//!
//! Bookable time slots and the window of dates open for reservations.

use std::{fmt, str::FromStr};

use jiff::{
    ToSpan,
    civil::{Date, Time, time},
};

use crate::booking::BookingError;

/// Number of days, starting today, that can be booked.
pub const BOOKING_WINDOW_DAYS: usize = 30;

/// Minutes a table is held past the reserved slot.
pub const TABLE_HOLD_MINUTES: u8 = 15;

/// Hours before the slot by which a reservation must be cancelled.
pub const CANCELLATION_NOTICE_HOURS: u8 = 24;

/// A reservable time, one of [`TimeSlot::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(Time);

impl TimeSlot {
    /// Lunch and dinner service in half hour steps.
    pub const ALL: [Self; 18] = [
        Self(time(11, 0, 0, 0)),
        Self(time(11, 30, 0, 0)),
        Self(time(12, 0, 0, 0)),
        Self(time(12, 30, 0, 0)),
        Self(time(13, 0, 0, 0)),
        Self(time(13, 30, 0, 0)),
        Self(time(14, 0, 0, 0)),
        Self(time(14, 30, 0, 0)),
        Self(time(17, 0, 0, 0)),
        Self(time(17, 30, 0, 0)),
        Self(time(18, 0, 0, 0)),
        Self(time(18, 30, 0, 0)),
        Self(time(19, 0, 0, 0)),
        Self(time(19, 30, 0, 0)),
        Self(time(20, 0, 0, 0)),
        Self(time(20, 30, 0, 0)),
        Self(time(21, 0, 0, 0)),
        Self(time(21, 30, 0, 0)),
    ];

    /// Wall clock time of the slot
    pub fn time(self) -> Time {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%-I:%M %p"))
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    /// Parse a slot as displayed, e.g. `"7:30 PM"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|slot| slot.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BookingError::UnknownTimeSlot(s.to_string()))
    }
}

/// Dates open for booking: `today` and the days after it, [`BOOKING_WINDOW_DAYS`] in total.
pub fn available_dates(today: Date) -> impl Iterator<Item = Date> {
    today.series(1.day()).take(BOOKING_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn slots_display_in_twelve_hour_clock() {
        let labels: Vec<String> = TimeSlot::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(labels.first().map(String::as_str), Some("11:00 AM"));
        assert_eq!(labels.get(4).map(String::as_str), Some("1:00 PM"));
        assert_eq!(labels.last().map(String::as_str), Some("9:30 PM"));
    }

    #[test]
    fn slots_are_in_order() {
        assert!(TimeSlot::ALL.windows(2).all(|pair| match pair {
            [earlier, later] => earlier < later,
            _ => false,
        }));
    }

    #[test]
    fn parses_displayed_slot() -> TestResult {
        let slot: TimeSlot = "7:30 PM".parse()?;

        assert_eq!(slot.time(), time(19, 30, 0, 0));

        Ok(())
    }

    #[test]
    fn rejects_slot_outside_service() {
        assert!(matches!(
            "4:00 PM".parse::<TimeSlot>(),
            Err(BookingError::UnknownTimeSlot(_))
        ));
    }

    #[test]
    fn available_dates_cover_thirty_days_from_today() {
        let today = date(2026, 12, 20);
        let dates: Vec<Date> = available_dates(today).collect();

        assert_eq!(dates.len(), BOOKING_WINDOW_DAYS);
        assert_eq!(dates.first(), Some(&today));
        assert_eq!(dates.last(), Some(&date(2027, 1, 18)));
    }
}
