//! Break-aware time arithmetic for a driver's shift.
//!
//! [`TimeOfDay`] is the canonical representation of a schedule time: a count
//! of minutes since midnight of the shift's first day. Values of 1440 or more
//! denote the following day, which lets overnight shifts stay monotonic.
//! Formatting into a 12-hour clock is a derived view and never feeds back into
//! stored values.
//!
//! Break windows live in [`BreakSchedule`]; every schedule advancement must flow
//! through [`advance`] so break skipping cannot be forgotten by a caller.

mod breaks;

use std::fmt;

pub use breaks::{
    BreakSchedule, BreakWindow, advance, is_during_break, matching_break, skip_past_break,
};

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Minutes since midnight of the shift's first day.
///
/// # Examples
/// ```
/// use shiftplan_core::TimeOfDay;
///
/// let t = TimeOfDay::from_hm(13, 5);
/// assert_eq!(t.minutes(), 785);
/// assert_eq!(t.hour(), 13);
/// assert_eq!(t.to_string(), "1:05 PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight at the start of the first day.
    pub const MIDNIGHT: Self = Self(0);

    /// Wrap a raw minute count.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Build a time from an hour and minute, saturating on overflow.
    #[must_use]
    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        Self(hour.saturating_mul(MINUTES_PER_HOUR).saturating_add(minute))
    }

    /// Build a time at the top of `hour`.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        Self::from_hm(hour, 0)
    }

    /// Raw minute count.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component, `floor(minutes / 60)`. May exceed 23 on overnight shifts.
    #[expect(
        clippy::integer_division,
        reason = "the hour component is defined as the floor of minutes / 60"
    )]
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    /// Minute within the hour.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "minute-of-hour is the remainder of the minute count"
    )]
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    /// Add `minutes` without consulting break windows.
    ///
    /// Scheduling code should call [`advance`] instead; this exists for
    /// estimates that deliberately ignore breaks, such as arrival previews.
    #[must_use]
    pub const fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Minutes elapsed since `earlier`, or zero if `earlier` is later.
    #[must_use]
    pub const fn minutes_since(self, earlier: Self) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for TimeOfDay {
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "display wraps the hour onto a 24-hour dial"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hour() % 24;
        let (dial, suffix) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour.saturating_sub(12), "PM"),
        };
        write!(f, "{dial}:{:02} {suffix}", self.minute())
    }
}

/// Convert a fractional hour into a [`TimeOfDay`].
///
/// Rounds to the nearest minute. Negative and non-finite inputs saturate to
/// midnight; the function is total.
///
/// # Examples
/// ```
/// use shiftplan_core::time::to_minutes;
///
/// assert_eq!(to_minutes(11.5).minutes(), 690);
/// assert_eq!(to_minutes(-3.0).minutes(), 0);
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is range-checked before the cast"
)]
#[must_use]
pub fn to_minutes(hour: f64) -> TimeOfDay {
    if !hour.is_finite() || hour <= 0.0 {
        return TimeOfDay::MIDNIGHT;
    }
    let minutes = (hour * 60.0).round();
    if minutes >= f64::from(u32::MAX) {
        return TimeOfDay::from_minutes(u32::MAX);
    }
    TimeOfDay::from_minutes(minutes as u32)
}

/// Render a minute count on a 12-hour clock, e.g. `"11:50 AM"`.
#[must_use]
pub fn to_time_of_day(minutes: u32) -> String {
    TimeOfDay::from_minutes(minutes).to_string()
}

/// Render a whole hour on a 12-hour clock, e.g. `"1:00 PM"` for 13 or 37.
#[must_use]
pub fn format_hour(hour: u32) -> String {
    TimeOfDay::from_hour(hour).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "12:00 AM")]
    #[case(59, "12:59 AM")]
    #[case(6 * 60, "6:00 AM")]
    #[case(11 * 60 + 50, "11:50 AM")]
    #[case(12 * 60 + 10, "12:10 PM")]
    #[case(23 * 60 + 59, "11:59 PM")]
    #[case(25 * 60, "1:00 AM")]
    #[case(36 * 60 + 30, "12:30 PM")]
    fn displays_twelve_hour_clock(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(to_time_of_day(minutes), expected);
    }

    #[rstest]
    #[case(6.0, 360)]
    #[case(11.5, 690)]
    #[case(0.01, 1)]
    #[case(0.0, 0)]
    #[case(-1.0, 0)]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, 0)]
    fn converts_hours_to_minutes(#[case] hour: f64, #[case] expected: u32) {
        assert_eq!(to_minutes(hour).minutes(), expected);
    }

    #[rstest]
    fn hour_and_minute_components_split_the_count() {
        let t = TimeOfDay::from_hm(25, 7);
        assert_eq!(t.hour(), 25);
        assert_eq!(t.minute(), 7);
        assert_eq!(t.minutes(), 1507);
    }

    #[rstest]
    fn arithmetic_saturates() {
        let late = TimeOfDay::from_minutes(u32::MAX);
        assert_eq!(late.plus_minutes(5), late);
        assert_eq!(TimeOfDay::MIDNIGHT.minutes_since(late), 0);
    }

    #[rstest]
    fn times_compare_numerically() {
        // "9:00 AM" sorts after "10:00 AM" as a string; the canonical value must not.
        assert!(TimeOfDay::from_hour(9) < TimeOfDay::from_hour(10));
        assert!(TimeOfDay::from_hour(23) < TimeOfDay::from_hour(25));
    }

    #[rstest]
    fn formats_whole_hours() {
        assert_eq!(format_hour(12), "12:00 PM");
        assert_eq!(format_hour(13), "1:00 PM");
        assert_eq!(format_hour(24), "12:00 AM");
    }
}
