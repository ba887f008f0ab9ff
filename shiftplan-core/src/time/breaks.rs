//! Break windows and the break-skipping rules applied to schedule times.

use std::fmt;

use super::{TimeOfDay, format_hour};

/// A half-open interval of whole hours, `[start_hour, end_hour)`, during
/// which no stop may be scheduled.
///
/// Hours run on a 0–48 scale so breaks can fall after midnight on overnight
/// shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakWindow {
    /// First hour covered by the break.
    pub start_hour: u32,
    /// First hour after the break.
    pub end_hour: u32,
}

impl BreakWindow {
    /// Construct a window without validating it.
    ///
    /// Validation happens at the configuration boundary
    /// ([`ShiftDraft::validate`](crate::ShiftDraft::validate)).
    #[must_use]
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Report whether `start_hour < end_hour`.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.start_hour < self.end_hour
    }

    /// Report whether `hour` lies inside the half-open interval.
    #[must_use]
    pub const fn contains_hour(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }

    /// The time at which the break ends.
    #[must_use]
    pub const fn end_time(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.end_hour)
    }

    /// Report whether two windows share at least one hour.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_hour < other.end_hour && other.start_hour < self.end_hour
    }

    /// Clamp both bounds into `[lower, upper]`.
    ///
    /// Callers must ensure `lower <= upper`.
    #[must_use]
    pub fn clamped_to(&self, lower: u32, upper: u32) -> Self {
        Self {
            start_hour: self.start_hour.clamp(lower, upper),
            end_hour: self.end_hour.clamp(lower, upper),
        }
    }
}

impl fmt::Display for BreakWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_hour(self.start_hour),
            format_hour(self.end_hour)
        )
    }
}

/// Return the first window in list order that contains `t`.
///
/// Overlapping windows are tolerated; the earliest-declared match wins.
#[must_use]
pub fn matching_break(t: TimeOfDay, breaks: &[BreakWindow]) -> Option<&BreakWindow> {
    let hour = t.hour();
    breaks.iter().find(|window| window.contains_hour(hour))
}

/// Report whether `t` falls inside any break window.
///
/// The comparison uses the hour component of `t`, so a time landing exactly
/// on a window's `end_hour` is outside it.
#[must_use]
pub fn is_during_break(t: TimeOfDay, breaks: &[BreakWindow]) -> bool {
    matching_break(t, breaks).is_some()
}

/// Move `t` forward to the end of the break it falls in.
///
/// The first matching window in list order decides the snap target. If that
/// target is itself inside another break (back-to-back windows), snapping
/// repeats until the time is clear, so applying the function twice is the
/// same as applying it once. Times outside every break are returned unchanged.
///
/// A window whose end saturates the clock cannot move the time forward; the
/// time is returned as it stands once a snap stops advancing.
#[must_use]
pub fn skip_past_break(t: TimeOfDay, breaks: &[BreakWindow]) -> TimeOfDay {
    let mut current = t;
    while let Some(window) = matching_break(current, breaks) {
        let next = window.end_time();
        if next <= current {
            break;
        }
        current = next;
    }
    current
}

/// Advance `t` by `minutes`, then skip past any break the result lands in.
///
/// This is the single chokepoint for moving a schedule forward.
///
/// # Examples
/// ```
/// use shiftplan_core::time::{BreakWindow, TimeOfDay, advance};
///
/// let lunch = [BreakWindow::new(12, 13)];
/// let arrival = advance(TimeOfDay::from_hm(11, 50), 20, &lunch);
/// assert_eq!(arrival, TimeOfDay::from_hour(13));
/// ```
#[must_use]
pub fn advance(t: TimeOfDay, minutes: u32, breaks: &[BreakWindow]) -> TimeOfDay {
    skip_past_break(t.plus_minutes(minutes), breaks)
}

/// Break windows for one shift, kept in insertion order.
///
/// The order is significant: it is the tie-break for overlapping windows and
/// the order used when summarising breaks. It is never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BreakSchedule {
    windows: Vec<BreakWindow>,
}

impl BreakSchedule {
    /// Wrap windows in the order supplied.
    #[must_use]
    pub const fn new(windows: Vec<BreakWindow>) -> Self {
        Self { windows }
    }

    /// A schedule with no breaks.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Borrow the windows in stored order.
    #[must_use]
    pub fn windows(&self) -> &[BreakWindow] {
        &self.windows
    }

    /// Number of windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Report whether there are no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Append a window.
    pub fn push(&mut self, window: BreakWindow) {
        self.windows.push(window);
    }

    /// Replace the window at `index`, returning the previous value.
    pub fn replace(&mut self, index: usize, window: BreakWindow) -> Option<BreakWindow> {
        self.windows
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, window))
    }

    /// Remove the window at `index`.
    pub fn remove(&mut self, index: usize) -> Option<BreakWindow> {
        (index < self.windows.len()).then(|| self.windows.remove(index))
    }

    /// Clamp every window into `[lower, upper]`.
    ///
    /// Returns `(index, before, after)` for each window that moved. Callers
    /// must ensure `lower <= upper`.
    pub fn clamp_to(&mut self, lower: u32, upper: u32) -> Vec<(usize, BreakWindow, BreakWindow)> {
        let mut adjusted = Vec::new();
        for (index, window) in self.windows.iter_mut().enumerate() {
            let clamped = window.clamped_to(lower, upper);
            if clamped != *window {
                adjusted.push((index, *window, clamped));
                *window = clamped;
            }
        }
        adjusted
    }

    /// Indices of the first pair of overlapping windows, if any.
    #[must_use]
    pub fn first_overlap(&self) -> Option<(usize, usize)> {
        self.windows.iter().enumerate().find_map(|(i, lhs)| {
            self.windows
                .iter()
                .enumerate()
                .skip(i.saturating_add(1))
                .find(|(_, rhs)| lhs.overlaps(rhs))
                .map(|(j, _)| (i, j))
        })
    }

    /// See [`is_during_break`].
    #[must_use]
    pub fn contains(&self, t: TimeOfDay) -> bool {
        is_during_break(t, &self.windows)
    }

    /// See [`skip_past_break`].
    #[must_use]
    pub fn skip_past(&self, t: TimeOfDay) -> TimeOfDay {
        skip_past_break(t, &self.windows)
    }

    /// See [`advance`].
    #[must_use]
    pub fn advance(&self, t: TimeOfDay, minutes: u32) -> TimeOfDay {
        advance(t, minutes, &self.windows)
    }
}

impl From<Vec<BreakWindow>> for BreakSchedule {
    fn from(windows: Vec<BreakWindow>) -> Self {
        Self::new(windows)
    }
}

impl FromIterator<BreakWindow> for BreakSchedule {
    fn from_iter<I: IntoIterator<Item = BreakWindow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BreakSchedule {
    type Item = &'a BreakWindow;
    type IntoIter = std::slice::Iter<'a, BreakWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn lunch() -> Vec<BreakWindow> {
        vec![BreakWindow::new(12, 13)]
    }

    #[rstest]
    #[case(TimeOfDay::from_hm(11, 59), false)]
    #[case(TimeOfDay::from_hm(12, 0), true)]
    #[case(TimeOfDay::from_hm(12, 59), true)]
    #[case(TimeOfDay::from_hm(13, 0), false)]
    fn breaks_are_half_open(
        lunch: Vec<BreakWindow>,
        #[case] t: TimeOfDay,
        #[case] expected: bool,
    ) {
        assert_eq!(is_during_break(t, &lunch), expected);
    }

    #[rstest]
    fn skip_snaps_to_break_end(lunch: Vec<BreakWindow>) {
        let skipped = skip_past_break(TimeOfDay::from_hm(12, 25), &lunch);
        assert_eq!(skipped, TimeOfDay::from_hour(13));
    }

    #[rstest]
    fn skip_leaves_free_time_alone(lunch: Vec<BreakWindow>) {
        let t = TimeOfDay::from_hm(9, 41);
        assert_eq!(skip_past_break(t, &lunch), t);
    }

    #[rstest]
    fn overlapping_breaks_use_first_declared_window() {
        let breaks = [BreakWindow::new(9, 12), BreakWindow::new(10, 11)];
        let skipped = skip_past_break(TimeOfDay::from_hm(10, 30), &breaks);
        assert_eq!(skipped, TimeOfDay::from_hour(12));
    }

    #[rstest]
    fn first_match_follows_list_order_not_chronology() {
        let breaks = [BreakWindow::new(10, 11), BreakWindow::new(9, 12)];
        let window = matching_break(TimeOfDay::from_hm(10, 30), &breaks);
        assert_eq!(window, Some(&BreakWindow::new(10, 11)));
    }

    #[rstest]
    fn back_to_back_breaks_are_skipped_together() {
        let breaks = [BreakWindow::new(12, 13), BreakWindow::new(13, 14)];
        let skipped = skip_past_break(TimeOfDay::from_hm(12, 10), &breaks);
        assert_eq!(skipped, TimeOfDay::from_hour(14));
    }

    #[rstest]
    #[case(TimeOfDay::from_hm(1, 0))]
    #[case(TimeOfDay::from_hour(30))]
    fn oversized_windows_end_the_skip(#[case] t: TimeOfDay) {
        let breaks = [BreakWindow::new(0, u32::MAX)];
        let skipped = skip_past_break(t, &breaks);
        assert!(skipped >= t);
        assert_eq!(skip_past_break(skipped, &breaks), skipped);
        assert_eq!(advance(t, 10, &breaks), skip_past_break(t.plus_minutes(10), &breaks));
    }

    #[rstest]
    fn malformed_windows_never_match() {
        let breaks = [BreakWindow::new(13, 12), BreakWindow::new(8, 8)];
        assert!(!is_during_break(TimeOfDay::from_hm(12, 30), &breaks));
        assert!(!is_during_break(TimeOfDay::from_hour(8), &breaks));
    }

    #[rstest]
    fn advance_adds_then_skips(lunch: Vec<BreakWindow>) {
        let t = TimeOfDay::from_hm(11, 50);
        assert_eq!(advance(t, 5, &lunch), TimeOfDay::from_hm(11, 55));
        assert_eq!(advance(t, 20, &lunch), TimeOfDay::from_hour(13));
        assert_eq!(advance(t, 70, &lunch), TimeOfDay::from_hm(13, 0));
        assert_eq!(advance(t, 71, &lunch), TimeOfDay::from_hm(13, 1));
    }

    #[rstest]
    fn overnight_breaks_match_hours_past_midnight() {
        let breaks = [BreakWindow::new(24, 25)];
        assert!(is_during_break(TimeOfDay::from_hm(24, 30), &breaks));
        assert!(!is_during_break(TimeOfDay::from_hm(0, 30), &breaks));
    }

    #[rstest]
    fn clamp_reports_adjusted_windows() {
        let mut schedule =
            BreakSchedule::new(vec![BreakWindow::new(5, 7), BreakWindow::new(12, 13)]);
        let adjusted = schedule.clamp_to(6, 20);
        assert_eq!(
            adjusted,
            vec![(0, BreakWindow::new(5, 7), BreakWindow::new(6, 7))]
        );
        assert_eq!(schedule.windows().first(), Some(&BreakWindow::new(6, 7)));
    }

    #[rstest]
    fn finds_first_overlapping_pair() {
        let schedule = BreakSchedule::new(vec![
            BreakWindow::new(8, 9),
            BreakWindow::new(12, 14),
            BreakWindow::new(13, 15),
        ]);
        assert_eq!(schedule.first_overlap(), Some((1, 2)));
        let disjoint = BreakSchedule::new(vec![BreakWindow::new(8, 9), BreakWindow::new(9, 10)]);
        assert_eq!(disjoint.first_overlap(), None);
    }

    #[rstest]
    fn replace_and_remove_respect_bounds() {
        let mut schedule = BreakSchedule::new(vec![BreakWindow::new(8, 9)]);
        assert_eq!(
            schedule.replace(0, BreakWindow::new(10, 11)),
            Some(BreakWindow::new(8, 9))
        );
        assert_eq!(schedule.replace(3, BreakWindow::new(1, 2)), None);
        assert_eq!(schedule.remove(1), None);
        assert_eq!(schedule.remove(0), Some(BreakWindow::new(10, 11)));
        assert!(schedule.is_empty());
    }

    #[rstest]
    fn window_displays_both_bounds() {
        assert_eq!(BreakWindow::new(12, 13).to_string(), "12:00 PM - 1:00 PM");
    }
}
