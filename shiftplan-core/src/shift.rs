//! Shift windows, the editable shift form, and its validation boundary.
//!
//! [`ShiftDraft`] mirrors what the presentation layer lets a driver edit:
//! start location, working hours and break windows entered in any order.
//! [`ShiftDraft::validate`] is the only way to obtain [`ShiftParameters`],
//! which the planner requires.

use geo::Coord;
use log::warn;
use thiserror::Error;

use crate::geometry::LatLng;
use crate::time::{BreakSchedule, BreakWindow, TimeOfDay};

/// Latest hour a shift may end at (midnight of the second day).
pub const MAX_SHIFT_HOUR: u32 = 48;

/// Errors returned when shift parameters fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftError {
    /// The shift must end after it starts.
    #[error("shift must end after it starts (start {start_hour}, end {end_hour})")]
    InvalidWindow {
        /// Requested start hour.
        start_hour: u32,
        /// Requested end hour.
        end_hour: u32,
    },
    /// The shift ends later than the supported range.
    #[error("shift end hour {end_hour} exceeds {max}", max = MAX_SHIFT_HOUR)]
    WindowTooLong {
        /// Requested end hour.
        end_hour: u32,
    },
    /// A break ends before or when it starts.
    #[error("break {index} must end after it starts")]
    InvertedBreak {
        /// Position of the break in the list.
        index: usize,
    },
    /// A break extends beyond the shift window.
    #[error("break {index} lies outside the shift window")]
    BreakOutsideShift {
        /// Position of the break in the list.
        index: usize,
    },
    /// Two breaks overlap and the draft forbids overlaps.
    #[error("breaks {first} and {second} overlap")]
    OverlappingBreaks {
        /// Position of the earlier-declared break.
        first: usize,
        /// Position of the later-declared break.
        second: usize,
    },
    /// No break exists at the given position.
    #[error("no break at position {index}")]
    UnknownBreak {
        /// Requested position.
        index: usize,
    },
    /// The start location is not a valid coordinate.
    #[error("start location is not a valid coordinate")]
    InvalidLocation,
}

/// A driver's working hours. `end_hour` may exceed 24 for overnight shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftWindow {
    /// Hour the shift starts.
    pub start_hour: u32,
    /// Hour the shift ends.
    pub end_hour: u32,
}

impl ShiftWindow {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`ShiftError::InvalidWindow`] when `end_hour <= start_hour` and
    /// [`ShiftError::WindowTooLong`] when `end_hour` exceeds [`MAX_SHIFT_HOUR`].
    pub const fn new(start_hour: u32, end_hour: u32) -> Result<Self, ShiftError> {
        if end_hour <= start_hour {
            return Err(ShiftError::InvalidWindow {
                start_hour,
                end_hour,
            });
        }
        if end_hour > MAX_SHIFT_HOUR {
            return Err(ShiftError::WindowTooLong { end_hour });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Report whether `window` lies within the shift.
    #[must_use]
    pub const fn contains_break(&self, window: &BreakWindow) -> bool {
        window.start_hour >= self.start_hour && window.end_hour <= self.end_hour
    }
}

/// How [`ShiftDraft::validate`] treats overlapping break windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Accept overlaps; the first-declared window wins when skipping.
    #[default]
    Allow,
    /// Reject overlapping windows at validation time.
    Reject,
}

/// Editable shift form supplied by the presentation layer.
///
/// # Examples
/// ```
/// use shiftplan_core::{BreakWindow, ShiftDraft, geometry::lat_lng};
///
/// let mut draft = ShiftDraft::new(lat_lng(1.3521, 103.8198), 6, 25);
/// draft.add_break(BreakWindow::new(12, 13));
/// let params = draft.validate()?;
/// assert_eq!(params.window().end_hour, 25);
/// # Ok::<(), shiftplan_core::ShiftError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftDraft {
    start: Coord<f64>,
    start_hour: u32,
    end_hour: u32,
    breaks: BreakSchedule,
    overlap_policy: OverlapPolicy,
}

impl ShiftDraft {
    /// Start a draft with no breaks.
    #[must_use]
    pub const fn new(start: Coord<f64>, start_hour: u32, end_hour: u32) -> Self {
        Self {
            start,
            start_hour,
            end_hour,
            breaks: BreakSchedule::empty(),
            overlap_policy: OverlapPolicy::Allow,
        }
    }

    /// Choose how overlapping breaks are treated.
    #[must_use]
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Current break windows in entry order.
    #[must_use]
    pub const fn breaks(&self) -> &BreakSchedule {
        &self.breaks
    }

    /// Move the start location.
    pub const fn set_start(&mut self, start: Coord<f64>) {
        self.start = start;
    }

    /// Change the working hours, clamping every break into the new window.
    ///
    /// Breaks are only clamped when the new window is well ordered; an
    /// inverted window is reported later by [`validate`](Self::validate).
    pub fn set_window(&mut self, start_hour: u32, end_hour: u32) {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        if start_hour > end_hour {
            return;
        }
        for (index, before, after) in self.breaks.clamp_to(start_hour, end_hour) {
            warn!(
                "break {index} clamped from {before} to {after} to fit shift {start_hour}-{end_hour}"
            );
        }
    }

    /// Append a break window.
    pub fn add_break(&mut self, window: BreakWindow) {
        self.breaks.push(window);
    }

    /// Replace the break at `index`.
    ///
    /// # Errors
    /// Returns [`ShiftError::UnknownBreak`] when `index` is out of range.
    pub fn edit_break(&mut self, index: usize, window: BreakWindow) -> Result<(), ShiftError> {
        self.breaks
            .replace(index, window)
            .map(|_| ())
            .ok_or(ShiftError::UnknownBreak { index })
    }

    /// Remove the break at `index`.
    ///
    /// # Errors
    /// Returns [`ShiftError::UnknownBreak`] when `index` is out of range.
    pub fn remove_break(&mut self, index: usize) -> Result<BreakWindow, ShiftError> {
        self.breaks
            .remove(index)
            .ok_or(ShiftError::UnknownBreak { index })
    }

    /// Validate the draft into immutable [`ShiftParameters`].
    ///
    /// # Errors
    /// Returns the first [`ShiftError`] found, checking the location, the
    /// window, each break in order, then overlaps.
    pub fn validate(&self) -> Result<ShiftParameters, ShiftError> {
        if !LatLng::from(self.start).is_valid() {
            return Err(ShiftError::InvalidLocation);
        }
        let window = ShiftWindow::new(self.start_hour, self.end_hour)?;
        for (index, brk) in self.breaks.windows().iter().enumerate() {
            if !brk.is_well_formed() {
                return Err(ShiftError::InvertedBreak { index });
            }
            if !window.contains_break(brk) {
                return Err(ShiftError::BreakOutsideShift { index });
            }
        }
        if self.overlap_policy == OverlapPolicy::Reject
            && let Some((first, second)) = self.breaks.first_overlap()
        {
            return Err(ShiftError::OverlappingBreaks { first, second });
        }
        Ok(ShiftParameters {
            start: self.start,
            window,
            breaks: self.breaks.clone(),
        })
    }
}

/// Validated, immutable inputs for one planning session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShiftParameters {
    start: Coord<f64>,
    window: ShiftWindow,
    breaks: BreakSchedule,
}

impl ShiftParameters {
    /// Driver's starting position.
    #[must_use]
    pub const fn start(&self) -> Coord<f64> {
        self.start
    }

    /// Working hours.
    #[must_use]
    pub const fn window(&self) -> ShiftWindow {
        self.window
    }

    /// Break windows in entry order.
    #[must_use]
    pub const fn breaks(&self) -> &BreakSchedule {
        &self.breaks
    }

    /// Time of the first stop.
    #[must_use]
    pub const fn start_time(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.window.start_hour)
    }
}

/// Wire form of a shift draft.
///
/// ```json
/// {
///   "start": { "lat": 1.3521, "lng": 103.8198 },
///   "start_hour": 6,
///   "end_hour": 25,
///   "breaks": [{ "start_hour": 12, "end_hour": 13 }]
/// }
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShiftRequest {
    /// Driver's starting position.
    pub start: LatLng,
    /// Hour the shift starts.
    pub start_hour: u32,
    /// Hour the shift ends.
    pub end_hour: u32,
    /// Break windows in entry order.
    #[serde(default)]
    pub breaks: Vec<BreakWindow>,
    /// Reject overlapping breaks instead of resolving them first-match.
    #[serde(default)]
    pub reject_overlapping_breaks: bool,
}

#[cfg(feature = "serde")]
impl ShiftRequest {
    /// Convert into an editable draft.
    #[must_use]
    pub fn into_draft(self) -> ShiftDraft {
        let policy = if self.reject_overlapping_breaks {
            OverlapPolicy::Reject
        } else {
            OverlapPolicy::Allow
        };
        let mut draft = ShiftDraft::new(self.start.into(), self.start_hour, self.end_hour)
            .with_overlap_policy(policy);
        for window in self.breaks {
            draft.add_break(window);
        }
        draft
    }

    /// Convert and validate in one step.
    ///
    /// # Errors
    /// Propagates [`ShiftDraft::validate`] failures.
    pub fn validate(self) -> Result<ShiftParameters, ShiftError> {
        self.into_draft().validate()
    }
}
