//! Simulation time and availability intervals.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// A point on the simulation timeline, in seconds.
///
/// Always finite, which is what makes the total ordering below sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Create a time from seconds; non-finite input is rejected.
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, EntityError> {
        if !seconds.is_finite() {
            return Err(EntityError::InvalidTime(seconds));
        }
        Ok(Self(seconds))
    }

    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0
    }

    /// Offset by `seconds`. Saturates to the largest finite time instead of overflowing.
    #[inline]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        let next = self.0 + seconds;
        if next.is_finite() {
            Self(next)
        } else if next > 0.0 {
            Self(f64::MAX)
        } else {
            Self(f64::MIN)
        }
    }

    /// Signed difference `self - earlier` in seconds.
    #[inline]
    pub fn seconds_since(&self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for SimTime {
    type Error = EntityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        SimTime::from_seconds(value)
    }
}

impl From<SimTime> for f64 {
    fn from(value: SimTime) -> Self {
        value.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A span of simulation time. Endpoints are included unless flagged otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: SimTime,
    pub stop: SimTime,
    #[serde(default = "included")]
    pub is_start_included: bool,
    #[serde(default = "included")]
    pub is_stop_included: bool,
}

fn included() -> bool {
    true
}

impl TimeInterval {
    /// Closed interval `[start, stop]`.
    pub fn new(start: SimTime, stop: SimTime) -> Self {
        Self {
            start,
            stop,
            is_start_included: true,
            is_stop_included: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.start.cmp(&self.stop) {
            Ordering::Greater => true,
            Ordering::Equal => !(self.is_start_included && self.is_stop_included),
            Ordering::Less => false,
        }
    }

    pub fn contains(&self, time: SimTime) -> bool {
        if self.is_empty() {
            return false;
        }
        let after_start = match time.cmp(&self.start) {
            Ordering::Greater => true,
            Ordering::Equal => self.is_start_included,
            Ordering::Less => false,
        };
        let before_stop = match time.cmp(&self.stop) {
            Ordering::Less => true,
            Ordering::Equal => self.is_stop_included,
            Ordering::Greater => false,
        };
        after_start && before_stop
    }
}

/// Intervals kept sorted by start time. Used for entity availability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TimeInterval>", into = "Vec<TimeInterval>")]
pub struct TimeIntervalCollection {
    intervals: Vec<TimeInterval>,
}

impl TimeIntervalCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interval, keeping start order. Empty intervals are ignored.
    pub fn add_interval(&mut self, interval: TimeInterval) {
        if interval.is_empty() {
            return;
        }
        let at = self
            .intervals
            .partition_point(|existing| existing.start <= interval.start);
        self.intervals.insert(at, interval);
    }

    pub fn find_interval(&self, time: SimTime) -> Option<&TimeInterval> {
        // Intervals starting after `time` cannot contain it.
        let end = self.intervals.partition_point(|i| i.start <= time);
        self.intervals[..end].iter().rev().find(|i| i.contains(time))
    }

    #[inline]
    pub fn contains(&self, time: SimTime) -> bool {
        self.find_interval(time).is_some()
    }

    pub fn start(&self) -> Option<SimTime> {
        self.intervals.first().map(|i| i.start)
    }

    pub fn stop(&self) -> Option<SimTime> {
        self.intervals.iter().map(|i| i.stop).max()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter()
    }
}

impl From<Vec<TimeInterval>> for TimeIntervalCollection {
    fn from(intervals: Vec<TimeInterval>) -> Self {
        let mut out = Self::new();
        for interval in intervals {
            out.add_interval(interval);
        }
        out
    }
}

impl From<TimeIntervalCollection> for Vec<TimeInterval> {
    fn from(value: TimeIntervalCollection) -> Self {
        value.intervals
    }
}
