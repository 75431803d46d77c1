//! Sampled property contract.
//!
//! A property is a pure function of time that yields a value or "not applicable".
//! Callers on the hot path use the `_into` helpers with a reusable result buffer;
//! the buffer is overwritten on every call and must not be retained past the call
//! that filled it.

use std::fmt;

use crate::time::{SimTime, TimeInterval};

/// A time-indexed value source.
pub trait Property<T>: fmt::Debug {
    /// Value at `time`, or `None` when the property has no value there.
    fn value(&self, time: SimTime) -> Option<T>;

    /// Write the value at `time` into `result`. Returns false and leaves `result`
    /// untouched when not applicable.
    fn value_into(&self, time: SimTime, result: &mut T) -> bool {
        match self.value(time) {
            Some(v) => {
                *result = v;
                true
            }
            None => false,
        }
    }

    /// True when the value never varies with time.
    fn is_constant(&self) -> bool {
        false
    }
}

/// Sample `property` at `time`; an absent property is not applicable.
#[inline]
pub fn value_or_undefined<T>(property: Option<&dyn Property<T>>, time: SimTime) -> Option<T> {
    property.and_then(|p| p.value(time))
}

/// Like [`value_or_undefined`] but writes into `result` instead of returning a fresh value.
#[inline]
pub fn value_or_undefined_into<'a, T>(
    property: Option<&dyn Property<T>>,
    time: SimTime,
    result: &'a mut T,
) -> Option<&'a T> {
    match property {
        Some(p) if p.value_into(time, result) => Some(&*result),
        _ => None,
    }
}

/// Sample `property` at `time`, substituting `default` when not applicable.
#[inline]
pub fn value_or_default<T>(property: Option<&dyn Property<T>>, time: SimTime, default: T) -> T {
    value_or_undefined(property, time).unwrap_or(default)
}

/// Like [`value_or_default`] but writes into `result`; `default` is copied in when
/// the property is not applicable.
#[inline]
pub fn value_or_default_into<'a, T: Clone>(
    property: Option<&dyn Property<T>>,
    time: SimTime,
    default: &T,
    result: &'a mut T,
) -> &'a T {
    let written = match property {
        Some(p) => p.value_into(time, result),
        None => false,
    };
    if !written {
        result.clone_from(default);
    }
    result
}

/// The same value at every time.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantProperty<T> {
    value: T,
}

impl<T> ConstantProperty<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Clone + fmt::Debug> Property<T> for ConstantProperty<T> {
    fn value(&self, _time: SimTime) -> Option<T> {
        Some(self.value.clone())
    }

    fn value_into(&self, _time: SimTime, result: &mut T) -> bool {
        result.clone_from(&self.value);
        true
    }

    fn is_constant(&self) -> bool {
        true
    }
}

/// Piecewise-constant value: one value per interval, not applicable elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIntervalCollectionProperty<T> {
    intervals: Vec<(TimeInterval, T)>,
}

impl<T> Default for TimeIntervalCollectionProperty<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }
}

impl<T> TimeIntervalCollectionProperty<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interval carrying `value`, keeping start order. Empty intervals are ignored.
    pub fn add_interval(&mut self, interval: TimeInterval, value: T) {
        if interval.is_empty() {
            return;
        }
        let at = self
            .intervals
            .partition_point(|(existing, _)| existing.start <= interval.start);
        self.intervals.insert(at, (interval, value));
    }

    pub fn with_interval(mut self, interval: TimeInterval, value: T) -> Self {
        self.add_interval(interval, value);
        self
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn find(&self, time: SimTime) -> Option<&T> {
        let end = self.intervals.partition_point(|(i, _)| i.start <= time);
        self.intervals[..end]
            .iter()
            .rev()
            .find(|(i, _)| i.contains(time))
            .map(|(_, v)| v)
    }
}

impl<T: Clone + fmt::Debug> Property<T> for TimeIntervalCollectionProperty<T> {
    fn value(&self, time: SimTime) -> Option<T> {
        self.find(time).cloned()
    }

    fn value_into(&self, time: SimTime, result: &mut T) -> bool {
        match self.find(time) {
            Some(v) => {
                result.clone_from(v);
                true
            }
            None => false,
        }
    }
}

type Callback<T> = Box<dyn Fn(SimTime) -> Option<T>>;

/// A property computed by a closure, e.g. values driven by a host application.
pub struct CallbackProperty<T> {
    callback: Callback<T>,
    is_constant: bool,
}

impl<T> CallbackProperty<T> {
    pub fn new(callback: impl Fn(SimTime) -> Option<T> + 'static, is_constant: bool) -> Self {
        Self {
            callback: Box::new(callback),
            is_constant,
        }
    }
}

impl<T> fmt::Debug for CallbackProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProperty")
            .field("is_constant", &self.is_constant)
            .finish_non_exhaustive()
    }
}

impl<T> Property<T> for CallbackProperty<T> {
    fn value(&self, time: SimTime) -> Option<T> {
        (self.callback)(time)
    }

    fn is_constant(&self) -> bool {
        self.is_constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Cartesian3;

    fn t(s: f64) -> SimTime {
        SimTime::from_seconds(s).unwrap()
    }

    #[test]
    fn absent_property_is_not_applicable() {
        assert_eq!(value_or_undefined::<f64>(None, t(0.0)), None);
        assert_eq!(value_or_default::<f64>(None, t(0.0), 1.0), 1.0);
    }

    #[test]
    fn default_into_overwrites_stale_buffer() {
        let mut scratch = Cartesian3::new(9.0, 9.0, 9.0);
        let out = value_or_default_into(None, t(0.0), &Cartesian3::ZERO, &mut scratch);
        assert_eq!(*out, Cartesian3::ZERO);

        let p = ConstantProperty::new(Cartesian3::new(1.0, 2.0, 3.0));
        let p: &dyn Property<Cartesian3> = &p;
        let out = value_or_default_into(Some(p), t(0.0), &Cartesian3::ZERO, &mut scratch);
        assert_eq!(*out, Cartesian3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn undefined_into_leaves_buffer_when_not_applicable() {
        let p = TimeIntervalCollectionProperty::new()
            .with_interval(TimeInterval::new(t(0.0), t(1.0)), 5.0);
        let p: &dyn Property<f64> = &p;
        let mut scratch = 7.0;
        assert_eq!(value_or_undefined_into(Some(p), t(2.0), &mut scratch), None);
        assert_eq!(scratch, 7.0);
        assert_eq!(value_or_undefined_into(Some(p), t(0.5), &mut scratch), Some(&5.0));
    }

    #[test]
    fn interval_property_picks_containing_interval() {
        let p = TimeIntervalCollectionProperty::new()
            .with_interval(TimeInterval::new(t(10.0), t(20.0)), "late")
            .with_interval(TimeInterval::new(t(0.0), t(10.0)), "early");
        assert_eq!(p.value(t(5.0)), Some("early"));
        assert_eq!(p.value(t(15.0)), Some("late"));
        assert_eq!(p.value(t(25.0)), None);
    }

    #[test]
    fn callback_property_forwards_time() {
        let p = CallbackProperty::new(|time: SimTime| Some(time.as_seconds() * 2.0), false);
        assert_eq!(p.value(t(3.0)), Some(6.0));
        assert!(!p.is_constant());
    }
}
