//! Keyframed properties.
//!
//! Model:
//! - Samples are kept sorted by time; adding a sample at an existing time replaces it.
//! - Between samples the value is interpolated (`Linear`) or held from the left (`Hold`).
//! - Outside the sampled range the property is not applicable unless the matching
//!   extrapolation is `Hold`, which clamps to the first/last sample.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interp::Interpolate;
use crate::property::Property;
use crate::time::SimTime;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationAlgorithm {
    #[default]
    Linear,
    Hold,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationType {
    #[default]
    None,
    Hold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SampledProperty<T> {
    times: Vec<SimTime>,
    values: Vec<T>,
    interpolation: InterpolationAlgorithm,
    forward_extrapolation: ExtrapolationType,
    backward_extrapolation: ExtrapolationType,
}

impl<T> Default for SampledProperty<T> {
    fn default() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
            interpolation: InterpolationAlgorithm::default(),
            forward_extrapolation: ExtrapolationType::default(),
            backward_extrapolation: ExtrapolationType::default(),
        }
    }
}

impl<T: Interpolate> SampledProperty<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationAlgorithm) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_extrapolation(
        mut self,
        backward: ExtrapolationType,
        forward: ExtrapolationType,
    ) -> Self {
        self.backward_extrapolation = backward;
        self.forward_extrapolation = forward;
        self
    }

    pub fn with_sample(mut self, time: SimTime, value: T) -> Self {
        self.add_sample(time, value);
        self
    }

    /// Insert a sample keeping time order; an existing sample at `time` is replaced.
    pub fn add_sample(&mut self, time: SimTime, value: T) {
        match self.times.binary_search(&time) {
            Ok(i) => self.values[i] = value,
            Err(i) => {
                self.times.insert(i, time);
                self.values.insert(i, value);
            }
        }
    }

    pub fn add_samples(&mut self, samples: impl IntoIterator<Item = (SimTime, T)>) {
        for (time, value) in samples {
            self.add_sample(time, value);
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[SimTime] {
        &self.times
    }

    pub fn interpolation(&self) -> InterpolationAlgorithm {
        self.interpolation
    }

    /// Index of the sample to hold, or the segment `(left, right, t)` to blend.
    fn locate(&self, time: SimTime) -> Option<Located> {
        let n = self.times.len();
        if n == 0 {
            return None;
        }
        if time < self.times[0] {
            return match self.backward_extrapolation {
                ExtrapolationType::None => None,
                ExtrapolationType::Hold => Some(Located::At(0)),
            };
        }
        if time > self.times[n - 1] {
            return match self.forward_extrapolation {
                ExtrapolationType::None => None,
                ExtrapolationType::Hold => Some(Located::At(n - 1)),
            };
        }
        // Number of samples at or before `time`; at least 1 here.
        let upper = self.times.partition_point(|t| *t <= time);
        let left = upper - 1;
        if upper == n || self.times[left] == time {
            return Some(Located::At(left));
        }
        match self.interpolation {
            InterpolationAlgorithm::Hold => Some(Located::At(left)),
            InterpolationAlgorithm::Linear => {
                let t0 = self.times[left];
                let t1 = self.times[upper];
                let span = t1.seconds_since(t0).max(f64::EPSILON);
                let local = (time.seconds_since(t0) / span).clamp(0.0, 1.0);
                Some(Located::Between(left, upper, local))
            }
        }
    }
}

enum Located {
    At(usize),
    Between(usize, usize, f64),
}

impl<T: Interpolate + fmt::Debug> Property<T> for SampledProperty<T> {
    fn value(&self, time: SimTime) -> Option<T> {
        Some(match self.locate(time)? {
            Located::At(i) => self.values[i].clone(),
            Located::Between(a, b, t) => T::interpolate(&self.values[a], &self.values[b], t),
        })
    }

    fn value_into(&self, time: SimTime, result: &mut T) -> bool {
        match self.locate(time) {
            None => false,
            Some(Located::At(i)) => {
                result.clone_from(&self.values[i]);
                true
            }
            Some(Located::Between(a, b, t)) => {
                *result = T::interpolate(&self.values[a], &self.values[b], t);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Cartesian3;

    fn t(s: f64) -> SimTime {
        SimTime::from_seconds(s).unwrap()
    }

    fn ramp() -> SampledProperty<f64> {
        SampledProperty::new()
            .with_sample(t(10.0), 100.0)
            .with_sample(t(0.0), 0.0)
    }

    #[test]
    fn linear_between_samples() {
        let p = ramp();
        assert_eq!(p.value(t(0.0)), Some(0.0));
        assert_eq!(p.value(t(2.5)), Some(25.0));
        assert_eq!(p.value(t(10.0)), Some(100.0));
    }

    #[test]
    fn not_applicable_outside_range_by_default() {
        let p = ramp();
        assert_eq!(p.value(t(-0.1)), None);
        assert_eq!(p.value(t(10.1)), None);
    }

    #[test]
    fn hold_extrapolation_clamps() {
        let p = ramp().with_extrapolation(ExtrapolationType::Hold, ExtrapolationType::None);
        assert_eq!(p.value(t(-5.0)), Some(0.0));
        assert_eq!(p.value(t(15.0)), None);
    }

    #[test]
    fn hold_interpolation_steps() {
        let p = ramp().with_interpolation(InterpolationAlgorithm::Hold);
        assert_eq!(p.value(t(9.9)), Some(0.0));
    }

    #[test]
    fn re_adding_a_time_replaces_sample() {
        let mut p = ramp();
        p.add_sample(t(10.0), 50.0);
        assert_eq!(p.len(), 2);
        assert_eq!(p.value(t(5.0)), Some(25.0));
    }

    #[test]
    fn value_into_reuses_buffer() {
        let p = SampledProperty::new()
            .with_sample(t(0.0), Cartesian3::new(0.0, 0.0, 0.0))
            .with_sample(t(4.0), Cartesian3::new(4.0, 8.0, -4.0));
        let mut scratch = Cartesian3::ZERO;
        assert!(p.value_into(t(1.0), &mut scratch));
        assert_eq!(scratch, Cartesian3::new(1.0, 2.0, -1.0));
        assert!(!p.value_into(t(5.0), &mut scratch));
        assert_eq!(scratch, Cartesian3::new(1.0, 2.0, -1.0));
    }

    #[test]
    fn empty_property_is_never_applicable() {
        let p: SampledProperty<f64> = SampledProperty::new();
        assert_eq!(p.value(t(0.0)), None);
    }
}
